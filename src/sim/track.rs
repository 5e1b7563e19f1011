//! Obstacle track: spawn, advance, pass/collision detection, retire
//!
//! Groups are spawned a generation at a time (one per lane) at `spawn_depth`
//! and scroll toward +z by `advance_speed` each update. A new generation is
//! released once the nearest live generation has moved a fixed spacing away
//! from the spawn depth, so generations are evenly spaced no matter the speed.

use glam::Vec3;
use rand::Rng;
use serde::Serialize;

use super::lanes::LaneLayout;
use super::obstacle::{GroupId, ObstacleGroup};
use crate::config::{ConfigError, TrackConfig};
use crate::consts::SEGMENT_HALF_DEPTH;

/// Read-only view of one slice handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentView {
    pub group: GroupId,
    pub lane: u32,
    pub index: u32,
    pub center: Vec3,
    pub half_extents: Vec3,
    pub is_solid: bool,
    /// Open slice, drawn as a marker (or not at all)
    pub is_gap_marker: bool,
}

/// Live obstacle groups plus spawn bookkeeping
#[derive(Debug, Clone)]
pub struct ObstacleTrack {
    config: TrackConfig,
    layout: LaneLayout,
    spawn_threshold: f32,
    /// Depth of the nearest (least advanced) generation
    nearest_depth: f32,
    /// Live groups in spawn order
    groups: Vec<ObstacleGroup>,
    next_id: GroupId,
    generations: u64,
}

impl ObstacleTrack {
    pub fn new(config: TrackConfig, layout: LaneLayout) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            layout,
            spawn_threshold: config.spawn_threshold(),
            nearest_depth: config.retire_depth,
            groups: Vec::new(),
            next_id: 1,
            generations: 0,
        })
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    pub fn spawn_threshold(&self) -> f32 {
        self.spawn_threshold
    }

    pub fn nearest_depth(&self) -> f32 {
        self.nearest_depth
    }

    pub fn groups(&self) -> &[ObstacleGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Generations spawned since the last reset
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Maximum live groups
    pub fn capacity(&self) -> usize {
        self.config.groups_in_flight as usize * self.layout.count() as usize
    }

    /// Spawn a generation if one is due, then advance every group.
    /// Returns the ids spawned by this call.
    pub fn update<R: Rng>(&mut self, rng: &mut R) -> Vec<GroupId> {
        // With one generation in flight the threshold equals retire_depth, so
        // an empty track must spawn unconditionally
        let due = self.groups.is_empty() || self.nearest_depth > self.spawn_threshold;
        let spawned = if self.groups.len() < self.capacity() && due {
            self.spawn_generation(rng)
        } else {
            Vec::new()
        };

        self.nearest_depth = self.config.retire_depth;
        for group in &mut self.groups {
            group.advance(self.config.advance_speed);
            self.nearest_depth = self.nearest_depth.min(group.z);
        }

        spawned
    }

    fn spawn_generation<R: Rng>(&mut self, rng: &mut R) -> Vec<GroupId> {
        let width = self.layout.lane_width();
        // Outer walls only make sense when there are interior lanes left to fly through
        let walls = self.config.solid_boundary_lanes && self.layout.count() >= 3;

        let mut ids = Vec::with_capacity(self.layout.count() as usize);
        for lane in 0..self.layout.count() {
            let allow_gap = !(walls && self.layout.is_boundary(lane));
            let id = self.next_id;
            // segments_per_group was validated in `new`
            let mut group = match ObstacleGroup::new(
                id,
                lane,
                width,
                self.config.height_total,
                self.config.segments_per_group,
                allow_gap,
                rng,
            ) {
                Ok(group) => group,
                Err(err) => {
                    log::error!("Skipping group in lane {}: {}", lane, err);
                    continue;
                }
            };
            self.next_id += 1;
            // Place twice so z_previous starts at the spawn depth too
            group.set_position(self.layout.x(lane), self.config.spawn_depth);
            group.set_position(self.layout.x(lane), self.config.spawn_depth);
            self.groups.push(group);
            ids.push(id);
        }

        self.nearest_depth = self.config.spawn_depth;
        self.generations += 1;
        log::debug!(
            "Spawned generation {} ({} groups, {} live)",
            self.generations,
            ids.len(),
            self.groups.len()
        );
        ids
    }

    /// Groups whose plane swept over the position's depth on the last update
    pub fn just_passed(&self, position: Vec3) -> impl Iterator<Item = &ObstacleGroup> {
        self.groups.iter().filter(move |g| g.has_just_passed(position.z))
    }

    /// Did any group cross the position's depth on the last update.
    /// One-shot: true only on the tick of the crossing.
    pub fn has_just_passed(&self, position: Vec3) -> bool {
        self.just_passed(position).next().is_some()
    }

    /// First just-passed group whose solid slices contain the position
    pub fn colliding_group(&self, position: Vec3) -> Option<&ObstacleGroup> {
        self.just_passed(position).find(|g| g.collides_at(position))
    }

    pub fn collides(&self, position: Vec3) -> bool {
        self.colliding_group(position).is_some()
    }

    /// Remove groups past `retire_depth`. Returns the removed ids.
    pub fn retire_completed(&mut self) -> Vec<GroupId> {
        let retire_depth = self.config.retire_depth;
        let mut retired = Vec::new();
        self.groups.retain(|g| {
            if g.z > retire_depth {
                retired.push(g.id);
                false
            } else {
                true
            }
        });

        if self.groups.is_empty() {
            self.nearest_depth = retire_depth;
        }
        if !retired.is_empty() {
            log::debug!("Retired {} groups ({} live)", retired.len(), self.groups.len());
        }
        retired
    }

    /// Drop every group and return to the spawn-ready state.
    /// Returns the dropped ids so render handles can be released.
    pub fn reset(&mut self) -> Vec<GroupId> {
        let dropped = self.groups.drain(..).map(|g| g.id).collect();
        self.nearest_depth = self.config.retire_depth;
        self.generations = 0;
        dropped
    }

    /// The generation closest to `depth` that has not yet reached it
    pub fn approaching(&self, depth: f32) -> impl Iterator<Item = &ObstacleGroup> {
        let nearest = self
            .groups
            .iter()
            .filter(|g| g.z < depth)
            .map(|g| g.z)
            .fold(f32::NEG_INFINITY, f32::max);
        self.groups.iter().filter(move |g| g.z == nearest)
    }

    /// Every slice of every live group, in spawn order
    pub fn live_segments(&self) -> impl Iterator<Item = SegmentView> + '_ {
        self.groups.iter().flat_map(|group| {
            group.slices().map(move |(slice, is_solid)| SegmentView {
                group: group.id,
                lane: group.lane,
                index: slice.index,
                center: Vec3::new(slice.center.x, slice.center.y, group.z),
                half_extents: slice.half_extents.extend(SEGMENT_HALF_DEPTH),
                is_solid,
                is_gap_marker: !is_solid,
            })
        })
    }

    /// Render hook: call `f` for every live slice
    pub fn for_each_live_segment<F: FnMut(SegmentView)>(&self, f: F) {
        self.live_segments().for_each(f);
    }
}
