//! Obstacle groups ("pipe sets")
//!
//! One group per lane per spawn generation. A group is a column of equal
//! slices; passable groups leave exactly one interior slice open as the gap,
//! wall groups leave none.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::Serialize;

use super::collision::crossed_depth;
use super::segment::SegmentBox;
use crate::config::ConfigError;
use crate::consts::MIN_SEGMENTS;

/// Stable handle for a spawned group, used by the renderer to key its meshes
pub type GroupId = u32;

/// A column of solid slices in one lane sharing a depth coordinate.
/// Serialize-only: build it with `ObstacleGroup::new`.
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleGroup {
    pub id: GroupId,
    pub lane: u32,
    /// Horizontal center
    pub x: f32,
    /// Current depth
    pub z: f32,
    /// Depth before the last move
    pub z_previous: f32,
    pub height: f32,
    pub width: f32,
    pub segment_count: u32,
    /// Open slice index, `None` for a wall
    pub gap: Option<u32>,
    /// Solid slices, bottom to top (gap omitted)
    solids: Vec<SegmentBox>,
}

impl ObstacleGroup {
    /// Build a column of `segment_count` slices at the origin.
    ///
    /// With `allow_gap` the open slice is drawn uniformly from
    /// `[1, segment_count - 2]`, never touching the top or bottom, so a
    /// passable group needs at least `MIN_SEGMENTS` slices. A wall needs one.
    pub fn new<R: Rng>(
        id: GroupId,
        lane: u32,
        width: f32,
        height: f32,
        segment_count: u32,
        allow_gap: bool,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let min = if allow_gap { MIN_SEGMENTS } else { 1 };
        if segment_count < min {
            return Err(ConfigError::TooFewSegments {
                segments: segment_count,
                min,
            });
        }
        let gap = if allow_gap {
            Some(rng.random_range(1..=segment_count - 2))
        } else {
            None
        };

        let solids = (0..segment_count)
            .filter(|&i| Some(i) != gap)
            .map(|i| SegmentBox::slice(i, segment_count, width, height))
            .collect();

        Ok(Self {
            id,
            lane,
            x: 0.0,
            z: 0.0,
            z_previous: 0.0,
            height,
            width,
            segment_count,
            gap,
            solids,
        })
    }

    /// Move the group; the old depth becomes `z_previous`
    pub fn set_position(&mut self, x: f32, z: f32) {
        self.z_previous = self.z;
        self.x = x;
        self.z = z;
        for solid in &mut self.solids {
            solid.set_x(x);
        }
    }

    /// Move toward the viewer by `dz`
    pub fn advance(&mut self, dz: f32) {
        self.set_position(self.x, self.z + dz);
    }

    pub fn solid_segments(&self) -> &[SegmentBox] {
        &self.solids
    }

    /// No gap in this column
    pub fn is_wall(&self) -> bool {
        self.gap.is_none()
    }

    /// Box for the open slice, if any
    pub fn gap_box(&self) -> Option<SegmentBox> {
        self.gap.map(|i| {
            let mut slice = SegmentBox::slice(i, self.segment_count, self.width, self.height);
            slice.set_x(self.x);
            slice
        })
    }

    /// Whether this group's plane swept over `depth` on its last move
    pub fn has_just_passed(&self, depth: f32) -> bool {
        crossed_depth(self.z_previous, self.z, depth)
    }

    /// Does the point's (x, y) fall inside any solid slice.
    /// Depth is ignored here; the track decides which groups are at the
    /// fighter's plane.
    pub fn collides_at(&self, point: Vec3) -> bool {
        let p = Vec2::new(point.x, point.y);
        self.solids.iter().any(|s| s.contains_point(p))
    }

    /// Every slice bottom to top, gap included, with a solid flag
    pub fn slices(&self) -> impl Iterator<Item = (SegmentBox, bool)> + '_ {
        let mut solids = self.solids.iter().peekable();
        (0..self.segment_count).filter_map(move |i| {
            if solids.peek().map(|s| s.index) == Some(i) {
                solids.next().map(|s| (*s, true))
            } else {
                self.gap_box().map(|g| (g, false))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn group(allow_gap: bool, segments: u32, seed: u64) -> ObstacleGroup {
        let mut rng = Pcg32::seed_from_u64(seed);
        ObstacleGroup::new(1, 0, 2.0, 8.0, segments, allow_gap, &mut rng).unwrap()
    }

    #[test]
    fn test_too_few_segments_rejected() {
        let mut rng = Pcg32::seed_from_u64(5);
        for segments in [0, 1, 2] {
            assert!(matches!(
                ObstacleGroup::new(1, 0, 2.0, 8.0, segments, true, &mut rng),
                Err(ConfigError::TooFewSegments { min: 3, .. })
            ));
        }
        assert!(matches!(
            ObstacleGroup::new(1, 0, 2.0, 8.0, 0, false, &mut rng),
            Err(ConfigError::TooFewSegments { segments: 0, min: 1 })
        ));
        // Short walls are fine
        let wall = ObstacleGroup::new(1, 0, 2.0, 8.0, 2, false, &mut rng).unwrap();
        assert!(wall.is_wall());
        assert_eq!(wall.solid_segments().len(), 2);
    }

    #[test]
    fn test_wall_has_every_slice() {
        let wall = group(false, 5, 7);
        assert!(wall.is_wall());
        assert_eq!(wall.solid_segments().len(), 5);
        assert!(wall.gap_box().is_none());
        // Whole column blocked, edges included
        for y in [-4.0, -2.5, 0.0, 1.7, 4.0] {
            assert!(wall.collides_at(Vec3::new(0.0, y, 0.0)));
        }
    }

    #[test]
    fn test_gap_is_open() {
        let pipe = group(true, 4, 42);
        let gap = pipe.gap.expect("passable group has a gap");
        assert!(gap == 1 || gap == 2);
        assert_eq!(pipe.solid_segments().len(), 3);

        let gap_center = pipe.gap_box().unwrap().center;
        assert!(!pipe.collides_at(Vec3::new(0.0, gap_center.y, 0.0)));
        // Bottom slice is always solid
        assert!(pipe.collides_at(Vec3::new(0.0, -3.5, 0.0)));
    }

    #[test]
    fn test_same_seed_same_gap() {
        let a = group(true, 5, 1234);
        let b = group(true, 5, 1234);
        assert_eq!(a.gap, b.gap);
    }

    #[test]
    fn test_set_position_tracks_previous_depth() {
        let mut pipe = group(true, 5, 3);
        pipe.set_position(2.0, -15.0);
        pipe.advance(0.1);
        assert_eq!(pipe.z_previous, -15.0);
        assert!((pipe.z - (-14.9)).abs() < 1e-5);
        assert!(pipe.solid_segments().iter().all(|s| s.center.x == 2.0));
    }

    #[test]
    fn test_collides_at_ignores_depth() {
        let mut wall = group(false, 3, 0);
        wall.set_position(1.0, -10.0);
        assert!(wall.collides_at(Vec3::new(1.0, 0.0, 5.0)));
        // Half-width is 1.0 around x = 1.0
        assert!(wall.collides_at(Vec3::new(2.0, 0.0, 0.0)));
        assert!(!wall.collides_at(Vec3::new(2.1, 0.0, 0.0)));
    }

    #[test]
    fn test_has_just_passed() {
        let mut pipe = group(true, 5, 9);
        pipe.set_position(0.0, -0.05);
        pipe.advance(0.1);
        assert!(pipe.has_just_passed(0.0));
        pipe.advance(0.1);
        assert!(!pipe.has_just_passed(0.0));
    }

    #[test]
    fn test_slices_lists_gap_in_place() {
        let pipe = group(true, 5, 11);
        let gap = pipe.gap.unwrap();
        let slices: Vec<_> = pipe.slices().collect();
        assert_eq!(slices.len(), 5);
        for (i, (slice, solid)) in slices.iter().enumerate() {
            assert_eq!(slice.index, i as u32);
            assert_eq!(*solid, slice.index != gap);
        }
    }

    proptest! {
        #[test]
        fn gap_always_interior(seed in any::<u64>(), segments in 3u32..12) {
            let pipe = group(true, segments, seed);
            let gap = pipe.gap.unwrap();
            prop_assert!(gap >= 1 && gap <= segments - 2);
            prop_assert_eq!(pipe.solid_segments().len() as u32, segments - 1);
            prop_assert!(pipe.solid_segments().iter().all(|s| s.index != gap));
        }

        #[test]
        fn solids_never_overlap(seed in any::<u64>(), segments in 3u32..12, allow_gap in any::<bool>()) {
            let pipe = group(allow_gap, segments, seed);
            for pair in pipe.solid_segments().windows(2) {
                prop_assert!(pair[0].top() <= pair[1].bottom() + 1e-4);
            }
            let covered: f32 = pipe.solid_segments().iter().map(|s| s.half_extents.y * 2.0).sum();
            let expected = if allow_gap { 8.0 * (segments - 1) as f32 / segments as f32 } else { 8.0 };
            prop_assert!((covered - expected).abs() < 1e-3);
        }
    }
}
