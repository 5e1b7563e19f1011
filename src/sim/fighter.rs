//! Fighter kinematics
//!
//! Vertical motion is plain per-tick Euler integration under constant gravity.
//! Horizontal motion is lane-based: a flap picks a neighbouring lane and the
//! fighter eases into it over a fixed number of ticks, so the hit-test point
//! never teleports between lanes.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::lanes::LaneLayout;
use crate::config::{ConfigError, FighterConfig};

/// Direction of a lane change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneShift {
    Left,
    Right,
}

impl LaneShift {
    #[inline]
    pub fn delta(self) -> i32 {
        match self {
            LaneShift::Left => -1,
            LaneShift::Right => 1,
        }
    }
}

/// A lane shift other than -1 or +1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidLaneShift(pub i32);

impl fmt::Display for InvalidLaneShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lane shift must be -1 or +1 (got {})", self.0)
    }
}

impl std::error::Error for InvalidLaneShift {}

impl TryFrom<i32> for LaneShift {
    type Error = InvalidLaneShift;

    fn try_from(direction: i32) -> Result<Self, Self::Error> {
        match direction {
            -1 => Ok(LaneShift::Left),
            1 => Ok(LaneShift::Right),
            other => Err(InvalidLaneShift(other)),
        }
    }
}

/// Player intent for a single tick, consumed once and then cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlapIntent {
    #[default]
    None,
    Left,
    Right,
}

impl FlapIntent {
    pub fn shift(self) -> Option<LaneShift> {
        match self {
            FlapIntent::None => None,
            FlapIntent::Left => Some(LaneShift::Left),
            FlapIntent::Right => Some(LaneShift::Right),
        }
    }
}

impl From<LaneShift> for FlapIntent {
    fn from(shift: LaneShift) -> Self {
        match shift {
            LaneShift::Left => FlapIntent::Left,
            LaneShift::Right => FlapIntent::Right,
        }
    }
}

/// The player's craft. Serialize-only: build it with `Fighter::new`.
#[derive(Debug, Clone, Serialize)]
pub struct Fighter {
    layout: LaneLayout,
    config: FighterConfig,
    /// Vertical position
    y: f32,
    /// Vertical velocity (per tick)
    velocity: f32,
    lane: u32,
    /// Horizontal position when the current lane change began
    previous_x: f32,
    /// Current (interpolated) horizontal position
    x: f32,
    /// Ticks left in the current lane change, counts down to 0
    transition_elapsed: u32,
}

impl Fighter {
    pub fn new(config: FighterConfig, layout: LaneLayout) -> Result<Self, ConfigError> {
        config.validate(layout.count())?;
        let x = layout.x(config.start_lane);
        Ok(Self {
            layout,
            config,
            y: config.start_height,
            velocity: 0.0,
            lane: config.start_lane,
            previous_x: x,
            x,
            transition_elapsed: 0,
        })
    }

    /// Restore the starting state
    pub fn reset(&mut self) {
        let x = self.layout.x(self.config.start_lane);
        self.y = self.config.start_height;
        self.velocity = 0.0;
        self.lane = self.config.start_lane;
        self.previous_x = x;
        self.x = x;
        self.transition_elapsed = 0;
    }

    /// Flap: upward impulse plus a move to the neighbouring lane
    /// (clamped at the outer lanes, where only the impulse applies).
    pub fn flap(&mut self, shift: LaneShift) {
        self.previous_x = self.x;
        self.lane = self.layout.offset_lane(self.lane, shift.delta());
        self.transition_elapsed = self.config.transition_ticks;
        self.velocity = self.config.flap_strength;
    }

    /// Advance one tick.
    ///
    /// Falling below the ground is not handled here; the caller decides
    /// whether that ends the run.
    pub fn update(&mut self) {
        self.transition_elapsed = self.transition_elapsed.saturating_sub(1);
        self.x = self.interpolated_x();

        self.y += self.velocity;
        if self.y > self.config.ceiling {
            self.y = self.config.ceiling;
            self.velocity = 0.0;
        }
        self.velocity += self.config.gravity;
    }

    /// Pin to the ground and drop any downward velocity
    pub fn clamp_to_ground(&mut self, ground_level: f32) {
        if self.y < ground_level {
            self.y = ground_level;
            self.velocity = self.velocity.max(0.0);
        }
    }

    fn interpolated_x(&self) -> f32 {
        let duration = self.config.transition_ticks as f32;
        let weight = (duration - self.transition_elapsed as f32) / duration;
        let target = self.layout.x(self.lane);
        self.previous_x + (target - self.previous_x) * weight
    }

    /// (horizontal, vertical)
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn lane(&self) -> u32 {
        self.lane
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Ticks left before the fighter settles in its lane
    #[inline]
    pub fn transition_remaining(&self) -> u32 {
        self.transition_elapsed
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition_elapsed > 0
    }

    pub fn layout(&self) -> &LaneLayout {
        &self.layout
    }

    pub fn config(&self) -> &FighterConfig {
        &self.config
    }
}
