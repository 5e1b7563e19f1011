//! Discrete lane layout
//!
//! Lanes are equal-width horizontal corridors centered on x = 0. Lane `i` sits at
//! `(i - max_lane / 2) * span / count`, a pure function of the layout.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, LaneConfig};

/// Static lane geometry shared by the fighter and the obstacle track.
/// Deserializing goes through `LaneConfig` validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LaneConfig")]
pub struct LaneLayout {
    count: u32,
    span: f32,
}

impl LaneLayout {
    pub fn new(count: u32, span: f32) -> Result<Self, ConfigError> {
        LaneConfig { count, span }.validate()?;
        Ok(Self { count, span })
    }

    pub fn from_config(config: &LaneConfig) -> Result<Self, ConfigError> {
        Self::new(config.count, config.span)
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn max_lane(&self) -> u32 {
        self.count - 1
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.span
    }

    /// Width of a single lane
    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.span / self.count as f32
    }

    /// Horizontal center of a lane
    #[inline]
    pub fn x(&self, lane: u32) -> f32 {
        (lane as f32 - self.max_lane() as f32 / 2.0) * self.lane_width()
    }

    /// Lane centers at the two extremes: `(x(0), x(max_lane))`
    pub fn x_range(&self) -> (f32, f32) {
        (self.x(0), self.x(self.max_lane()))
    }

    /// Shift a lane by `delta`, staying inside `[0, max_lane]`
    pub fn offset_lane(&self, lane: u32, delta: i32) -> u32 {
        (lane as i64 + delta as i64).clamp(0, self.max_lane() as i64) as u32
    }

    /// First and last lane
    pub fn is_boundary(&self, lane: u32) -> bool {
        lane == 0 || lane == self.max_lane()
    }

    /// Lane whose center is closest to `x`
    pub fn nearest_lane(&self, x: f32) -> u32 {
        let raw = (x / self.lane_width() + self.max_lane() as f32 / 2.0).round();
        raw.clamp(0.0, self.max_lane() as f32) as u32
    }
}

impl TryFrom<LaneConfig> for LaneLayout {
    type Error = ConfigError;

    fn try_from(config: LaneConfig) -> Result<Self, Self::Error> {
        Self::from_config(&config)
    }
}
