//! Game tuning and configuration
//!
//! Every tuning value is a named field here. Loaded from JSON by the native
//! runner or the web facade.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rejected configuration. Fatal to initialization, never produced mid-game.
#[derive(Debug)]
pub enum ConfigError {
    ZeroLanes,
    NonPositive { field: &'static str, value: f32 },
    NonFinite { field: &'static str },
    TooFewSegments { segments: u32, min: u32 },
    ZeroTransition,
    ZeroGroupsInFlight,
    StartLaneOutOfRange { lane: u32, max_lane: u32 },
    /// `low` must be strictly below `high`
    BadRange { what: &'static str, low: f32, high: f32 },
    GravityNotDownward { gravity: f32 },
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLanes => write!(f, "lane count must be at least 1"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::NonFinite { field } => write!(f, "{field} must be a finite number"),
            Self::TooFewSegments { segments, min } => {
                write!(f, "segments per group must be at least {min} (got {segments})")
            }
            Self::ZeroTransition => write!(f, "lane transition must last at least one tick"),
            Self::ZeroGroupsInFlight => write!(f, "groups in flight must be at least 1"),
            Self::StartLaneOutOfRange { lane, max_lane } => {
                write!(f, "start lane {lane} is outside [0, {max_lane}]")
            }
            Self::BadRange { what, low, high } => {
                write!(f, "{what}: expected {low} < {high}")
            }
            Self::GravityNotDownward { gravity } => {
                write!(f, "gravity must be negative (got {gravity})")
            }
            Self::Json(err) => write!(f, "invalid config JSON: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn ordered(what: &'static str, low: f32, high: f32) -> Result<(), ConfigError> {
    if low < high {
        Ok(())
    } else {
        Err(ConfigError::BadRange { what, low, high })
    }
}

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Depth units obstacles travel per tick
    pub fn advance_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.08,
            Difficulty::Normal => ADVANCE_SPEED,
            Difficulty::Hard => 0.14,
        }
    }

    /// Generations alive at once (more = tighter spacing)
    pub fn groups_in_flight(&self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Normal => GROUPS_IN_FLIGHT,
            Difficulty::Hard => 4,
        }
    }

    pub fn gravity(&self) -> f32 {
        match self {
            Difficulty::Easy => -0.005,
            Difficulty::Normal => GRAVITY,
            Difficulty::Hard => -0.007,
        }
    }

    pub fn transition_ticks(&self) -> u32 {
        match self {
            Difficulty::Easy => 14,
            Difficulty::Normal => LANE_TRANSITION_TICKS,
            Difficulty::Hard => 8,
        }
    }
}

/// Horizontal lane layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    /// Number of discrete lanes
    pub count: u32,
    /// Total width covered by all lanes, centered on x = 0
    pub span: f32,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            count: LANE_COUNT,
            span: LANE_SPAN,
        }
    }
}

impl LaneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::ZeroLanes);
        }
        positive("lanes.span", self.span)?;
        Ok(())
    }
}

/// Fighter kinematics (per-tick units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterConfig {
    pub start_lane: u32,
    pub start_height: f32,
    /// Vertical velocity set by every flap
    pub flap_strength: f32,
    /// Added to vertical velocity each tick (negative = down)
    pub gravity: f32,
    /// Highest reachable vertical position
    pub ceiling: f32,
    /// Ticks a lane change takes
    pub transition_ticks: u32,
}

impl Default for FighterConfig {
    fn default() -> Self {
        Self {
            start_lane: 0,
            start_height: 0.0,
            flap_strength: FLAP_STRENGTH,
            gravity: GRAVITY,
            ceiling: CEILING,
            transition_ticks: LANE_TRANSITION_TICKS,
        }
    }
}

impl FighterConfig {
    pub fn validate(&self, lane_count: u32) -> Result<(), ConfigError> {
        let max_lane = lane_count.saturating_sub(1);
        if self.start_lane > max_lane {
            return Err(ConfigError::StartLaneOutOfRange {
                lane: self.start_lane,
                max_lane,
            });
        }
        if self.transition_ticks == 0 {
            return Err(ConfigError::ZeroTransition);
        }
        positive("fighter.flap_strength", self.flap_strength)?;
        if finite("fighter.gravity", self.gravity)? >= 0.0 {
            return Err(ConfigError::GravityNotDownward {
                gravity: self.gravity,
            });
        }
        finite("fighter.start_height", self.start_height)?;
        finite("fighter.ceiling", self.ceiling)?;
        ordered("fighter.start_height below fighter.ceiling", self.start_height, self.ceiling)
    }
}

/// Obstacle spawning and motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Maximum concurrent spawn generations
    pub groups_in_flight: u32,
    /// Vertical extent of every obstacle group
    pub height_total: f32,
    /// Depth where new generations appear
    pub spawn_depth: f32,
    /// Depth beyond which groups are removed
    pub retire_depth: f32,
    /// Depth travelled per tick
    pub advance_speed: f32,
    pub segments_per_group: u32,
    /// First/last lane are walls with no gap (needs at least three lanes)
    pub solid_boundary_lanes: bool,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            groups_in_flight: GROUPS_IN_FLIGHT,
            height_total: HEIGHT_TOTAL,
            spawn_depth: SPAWN_DEPTH,
            retire_depth: RETIRE_DEPTH,
            advance_speed: ADVANCE_SPEED,
            segments_per_group: SEGMENTS_PER_GROUP,
            solid_boundary_lanes: true,
        }
    }
}

impl TrackConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.groups_in_flight == 0 {
            return Err(ConfigError::ZeroGroupsInFlight);
        }
        if self.segments_per_group < MIN_SEGMENTS {
            return Err(ConfigError::TooFewSegments {
                segments: self.segments_per_group,
                min: MIN_SEGMENTS,
            });
        }
        positive("track.height_total", self.height_total)?;
        positive("track.advance_speed", self.advance_speed)?;
        finite("track.spawn_depth", self.spawn_depth)?;
        finite("track.retire_depth", self.retire_depth)?;
        ordered("track.spawn_depth before track.retire_depth", self.spawn_depth, self.retire_depth)
    }

    /// Depth the nearest generation must pass before the next one spawns.
    ///
    /// Spacing depends only on the depth range and generation count, so
    /// generations stay evenly spaced whatever the advance speed.
    pub fn spawn_threshold(&self) -> f32 {
        self.spawn_depth + (self.retire_depth - self.spawn_depth) / self.groups_in_flight as f32
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub lanes: LaneConfig,
    pub fighter: FighterConfig,
    pub track: TrackConfig,
    /// Falling below this height ends (or, if non-fatal, pins) the fighter
    pub ground_level: f32,
    pub ground_is_fatal: bool,
    /// Depth plane the fighter flies in
    pub fighter_depth: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lanes: LaneConfig::default(),
            fighter: FighterConfig::default(),
            track: TrackConfig::default(),
            ground_level: GROUND_LEVEL,
            ground_is_fatal: true,
            fighter_depth: FIGHTER_DEPTH,
        }
    }
}

impl GameConfig {
    /// Create a config from a difficulty preset (applies preset defaults)
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut config = Self::default();
        config.apply_difficulty(difficulty);
        config
    }

    /// Apply a difficulty preset (updates difficulty-dependent fields)
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.track.advance_speed = difficulty.advance_speed();
        self.track.groups_in_flight = difficulty.groups_in_flight();
        self.fighter.gravity = difficulty.gravity();
        self.fighter.transition_ticks = difficulty.transition_ticks();
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = self.validate_fields();
        if let Err(err) = &result {
            log::warn!("Rejected game config: {}", err);
        }
        result
    }

    fn validate_fields(&self) -> Result<(), ConfigError> {
        self.lanes.validate()?;
        self.fighter.validate(self.lanes.count)?;
        self.track.validate()?;
        finite("ground_level", self.ground_level)?;
        finite("fighter_depth", self.fighter_depth)?;
        ordered("ground_level below fighter.start_height", self.ground_level, self.fighter.start_height)?;
        // Groups must be able to cross the fighter's plane before retiring
        ordered("track.spawn_depth before fighter_depth", self.track.spawn_depth, self.fighter_depth)?;
        if self.fighter_depth > self.track.retire_depth {
            return Err(ConfigError::BadRange {
                what: "fighter_depth not beyond track.retire_depth",
                low: self.fighter_depth,
                high: self.track.retire_depth,
            });
        }
        Ok(())
    }
}
