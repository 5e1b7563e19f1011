//! Lane Flyer - A lane-hopping 3D pipe-dodging flight game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fighter kinematics, obstacle track, tick driver)
//! - `config`: Data-driven game tuning with validation
//! - `score`: Current/best score bookkeeping
//! - `web`: wasm-bindgen facade for the browser renderer (wasm32 only)

pub mod config;
pub mod score;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, Difficulty, FighterConfig, GameConfig, LaneConfig, TrackConfig};
pub use score::Scoreboard;

/// Game configuration constants
pub mod consts {
    /// Lane layout defaults
    pub const LANE_COUNT: u32 = 5;
    pub const LANE_SPAN: f32 = 10.0;

    /// Fighter defaults (all per-tick quantities)
    pub const FLAP_STRENGTH: f32 = 0.12;
    pub const GRAVITY: f32 = -0.006;
    pub const CEILING: f32 = 4.0;
    /// Ticks a lane change takes to ease into the new lane
    pub const LANE_TRANSITION_TICKS: u32 = 12;

    /// Obstacle track defaults
    pub const GROUPS_IN_FLIGHT: u32 = 3;
    pub const HEIGHT_TOTAL: f32 = 8.0;
    pub const SPAWN_DEPTH: f32 = -15.0;
    pub const RETIRE_DEPTH: f32 = 0.5;
    pub const ADVANCE_SPEED: f32 = 0.1;
    pub const SEGMENTS_PER_GROUP: u32 = 5;
    /// A gap must sit strictly inside the group, so at least three slices
    pub const MIN_SEGMENTS: u32 = 3;
    /// Slices are drawn as unit-depth boxes
    pub const SEGMENT_HALF_DEPTH: f32 = 0.5;

    /// Ground plane below the pipes
    pub const GROUND_LEVEL: f32 = -5.0;
    /// Depth of the fighter's plane (obstacles travel toward +z)
    pub const FIGHTER_DEPTH: f32 = 0.0;
}
