//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod fighter;
pub mod lanes;
pub mod obstacle;
pub mod segment;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::{box_contains, crossed_depth};
pub use fighter::{Fighter, FlapIntent, InvalidLaneShift, LaneShift};
pub use lanes::LaneLayout;
pub use obstacle::{GroupId, ObstacleGroup};
pub use segment::SegmentBox;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use track::{ObstacleTrack, SegmentView};
