//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here. Given the same seed, config
//! and inputs, a run replays identically.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::fighter::Fighter;
use super::lanes::LaneLayout;
use super::obstacle::GroupId;
use super::track::ObstacleTrack;
use crate::config::{ConfigError, GameConfig};
use crate::score::Scoreboard;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Waiting for the first flap
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Things the presentation layer reacts to (score display, audio, meshes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    RunStarted,
    /// Fighter cleared a generation
    Passed { score: u64 },
    /// Fighter hit a solid slice while crossing a group
    Collision { group: GroupId, lane: u32 },
    /// Fighter fell below the ground level
    GroundCollision,
    NewBest { score: u64 },
    /// Create a visual for this group
    GroupSpawned { id: GroupId },
    /// Drop the visual for this group
    GroupRetired { id: GroupId },
    Paused,
    Resumed,
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gap selection RNG
    pub(crate) rng: Pcg32,
    pub config: GameConfig,
    pub phase: GamePhase,
    pub fighter: Fighter,
    pub track: ObstacleTrack,
    pub score: Scoreboard,
    /// Simulation ticks in the current run
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = LaneLayout::from_config(&config.lanes)?;
        let fighter = Fighter::new(config.fighter, layout)?;
        let track = ObstacleTrack::new(config.track, layout)?;

        log::info!(
            "New game: seed {}, {} lanes, {} generations in flight",
            seed,
            layout.count(),
            config.track.groups_in_flight
        );

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            phase: GamePhase::Ready,
            fighter,
            track,
            score: Scoreboard::new(),
            time_ticks: 0,
        })
    }

    /// Fighter position including its depth plane
    pub fn fighter_position(&self) -> Vec3 {
        self.fighter.position().extend(self.config.fighter_depth)
    }

    /// Back to Ready with a fresh fighter and an empty track. The best score
    /// and the RNG stream carry over, so the next run gets new gaps.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        let mut events: Vec<GameEvent> = self
            .track
            .reset()
            .into_iter()
            .map(|id| GameEvent::GroupRetired { id })
            .collect();
        self.fighter.reset();
        self.score.reset_current();
        self.time_ticks = 0;
        self.phase = GamePhase::Ready;
        events.push(GameEvent::Restarted);
        events
    }

    /// Close the run: phase to GameOver and record the score
    pub(crate) fn end_run(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = GamePhase::GameOver;
        log::info!(
            "Run over after {} ticks with score {}",
            self.time_ticks,
            self.score.current
        );
        if let Some(best) = self.score.record_run() {
            events.push(GameEvent::NewBest { score: best });
        }
    }
}
