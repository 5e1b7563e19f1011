//! Score and best-score bookkeeping
//!
//! Storage is left to the embedding layer; the board is serializable so it can
//! be written wherever the host keeps its high score.

use serde::{Deserialize, Serialize};

/// Current run score plus the best seen so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Obstacle generations passed this run
    pub current: u64,
    /// Highest finished-run score
    pub best: u64,
    /// Completed runs
    #[serde(default)]
    pub runs: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously stored best score
    pub fn with_best(best: u64) -> Self {
        Self {
            best,
            ..Self::default()
        }
    }

    /// Count one passed generation, returning the new score
    pub fn increment(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// Whether the current run is ahead of the stored best
    pub fn beats_best(&self) -> bool {
        self.current > self.best
    }

    /// Close out the current run.
    /// Returns the new best score if this run set one.
    pub fn record_run(&mut self) -> Option<u64> {
        self.runs += 1;
        if self.beats_best() {
            self.best = self.current;
            log::info!("New best score: {}", self.best);
            Some(self.best)
        } else {
            None
        }
    }

    /// Clear the running score (best is kept)
    pub fn reset_current(&mut self) {
        self.current = 0;
    }
}
