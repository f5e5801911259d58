//! Engine configuration.

use std::time::Duration;

use floodpath_paths::{Adjacency, DEFAULT_MAX_TRIALS};

/// Which solver the orchestrator runs for each start.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Randomized flood, best of `max_trials + 1` runs.
    #[default]
    Stochastic,
    /// Deterministic A*.
    AStar,
}

/// Configuration for creating an [`Engine`](crate::Engine).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Map rows.
    pub width: i32,
    /// Map columns.
    pub height: i32,
    pub adjacency: Adjacency,
    pub strategy: Strategy,
    /// Extra flood trials after the first success.
    pub max_trials: usize,
    /// Wall-clock cap on flood trials per start.
    pub time_budget: Option<Duration>,
    /// Fixed RNG seed. Each search derives its own seed from it, so a
    /// session replays identically.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            adjacency: Adjacency::Cardinal,
            strategy: Strategy::Stochastic,
            max_trials: DEFAULT_MAX_TRIALS,
            time_budget: None,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_adjacency(mut self, adjacency: Adjacency) -> Self {
        self.adjacency = adjacency;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_trials(mut self, max_trials: usize) -> Self {
        self.max_trials = max_trials;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
