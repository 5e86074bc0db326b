//! Search configuration parameters.

use crate::error::MctsError;
use std::time::Duration;

/// Configuration for a UCT search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Number of select/expand/simulate/backpropagate rounds.
    pub iterations: u32,

    /// Maximum number of random moves played by the rollout of a single iteration.
    /// The rollout stops earlier if the game ends.
    pub simulations_per_iteration: u32,

    /// The `C` in UCB1. Large values spread the search wide, small values dig deep
    /// into the lines that already look good.
    pub exploration_constant: f64,

    /// Optional wall-clock budget. Checked before every iteration but the first;
    /// when exceeded the search stops and answers with what it has.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            simulations_per_iteration: 100,
            exploration_constant: 1.0,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    /// Create a small, fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            simulations_per_iteration: 50,
            exploration_constant: 1.0,
            time_limit: None,
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the rollout length bound.
    pub fn with_simulations_per_iteration(mut self, n: u32) -> Self {
        self.simulations_per_iteration = n;
        self
    }

    /// Builder pattern: set the UCB1 exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: stop searching once `limit` has elapsed.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Rejects zero iterations and a negative or non-finite exploration constant.
    pub fn validate(&self) -> Result<(), MctsError> {
        if self.iterations == 0 {
            return Err(MctsError::InvalidConfiguration {
                message: "iterations must be at least 1".to_string(),
            });
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MctsError::InvalidConfiguration {
                message: format!(
                    "exploration constant must be a finite non-negative number, got {}",
                    self.exploration_constant
                ),
            });
        }
        Ok(())
    }
}
