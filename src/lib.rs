//! A generic UCT (Upper Confidence bounds applied to Trees) Monte Carlo tree search engine.
//!
//! Given the state of a turn-based, perfect-information game, the engine grows a partial game
//! tree biased by statistical estimates and answers with the most promising next move. It knows
//! nothing about any particular game: a game only has to implement [`GameState`].
//!
//! Every iteration runs four phases:
//!
//! 1. **Selection**: walk down fully expanded nodes, picking the child with the best UCB1 score.
//! 2. **Expansion**: add one child for a randomly chosen untried move.
//! 3. **Simulation**: play random moves from there, up to a fixed number of steps.
//! 4. **Backpropagation**: fold the final score into every node on the path.
//!
//! The answer is the root's most visited child.
//!
//! # Example
//!
//! ```rust
//! use uct_search::games::nim::NimState;
//! use uct_search::random::CustomNumberGenerator;
//! use uct_search::{search, SearchConfig};
//!
//! // Five chips: taking one leaves the opponent a losing pile of four.
//! let state = NimState::new(5);
//! let config = SearchConfig::default().with_iterations(1000);
//! let mut random = CustomNumberGenerator::new(42);
//!
//! let best_move = search(state, config, &mut random).unwrap();
//! println!("The best move is: {best_move}");
//! ```

/// Search configuration.
pub mod config;
/// Error types.
pub mod error;
/// Contains the `GameState` trait that defines the interface for a game.
pub mod game_state;
/// Contains pre-made implementations of the `GameState` trait.
pub mod games;
/// The core module of the library, containing the `MonteCarloTreeSearch` implementation.
pub mod mcts;
/// Contains the `MctsNode` struct, which represents a node in the search tree.
pub mod mcts_node;
/// Contains traits and implementations for random number generation.
pub mod random;
/// Rollout policies for the simulation phase.
pub mod rollout;
/// The UCB1 selection policy.
pub mod ucb;

pub use config::SearchConfig;
pub use error::{IllegalMoveError, MctsError};
pub use game_state::GameState;
pub use mcts::{search, MonteCarloTreeSearch, MonteCarloTreeSearchBuilder, TreeStats};
pub use mcts_node::MctsNode;
pub use random::{CustomNumberGenerator, RandomGenerator, StandardRandomGenerator};
pub use rollout::{RolloutPolicy, UniformRandomRollout};
