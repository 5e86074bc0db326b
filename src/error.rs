use ego_tree::NodeId;
use thiserror::Error;

/// Returned by [`GameState::apply`](crate::game_state::GameState::apply) when a move is not
/// legal in the state it is applied to.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("illegal move: {reason}")]
pub struct IllegalMoveError {
    pub reason: String,
}

impl IllegalMoveError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors reported by the search engine.
///
/// Every variant is a contract violation by the caller or a game implementation.
/// The engine never retries; the error is handed straight back to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MctsError {
    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),

    #[error("no untried moves left to extract")]
    EmptyMoveSet,

    #[error("search started from a state with no legal moves")]
    NoMovesAvailable,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("node {0:?} is not part of the search tree")]
    UnknownNode(NodeId),
}
