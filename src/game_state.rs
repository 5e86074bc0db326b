use crate::error::IllegalMoveError;
use std::fmt::Debug;

/// The central trait of the library, defining the interface for a game state.
///
/// To search a custom game, this trait must be implemented. The engine never looks past it:
/// it asks for legal moves, applies them, clones states and reads scores, nothing more.
///
/// [`Clone`] must produce a fully independent copy. Every node of the search tree keeps
/// its own snapshot, and each iteration plays on a clone of its own.
pub trait GameState: Clone {
    /// The type representing a move in the game. This could be a simple `u8` for a board position
    /// or a more complex struct for games with intricate actions.
    type Move: Clone + PartialEq + Debug;

    /// Identifies a player. Node statistics are recorded from the point of view of one of these.
    type Player: Copy + Eq + Debug;

    /// Returns all legal moves from the current position. An empty list means the game is over.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Applies a move in place.
    ///
    /// Fails with [`IllegalMoveError`] if `game_move` is not currently legal; the state must be
    /// left untouched in that case.
    fn apply(&mut self, game_move: &Self::Move) -> Result<(), IllegalMoveError>;

    /// Scores the position for `player` in `[0.0, 1.0]`.
    ///
    /// `1.0` means `player` has won, `0.0` means `player` has lost and `0.5` means the game
    /// is still undecided. Terminal states must report exactly `0.0` or `1.0`, complementary
    /// for the two players.
    fn score(&self, player: Self::Player) -> f64;

    /// Returns the player who made the most recent move.
    fn last_mover(&self) -> Self::Player;

    /// Returns `true` if no legal moves remain.
    fn is_terminal(&self) -> bool {
        self.legal_moves().is_empty()
    }
}
