use crate::error::IllegalMoveError;
use crate::game_state::GameState;
use std::fmt;

/// The most chips a player may take in one move.
pub const MAX_PICKABLE_CHIPS: u64 = 3;

/// A single Nim move: `player` takes `chips` chips from the pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NimMove {
    pub player: u8,
    pub chips: u64,
}

impl fmt::Display for NimMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {} takes {} chips", self.player, self.chips)
    }
}

/// An implementation of [`GameState`] for Nim.
///
/// Players alternately take 1, 2 or 3 chips, and whoever takes the last chip wins. Any pile of
/// the form `4n + k` with `k` in `1..=3` is a win for the player to move (by taking `k`);
/// a multiple of 4 is a loss.
///
/// Players are numbered 1 and 2, player 1 moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NimState {
    chips: u64,
    just_moved: u8,
    active: u8,
}

impl NimState {
    pub fn new(chips: u64) -> Self {
        Self {
            chips,
            just_moved: 2,
            active: 1,
        }
    }

    pub fn chips(&self) -> u64 {
        self.chips
    }

    /// The player whose turn it is.
    pub fn active_player(&self) -> u8 {
        self.active
    }

    /// The winner, once the pile is empty.
    pub fn winner(&self) -> Option<u8> {
        (self.chips == 0).then_some(self.just_moved)
    }
}

impl GameState for NimState {
    type Move = NimMove;
    type Player = u8;

    fn legal_moves(&self) -> Vec<NimMove> {
        let max_chips = self.chips.min(MAX_PICKABLE_CHIPS);
        (1..=max_chips)
            .map(|chips| NimMove {
                player: self.active,
                chips,
            })
            .collect()
    }

    fn apply(&mut self, game_move: &NimMove) -> Result<(), IllegalMoveError> {
        if game_move.player != self.active {
            return Err(IllegalMoveError::new(format!(
                "player {} moved out of turn, player {} is to move",
                game_move.player, self.active
            )));
        }
        let max_chips = self.chips.min(MAX_PICKABLE_CHIPS);
        if game_move.chips == 0 || game_move.chips > max_chips {
            return Err(IllegalMoveError::new(format!(
                "cannot take {} chips from a pile of {}",
                game_move.chips, self.chips
            )));
        }

        self.chips -= game_move.chips;
        std::mem::swap(&mut self.just_moved, &mut self.active);
        Ok(())
    }

    fn score(&self, player: u8) -> f64 {
        if self.chips > 0 {
            return 0.5;
        }
        if player == self.just_moved { 1.0 } else { 0.0 }
    }

    fn last_mover(&self) -> u8 {
        self.just_moved
    }
}
