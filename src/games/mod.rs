//! Contains ready-made implementations of the `GameState` trait.

/// A `GameState` implementation for the game of Nim.
pub mod nim;
