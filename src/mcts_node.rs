use crate::error::MctsError;
use crate::game_state::GameState;
use crate::random::RandomGenerator;
use crate::ucb::upper_confidence_bound;

/// Represents a single node in the Monte Carlo search tree.
///
/// Nodes live in an [`ego_tree::Tree`] arena. The arena owns the parent/child links: a node
/// reaches its parent through its id, never through ownership, and children keep their
/// insertion order.
///
/// Statistics are recorded from the point of view of `player`, the player who made the move
/// leading into this node.
#[derive(Debug, Clone)]
pub struct MctsNode<S: GameState> {
    /// The depth of the node in the tree. The root is at height 0.
    pub height: u32,
    /// The game state that this node represents. Owned exclusively by the node.
    pub state: S,
    /// The move that led to this node's state from its parent. `None` for the root node.
    pub prev_move: Option<S::Move>,
    /// The player who moved into this node.
    pub player: S::Player,
    /// Sum of all rollout outcomes seen through this node, scored for `player`.
    pub total_outcome: f64,
    /// Number of backpropagations that passed through this node.
    pub visits: u64,
    /// Legal moves of `state` that do not have a child yet.
    pub untried_moves: Vec<S::Move>,
    /// The UCB1 value as of the last backpropagation through this node.
    ///
    /// Refreshed only when this node itself is backpropagated, so it can lag behind the
    /// parent's visit count while siblings are being explored. Selection tolerates that
    /// staleness on purpose.
    pub selection_score: f64,
    /// The exploration constant shared by the whole tree.
    pub exploration_constant: f64,
}

impl<S: GameState> MctsNode<S> {
    /// Creates a new `MctsNode` wrapping `state`. Legal moves are computed once, here.
    pub fn new(prev_move: Option<S::Move>, state: S, exploration_constant: f64) -> Self {
        let untried_moves = state.legal_moves();
        let player = state.last_mover();
        MctsNode {
            height: 0,
            state,
            prev_move,
            player,
            total_outcome: 0.0,
            visits: 0,
            untried_moves,
            selection_score: 0.0,
            exploration_constant,
        }
    }

    /// Average outcome for `player`, or `0.0` for an unvisited node.
    pub fn mean_outcome(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_outcome / (self.visits as f64)
        }
    }

    pub fn has_untried_moves(&self) -> bool {
        !self.untried_moves.is_empty()
    }

    /// Chooses an untried move uniformly at random without removing it. Returns its index.
    pub fn pick_untried_index<R: RandomGenerator>(
        &self,
        random: &mut R,
    ) -> Result<usize, MctsError> {
        if self.untried_moves.is_empty() {
            return Err(MctsError::EmptyMoveSet);
        }
        Ok(random.next_range(0, self.untried_moves.len()))
    }

    /// Removes one untried move, chosen uniformly at random, and returns it.
    pub fn take_random_untried_move<R: RandomGenerator>(
        &mut self,
        random: &mut R,
    ) -> Result<S::Move, MctsError> {
        let index = self.pick_untried_index(random)?;
        Ok(self.untried_moves.remove(index))
    }

    /// Folds one rollout outcome into the statistics.
    pub fn record_outcome(&mut self, outcome: f64) {
        self.total_outcome += outcome;
        self.visits += 1;
    }

    /// Recomputes `selection_score` against the parent's current visit count.
    pub fn update_selection_score(&mut self, parent_visits: u64) {
        self.selection_score = upper_confidence_bound(
            self.total_outcome,
            self.exploration_constant,
            parent_visits,
            self.visits,
        );
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::MctsNode;
    use crate::error::{IllegalMoveError, MctsError};
    use crate::game_state::GameState;
    use crate::random::CustomNumberGenerator;

    /// Counts down to zero; every move subtracts its value. Player 0 and 1 alternate.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Countdown {
        pub remaining: u8,
        pub last: u8,
    }

    impl GameState for Countdown {
        type Move = u8;
        type Player = u8;

        fn legal_moves(&self) -> Vec<u8> {
            (1..=self.remaining.min(2)).collect()
        }

        fn apply(&mut self, game_move: &u8) -> Result<(), IllegalMoveError> {
            if !self.legal_moves().contains(game_move) {
                return Err(IllegalMoveError::new(format!("cannot take {game_move}")));
            }
            self.remaining -= game_move;
            self.last = 1 - self.last;
            Ok(())
        }

        fn score(&self, player: u8) -> f64 {
            match (self.remaining, player == self.last) {
                (0, true) => 1.0,
                (0, false) => 0.0,
                _ => 0.5,
            }
        }

        fn last_mover(&self) -> u8 {
            self.last
        }
    }

    #[test]
    fn new_node_starts_empty() {
        // arrange
        let state = Countdown {
            remaining: 5,
            last: 1,
        };

        // act
        let node = MctsNode::new(None, state, 1.0);

        // assert
        assert_eq!(node.untried_moves, vec![1, 2]);
        assert_eq!(node.player, 1);
        assert_eq!(node.visits, 0);
        assert_eq!(node.total_outcome, 0.0);
        assert_eq!(node.selection_score, 0.0);
        assert_eq!(node.mean_outcome(), 0.0);
        assert!(node.prev_move.is_none());
    }

    #[test]
    fn extraction_shrinks_untried_moves_until_empty() {
        // arrange
        let state = Countdown {
            remaining: 5,
            last: 1,
        };
        let mut node = MctsNode::new(None, state, 1.0);
        let mut random = CustomNumberGenerator::default();

        // act
        let first = node.take_random_untried_move(&mut random).unwrap();
        let second = node.take_random_untried_move(&mut random).unwrap();
        let third = node.take_random_untried_move(&mut random);

        // assert
        assert_ne!(first, second);
        assert!([1, 2].contains(&first));
        assert!([1, 2].contains(&second));
        assert_eq!(third, Err(MctsError::EmptyMoveSet));
        assert!(!node.has_untried_moves());
    }

    #[test]
    fn picking_leaves_untried_moves_alone() {
        let state = Countdown {
            remaining: 5,
            last: 1,
        };
        let mut node = MctsNode::new(None, state, 1.0);
        let mut random = CustomNumberGenerator::default();

        let index = node.pick_untried_index(&mut random).unwrap();

        assert!(index < 2);
        assert_eq!(node.untried_moves, vec![1, 2]);
        node.untried_moves.clear();
        assert_eq!(
            node.pick_untried_index(&mut random),
            Err(MctsError::EmptyMoveSet)
        );
    }

    #[test]
    fn recording_and_scoring() {
        // arrange
        let state = Countdown {
            remaining: 3,
            last: 0,
        };
        let mut node = MctsNode::new(Some(1), state, 1.0);

        // act
        node.record_outcome(1.0);
        node.record_outcome(0.0);
        node.record_outcome(1.0);
        node.record_outcome(1.0);
        node.update_selection_score(10);

        // assert
        assert_eq!(node.visits, 4);
        assert!((node.mean_outcome() - 0.75).abs() < 1e-12);
        let expected = 3.0 / 4.0 + f64::sqrt(2.0 * f64::ln(10.0) / 4.0);
        assert!((node.selection_score - expected).abs() < 1e-12);
    }
}
