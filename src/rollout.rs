//! Rollout (simulation) policies.

use crate::error::MctsError;
use crate::game_state::GameState;
use crate::random::RandomGenerator;

/// Plays a position forward to get a cheap, noisy idea of its value.
///
/// A policy must stop after at most `max_steps` moves or as soon as the game is over,
/// whichever comes first. Reaching a terminal state early is normal, not an error.
pub trait RolloutPolicy<S: GameState> {
    /// Plays moves on `state` in place and returns how many were played.
    fn rollout<R: RandomGenerator>(
        &self,
        state: &mut S,
        max_steps: u32,
        random: &mut R,
    ) -> Result<u32, MctsError>;
}

/// The default policy: every step picks a legal move uniformly at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandomRollout;

impl<S: GameState> RolloutPolicy<S> for UniformRandomRollout {
    fn rollout<R: RandomGenerator>(
        &self,
        state: &mut S,
        max_steps: u32,
        random: &mut R,
    ) -> Result<u32, MctsError> {
        let mut steps = 0;
        while steps < max_steps {
            let moves = state.legal_moves();
            let Some(random_move) = random.pick(&moves) else {
                break;
            };
            state.apply(random_move)?;
            steps += 1;
        }
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::{RolloutPolicy, UniformRandomRollout};
    use crate::mcts_node::tests::Countdown;
    use crate::random::CustomNumberGenerator;

    #[test]
    fn stops_at_terminal_state() {
        let mut state = Countdown {
            remaining: 4,
            last: 0,
        };
        let mut random = CustomNumberGenerator::default();

        let steps = UniformRandomRollout
            .rollout(&mut state, 100, &mut random)
            .unwrap();

        assert_eq!(state.remaining, 0);
        assert!((2..=4).contains(&steps));
    }

    #[test]
    fn respects_step_bound() {
        let mut state = Countdown {
            remaining: 200,
            last: 0,
        };
        let mut random = CustomNumberGenerator::new(9);

        let steps = UniformRandomRollout
            .rollout(&mut state, 5, &mut random)
            .unwrap();

        assert_eq!(steps, 5);
        assert!(state.remaining >= 190);
    }

    #[test]
    fn zero_steps_leaves_state_alone() {
        let mut state = Countdown {
            remaining: 7,
            last: 1,
        };
        let mut random = CustomNumberGenerator::default();

        let steps = UniformRandomRollout
            .rollout(&mut state, 0, &mut random)
            .unwrap();

        assert_eq!(steps, 0);
        assert_eq!(state, Countdown { remaining: 7, last: 1 });
    }
}
