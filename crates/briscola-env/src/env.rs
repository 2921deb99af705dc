use briscola_bot::player::{Player, RandomPlayer};
use briscola_core::game::public_state::PublicState;
use briscola_core::game::state::{GameState, PlayError, PlayOutcome};
use briscola_core::model::hand::HAND_SIZE;
use briscola_core::model::player::Seat;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;

/// One action per hand slot.
pub const ACTION_SPACE: usize = HAND_SIZE;
/// A trick is worth at most two aces.
pub const REWARD_RANGE: (i16, i16) = (-22, 22);

/// The controlled side; the opponent seat is purely an internal detail.
const AGENT_SEAT: Seat = Seat::North;

/// Step-interface adapter: the external controller drives one seat by hand
/// index, the opponent answers through its [`Player`] implementation.
pub struct BriscolaEnv {
    state: GameState,
    opponent: Box<dyn Player>,
    rng: StdRng,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub observation: PublicState,
    pub reward: i16,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    InvalidAction { action: usize, hand_len: usize },
    EpisodeOver,
    Play(PlayError),
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvError::InvalidAction { action, hand_len } => {
                write!(f, "action {action} out of range for hand of {hand_len}")
            }
            EnvError::EpisodeOver => write!(f, "episode is over, call reset"),
            EnvError::Play(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for EnvError {}

impl BriscolaEnv {
    /// Unseeded episode stream against a random opponent.
    pub fn new() -> Self {
        Self::with_opponent(rand::random(), Box::new(RandomPlayer::new()))
    }

    /// Reproducible episode stream against a seeded random opponent.
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let opponent = Box::new(RandomPlayer::with_seed(rng.next_u64()));
        Self::from_parts(rng, opponent)
    }

    pub fn with_opponent(seed: u64, opponent: Box<dyn Player>) -> Self {
        Self::from_parts(StdRng::seed_from_u64(seed), opponent)
    }

    fn from_parts(mut rng: StdRng, opponent: Box<dyn Player>) -> Self {
        // A playable hand with the agent leading; `reset` starts the real
        // episode with a randomized leader.
        let state = GameState::with_seed_and_leader(rng.next_u64(), AGENT_SEAT);
        Self {
            state,
            opponent,
            rng,
        }
    }

    /// Start a fresh episode. When the coin flip hands the lead to the
    /// opponent, its opening card is already on the table in the returned
    /// observation.
    pub fn reset(&mut self) -> Result<PublicState, EnvError> {
        let seed = self.rng.next_u64();
        let leader = if self.rng.gen_bool(0.5) {
            AGENT_SEAT
        } else {
            AGENT_SEAT.opponent()
        };
        self.state = GameState::with_seed_and_leader(seed, leader);
        if self.state.leader() != AGENT_SEAT {
            self.opponent_play()?;
        }
        Ok(self.observation())
    }

    /// Discard the `action`-th card of the agent's hand and run the trick
    /// to resolution. The reward is the agent's signed point delta.
    pub fn step(&mut self, action: usize) -> Result<Step, EnvError> {
        if self.state.is_finished() {
            return Err(EnvError::EpisodeOver);
        }
        let hand_len = self.state.hand(AGENT_SEAT).len();
        if action >= hand_len {
            return Err(EnvError::InvalidAction { action, hand_len });
        }

        let outcome = self
            .state
            .play_from_hand(AGENT_SEAT, action)
            .map_err(EnvError::Play)?;
        let agent_card = match outcome {
            PlayOutcome::Played(card) => card,
            PlayOutcome::TrickResolved { card, .. } => card,
        };
        self.opponent.observe_opponent_card(agent_card);

        let (winner, points) = match outcome {
            PlayOutcome::Played(_) => match self.opponent_play()? {
                PlayOutcome::TrickResolved { winner, points, .. } => (winner, points),
                PlayOutcome::Played(_) => unreachable!("follower completes the trick"),
            },
            PlayOutcome::TrickResolved { winner, points, .. } => (winner, points),
        };

        let reward = if winner == AGENT_SEAT {
            points as i16
        } else {
            -(points as i16)
        };
        self.opponent.notify_trick_result(-reward);

        if self.state.is_finished() {
            let outcome = self.state.outcome().expect("outcome when finished");
            self.opponent.notify_hand_result(outcome);
        } else if self.state.leader() != AGENT_SEAT {
            // The opponent won the trick: its next lead is part of the
            // observation the controller acts on.
            self.opponent_play()?;
        }

        Ok(Step {
            observation: self.observation(),
            reward,
            done: self.state.is_finished(),
        })
    }

    pub fn observation(&self) -> PublicState {
        PublicState::capture(&self.state, AGENT_SEAT)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn opponent_play(&mut self) -> Result<PlayOutcome, EnvError> {
        let seat = AGENT_SEAT.opponent();
        let view = PublicState::capture(&self.state, seat);
        let index = self.opponent.choose_card(&view);
        self.state.play_from_hand(seat, index).map_err(EnvError::Play)
    }
}

impl Default for BriscolaEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{ACTION_SPACE, BriscolaEnv, EnvError, REWARD_RANGE};
    use briscola_core::model::score::TOTAL_POINTS;

    #[test]
    fn reset_returns_a_full_hand_and_a_coherent_table() {
        let mut env = BriscolaEnv::with_seed(40);
        let view = env.reset().unwrap();
        assert_eq!(view.hand_size as usize, ACTION_SPACE);
        let on_table = view.table.iter().filter(|code| !code.is_none()).count();
        if view.leads {
            assert_eq!(on_table, 0);
        } else {
            assert_eq!(on_table, 1);
        }
    }

    #[test]
    fn out_of_range_actions_are_rejected() {
        let mut env = BriscolaEnv::with_seed(41);
        env.reset().unwrap();
        match env.step(ACTION_SPACE) {
            Err(EnvError::InvalidAction { action, hand_len }) => {
                assert_eq!(action, ACTION_SPACE);
                assert_eq!(hand_len, ACTION_SPACE);
            }
            other => panic!("expected InvalidAction, got {other:?}"),
        }
    }

    #[test]
    fn episodes_run_to_done_within_twenty_tricks() {
        let mut env = BriscolaEnv::with_seed(42);
        let mut view = env.reset().unwrap();
        let mut reward_total: i16 = 0;
        let mut steps = 0;

        loop {
            let action = steps % view.hand_size.max(1) as usize;
            let step = env.step(action).unwrap();
            assert!(step.reward >= REWARD_RANGE.0 && step.reward <= REWARD_RANGE.1);
            reward_total += step.reward;
            steps += 1;
            assert!(steps <= 20, "episode failed to terminate");
            if step.done {
                view = step.observation;
                break;
            }
            view = step.observation;
        }

        // Accumulated rewards are exactly the final score difference.
        assert_eq!(
            reward_total,
            view.my_points as i16 - view.other_points as i16
        );
        assert!(view.my_points + view.other_points <= TOTAL_POINTS);
        assert!(matches!(env.step(0), Err(EnvError::EpisodeOver)));
    }

    #[test]
    fn seeded_environments_replay_identically() {
        let run = |seed| {
            let mut env = BriscolaEnv::with_seed(seed);
            let first = env.reset().unwrap();
            let mut trace = vec![crate::observation::encode(&first)];
            loop {
                let step = env.step(0).unwrap();
                trace.push(crate::observation::encode(&step.observation));
                if step.done {
                    break;
                }
            }
            trace
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }

    #[test]
    fn discard_piles_grow_by_one_card_per_side_each_step() {
        let mut env = BriscolaEnv::with_seed(43);
        env.reset().unwrap();
        let step = env.step(0).unwrap();
        let mine = step
            .observation
            .my_discarded
            .iter()
            .filter(|c| !c.is_none())
            .count();
        let theirs = step
            .observation
            .other_discarded
            .iter()
            .filter(|c| !c.is_none())
            .count();
        assert_eq!(mine, 1);
        assert_eq!(theirs, 1);
    }
}
