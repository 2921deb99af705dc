use crate::game::state::GameState;
use crate::model::player::Seat;
use serde::{Deserialize, Serialize};

/// Seed-based persistence of a hand.
///
/// Restoring re-deals the hand from its seed and reapplies the recorded
/// scores and leader; trick-level progress within the hand is not captured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub seed: u64,
    pub turn: u8,
    pub scores: [u16; 2],
    pub leader: Seat,
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        GameSnapshot {
            seed: state.seed(),
            turn: state.turns_played(),
            scores: *state.scores().standings(),
            leader: state.leader(),
        }
    }

    pub fn restore(self) -> GameState {
        let mut state = GameState::with_seed_and_leader(self.seed, self.leader);
        state.scores_mut().set_totals(self.scores);
        state
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
