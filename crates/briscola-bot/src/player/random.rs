use crate::player::Player;
use briscola_core::game::public_state::PublicState;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniformly random discards; reproducible when seeded.
pub struct RandomPlayer {
    rng: SmallRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_card(&mut self, view: &PublicState) -> usize {
        let len = (view.hand_size as usize).max(1);
        self.rng.gen_range(0..len)
    }
}
