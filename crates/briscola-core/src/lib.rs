#![deny(warnings)]
pub mod game;
pub mod model;

pub use game::state::{GamePhase, GameState, PlayError, PlayOutcome};
pub use model::score::HandOutcome;
