pub mod player;
pub mod session;

pub use player::{HumanPlayer, Player, RandomPlayer};
pub use session::{GameSession, SessionError, TurnSummary};
