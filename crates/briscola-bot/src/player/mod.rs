mod human;
mod random;

pub use human::HumanPlayer;
pub use random::RandomPlayer;

use briscola_core::game::public_state::PublicState;
use briscola_core::model::card::Card;
use briscola_core::model::score::HandOutcome;

/// Decision seam between the engine and one side of the table.
///
/// Implementations only see immutable [`PublicState`] projections and answer
/// with an index into their own hand; the engine validates the choice and
/// owns all state mutation. The notification methods are informational and
/// default to no-ops.
pub trait Player: Send {
    fn name(&self) -> &str;

    /// Index of the card to discard from the viewer's hand.
    fn choose_card(&mut self, view: &PublicState) -> usize;

    /// The opponent's card just hit the table.
    fn observe_opponent_card(&mut self, _card: Card) {}

    /// Signed point delta for this side after a trick (+gained when it won).
    fn notify_trick_result(&mut self, _delta: i16) {}

    fn notify_hand_result(&mut self, _outcome: HandOutcome) {}
}
