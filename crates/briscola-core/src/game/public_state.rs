use crate::game::state::GameState;
use crate::model::card::Card;
use crate::model::hand::HAND_SIZE;
use crate::model::player::Seat;

/// Discard histories are padded to the full deck size.
pub const DISCARD_PAD: usize = 40;
pub const TABLE_PAD: usize = 2;

/// Numeric (value, suit) encoding of a card slot. Real cards carry their
/// face value 1..=10 and suit index shifted to 1..=4, so the all-zero
/// sentinel never collides with a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardCode {
    pub value: u8,
    pub suit: u8,
}

impl CardCode {
    pub const NONE: CardCode = CardCode { value: 0, suit: 0 };

    pub const fn is_none(self) -> bool {
        self.value == 0 && self.suit == 0
    }

    /// Inverse of the encoding; `None` for the sentinel or junk values.
    pub fn decode(self) -> Option<Card> {
        let rank = crate::model::rank::Rank::from_value(self.value)?;
        let suit = crate::model::suit::Suit::from_index(self.suit.checked_sub(1)? as usize)?;
        Some(Card::new(rank, suit))
    }
}

impl From<Card> for CardCode {
    fn from(card: Card) -> Self {
        Self {
            value: card.rank.value(),
            suit: card.suit.index() as u8 + 1,
        }
    }
}

/// Fixed-shape observable view of a [`GameState`] from one seat.
///
/// Recomputed on demand and idempotent between engine mutations; this is
/// the only surface external controllers consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicState {
    pub my_points: u16,
    pub other_points: u16,
    pub hand: [CardCode; HAND_SIZE],
    pub hand_size: u8,
    pub table: [CardCode; TABLE_PAD],
    pub my_discarded: [CardCode; DISCARD_PAD],
    pub other_discarded: [CardCode; DISCARD_PAD],
    pub turn: u8,
    pub trump: CardCode,
    pub leads: bool,
}

impl PublicState {
    pub fn capture(state: &GameState, viewer: Seat) -> Self {
        let other = viewer.opponent();
        Self {
            my_points: state.scores().score(viewer),
            other_points: state.scores().score(other),
            hand: pad(state.hand(viewer).iter().copied()),
            hand_size: state.hand(viewer).len() as u8,
            table: pad(state.current_trick().plays().iter().map(|play| play.card)),
            my_discarded: pad(state.discard_pile(viewer).iter().copied()),
            other_discarded: pad(state.discard_pile(other).iter().copied()),
            turn: state.turns_played(),
            trump: state.trump().into(),
            leads: state.leader() == viewer,
        }
    }
}

fn pad<const N: usize>(cards: impl Iterator<Item = Card>) -> [CardCode; N] {
    let mut slots = [CardCode::NONE; N];
    for (slot, card) in slots.iter_mut().zip(cards) {
        *slot = card.into();
    }
    slots
}
