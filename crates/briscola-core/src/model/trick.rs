use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use std::fmt;

/// Index of the winning card among `cards`, played in play order.
///
/// Trumps beat non-trumps; among trumps the higher Briscola strength wins;
/// otherwise only cards of the led suit compete. The first-played card wins
/// exact ties, so a single card trivially wins.
pub fn select_winner(cards: &[Card], trump: Suit) -> usize {
    let mut winner = 0;
    for (index, card) in cards.iter().enumerate().skip(1) {
        if beats(*card, cards[winner], trump) {
            winner = index;
        }
    }
    winner
}

/// Points carried by a trick, independent of who wins it.
pub fn trick_points(cards: &[Card]) -> u8 {
    cards.iter().map(|card| card.points()).sum()
}

fn beats(challenger: Card, incumbent: Card, trump: Suit) -> bool {
    if challenger.suit == incumbent.suit {
        challenger.rank.strength() > incumbent.rank.strength()
    } else {
        // Off-suit cards never take a trick: only the trump suit wins over
        // the incumbent's (led or trump) suit.
        challenger.suit == trump
    }
}

#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn { expected: Seat, actual: Seat },
    AlreadyPlayed(Seat),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            TrickError::AlreadyPlayed(seat) => {
                write!(f, "{seat} has already played this trick")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(2),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn cards(&self) -> Vec<Card> {
        self.plays.iter().map(|play| play.card).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 2
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn expected_seat(&self) -> Seat {
        self.plays
            .last()
            .map(|play| play.seat.opponent())
            .unwrap_or(self.leader)
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.seat == seat) {
            return Err(TrickError::AlreadyPlayed(seat));
        }

        let expected = self.expected_seat();
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        self.plays.push(Play { seat, card });
        Ok(())
    }

    pub fn winner(&self, trump: Suit) -> Option<Seat> {
        if !self.is_complete() {
            return None;
        }
        let cards = self.cards();
        let index = select_winner(&cards, trump);
        Some(self.plays[index].seat)
    }

    pub fn points(&self) -> u8 {
        self.plays.iter().map(|play| play.card.points()).sum()
    }
}
