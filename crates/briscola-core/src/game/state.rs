use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::{HAND_SIZE, Hand};
use crate::model::player::Seat;
use crate::model::score::{HandOutcome, ScoreBoard, TOTAL_POINTS};
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

/// One hand of two-player Briscola, from the deal to the last trick.
///
/// The state owns the deck, both hands, the table and the score; external
/// collaborators only read projections and submit plays through
/// [`GameState::play_from_hand`].
#[derive(Debug, Clone)]
pub struct GameState {
    deck: Deck,
    trump: Card,
    trump_dealt: bool,
    hands: [Hand; 2],
    table: Trick,
    discards: [Vec<Card>; 2],
    scores: ScoreBoard,
    turns_played: u8,
    phase: GamePhase,
    seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played(Card),
    TrickResolved { card: Card, winner: Seat, points: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    NotInProgress,
    OutOfTurn { expected: Seat, actual: Seat },
    InvalidCardIndex { index: usize, hand_len: usize },
    Trick(TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotInProgress => write!(f, "hand is not in progress"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            PlayError::InvalidCardIndex { index, hand_len } => {
                write!(f, "card index {index} out of range for hand of {hand_len}")
            }
            PlayError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PlayError {}

impl GameState {
    /// Deal a hand from an OS-random seed with a random initial leader.
    pub fn new() -> Self {
        Self::deal(rand::random(), None)
    }

    /// Deal a reproducible hand; the initial leader comes from the seeded RNG.
    pub fn with_seed(seed: u64) -> Self {
        Self::deal(seed, None)
    }

    pub fn with_seed_and_leader(seed: u64, leader: Seat) -> Self {
        Self::deal(seed, Some(leader))
    }

    fn deal(seed: u64, leader_override: Option<Seat>) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = Deck::shuffled(&mut rng);
        let leader = leader_override.unwrap_or_else(|| {
            if rng.gen_bool(0.5) {
                Seat::North
            } else {
                Seat::South
            }
        });

        // The trump is revealed before the deal and re-enters circulation as
        // the last card handed out once the pile is drained.
        let trump = deck.draw().expect("fresh deck is full");

        let mut hands = [Hand::new(), Hand::new()];
        for seat in [leader, leader.opponent()] {
            for _ in 0..HAND_SIZE {
                let card = deck.draw().expect("deck covers the opening deal");
                hands[seat.index()].add(card);
            }
        }

        Self {
            deck,
            trump,
            trump_dealt: false,
            hands,
            table: Trick::new(leader),
            discards: [Vec::new(), Vec::new()],
            scores: ScoreBoard::new(),
            turns_played: 0,
            phase: GamePhase::InProgress,
            seed,
        }
    }

    /// Play the `index`-th card of `seat`'s hand onto the table.
    ///
    /// The second card of a trick triggers resolution: the winner collects
    /// the table points, both played cards move to their owners' discard
    /// piles, the winner leads the next trick, and hands are replenished
    /// (winner first, the reserved trump last of all).
    pub fn play_from_hand(&mut self, seat: Seat, index: usize) -> Result<PlayOutcome, PlayError> {
        if self.phase != GamePhase::InProgress {
            return Err(PlayError::NotInProgress);
        }

        let expected = self.table.expected_seat();
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        let hand_len = self.hands[seat.index()].len();
        let card = self.hands[seat.index()]
            .remove_at(index)
            .ok_or(PlayError::InvalidCardIndex { index, hand_len })?;
        self.table.play(seat, card).map_err(PlayError::Trick)?;

        if !self.table.is_complete() {
            return Ok(PlayOutcome::Played(card));
        }

        let (winner, points) = self.resolve_trick();
        Ok(PlayOutcome::TrickResolved {
            card,
            winner,
            points,
        })
    }

    fn resolve_trick(&mut self) -> (Seat, u8) {
        let winner = self
            .table
            .winner(self.trump.suit)
            .expect("winner when complete");
        let points = self.table.points();
        self.scores.add_points(winner, points as u16);

        for play in self.table.plays() {
            self.discards[play.seat.index()].push(play.card);
        }

        self.table = Trick::new(winner);
        self.turns_played += 1;
        self.replenish(winner);

        if self.is_terminal() {
            self.phase = GamePhase::Finished;
        }

        (winner, points)
    }

    fn replenish(&mut self, winner: Seat) {
        let Some(first) = self.deck.draw() else {
            return;
        };
        self.hands[winner.index()].add(first);

        let second = match self.deck.draw() {
            Some(card) => card,
            None => {
                self.trump_dealt = true;
                self.trump
            }
        };
        self.hands[winner.opponent().index()].add(second);
    }

    fn is_terminal(&self) -> bool {
        let past_half = Seat::LOOP
            .iter()
            .any(|seat| self.scores.score(*seat) > TOTAL_POINTS / 2);
        let exhausted =
            self.deck.is_empty() && self.hands.iter().all(|hand| hand.is_empty());
        past_half || exhausted
    }

    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    /// `None` until the hand reaches its terminal state.
    pub fn outcome(&self) -> Option<HandOutcome> {
        if self.is_finished() {
            Some(self.scores.outcome())
        } else {
            None
        }
    }

    /// Whose discard the engine is waiting for; `None` once finished.
    pub fn expected_seat(&self) -> Option<Seat> {
        if self.phase == GamePhase::InProgress {
            Some(self.table.expected_seat())
        } else {
            None
        }
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn current_trick(&self) -> &Trick {
        &self.table
    }

    pub fn discard_pile(&self, seat: Seat) -> &[Card] {
        &self.discards[seat.index()]
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    pub fn trump(&self) -> Card {
        self.trump
    }

    pub fn trump_suit(&self) -> Suit {
        self.trump.suit
    }

    pub fn trump_dealt(&self) -> bool {
        self.trump_dealt
    }

    pub fn leader(&self) -> Seat {
        self.table.leader()
    }

    pub fn turns_played(&self) -> u8 {
        self.turns_played
    }

    pub fn cards_in_deck(&self) -> usize {
        self.deck.len()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
