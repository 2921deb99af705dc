use crate::player::Player;
use briscola_core::game::public_state::PublicState;
use briscola_core::game::state::{GameState, PlayError, PlayOutcome};
use briscola_core::model::player::Seat;
use briscola_core::model::score::HandOutcome;
use std::fmt;
use tracing::debug;

/// Drives one hand between two [`Player`] implementations.
///
/// The session owns the engine state; players only receive projections,
/// card observations, and signed point deltas.
pub struct GameSession {
    state: GameState,
    players: [Box<dyn Player>; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSummary {
    pub winner: Seat,
    pub points: u8,
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    HandFinished,
    Play(PlayError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::HandFinished => write!(f, "hand already finished"),
            SessionError::Play(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl GameSession {
    pub fn new(state: GameState, north: Box<dyn Player>, south: Box<dyn Player>) -> Self {
        Self {
            state,
            players: [north, south],
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player_name(&self, seat: Seat) -> &str {
        self.players[seat.index()].name()
    }

    /// One full trick: leader discards, follower sees it and answers, the
    /// engine resolves, and both sides learn their signed point delta.
    pub fn play_turn(&mut self) -> Result<TurnSummary, SessionError> {
        let leader = self.state.expected_seat().ok_or(SessionError::HandFinished)?;
        let follower = leader.opponent();

        let PlayOutcome::Played(lead_card) = self.request_play(leader)? else {
            unreachable!("leader's card cannot complete a trick")
        };
        self.players[follower.index()].observe_opponent_card(lead_card);

        let PlayOutcome::TrickResolved {
            card: follow_card,
            winner,
            points,
        } = self.request_play(follower)?
        else {
            unreachable!("follower's card completes the trick")
        };
        self.players[leader.index()].observe_opponent_card(follow_card);

        debug!(%leader, lead = %lead_card, follow = %follow_card, %winner, points, "trick resolved");

        for seat in Seat::LOOP {
            let delta = if seat == winner {
                points as i16
            } else {
                -(points as i16)
            };
            self.players[seat.index()].notify_trick_result(delta);
        }

        let finished = self.state.is_finished();
        if finished {
            let outcome = self.state.outcome().expect("outcome when finished");
            debug!(%outcome, "hand finished");
            for seat in Seat::LOOP {
                self.players[seat.index()].notify_hand_result(outcome);
            }
        }

        Ok(TurnSummary {
            winner,
            points,
            finished,
        })
    }

    pub fn run_to_completion(&mut self) -> Result<HandOutcome, SessionError> {
        loop {
            let summary = self.play_turn()?;
            if summary.finished {
                return Ok(self.state.outcome().expect("outcome when finished"));
            }
        }
    }

    fn request_play(&mut self, seat: Seat) -> Result<PlayOutcome, SessionError> {
        let view = PublicState::capture(&self.state, seat);
        let index = self.players[seat.index()].choose_card(&view);
        self.state
            .play_from_hand(seat, index)
            .map_err(SessionError::Play)
    }
}
