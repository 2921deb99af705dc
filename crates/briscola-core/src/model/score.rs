use crate::model::player::Seat;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Total point mass of one Briscola deck.
pub const TOTAL_POINTS: u16 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: [u16; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    Win(Seat),
    Draw,
}

impl fmt::Display for HandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandOutcome::Win(seat) => write!(f, "{seat} wins"),
            HandOutcome::Draw => f.write_str("draw"),
        }
    }
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 2] }
    }

    pub fn add_points(&mut self, seat: Seat, points: u16) {
        self.totals[seat.index()] += points;
    }

    pub fn set_totals(&mut self, totals: [u16; 2]) {
        self.totals = totals;
    }

    pub fn score(&self, seat: Seat) -> u16 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[u16; 2] {
        &self.totals
    }

    /// Strictly higher total wins; equal totals is an explicit draw.
    pub fn outcome(&self) -> HandOutcome {
        let north = self.score(Seat::North);
        let south = self.score(Seat::South);
        if north > south {
            HandOutcome::Win(Seat::North)
        } else if south > north {
            HandOutcome::Win(Seat::South)
        } else {
            HandOutcome::Draw
        }
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}
