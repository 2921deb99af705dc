use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Coins = 0,
    Cups = 1,
    Swords = 2,
    Clubs = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Coins, Suit::Cups, Suit::Swords, Suit::Clubs];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Coins),
            1 => Some(Suit::Cups),
            2 => Some(Suit::Swords),
            3 => Some(Suit::Clubs),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Single letters after the Italian suit names: denari, coppe, spade, bastoni.
        let symbol = match self {
            Suit::Coins => "D",
            Suit::Cups => "C",
            Suit::Swords => "S",
            Suit::Clubs => "B",
        };
        f.write_str(symbol)
    }
}
