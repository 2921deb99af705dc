use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    North = 0,
    South = 1,
}

impl Seat {
    pub const LOOP: [Seat; 2] = [Seat::North, Seat::South];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::North),
            1 => Some(Seat::South),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opponent(self) -> Seat {
        match self {
            Seat::North => Seat::South,
            Seat::South => Seat::North,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::North => "North",
            Seat::South => "South",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::Seat;

    #[test]
    fn opponent_is_involutive() {
        assert_eq!(Seat::North.opponent(), Seat::South);
        assert_eq!(Seat::South.opponent().opponent(), Seat::South);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in Seat::LOOP.iter().enumerate() {
            assert_eq!(Seat::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
        assert_eq!(Seat::from_index(2), None);
    }
}
