use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Knave = 8,
    Knight = 9,
    King = 10,
}

impl Rank {
    pub const ORDERED: [Rank; 10] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Knave,
        Rank::Knight,
        Rank::King,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rank::Ace),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Knave),
            9 => Some(Rank::Knight),
            10 => Some(Rank::King),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn points(self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Three => 10,
            Rank::King => 4,
            Rank::Knight => 3,
            Rank::Knave => 2,
            _ => 0,
        }
    }

    /// Trick-strength key: Ace > Three > King > Knight > Knave > 7 > 6 > 5 > 4 > 2.
    pub const fn strength(self) -> u8 {
        match self {
            Rank::Two => 0,
            Rank::Four => 1,
            Rank::Five => 2,
            Rank::Six => 3,
            Rank::Seven => 4,
            Rank::Knave => 5,
            Rank::Knight => 6,
            Rank::King => 7,
            Rank::Three => 8,
            Rank::Ace => 9,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Court cards use the Italian initials: fante, cavallo, re.
        let text = match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Knave => "F",
            Rank::Knight => "C",
            Rank::King => "R",
        };
        f.write_str(text)
    }
}
