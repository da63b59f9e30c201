use serde::{Deserialize, Serialize};

/// One square of the board, showing either face of its coin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coin {
    Tails,
    Heads,
}

impl Coin {
    pub const fn is_heads(self) -> bool {
        matches!(self, Self::Heads)
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Tails => Self::Heads,
            Self::Heads => Self::Tails,
        }
    }

    /// Single-letter face used by text front-ends.
    pub const fn glyph(self) -> char {
        match self {
            Self::Tails => 'T',
            Self::Heads => 'H',
        }
    }
}

impl Default for Coin {
    fn default() -> Self {
        Self::Tails
    }
}

impl From<bool> for Coin {
    fn from(heads: bool) -> Self {
        if heads { Self::Heads } else { Self::Tails }
    }
}
