//! Cell kinds for the settling grid.

use std::fmt;

/// One grid position. Only `Air` and `Sand` change while a simulation runs.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Air = 0,
    Wall = 1,
    Inlet = 2,
    Sand = 3,
}

impl Cell {
    /// Display glyph used by `Grid::render`.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Air => '.',
            Self::Inlet => '+',
            Self::Sand => 'o',
            Self::Wall => '#',
        }
    }

    /// Inverse of [`Cell::glyph`].
    #[must_use]
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Air),
            '+' => Some(Self::Inlet),
            'o' => Some(Self::Sand),
            '#' => Some(Self::Wall),
            _ => None,
        }
    }

    /// A falling particle may move into this cell.
    #[must_use]
    pub fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
