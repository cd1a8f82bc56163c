//! Towers and the colors owning them

use std::fmt;

/// The largest height a tower can reach; one bit of the representation holds the owner
pub const MAX_TOWER_HEIGHT: u16 = u16::MAX >> 1;

// least significant bit
const OWNER_BIT: u16 = 1;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Color {
    Blue = 0,
    Yellow = 1,
}

impl Color {
    /// The color making the first move of a game
    pub const FIRST: Color = Color::Blue;
    /// The color making the second move of a game
    pub const SECOND: Color = Color::Yellow;

    pub fn opponent(self) -> Self {
        match self {
            Color::Blue => Color::Yellow,
            Color::Yellow => Color::Blue,
        }
    }

    /// The color owning the cell at `(row, column)` of a new board
    pub fn of_cell(row: usize, column: usize) -> Self {
        if (row + column) % 2 == 0 {
            Color::Blue
        } else {
            Color::Yellow
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Blue => write!(f, "Blue"),
            Color::Yellow => write!(f, "Yellow"),
        }
    }
}

const fn pack(owner: Color, height: u16) -> u16 {
    (height << 1) | owner as u16
}

const fn unpack(representation: u16) -> (Color, u16) {
    let owner = if representation & OWNER_BIT == 0 {
        Color::Blue
    } else {
        Color::Yellow
    };
    (owner, representation >> 1)
}

/// A stack of bricks on a single cell
///
/// # Notes
/// The actual order of bricks is not preserved. Only the height and the owner
/// (the color of the topmost brick) are stored, packed like this:
/// `[height: bit 15..1 | owner: bit 0]`.
/// An all-zero value marks an empty cell, every real tower has a height of at least 1.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Tower(u16);

impl Tower {
    /// The value of an empty cell
    pub const EMPTY: Tower = Tower(0);

    /// Creates a tower of a single brick
    pub const fn new(owner: Color) -> Self {
        Self(pack(owner, 1))
    }

    /// Creates a tower of the given height, if it is representable
    pub fn with_height(owner: Color, height: u16) -> Option<Self> {
        match height {
            1..=MAX_TOWER_HEIGHT => Some(Self(pack(owner, height))),
            _ => None,
        }
    }

    /// Returns the owner, or `None` for an empty cell
    pub fn owner(&self) -> Option<Color> {
        if self.is_empty() {
            None
        } else {
            Some(unpack(self.0).0)
        }
    }

    pub fn height(&self) -> u16 {
        unpack(self.0).1
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Puts `other` on top of this tower
    ///
    /// The merged tower belongs to the owner of `other`. Attaching an empty
    /// cell does nothing. Returns false and leaves the tower untouched if the
    /// merged tower would exceed `MAX_TOWER_HEIGHT`.
    pub fn attach(&mut self, other: Tower) -> bool {
        if other.is_empty() {
            return true;
        }
        let (owner, height) = unpack(other.0);
        match self.height().checked_add(height) {
            Some(merged) if merged <= MAX_TOWER_HEIGHT => {
                *self = Self(pack(owner, merged));
                true
            }
            _ => false,
        }
    }

    /// Removes the bottom part `other` from this tower, reverting an `attach`
    ///
    /// The owner is kept, as the top of the tower does not change.
    /// Returns false and leaves the tower untouched if `other` is not lower than
    /// this tower, since it cannot have been a part of it then.
    pub fn detach_from(&mut self, other: Tower) -> bool {
        let (owner, height) = unpack(self.0);
        if other.height() >= height {
            return false;
        }
        *self = Self(pack(owner, height - other.height()));
        true
    }
}

impl Default for Tower {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for Tower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner() {
            Some(Color::Blue) => write!(f, "B{}", self.height()),
            Some(Color::Yellow) => write!(f, "Y{}", self.height()),
            None => write!(f, ".."),
        }
    }
}
