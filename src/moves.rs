use anyhow::{anyhow, Result};

use crate::tower::Tower;

/// Directions a player can move a tower
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// The order in which neighbouring cells are tried during move generation
    pub const ALL: [Direction; 4] = [
        Direction::South,
        Direction::North,
        Direction::East,
        Direction::West,
    ];

    /// Row and column offset of a single step in this direction
    pub fn offset(self) -> (i16, i16) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_lowercase() {
            'n' => Ok(Direction::North),
            'e' => Ok(Direction::East),
            's' => Ok(Direction::South),
            'w' => Ok(Direction::West),
            _ => Err(anyhow!("could not parse '{}' as a direction", c)),
        }
    }
}

/// A cell address on a board
///
/// Coordinates are signed so that positions just outside the board can be
/// expressed. The board checks them before using them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Position {
    pub row: i16,
    pub column: i16,
}

impl Position {
    pub const fn new(row: i16, column: i16) -> Self {
        Self { row, column }
    }

    /// The next position in `direction`, or `None` past the coordinate range
    pub fn neighbour(self, direction: Direction) -> Option<Self> {
        let (d_row, d_column) = direction.offset();
        Some(Self::new(
            self.row.checked_add(d_row)?,
            self.column.checked_add(d_column)?,
        ))
    }

    /// Whether `other` is one step north, east, south or west of this position
    pub fn is_adjacent_to(self, other: Position) -> bool {
        let d_row = (self.row as i32 - other.row as i32).abs();
        let d_column = (self.column as i32 - other.column as i32).abs();
        d_row + d_column == 1
    }
}

impl From<(i16, i16)> for Position {
    fn from((row, column): (i16, i16)) -> Self {
        Self::new(row, column)
    }
}

/// A move a player wants to make in a game
///
/// This does not mean a move is necessarily legal; that depends on the ruleset used.
/// A move remembers the tower it was placed on once it has been made on a
/// board, which is what allows the board to undo it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub source: Position,
    pub target: Position,
    affected_tower: Option<Tower>,
    skip: bool,
}

impl Move {
    pub fn new<S: Into<Position>, T: Into<Position>>(source: S, target: T) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            affected_tower: None,
            skip: false,
        }
    }

    /// Moves the tower at `source` onto its neighbour in `direction`
    ///
    /// Past the coordinate range the target is the source itself, which no
    /// board or ruleset accepts.
    pub fn towards<S: Into<Position>>(source: S, direction: Direction) -> Self {
        let source = source.into();
        Self::new(source, source.neighbour(direction).unwrap_or(source))
    }

    /// The move of a player who has no legal move left
    pub fn skip() -> Self {
        Self {
            source: Position::default(),
            target: Position::default(),
            affected_tower: None,
            skip: true,
        }
    }

    pub fn is_skip(&self) -> bool {
        self.skip
    }

    /// The target tower as it was before this move was made, if it was made
    pub fn affected_tower(&self) -> Option<Tower> {
        self.affected_tower
    }

    pub(crate) fn record(&mut self, tower: Tower) {
        self.affected_tower = Some(tower);
    }

    pub(crate) fn forget(&mut self) {
        self.affected_tower = None;
    }
}
