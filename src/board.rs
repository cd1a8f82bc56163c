use anyhow::{anyhow, Result};

use std::fmt;

use crate::{moves::*, tower::*, HEIGHT, WIDTH};

// single bricks in a checkerboard pattern, row by row
fn starting_cells(height: usize, width: usize) -> Vec<Tower> {
    let mut cells = Vec::with_capacity(height * width);
    for row in 0..height {
        for column in 0..width {
            cells.push(Tower::new(Color::of_cell(row, column)));
        }
    }
    cells
}

/// A rectangular game board of towers
///
/// Cells are stored row by row. The dimensions are fixed once the board is created.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    height: u8,
    width: u8,
    cells: Vec<Tower>,
}

impl Board {
    /// Creates a board in the starting position
    ///
    /// The cell at `(row, column)` holds a single brick of color `(row + column) % 2`.
    /// Fails for an empty board and for boards whose cells would not fit into a
    /// single tower.
    pub fn new(height: u8, width: u8) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(anyhow!("Invalid board size {}x{}", height, width));
        }
        let num_cells = height as usize * width as usize;
        if num_cells > MAX_TOWER_HEIGHT as usize {
            return Err(anyhow!(
                "Invalid board size {}x{}, at most {} cells are supported",
                height,
                width,
                MAX_TOWER_HEIGHT
            ));
        }

        Ok(Self {
            height,
            width,
            cells: starting_cells(height as usize, width as usize),
        })
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row >= 0
            && position.column >= 0
            && position.row < self.height as i16
            && position.column < self.width as i16
    }

    // callers must check `contains` first
    fn index(&self, position: Position) -> usize {
        position.row as usize * self.width as usize + position.column as usize
    }

    /// All positions of the board in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (height, width) = (self.height as i16, self.width as i16);
        (0..height).flat_map(move |row| (0..width).map(move |column| Position::new(row, column)))
    }

    /// Returns the tower at `position`, or `None` for empty cells and positions off the board
    pub fn tower_at(&self, position: Position) -> Option<Tower> {
        if !self.contains(position) {
            return None;
        }
        let tower = self.cells[self.index(position)];
        if tower.is_empty() {
            None
        } else {
            Some(tower)
        }
    }

    /// The height of the tallest tower owned by `color`, or 0 if it owns none
    pub fn max_height_of(&self, color: Color) -> u16 {
        self.cells
            .iter()
            .filter(|tower| tower.owner() == Some(color))
            .map(Tower::height)
            .max()
            .unwrap_or(0)
    }

    /// The sum of all tower heights, which no move changes
    pub fn total_height(&self) -> u32 {
        self.cells.iter().map(|tower| tower.height() as u32).sum()
    }

    pub fn num_towers(&self) -> usize {
        self.cells.iter().filter(|tower| !tower.is_empty()).count()
    }

    // both positions are on the board and differ
    fn valid_squares(&self, mv: &Move) -> bool {
        !mv.is_skip()
            && mv.source != mv.target
            && self.contains(mv.source)
            && self.contains(mv.target)
    }

    /// Puts the source tower of `mv` on top of its target tower
    ///
    /// Only checks that both positions are distinct and on the board and that
    /// the merged tower fits, the rules of the game are up to the ruleset. On success the previous target
    /// tower is stored in the move so it can be undone.
    /// Returns false and leaves the board untouched otherwise.
    pub fn make(&mut self, mv: &mut Move) -> bool {
        if !self.valid_squares(mv) {
            return false;
        }
        let source = self.index(mv.source);
        let target = self.index(mv.target);

        let mut merged = self.cells[target];
        if !merged.attach(self.cells[source]) {
            return false;
        }
        mv.record(self.cells[target]);
        self.cells[target] = merged;
        self.cells[source] = Tower::EMPTY;
        true
    }

    /// Reverts a move made by [`Board::make`]
    ///
    /// Moves have to be undone in the reverse order they were made. Fails if the
    /// move was not made, or its source cell has been filled since.
    /// On success the move forgets its stored target tower.
    pub fn undo(&mut self, mv: &mut Move) -> bool {
        if !self.valid_squares(mv) {
            return false;
        }
        let affected = match mv.affected_tower() {
            Some(tower) => tower,
            None => return false,
        };
        let source = self.index(mv.source);
        let target = self.index(mv.target);
        if !self.cells[source].is_empty() {
            return false;
        }

        self.cells.swap(source, target);
        self.cells[target] = affected;
        // nothing was stacked if the move started on an empty cell
        if !self.cells[source].detach_from(affected) {
            self.cells[source] = Tower::EMPTY;
        }
        mv.forget();
        true
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            height: HEIGHT as u8,
            width: WIDTH as u8,
            cells: starting_cells(HEIGHT, WIDTH),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width as usize) {
            let line: Vec<String> = row.iter().map(|tower| format!("{:>3}", tower.to_string())).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
