//! Rule engine for the tower-stacking game 'Sanjego'
//!
//! Every cell of a rectangular board starts with a single brick, laid out
//! in a checkerboard pattern. A move puts a tower on top of an orthogonally
//! adjacent one and the merged tower belongs to the mover.
//! The engine applies and reverts moves, checks their legality, rates
//! positions and searches one ply ahead for the best move.
//!
//! # Basic Usage
//!
//! ```
//! use sanjego::{board::Board, explorer::*, tower::Color};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::new(1, 2)?;
//! let result = FullExplorer::new().explore(&board, Color::Blue);
//!
//! assert_eq!(result.max_explored_depth, 1);
//! assert_eq!(result.num_explored_nodes, 1);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod tower;

pub mod moves;

pub mod board;

pub mod rules;

pub mod explorer;


/// The height of the default game board in cells
pub const HEIGHT: usize = 5;

/// The width of the default game board in cells
pub const WIDTH: usize = 5;

// a single tower may absorb the whole board, so it has to fit in a tower
const_assert!(HEIGHT * WIDTH <= tower::MAX_TOWER_HEIGHT as usize);
const_assert!(HEIGHT <= u8::MAX as usize && WIDTH <= u8::MAX as usize);
