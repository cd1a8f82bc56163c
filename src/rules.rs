//! Rule sets deciding which moves are legal and how good a position is

use crate::{board::*, moves::*, tower::*};

/// The value of a position from the first player's point of view
pub type GameValue = i32;

/// A set of rules the game can be played by
///
/// Board and explorers only talk to the rules through this trait, so other
/// variants of the game can be plugged in.
pub trait Ruleset: Send + Sync {
    /// Whether `active_player` may make `mv` on `board`
    fn move_is_allowed_on(&self, board: &Board, mv: &Move, active_player: Color) -> bool;

    /// Rates a position; positive values favour the first player, negative values the second
    fn compute_value_of(&self, board: &Board) -> GameValue;

    /// All legal moves of `active_player`, in a deterministic order
    fn legal_moves(&self, board: &Board, active_player: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for source in board.positions() {
            if board.tower_at(source).is_none() {
                continue;
            }
            for &direction in Direction::ALL.iter() {
                let candidate = Move::towards(source, direction);
                if self.move_is_allowed_on(board, &candidate, active_player) {
                    moves.push(candidate);
                }
            }
        }
        moves
    }

    /// The game is over once neither color can move
    fn is_game_over(&self, board: &Board) -> bool {
        self.legal_moves(board, Color::FIRST).is_empty()
            && self.legal_moves(board, Color::SECOND).is_empty()
    }
}

/// The standard rules
///
/// A move is allowed if all these conditions hold:
/// - source and target differ
/// - both contain towers
/// - the source tower is owned by the active player
///
/// Legal moves are generated to the neighbours of each tower in the order
/// south, north, east, west, going through the towers row by row.
#[derive(Copy, Clone, Default, Debug)]
pub struct StandardRuleset;

impl Ruleset for StandardRuleset {
    fn move_is_allowed_on(&self, board: &Board, mv: &Move, active_player: Color) -> bool {
        if mv.is_skip() || mv.source == mv.target {
            return false;
        }
        if board.tower_at(mv.target).is_none() {
            return false;
        }
        match board.tower_at(mv.source) {
            Some(tower) => tower.owner() == Some(active_player),
            None => false,
        }
    }

    /// The difference of the tallest towers of both players
    ///
    /// This is a heuristic, not the game theoretical value of the position.
    fn compute_value_of(&self, board: &Board) -> GameValue {
        board.max_height_of(Color::FIRST) as GameValue
            - board.max_height_of(Color::SECOND) as GameValue
    }
}

/// The standard rules restricted to moves onto neighbouring cells
#[derive(Copy, Clone, Default, Debug)]
pub struct AdjacentRuleset;

impl Ruleset for AdjacentRuleset {
    fn move_is_allowed_on(&self, board: &Board, mv: &Move, active_player: Color) -> bool {
        mv.source.is_adjacent_to(mv.target)
            && StandardRuleset.move_is_allowed_on(board, mv, active_player)
    }

    fn compute_value_of(&self, board: &Board) -> GameValue {
        StandardRuleset.compute_value_of(board)
    }
}
