//! Agents searching the game tree for strong moves

use rayon::prelude::*;

use std::time::{Duration, Instant};

use crate::{board::*, moves::*, rules::*, tower::*};

/// Statistics and outcome of a search
#[derive(Copy, Clone, Debug)]
pub struct SearchResult {
    pub num_explored_nodes: u64,
    pub time_spent: Duration,
    /// The best move found, or a skip if there was no legal move
    pub best_move: Move,
    /// Counted in half-turns, that is each player's move counts as a level of depth
    pub max_explored_depth: u8,
    /// A color that can enforce a win, if one was proven
    pub winner: Option<Color>,
}

impl SearchResult {
    pub fn seconds_spent(&self) -> f64 {
        self.time_spent.as_secs_f64()
    }
}

/// An explorer expands nodes of a game tree to find notable states
pub trait Explorer {
    /// Returns a move considered "best" for `active_player` as well as some
    /// statistics on the search. `board` is left as it is.
    fn explore(&self, board: &Board, active_player: Color) -> SearchResult;
}

// picks the first move with the strictly greatest value
fn best_of<I: IntoIterator<Item = (Move, GameValue)>>(rated_moves: I) -> Move {
    let mut best_move = Move::skip();
    let mut max_rating = GameValue::MIN;
    for (mv, rating) in rated_moves {
        if best_move.is_skip() || rating > max_rating {
            max_rating = rating;
            best_move = mv;
        }
    }
    best_move
}

// rates a move by making it, reading the value and taking it back
fn rate<R: Ruleset>(rules: &R, board: &mut Board, mut mv: Move) -> (Move, GameValue) {
    if !board.make(&mut mv) {
        return (mv, GameValue::MIN);
    }
    let rating = rules.compute_value_of(board);
    let undone = board.undo(&mut mv);
    debug_assert!(undone, "failed to undo {:?}", mv);
    (mv, rating)
}

/// Searches all moves of the active player one ply deep
///
/// # Notes
/// The value of each position is the ruleset's static rating from the first
/// player's point of view, and the move leading to the highest value is picked.
/// Ties go to the move generated first.
#[derive(Clone, Default, Debug)]
pub struct FullExplorer<R: Ruleset = StandardRuleset> {
    rules: R,
}

impl FullExplorer {
    /// Creates an explorer backed by the standard rule set
    pub fn new() -> Self {
        Self::with_ruleset(StandardRuleset)
    }
}

impl<R: Ruleset> FullExplorer<R> {
    pub fn with_ruleset(rules: R) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Performs the search, logging the outcome to stdout
    pub fn explore_verbose(&self, board: &Board, active_player: Color) -> SearchResult {
        let result = self.explore(board, active_player);
        println!(
            "Explored {} positions at depth {} in {:.6}ms, best move: {:?}",
            result.num_explored_nodes,
            result.max_explored_depth,
            result.seconds_spent() * 1000.0,
            result.best_move
        );
        result
    }
}

impl<R: Ruleset> Explorer for FullExplorer<R> {
    fn explore(&self, board: &Board, active_player: Color) -> SearchResult {
        let start = Instant::now();
        let possible_moves = self.rules.legal_moves(board, active_player);

        let mut tmp_board = board.clone();
        let best_move = best_of(
            possible_moves
                .iter()
                .map(|&mv| rate(&self.rules, &mut tmp_board, mv)),
        );

        SearchResult {
            num_explored_nodes: possible_moves.len() as u64,
            time_spent: start.elapsed(),
            best_move,
            max_explored_depth: 1,
            winner: None,
        }
    }
}

/// Same search as [`FullExplorer`], spreading the candidate moves over threads
///
/// Every worker rates its moves on its own copy of the board.
#[derive(Clone, Default, Debug)]
pub struct ParallelExplorer<R: Ruleset = StandardRuleset> {
    rules: R,
}

impl ParallelExplorer {
    pub fn new() -> Self {
        Self::with_ruleset(StandardRuleset)
    }
}

impl<R: Ruleset> ParallelExplorer<R> {
    pub fn with_ruleset(rules: R) -> Self {
        Self { rules }
    }
}

impl<R: Ruleset> Explorer for ParallelExplorer<R> {
    fn explore(&self, board: &Board, active_player: Color) -> SearchResult {
        let start = Instant::now();
        let possible_moves = self.rules.legal_moves(board, active_player);

        // collecting keeps the generation order, which decides ties
        let rated_moves: Vec<(Move, GameValue)> = possible_moves
            .par_iter()
            .map_with(board.clone(), |tmp_board, &mv| {
                rate(&self.rules, tmp_board, mv)
            })
            .collect();

        SearchResult {
            num_explored_nodes: rated_moves.len() as u64,
            time_spent: start.elapsed(),
            best_move: best_of(rated_moves),
            max_explored_depth: 1,
            winner: None,
        }
    }
}
