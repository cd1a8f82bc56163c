use anyhow::{anyhow, Result};
use crossterm::{
    style::{style, Attribute, Color as TermColor, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use sanjego::{board::Board, moves::*, rules::*, tower::*};

fn parse_coordinate(token: &str) -> Result<i16> {
    match token.parse::<i16>() {
        Ok(value) if value >= 1 => Ok(value - 1),
        _ => Err(anyhow!("could not parse '{}' as a row or column", token)),
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Color),
    Draw,
}

/// A game in progress, remembering its moves so they can be taken back
#[derive(Clone)]
pub struct Game<R: Ruleset = AdjacentRuleset> {
    board: Board,
    rules: R,
    history: Vec<Move>,
    pub active_player: Color,
    pub state: GameState,
}

impl Game {
    pub fn new(board: Board) -> Self {
        let mut game = Self {
            board,
            rules: AdjacentRuleset,
            history: Vec::new(),
            active_player: Color::FIRST,
            state: GameState::Playing,
        };
        game.update_state();
        game
    }
}

impl<R: Ruleset> Game<R> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn num_moves(&self) -> usize {
        self.history.len()
    }

    pub fn must_skip(&self) -> bool {
        self.rules
            .legal_moves(&self.board, self.active_player)
            .is_empty()
    }

    /// Parses `<row> <column> <n|e|s|w>` or `<row> <column> <row> <column>`, one-indexed
    pub fn parse_move(&self, input: &str) -> Result<Move> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        match tokens.as_slice() {
            [row, column, direction] => {
                let mut chars = direction.chars();
                let direction = match (chars.next(), chars.next()) {
                    (Some(c), None) => Direction::from_char(c)?,
                    _ => return Err(anyhow!("could not parse '{}' as a direction", direction)),
                };
                Ok(Move::towards(
                    (parse_coordinate(row)?, parse_coordinate(column)?),
                    direction,
                ))
            }
            [row, column, target_row, target_column] => Ok(Move::new(
                (parse_coordinate(row)?, parse_coordinate(column)?),
                (parse_coordinate(target_row)?, parse_coordinate(target_column)?),
            )),
            _ => Err(anyhow!(
                "Invalid move '{}', expected <row> <column> <n|e|s|w>",
                input.trim()
            )),
        }
    }

    pub fn play_checked(&mut self, mut mv: Move) -> Result<GameState> {
        if self.state != GameState::Playing {
            return Err(anyhow!("The game is already over"));
        }
        if mv.is_skip() {
            if !self.must_skip() {
                return Err(anyhow!("{} still has a legal move", self.active_player));
            }
        } else {
            if !self.rules.move_is_allowed_on(&self.board, &mv, self.active_player) {
                return Err(anyhow!(
                    "Illegal move from ({}, {}) to ({}, {})",
                    mv.source.row + 1,
                    mv.source.column + 1,
                    mv.target.row + 1,
                    mv.target.column + 1
                ));
            }
            if !self.board.make(&mut mv) {
                return Err(anyhow!("Move {:?} does not fit on the board", mv));
            }
        }
        self.history.push(mv);
        self.active_player = self.active_player.opponent();
        self.update_state();
        Ok(self.state)
    }

    /// Takes back the most recent move
    pub fn take_back(&mut self) -> Result<()> {
        let mut mv = self
            .history
            .pop()
            .ok_or_else(|| anyhow!("There is no move to take back"))?;
        if !mv.is_skip() && !self.board.undo(&mut mv) {
            self.history.push(mv);
            return Err(anyhow!("Failed to take back {:?}", mv));
        }
        self.active_player = self.active_player.opponent();
        self.update_state();
        Ok(())
    }

    fn update_state(&mut self) {
        self.state = if !self.rules.is_game_over(&self.board) {
            GameState::Playing
        } else {
            match self.rules.compute_value_of(&self.board) {
                value if value > 0 => GameState::Won(Color::FIRST),
                value if value < 0 => GameState::Won(Color::SECOND),
                _ => GameState::Draw,
            }
        };
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let header: String = (1..=self.board.width())
            .map(|column| format!("{:>4}", column))
            .collect();
        stdout.queue(PrintStyledContent(style(format!("   {}\n", header))))?;

        for row in 0..self.board.height() as i16 {
            stdout.queue(PrintStyledContent(style(format!("{:>2} ", row + 1))))?;
            for column in 0..self.board.width() as i16 {
                let tower = self.board.tower_at(Position::new(row, column));
                let label = match tower {
                    Some(tower) => format!("{:>3}", tower.height()),
                    None => "  .".to_string(),
                };
                stdout
                    .queue(PrintStyledContent(style(" ")))?
                    .queue(PrintStyledContent(
                        style(label)
                            .attribute(Attribute::Bold)
                            .on(TermColor::Black)
                            .with(match tower.and_then(|tower| tower.owner()) {
                                Some(Color::Blue) => TermColor::Blue,
                                Some(Color::Yellow) => TermColor::Yellow,
                                None => TermColor::DarkGrey,
                            }),
                    ))?;
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use anyhow::Result;

    use super::*;

    #[test]
    fn play_to_the_end() -> Result<()> {
        let mut game = Game::new(Board::new(1, 2)?);
        assert_eq!(game.state, GameState::Playing);

        let state = game.play_checked(Move::towards((0, 0), Direction::East))?;
        assert_eq!(state, GameState::Won(Color::Blue));
        assert_eq!(game.num_moves(), 1);

        // no moves once the game is over
        assert!(game.play_checked(Move::skip()).is_err());
        assert_eq!(game.num_moves(), 1);
        Ok(())
    }

    #[test]
    fn finished_from_the_start() -> Result<()> {
        let game = Game::new(Board::new(1, 1)?);
        assert_eq!(game.state, GameState::Won(Color::Blue));
        Ok(())
    }

    #[test]
    fn draw_on_equal_towers() -> Result<()> {
        // B Y B Y B Y ends as .. B3 .. .. Y3 ..
        let mut game = Game::new(Board::new(1, 6)?);
        let moves = [
            ((0, 0), Direction::East),
            ((0, 3), Direction::East),
            ((0, 2), Direction::West),
            ((0, 5), Direction::West),
        ];
        for &(source, direction) in moves[..3].iter() {
            assert_eq!(game.play_checked(Move::towards(source, direction))?, GameState::Playing);
        }
        let (source, direction) = moves[3];
        assert_eq!(game.play_checked(Move::towards(source, direction))?, GameState::Draw);
        Ok(())
    }

    #[test]
    fn take_back_in_reverse_order() -> Result<()> {
        let initial = Board::new(2, 2)?;
        let mut game = Game::new(initial.clone());

        game.play_checked(game.parse_move("1 1 e")?)?;
        let after_first = game.board().clone();
        assert_eq!(game.active_player, Color::Yellow);
        game.play_checked(game.parse_move("2 1 2 2")?)?;
        assert_eq!(game.active_player, Color::Blue);

        game.take_back()?;
        assert_eq!(game.board(), &after_first);
        assert_eq!(game.active_player, Color::Yellow);

        game.take_back()?;
        assert_eq!(game.board(), &initial);
        assert_eq!(game.active_player, Color::Blue);
        assert_eq!(game.state, GameState::Playing);
        assert_eq!(game.num_moves(), 0);

        assert!(game.take_back().is_err());
        Ok(())
    }

    #[test]
    fn skip_only_without_moves() -> Result<()> {
        let mut game = Game::new(Board::new(2, 2)?);
        assert!(!game.must_skip());
        assert!(game.play_checked(Move::skip()).is_err());
        assert_eq!(game.active_player, Color::Blue);

        // B Y B -> . B2 B, yellow has no tower left
        let mut game = Game::new(Board::new(1, 3)?);
        game.play_checked(Move::towards((0, 0), Direction::East))?;
        assert!(game.must_skip());
        assert_eq!(game.play_checked(Move::skip())?, GameState::Playing);
        assert_eq!(game.active_player, Color::Blue);

        // a skip is taken back like any other move
        game.take_back()?;
        assert_eq!(game.active_player, Color::Yellow);
        Ok(())
    }

    #[test]
    fn illegal_input() -> Result<()> {
        let mut game = Game::new(Board::new(3, 3)?);
        assert!(game.parse_move("1 1").is_err());
        assert!(game.parse_move("0 1 e").is_err());
        assert!(game.parse_move("1 1 x").is_err());

        // not adjacent, and not blue's tower
        assert!(game.play_checked(game.parse_move("1 1 2 2")?).is_err());
        assert!(game.play_checked(game.parse_move("1 2 w")?).is_err());
        assert_eq!(game.board(), &Board::new(3, 3)?);
        assert_eq!(game.num_moves(), 0);
        Ok(())
    }
}
