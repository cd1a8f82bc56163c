use anyhow::{anyhow, Result};
use indicatif::*;

use std::io::{stdin, stdout, Stdin, Write};
use std::time::Duration;

use sanjego::{board::Board, explorer::*, moves::Move, tower::Color};

mod game;
use game::*;

/// Side lengths of the boards played during the self-play benchmark
const BENCHMARK_SIZES: std::ops::RangeInclusive<u8> = 1..=6;

fn ask(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Sanjego\n");

    if ask(&stdin, "Run the self-play benchmark instead of a game?")? {
        return benchmark();
    }

    let ai_players = (
        ask(&stdin, "Is player 1 (blue) AI controlled?")?,
        ask(&stdin, "Is player 2 (yellow) AI controlled?")?,
    );

    let mut game = Game::new(Board::default());
    let explorer = FullExplorer::new();

    // game loop
    loop {
        game.display().expect("Failed to draw board!");

        match game.state {
            GameState::Playing => {
                let is_ai = match game.active_player {
                    Color::Blue => ai_players.0,
                    Color::Yellow => ai_players.1,
                };
                let next_move = if is_ai {
                    println!("AI is thinking...");
                    stdout().flush().expect("Failed to flush to stdout!");

                    // slow down play if both players are AI
                    if ai_players == (true, true) {
                        std::thread::sleep(Duration::new(1, 0));
                    }

                    let result = explorer.explore_verbose(game.board(), game.active_player);
                    result.best_move
                } else {
                    if game.must_skip() {
                        println!("{} has no legal move and skips", game.active_player);
                        Move::skip()
                    } else {
                        print!("{} to move (u to take back) > ", game.active_player);
                        stdout().flush().expect("Failed to flush to stdout!");
                        let mut input_str = String::new();
                        stdin.read_line(&mut input_str)?;

                        if input_str.trim() == "u" {
                            // take back the AI's reply as well
                            let moves_back = if ai_players.0 || ai_players.1 { 2 } else { 1 };
                            for _ in 0..moves_back {
                                if let Err(err) = game.take_back() {
                                    println!("{}", err);
                                    break;
                                }
                            }
                            continue;
                        }
                        match game.parse_move(&input_str) {
                            Err(err) => {
                                println!("{}", err);
                                continue;
                            }
                            Ok(mv) => mv,
                        }
                    }
                };

                if let Err(err) = game.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::Won(color) => {
                println!("{} wins after {} moves!", color, game.num_moves());
                break;
            }
            GameState::Draw => {
                println!("Draw after {} moves!", game.num_moves());
                break;
            }
        }
    }
    Ok(())
}

/// Plays the explorer against itself on a range of board sizes
fn benchmark() -> Result<()> {
    let num_games = BENCHMARK_SIZES.count() * BENCHMARK_SIZES.count();
    let progress = ProgressBar::new(num_games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} {msg}")
            .progress_chars("█▓▒░  "),
    );

    let full_explorer = FullExplorer::new();
    let parallel_explorer = ParallelExplorer::new();

    let mut times = vec![];
    let mut parallel_times = vec![];
    let mut posis = vec![];
    let mut wins = (0, 0, 0);

    for height in BENCHMARK_SIZES {
        for width in BENCHMARK_SIZES {
            progress.set_message(&format!("{}x{}", height, width));
            let mut game = Game::new(Board::new(height, width)?);

            while game.state == GameState::Playing {
                let result = full_explorer.explore(game.board(), game.active_player);
                let parallel_result = parallel_explorer.explore(game.board(), game.active_player);
                if result.best_move != parallel_result.best_move {
                    return Err(anyhow!(
                        "Explorers disagree on a {}x{} board: {:?} and {:?}",
                        height,
                        width,
                        result.best_move,
                        parallel_result.best_move
                    ));
                }

                times.push(result.time_spent);
                parallel_times.push(parallel_result.time_spent);
                posis.push(result.num_explored_nodes);
                game.play_checked(result.best_move)?;
            }
            match game.state {
                GameState::Won(Color::Blue) => wins.0 += 1,
                GameState::Won(Color::Yellow) => wins.1 += 1,
                _ => wins.2 += 1,
            }
            progress.inc(1);
        }
    }
    progress.finish();

    println!(
        "Searches: {}, Mean time: {:.6}ms (parallel: {:.6}ms), Mean no. of positions: {}",
        times.len(),
        (times.iter().sum::<Duration>() / times.len() as u32).as_secs_f64() * 1000.0,
        (parallel_times.iter().sum::<Duration>() / parallel_times.len() as u32).as_secs_f64()
            * 1000.0,
        posis.iter().sum::<u64>() as f64 / posis.len() as f64,
    );
    println!(
        "Blue wins: {}, Yellow wins: {}, Draws: {}",
        wins.0, wins.1, wins.2
    );
    Ok(())
}
