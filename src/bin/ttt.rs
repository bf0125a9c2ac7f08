//! A console front end for playing tic-tac-toe against the engine.
//!
//! The human plays X, the MAX side; the engine answers for O.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gambit::ttt::{Mark, Square, TicTacToe};
use gambit::{Evaluation, Game, Minimax};

const RESET: &str = "\u{1b}[0m";
const RED: &str = "\u{1b}[31m";
const CYAN: &str = "\u{1b}[36m";
const YELLOW: &str = "\u{1b}[33m";

#[derive(Parser)]
#[command(name = "ttt", about = "Play tic-tac-toe against a minimax opponent")]
struct Args {
    /// Board size, e.g. 3 for a 3x3 board.
    #[arg(long, default_value_t = 3)]
    size: usize,
    /// Maximum search depth. Deeper looks further ahead but takes longer.
    #[arg(long, default_value_t = 5)]
    depth: usize,
    /// Let the engine make the opening move instead of the human.
    #[arg(long)]
    ai_first: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut game = TicTacToe::new(args.size);
    let mut engine = Minimax::with_max_depth(args.depth);
    let mut humans_turn = !args.ai_first;

    if humans_turn {
        print_board(&game, None);
    }
    while !game.is_terminal() {
        let ai_move = if humans_turn {
            let m = read_move(&game)?;
            game.execute(m, true);
            None
        } else {
            println!("\nAI's turn: ({RED}O{RESET} marks the most recent AI move)");
            let m = engine.search(&mut game).context("engine failed to choose a move")?;
            game.execute(m, false);
            Some(m)
        };
        humans_turn = !humans_turn;
        print_board(&game, ai_move);
    }
    announce(game.utility());
    Ok(())
}

/// Prompt until the human enters an in-bounds, unmarked `row col` pair.
fn read_move(game: &TicTacToe) -> Result<Square> {
    let stdin = io::stdin();
    loop {
        print!("\nYour turn: enter row & column separated by space: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            bail!("standard input closed before the game finished");
        }
        let mut fields = line.split_whitespace();
        let parsed = match (fields.next(), fields.next()) {
            (Some(row), Some(col)) => row.parse::<u8>().ok().zip(col.parse::<u8>().ok()),
            _ => None,
        };
        match parsed {
            Some((row, col)) if game.is_legal(Square::new(row, col)) => {
                return Ok(Square::new(row, col));
            }
            _ => println!("Invalid position, please try again."),
        }
    }
}

/// Render the board with row and column headers. X is cyan, O yellow, and
/// the most recent engine move red.
fn print_board(game: &TicTacToe, last_ai_move: Option<Square>) {
    let size = game.size();
    print!("   ");
    for col in 0..size {
        print!(" {col}  ");
    }
    println!();
    for row in 0..size {
        print!(" {row} ");
        for col in 0..size {
            let square = Square::new(row as u8, col as u8);
            match game.mark_at(square) {
                Some(Mark::X) => print!(" {CYAN}X{RESET} "),
                Some(Mark::O) if last_ai_move == Some(square) => print!(" {RED}O{RESET} "),
                Some(Mark::O) => print!(" {YELLOW}O{RESET} "),
                None => print!("   "),
            }
            if col < size - 1 {
                print!("|");
            }
        }
        println!();
        if row < size - 1 {
            println!("   {}", vec!["---"; size].join("+"));
        }
    }
}

fn announce(utility: Evaluation) {
    if utility > 0 {
        println!("\nPlayer (X) wins!");
    } else if utility < 0 {
        println!("\nAI (O) wins!");
    } else {
        println!("\nIt's a draw!");
    }
}
