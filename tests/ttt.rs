// End-to-end behavior of the engine on tic-tac-toe: the opening scenarios,
// full games against optimal and random opposition, and the contract
// properties the search depends on.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gambit::ttt::{Square, TicTacToe};
use gambit::util::play_match;
use gambit::{Evaluation, Game, Minimax, NEG_INF, POS_INF};

/// Exact value of the position with MAX to move, searched to the end.
fn max_value(game: &mut TicTacToe) -> Evaluation {
    if game.is_terminal() {
        return game.utility();
    }
    let mut moves = Vec::new();
    game.legal_moves(&mut moves);
    let mut best = NEG_INF;
    for m in moves {
        game.execute(m, true);
        best = best.max(min_value(game));
        game.undo(m, true);
    }
    best
}

/// Exact value of the position with MIN to move, searched to the end.
fn min_value(game: &mut TicTacToe) -> Evaluation {
    if game.is_terminal() {
        return game.utility();
    }
    let mut moves = Vec::new();
    game.legal_moves(&mut moves);
    let mut best = POS_INF;
    for m in moves {
        game.execute(m, false);
        best = best.min(max_value(game));
        game.undo(m, false);
    }
    best
}

/// A perfect MAX player: the first move reaching the game-theoretic value.
fn best_max_move(game: &TicTacToe) -> Option<Square> {
    let mut game = game.clone();
    let mut moves = Vec::new();
    game.legal_moves(&mut moves);
    let mut best = NEG_INF;
    let mut best_move = None;
    for m in moves {
        game.execute(m, true);
        let value = min_value(&mut game);
        game.undo(m, true);
        if value > best {
            best = value;
            best_move = Some(m);
        }
    }
    best_move
}

#[test]
fn opening_reply_is_a_center_or_corner() {
    let mut game = TicTacToe::new(3);
    let mut engine = Minimax::with_max_depth(5);
    let m = engine.search(&mut game).unwrap();
    let good = [
        Square::new(1, 1),
        Square::new(0, 0),
        Square::new(0, 2),
        Square::new(2, 0),
        Square::new(2, 2),
    ];
    assert!(good.contains(&m), "weak opening reply {m}");
}

#[test]
fn optimal_play_from_both_sides_draws() {
    let mut game = TicTacToe::new(3);
    let mut engine = Minimax::with_max_depth(9);
    let utility = play_match(&mut game, &mut engine, best_max_move).unwrap();
    assert_eq!(utility, 0, "{game}");
}

#[test]
fn engine_never_loses_to_a_random_opponent() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let mut game = TicTacToe::new(3);
        let mut engine = Minimax::with_max_depth(9);
        let utility = play_match(&mut game, &mut engine, |g| {
            let mut moves = Vec::new();
            g.legal_moves(&mut moves);
            if moves.is_empty() {
                None
            } else {
                Some(moves[rng.gen_range(0..moves.len())])
            }
        })
        .unwrap();
        assert!(utility <= 0, "a random player beat the engine\n{game}");
    }
}

#[test]
fn search_blocks_an_imminent_row() {
    let mut game = TicTacToe::new(3);
    game.execute(Square::new(0, 0), true);
    game.execute(Square::new(1, 1), false);
    game.execute(Square::new(0, 1), true);
    let mut engine = Minimax::with_max_depth(5);
    assert_eq!(engine.search(&mut game), Ok(Square::new(0, 2)));
}

#[test]
fn search_takes_a_win_over_a_block() {
    // Both sides threaten a row; the engine finishes its own.
    let mut game = TicTacToe::new(3);
    game.execute(Square::new(0, 0), true);
    game.execute(Square::new(2, 0), false);
    game.execute(Square::new(0, 1), true);
    game.execute(Square::new(2, 1), false);
    let mut engine = Minimax::with_max_depth(5);
    assert_eq!(engine.search(&mut game), Ok(Square::new(2, 2)));
}

#[test]
fn search_plays_the_last_remaining_square() {
    // Eight squares filled, no line, no threats: (2, 2) is the only move.
    let mut game = TicTacToe::new(3);
    for (row, col, is_max) in [
        (0, 0, true),
        (0, 1, false),
        (0, 2, true),
        (1, 0, true),
        (1, 1, false),
        (1, 2, false),
        (2, 0, false),
        (2, 1, true),
    ] {
        game.execute(Square::new(row, col), is_max);
    }
    assert!(!game.is_terminal());
    let mut engine = Minimax::with_max_depth(3);
    assert_eq!(engine.search(&mut game), Ok(Square::new(2, 2)));
}

#[test]
fn heuristic_stays_inside_the_win_bound() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let mut game = TicTacToe::new(3);
        let mut is_max = true;
        let plies = rng.gen_range(0..7);
        for _ in 0..plies {
            let mut moves = Vec::new();
            game.legal_moves(&mut moves);
            let m = moves[rng.gen_range(0..moves.len())];
            game.execute(m, is_max);
            if game.is_terminal() {
                game.undo(m, is_max);
            } else {
                is_max = !is_max;
            }
        }
        assert!(game.heuristic_evaluation().abs() < game.win_score(), "{game}");
    }
}

proptest! {
    // Every execute must be exactly inverted by its matching undo, and a
    // whole stack of moves must unwind back to the empty board.
    #[test]
    fn execute_undo_restores_the_board(indices in proptest::collection::vec(0usize..9, 1..9)) {
        let mut game = TicTacToe::new(3);
        let mut applied = Vec::new();
        let mut is_max = true;
        for index in indices {
            let square = Square::new((index / 3) as u8, (index % 3) as u8);
            if game.mark_at(square).is_some() {
                continue;
            }
            let before = game.clone();
            game.execute(square, is_max);
            game.undo(square, is_max);
            prop_assert_eq!(&game, &before);
            game.execute(square, is_max);
            applied.push((square, is_max));
            is_max = !is_max;
        }
        for (square, is_max) in applied.into_iter().rev() {
            game.undo(square, is_max);
        }
        prop_assert_eq!(game, TicTacToe::new(3));
    }
}
