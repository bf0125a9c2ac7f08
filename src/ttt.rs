//! A generalized Tic-Tac-Toe implementation of the game contract.
//!
//! Supports any board size from 2 up to 99. X is the MAX player and moves
//! first; O is the MIN player, the side the engine plays. Completing a full
//! row, column, or diagonal wins.

use std::fmt::{self, Display, Formatter};

use crate::interface::{Evaluation, Game};

/// A player's mark. X is the MAX side, O the MIN side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Display for Mark {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Mark::X => 'X',
                Mark::O => 'O',
            }
        )
    }
}

/// A board coordinate, and the move type of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Square {
        Square { row, col }
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// An N-by-N tic-tac-toe board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicTacToe {
    size: usize,
    marks: Vec<Option<Mark>>,
    win: Evaluation,
    // Static weights rewarding central square control, used by the
    // heuristic.
    position_weight: Vec<Evaluation>,
}

impl TicTacToe {
    /// Create an empty board of the given side length.
    pub fn new(size: usize) -> TicTacToe {
        assert!((2..100).contains(&size), "board size must be between 2 and 99");
        let mid = (size / 2) as i64;
        let mut position_weight = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let dist = (row as i64 - mid).abs().max((col as i64 - mid).abs());
                position_weight.push(size as Evaluation - dist as Evaluation);
            }
        }
        TicTacToe {
            size,
            marks: vec![None; size * size],
            win: 100 * size as Evaluation,
            position_weight,
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Utility value awarded for a completed MAX line.
    pub fn win_score(&self) -> Evaluation {
        self.win
    }

    /// The mark at `square`, if any. The square must be in bounds.
    pub fn mark_at(&self, square: Square) -> Option<Mark> {
        self.marks[self.index(square)]
    }

    /// True when `square` is within bounds and unmarked.
    pub fn is_legal(&self, square: Square) -> bool {
        (square.row as usize) < self.size
            && (square.col as usize) < self.size
            && self.marks[square.row as usize * self.size + square.col as usize].is_none()
    }

    fn index(&self, square: Square) -> usize {
        square.row as usize * self.size + square.col as usize
    }

    /// Every winnable line: for each index the row then the column, then the
    /// two diagonals. The order is fixed because it resolves tactical ties.
    fn lines(&self) -> Vec<Vec<Square>> {
        let n = self.size;
        let mut lines: Vec<Vec<Square>> = Vec::with_capacity(2 * n + 2);
        for i in 0..n {
            lines.push((0..n).map(|j| Square::new(i as u8, j as u8)).collect());
            lines.push((0..n).map(|j| Square::new(j as u8, i as u8)).collect());
        }
        lines.push((0..n).map(|d| Square::new(d as u8, d as u8)).collect());
        lines.push((0..n).map(|d| Square::new(d as u8, (n - 1 - d) as u8)).collect());
        lines
    }

    /// Score one line: `100 * marks` when only one player occupies it
    /// (positive for X, negative for O), zero when blocked or empty.
    fn score_line(&self, line: &[Square]) -> Evaluation {
        let mut xs = 0;
        let mut os = 0;
        for &square in line {
            match self.mark_at(square) {
                Some(Mark::X) => xs += 1,
                Some(Mark::O) => os += 1,
                None => {}
            }
        }
        if xs > 0 && os > 0 {
            return 0;
        }
        let score = 100 * xs.max(os);
        if xs > 0 {
            score
        } else {
            -score
        }
    }

    /// The empty square finishing `line` for `mark`, when the line holds
    /// size - 1 of that mark, one empty square, and nothing else.
    fn completing_square(&self, line: &[Square], mark: Mark) -> Option<Square> {
        let mut count = 0;
        let mut empty = None;
        for &square in line {
            match self.mark_at(square) {
                Some(m) if m == mark => count += 1,
                Some(_) => return None,
                None => {
                    if empty.is_some() {
                        return None;
                    }
                    empty = Some(square);
                }
            }
        }
        if count == self.size - 1 {
            empty
        } else {
            None
        }
    }

    /// First square (in line order) that completes a line for `mark`.
    fn win_in_one(&self, mark: Mark) -> Option<Square> {
        self.lines().into_iter().find_map(|line| self.completing_square(&line, mark))
    }
}

impl Game for TicTacToe {
    type M = Square;

    fn legal_moves(&self, moves: &mut Vec<Square>) {
        for row in 0..self.size {
            for col in 0..self.size {
                let square = Square::new(row as u8, col as u8);
                if self.mark_at(square).is_none() {
                    moves.push(square);
                }
            }
        }
    }

    fn is_terminal(&self) -> bool {
        let utility = self.utility();
        utility == self.win || utility == -self.win || self.marks.iter().all(|m| m.is_some())
    }

    fn utility(&self) -> Evaluation {
        for line in self.lines() {
            let mut sum = 0;
            for &square in &line {
                match self.mark_at(square) {
                    Some(Mark::X) => sum += 1,
                    Some(Mark::O) => sum -= 1,
                    None => {}
                }
            }
            if sum == self.size as Evaluation {
                return self.win;
            }
            if sum == -(self.size as Evaluation) {
                return -self.win;
            }
        }
        // Draws and unfinished positions both score zero.
        0
    }

    fn execute(&mut self, m: Square, is_max: bool) {
        let index = self.index(m);
        assert!(self.marks[index].is_none(), "execute on an occupied square");
        self.marks[index] = Some(if is_max { Mark::X } else { Mark::O });
    }

    fn undo(&mut self, m: Square, _is_max: bool) {
        let index = self.index(m);
        assert!(self.marks[index].is_some(), "undo on an empty square");
        self.marks[index] = None;
    }

    fn heuristic_evaluation(&self) -> Evaluation {
        let mut best_x = 0;
        let mut best_o = 0;
        for line in self.lines() {
            let score = self.score_line(&line);
            if score > 0 {
                best_x = best_x.max(score);
            } else if score < 0 {
                best_o = best_o.min(score);
            }
        }
        let mut positional = 0;
        for (index, mark) in self.marks.iter().enumerate() {
            match mark {
                Some(Mark::X) => positional += self.position_weight[index],
                Some(Mark::O) => positional -= self.position_weight[index],
                None => {}
            }
        }
        // Clamped strictly inside the win bound so a cutoff estimate can
        // never be mistaken for a decided game.
        (best_x + best_o + positional).clamp(1 - self.win, self.win - 1)
    }

    fn tactical_move(&self) -> Option<Square> {
        // A win now beats blocking, so check our own lines first.
        self.win_in_one(Mark::O).or_else(|| self.win_in_one(Mark::X))
    }
}

impl Display for TicTacToe {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                match self.mark_at(Square::new(row as u8, col as u8)) {
                    Some(mark) => write!(f, " {} ", mark)?,
                    None => write!(f, "   ")?,
                }
                if col < self.size - 1 {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;
            if row < self.size - 1 {
                writeln!(f, "{}", vec!["---"; self.size].join("+"))?;
            }
        }
        Ok(())
    }
}
