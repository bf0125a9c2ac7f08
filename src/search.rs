//! Depth-limited minimax with alpha-beta pruning.
//!
//! The engine resolves MIN decisions: MAX is assumed to have moved first,
//! and `search` picks the reply that minimizes the score MAX can force.

use tracing::{debug, trace};

use crate::interface::{Error, Evaluation, Game, NEG_INF, POS_INF};

/// The moves below a node, or nothing usable from a pruned branch.
enum Line<M> {
    /// Best play by both sides from the node down to the horizon.
    Exact(Vec<M>),
    /// The branch was cut off; the score is only a bound and no move data
    /// can be read out of it.
    Cutoff,
}

/// Score of a subtree paired with the line that produced it.
struct ScoredLine<M> {
    score: Evaluation,
    line: Line<M>,
}

/// Recycles move buffers between nodes so the search allocates a bounded
/// number of vectors regardless of tree size.
struct MovePool<M> {
    pool: Vec<Vec<M>>,
}

impl<M> Default for MovePool<M> {
    fn default() -> MovePool<M> {
        MovePool { pool: Vec::new() }
    }
}

impl<M> MovePool<M> {
    fn alloc(&mut self) -> Vec<M> {
        self.pool.pop().unwrap_or_default()
    }

    fn free(&mut self, mut moves: Vec<M>) {
        moves.clear();
        self.pool.push(moves);
    }
}

/// Applies a move on construction and takes it back when dropped, so every
/// exit path out of a node leaves the position exactly as it was found.
struct Played<'a, G: Game> {
    game: &'a mut G,
    m: G::M,
    is_max: bool,
}

impl<'a, G: Game> Played<'a, G> {
    fn new(game: &'a mut G, m: G::M, is_max: bool) -> Played<'a, G> {
        game.execute(m, is_max);
        Played { game, m, is_max }
    }

    fn game(&mut self) -> &mut G {
        self.game
    }
}

impl<G: Game> Drop for Played<'_, G> {
    fn drop(&mut self) {
        self.game.undo(self.m, self.is_max);
    }
}

/// Minimax search over any [`Game`], bounded to a fixed depth.
///
/// The engine is stateless between calls apart from its depth limit and
/// recycled move buffers; the caller owns the game and advances it between
/// searches.
pub struct Minimax<G: Game> {
    max_depth: usize,
    move_pool: MovePool<G::M>,
    prev_value: Evaluation,
}

impl<G: Game> Minimax<G> {
    /// Create an engine that searches `max_depth` plies past the root.
    ///
    /// A depth of 0 disables lookahead entirely: only the tactical shortcut
    /// can produce a move.
    pub fn with_max_depth(max_depth: usize) -> Minimax<G> {
        Minimax { max_depth, move_pool: MovePool::default(), prev_value: 0 }
    }

    /// Root score of the last full search. Unchanged by tactical returns.
    #[doc(hidden)]
    pub fn root_value(&self) -> Evaluation {
        self.prev_value
    }

    /// Best move for the MIN side in the current position.
    ///
    /// An immediate win or forced block reported by the game is returned
    /// without searching; otherwise the position is explored to the depth
    /// limit and the first move of the principal variation is returned.
    pub fn search(&mut self, game: &mut G) -> Result<G::M, Error> {
        if game.is_terminal() {
            return Err(Error::TerminalPosition);
        }
        if let Some(m) = game.tactical_move() {
            trace!("tactical move available, skipping search");
            return Ok(m);
        }
        let result = self.min(game, NEG_INF, POS_INF, 0);
        self.prev_value = result.score;
        debug!(score = result.score, depth = self.max_depth, "search finished");
        match result.line {
            Line::Exact(path) if !path.is_empty() => Ok(path[0]),
            _ => {
                let mut moves = self.move_pool.alloc();
                game.legal_moves(&mut moves);
                let empty = moves.is_empty();
                self.move_pool.free(moves);
                Err(if empty { Error::NoLegalMoves } else { Error::NoVariation })
            }
        }
    }

    /// MAX node: pick the child that maximizes the score.
    fn max(
        &mut self,
        game: &mut G,
        mut alpha: Evaluation,
        beta: Evaluation,
        depth: usize,
    ) -> ScoredLine<G::M> {
        if game.is_terminal() {
            return ScoredLine { score: game.utility(), line: Line::Exact(Vec::new()) };
        }
        if depth == self.max_depth {
            return ScoredLine {
                score: game.heuristic_evaluation(),
                line: Line::Exact(Vec::new()),
            };
        }
        let mut moves = self.move_pool.alloc();
        game.legal_moves(&mut moves);
        let mut best = Line::Exact(Vec::new());
        let mut cutoff = None;
        for &m in moves.iter() {
            let child = {
                let mut played = Played::new(game, m, true);
                self.min(played.game(), alpha, beta, depth + 1)
            };
            if child.score >= beta {
                // MIN already has a better option elsewhere; nothing below
                // this node can matter.
                cutoff = Some(child.score);
                break;
            }
            if child.score > alpha {
                alpha = child.score;
                best = match child.line {
                    Line::Exact(mut path) => {
                        path.insert(0, m);
                        Line::Exact(path)
                    }
                    // A cutoff child scores outside the open window, so it
                    // can never improve alpha.
                    Line::Cutoff => unreachable!("cutoff line inside the search window"),
                };
            }
        }
        self.move_pool.free(moves);
        match cutoff {
            Some(score) => ScoredLine { score, line: Line::Cutoff },
            None => ScoredLine { score: alpha, line: best },
        }
    }

    /// MIN node: mirror image of [`Minimax::max`], minimizing the score.
    fn min(
        &mut self,
        game: &mut G,
        alpha: Evaluation,
        mut beta: Evaluation,
        depth: usize,
    ) -> ScoredLine<G::M> {
        if game.is_terminal() {
            return ScoredLine { score: game.utility(), line: Line::Exact(Vec::new()) };
        }
        if depth == self.max_depth {
            return ScoredLine {
                score: game.heuristic_evaluation(),
                line: Line::Exact(Vec::new()),
            };
        }
        let mut moves = self.move_pool.alloc();
        game.legal_moves(&mut moves);
        let mut best = Line::Exact(Vec::new());
        let mut cutoff = None;
        for &m in moves.iter() {
            let child = {
                let mut played = Played::new(game, m, false);
                self.max(played.game(), alpha, beta, depth + 1)
            };
            if child.score <= alpha {
                // MAX already has a better option elsewhere.
                cutoff = Some(child.score);
                break;
            }
            if child.score < beta {
                beta = child.score;
                best = match child.line {
                    Line::Exact(mut path) => {
                        path.insert(0, m);
                        Line::Exact(path)
                    }
                    Line::Cutoff => unreachable!("cutoff line inside the search window"),
                };
            }
        }
        self.move_pool.free(moves);
        match cutoff {
            Some(score) => ScoredLine { score, line: Line::Cutoff },
            None => ScoredLine { score: beta, line: best },
        }
    }
}
