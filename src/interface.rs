//! The common structures and traits.

/// An assessment of a game state from the MAX player's perspective.
/// Higher values favor MAX, lower values favor MIN, and a draw is zero.
pub type Evaluation = i32;

// These definitions ensure that they negate to each other, but it leaves
// i32::MIN as a valid value less than NEG_INF. Don't use this value.

/// Upper sentinel for the alpha-beta bounds. No utility or heuristic value
/// may ever reach it.
pub const POS_INF: Evaluation = i32::MAX;
/// Lower sentinel for the alpha-beta bounds.
pub const NEG_INF: Evaluation = -POS_INF;

/// Failures surfaced at the search boundary.
///
/// The search never recovers from a malformed game implementation; these
/// cover misuse that can be rejected before or after the recursion runs.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// `search` was invoked on a position that is already decided.
    #[error("search invoked on a terminal position")]
    TerminalPosition,
    /// The game reported a non-terminal position with no legal moves.
    #[error("non-terminal position has no legal moves")]
    NoLegalMoves,
    /// The search produced no variation where a move was required, e.g. a
    /// zero-depth search with no tactical move available.
    #[error("search produced no principal variation")]
    NoVariation,
}

/// Defines the rules for a two-player, zero-sum, perfect-knowledge game.
///
/// The MAX side is assumed to move first overall; the engine answers for the
/// MIN side. A game ties together a move type with the queries and the
/// execute/undo pair the search needs to explore its tree in place.
pub trait Game {
    /// The type of game moves.
    type M: Copy + Eq;

    /// Collect every move applicable to the current state into `moves`.
    ///
    /// The order is up to the implementation but must be deterministic: it
    /// decides which of several equally good moves the search settles on.
    fn legal_moves(&self, moves: &mut Vec<Self::M>);

    /// True once a player has won or no legal moves remain.
    fn is_terminal(&self) -> bool;

    /// Exact value of a terminal state from the MAX player's perspective:
    /// positive for a MAX win, negative for a MIN win, zero for a draw.
    ///
    /// Must return 0 when called on a non-terminal state, so an
    /// out-of-order call stays well defined.
    fn utility(&self) -> Evaluation;

    /// Apply `m` for the given side, mutating the state in place.
    fn execute(&mut self, m: Self::M, is_max: bool);

    /// Restore the state preceding the matching `execute` call.
    ///
    /// The engine always pairs the two with identical arguments, innermost
    /// first; this is a strict stack discipline, not a command history.
    /// Implementations may panic when the pairing is broken.
    fn undo(&mut self, m: Self::M, is_max: bool);

    /// Approximate value of a non-terminal state reached at the depth limit.
    ///
    /// Its magnitude must stay strictly below every reachable terminal
    /// utility magnitude, so a cutoff estimate can never outweigh a real
    /// win. Sign convention matches [`Game::utility`].
    fn heuristic_evaluation(&self) -> Evaluation;

    /// An immediate winning or blocking move for the MIN side, found from
    /// the rules alone without search, or `None` when no such move exists.
    fn tactical_move(&self) -> Option<Self::M>;
}
