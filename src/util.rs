//! Helpers for driving complete games, used in tests.

use crate::interface::{Error, Evaluation, Game};
use crate::search::Minimax;

/// Play a game to completion with the MAX side moving first.
///
/// MAX moves come from `max_move`; the engine answers for MIN. Returns the
/// final utility. A `None` from `max_move` concedes the rest of the game and
/// returns the utility of the position as it stands.
pub fn play_match<G, F>(
    game: &mut G,
    engine: &mut Minimax<G>,
    mut max_move: F,
) -> Result<Evaluation, Error>
where
    G: Game,
    F: FnMut(&G) -> Option<G::M>,
{
    while !game.is_terminal() {
        match max_move(game) {
            Some(m) => game.execute(m, true),
            None => break,
        }
        if game.is_terminal() {
            break;
        }
        let m = engine.search(game)?;
        game.execute(m, false);
    }
    Ok(game.utility())
}
