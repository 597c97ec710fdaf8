//! Score conservation: scores and owned squares always agree.

use super::Invariant;
use crate::player::Player;
use crate::session::GameSession;
use crate::source::MoveSource;

/// Invariant: the sum of all players' scores equals the number of owned
/// squares.
///
/// Every completed box is awarded to exactly one player in the same step
/// that marks the square owned, so the two counts can never drift.
pub struct ScoreConservation;

impl<S: MoveSource> Invariant<GameSession<S>> for ScoreConservation {
    fn holds(session: &GameSession<S>) -> bool {
        let total: u32 = session.players().iter().map(Player::score).sum();
        total as usize == session.tracker().owned_square_count()
    }

    fn description() -> &'static str {
        "sum of player scores equals the number of owned squares"
    }
}
