//! Committed history matches board ownership.

use super::Invariant;
use crate::session::GameSession;
use crate::source::MoveSource;

/// Invariant: the commit history and the ownership arenas describe the
/// same game.
///
/// Every recorded confirmation's line is owned by its recorded owner, no
/// line appears twice, and the number of owned lines equals the history
/// length.
pub struct HistoryConsistent;

impl<S: MoveSource> Invariant<GameSession<S>> for HistoryConsistent {
    fn holds(session: &GameSession<S>) -> bool {
        let history = session.history();
        if session.tracker().owned_line_count() != history.len() {
            return false;
        }
        history.iter().all(|confirmation| {
            session.tracker().line_owner(confirmation.line()) == Some(confirmation.owner())
        })
    }

    fn description() -> &'static str {
        "every committed confirmation matches current line ownership"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::config::GameConfig;
    use crate::player::PlayerIx;
    use crate::reconcile::Confirmation;
    use crate::source::RecordingMoveSource;

    #[test]
    fn test_faulted_confirmations_leave_no_trace() {
        let config = GameConfig::new(2, 2, vec!["Red".into(), "Blue".into()]).unwrap();
        let mut session =
            GameSession::new(config, PlayerIx::new(0), RecordingMoveSource::new()).unwrap();

        let line = session
            .line_between(Coord::new(0, 0), Coord::new(1, 0))
            .unwrap();
        session
            .apply_confirmation(Confirmation::new(line, PlayerIx::new(1)))
            .unwrap();
        assert!(HistoryConsistent::holds(&session));

        // The duplicate is absorbed without touching history or board.
        session
            .apply_confirmation(Confirmation::new(line, PlayerIx::new(1)))
            .unwrap_err();
        assert_eq!(session.history().len(), 1);
        assert!(HistoryConsistent::holds(&session));
    }
}
