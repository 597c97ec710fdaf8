//! Pending claims only ever cover unowned lines.

use super::Invariant;
use crate::session::GameSession;
use crate::source::MoveSource;

/// Invariant: the pending claim, when present, names an on-board line
/// that has no owner yet.
///
/// Submission guards reject owned lines, and any confirmation that owns
/// the pending line (own echo, foreign preemption or fault) clears the
/// claim in the same step. The type of
/// [`TurnPhase`](crate::TurnPhase::AwaitingConfirmation) already limits
/// the session to one pending claim.
pub struct PendingUnclaimed;

impl<S: MoveSource> Invariant<GameSession<S>> for PendingUnclaimed {
    fn holds(session: &GameSession<S>) -> bool {
        match session.pending() {
            Some(claim) => {
                session.grid().contains_line(claim.line())
                    && session.tracker().line_owner(claim.line()).is_none()
            }
            None => true,
        }
    }

    fn description() -> &'static str {
        "a pending claim always names an unowned on-board line"
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
    fn test_holds_across_submit_and_foreign_commit() {
        let config = GameConfig::new(2, 2, vec!["Red".into(), "Blue".into()]).unwrap();
        let mut session =
            GameSession::new(config, PlayerIx::new(0), RecordingMoveSource::new()).unwrap();

        let ours = session
            .line_between(Coord::new(0, 0), Coord::new(1, 0))
            .unwrap();
        session.submit_claim(ours).unwrap();
        assert!(PendingUnclaimed::holds(&session));

        // A foreign move on a different line leaves the pending claim
        // intact and the invariant holding.
        let theirs = session
            .line_between(Coord::new(0, 2), Coord::new(1, 2))
            .unwrap();
        session
            .apply_confirmation(Confirmation::new(theirs, PlayerIx::new(1)))
            .unwrap();
        assert!(session.pending().is_some());
        assert!(PendingUnclaimed::holds(&session));
    }
}
