//! Matching pending claims against authoritative confirmations.
//!
//! The source may deliver confirmations out of order relative to local
//! submission, and a locally submitted move must never be trusted until it
//! is echoed back. A single [`reconcile`] call resolves each incoming
//! confirmation into exactly one case: the local actor's own pending move,
//! a foreign player's move, or a fault.

use crate::board::{ClaimError, Line};
use crate::player::PlayerIx;
use crate::turn::PendingClaim;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Authoritative notice that a line is now owned by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Confirmation {
    line: Line,
    owner: PlayerIx,
}

impl Confirmation {
    /// The confirmed line.
    pub fn line(&self) -> Line {
        self.line
    }

    /// The player the source says owns the line.
    pub fn owner(&self) -> PlayerIx {
        self.owner
    }
}

impl std::fmt::Display for Confirmation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} owns {}", self.owner, self.line)
    }
}

/// A confirmation that could not be applied cleanly.
///
/// Faults are warnings, not crashes: the engine discards the stale pending
/// claim involved (if any) and leaves ownership untouched, trusting the
/// source to be truthful about final ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ReconcileFault {
    /// The confirmed line already has an owner; duplicate deliveries of
    /// the same confirmation land here and are absorbed without
    /// re-scoring.
    #[display("confirmation for {} but it is already owned by {}", line, owner)]
    AlreadyOwned {
        /// The confirmed line.
        line: Line,
        /// Its existing local owner.
        owner: PlayerIx,
    },
    /// The source echoed the local actor's identity with a different line
    /// than the one pending.
    #[display("own confirmation for {} does not match pending claim {}", confirmed, expected)]
    PendingMismatch {
        /// The line of the local pending claim.
        expected: Line,
        /// The line the source confirmed.
        confirmed: Line,
    },
    /// The source confirmed a move by the local actor, but nothing is
    /// pending.
    #[display("own confirmation for {} with no pending claim", _0)]
    UnexpectedEcho(#[error(not(source))] Line),
    /// The confirmed owner is not in the roster.
    #[display("confirmation names {}, outside a roster of {}", owner, roster)]
    UnknownOwner {
        /// The out-of-roster player.
        owner: PlayerIx,
        /// Roster size.
        roster: usize,
    },
    /// A confirmation arrived after the session ended.
    #[display("confirmation for {} arrived after the game ended", _0)]
    SessionOver(#[error(not(source))] Line),
    /// The confirmation named a line or square the board rejected.
    #[display("confirmation could not be applied: {}", _0)]
    Board(ClaimError),
}

/// Outcome of reconciling one confirmation against local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The local actor's pending move, echoed back as expected; the
    /// pending claim is resolved and the move commits as the local
    /// actor's.
    OwnMove(PendingClaim),
    /// Another player's move; it commits directly, and a pending claim for
    /// a *different* line is left untouched.
    ForeignMove {
        /// The confirmed line.
        line: Line,
        /// The foreign owner.
        owner: PlayerIx,
        /// A local pending claim for the *same* line, which the source has
        /// awarded to the foreign player instead. The prediction is stale
        /// and must be discarded; the foreign commit still proceeds.
        preempted: Option<PendingClaim>,
    },
    /// The confirmation contradicts local state; nothing commits.
    Fault(ReconcileFault),
}

/// Resolves a confirmation into exactly one reconciliation case.
///
/// `current_owner` is the line's owner in local state, if any; `pending`
/// is the local actor's in-flight claim, if any. Pure: the caller applies
/// the resulting commit or fault handling.
#[instrument(fields(confirmation = %confirmation, local = %local))]
pub fn reconcile(
    confirmation: &Confirmation,
    local: PlayerIx,
    pending: Option<PendingClaim>,
    current_owner: Option<PlayerIx>,
) -> Reconciliation {
    // An owned line can never be re-owned (also absorbs duplicate
    // deliveries of the same confirmation).
    if let Some(owner) = current_owner {
        return Reconciliation::Fault(ReconcileFault::AlreadyOwned {
            line: confirmation.line(),
            owner,
        });
    }

    if confirmation.owner() == local {
        return match pending {
            Some(claim) if claim.line() == confirmation.line() => Reconciliation::OwnMove(claim),
            Some(claim) => Reconciliation::Fault(ReconcileFault::PendingMismatch {
                expected: claim.line(),
                confirmed: confirmation.line(),
            }),
            None => Reconciliation::Fault(ReconcileFault::UnexpectedEcho(confirmation.line())),
        };
    }

    let preempted = pending.filter(|claim| claim.line() == confirmation.line());
    Reconciliation::ForeignMove {
        line: confirmation.line(),
        owner: confirmation.owner(),
        preempted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Orientation};

    const LOCAL: PlayerIx = PlayerIx::new(0);
    const REMOTE: PlayerIx = PlayerIx::new(1);

    fn line(x: i32, y: i32) -> Line {
        Line::new(Orientation::Horizontal, Coord::new(x, y))
    }

    #[test]
    fn test_own_move_matches_pending() {
        let claim = PendingClaim::new(line(0, 0), 7);
        let conf = Confirmation::new(line(0, 0), LOCAL);
        assert_eq!(
            reconcile(&conf, LOCAL, Some(claim), None),
            Reconciliation::OwnMove(claim)
        );
    }

    #[test]
    fn test_foreign_move_leaves_unrelated_pending_alone() {
        let claim = PendingClaim::new(line(0, 0), 0);
        let conf = Confirmation::new(line(3, 2), REMOTE);
        assert_eq!(
            reconcile(&conf, LOCAL, Some(claim), None),
            Reconciliation::ForeignMove {
                line: line(3, 2),
                owner: REMOTE,
                preempted: None,
            }
        );
    }

    #[test]
    fn test_foreign_move_preempts_pending_on_same_line() {
        let claim = PendingClaim::new(line(0, 0), 0);
        let conf = Confirmation::new(line(0, 0), REMOTE);
        assert_eq!(
            reconcile(&conf, LOCAL, Some(claim), None),
            Reconciliation::ForeignMove {
                line: line(0, 0),
                owner: REMOTE,
                preempted: Some(claim),
            }
        );
    }

    #[test]
    fn test_mismatched_echo_is_a_fault() {
        let claim = PendingClaim::new(line(0, 0), 0);
        let conf = Confirmation::new(line(5, 5), LOCAL);
        assert_eq!(
            reconcile(&conf, LOCAL, Some(claim), None),
            Reconciliation::Fault(ReconcileFault::PendingMismatch {
                expected: line(0, 0),
                confirmed: line(5, 5),
            })
        );
    }

    #[test]
    fn test_echo_without_pending_is_a_fault() {
        let conf = Confirmation::new(line(1, 1), LOCAL);
        assert_eq!(
            reconcile(&conf, LOCAL, None, None),
            Reconciliation::Fault(ReconcileFault::UnexpectedEcho(line(1, 1)))
        );
    }

    #[test]
    fn test_owned_line_absorbs_duplicates() {
        let conf = Confirmation::new(line(1, 1), REMOTE);
        assert_eq!(
            reconcile(&conf, LOCAL, None, Some(REMOTE)),
            Reconciliation::Fault(ReconcileFault::AlreadyOwned {
                line: line(1, 1),
                owner: REMOTE,
            })
        );
    }
}
