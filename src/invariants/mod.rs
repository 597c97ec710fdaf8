//! Runtime-checkable invariants over session state.
//!
//! Each invariant is a named type implementing [`Invariant`], checked in
//! debug builds after every committed move and exercised directly by
//! tests.

mod history_consistent;
mod pending_unclaimed;
mod score_conservation;

pub use history_consistent::HistoryConsistent;
pub use pending_unclaimed::PendingUnclaimed;
pub use score_conservation::ScoreConservation;

use crate::session::GameSession;
use crate::source::MoveSource;

/// A property of state `S` that must hold between operations.
pub trait Invariant<S> {
    /// Whether the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable statement of the invariant.
    fn description() -> &'static str;
}

/// Asserts every session invariant in debug builds.
///
/// Called after each committed move; release builds compile this to
/// nothing.
pub fn assert_invariants<S: MoveSource>(session: &GameSession<S>) {
    debug_assert!(
        ScoreConservation::holds(session),
        "{}",
        <ScoreConservation as Invariant<GameSession<S>>>::description()
    );
    debug_assert!(
        PendingUnclaimed::holds(session),
        "{}",
        <PendingUnclaimed as Invariant<GameSession<S>>>::description()
    );
    debug_assert!(
        HistoryConsistent::holds(session),
        "{}",
        <HistoryConsistent as Invariant<GameSession<S>>>::description()
    );
}
