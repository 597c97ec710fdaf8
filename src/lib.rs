//! Stickgame - a dots-and-boxes engine reconciled against an
//! authoritative move source.
//!
//! The engine owns the grid topology, line/square ownership, box
//! completion and turn tracking for a W×H dots-and-boxes board, but it
//! does not decide moves: an external authority (a contract, a server, a
//! replay log) does. A locally submitted claim is only a prediction until
//! the source echoes it back, and every incoming confirmation - ours or a
//! foreign player's - is reconciled against local state before it
//! commits.
//!
//! # Architecture
//!
//! - **Board**: grid topology, ownership arenas and box completion
//! - **Turn**: the `Idle` / `AwaitingConfirmation` / `Terminal` state machine
//! - **Reconcile**: matching confirmations to pending claims
//! - **Session**: the single entry point tying the pipeline together
//! - **Winner**: score and concession outcomes
//!
//! # Example
//!
//! ```
//! use stickgame::{Confirmation, Coord, GameConfig, GameSession, PlayerIx, RecordingMoveSource};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = GameConfig::new(8, 8, vec!["Red".into(), "Blue".into()])?;
//! let mut session = GameSession::new(config, PlayerIx::new(0), RecordingMoveSource::new())?;
//!
//! // Propose the top edge of square (0, 0); it stays pending...
//! let line = session
//!     .line_between(Coord::new(0, 0), Coord::new(1, 0))
//!     .expect("on-board line");
//! session.submit_claim(line)?;
//!
//! // ...until the authoritative source echoes it back.
//! let committed = session.apply_confirmation(Confirmation::new(line, PlayerIx::new(0)))?;
//! assert_eq!(committed.scored(), 0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod config;
mod events;
mod invariants;
mod player;
mod reconcile;
mod session;
mod source;
mod turn;
mod winner;

// Crate-level exports - Board model
pub use board::{completed_squares, score_claim, ClaimError, Coord, Grid, Line, Orientation, OwnershipTracker};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Presentation callbacks
pub use events::{GameObserver, NullObserver};

// Crate-level exports - Invariant machinery
pub use invariants::{
    assert_invariants, HistoryConsistent, Invariant, PendingUnclaimed, ScoreConservation,
};

// Crate-level exports - Players
pub use player::{Player, PlayerIx};

// Crate-level exports - Reconciliation
pub use reconcile::{reconcile, Confirmation, ReconcileFault, Reconciliation};

// Crate-level exports - Session
pub use session::{GameSession, Reconciled};

// Crate-level exports - Move source
pub use source::{MoveHandle, MoveSource, RecordingMoveSource, SourceError};

// Crate-level exports - Turn state machine
pub use turn::{PendingClaim, SubmitError, TurnController, TurnPhase};

// Crate-level exports - Winner resolution
pub use winner::{resolve, resolve_concession, GameOutcome};
