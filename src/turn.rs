//! Turn tracking state machine.
//!
//! The controller moves between three phases: `Idle` (waiting for a local
//! or remote move), `AwaitingConfirmation` (a local claim is in flight) and
//! `Terminal` (the game ended; absorbing). A guard violation is a
//! rejection that leaves the phase unchanged, never a crash.

use crate::board::Line;
use crate::player::PlayerIx;
use crate::source::SourceError;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// A locally submitted claim that the authoritative source has not yet
/// echoed back.
///
/// At most one exists at a time; it is cleared only by a matching
/// confirmation, a reconciliation fault, or session termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct PendingClaim {
    line: Line,
    seq: u64,
}

impl PendingClaim {
    /// The line submitted to the move source.
    pub fn line(&self) -> Line {
        self.line
    }

    /// Monotonic submission sequence number.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Phase of the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// No claim in flight; local or remote moves may arrive.
    Idle,
    /// A local claim was submitted and awaits confirmation.
    AwaitingConfirmation(PendingClaim),
    /// The game has ended; no further claims are accepted.
    Terminal,
}

/// Error raised by a rejected claim submission.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SubmitError {
    /// The session has already ended.
    #[display("the game is over")]
    GameOver,
    /// It is another player's turn.
    #[display("not your turn; waiting on {}", _0)]
    NotYourTurn(#[error(not(source))] PlayerIx),
    /// A previous claim is still awaiting confirmation.
    #[display("claim for {} is still awaiting confirmation", _0)]
    ClaimPending(#[error(not(source))] Line),
    /// The line does not exist on this board.
    #[display("line {} is not on the board", _0)]
    OffBoard(#[error(not(source))] Line),
    /// The line already has an owner.
    #[display("line {} is already owned by {}", line, owner)]
    LineOwned {
        /// The rejected line.
        line: Line,
        /// Its current owner.
        owner: PlayerIx,
    },
    /// The named player is not in the roster.
    #[display("{} is not in the roster", _0)]
    UnknownPlayer(#[error(not(source))] PlayerIx),
    /// The move source refused the submission.
    #[display("move source rejected the claim: {}", _0)]
    Source(SourceError),
}

impl From<SourceError> for SubmitError {
    fn from(err: SourceError) -> Self {
        Self::Source(err)
    }
}

/// Tracks whose turn it is and whether a local move is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnController {
    phase: TurnPhase,
    current: PlayerIx,
    player_count: usize,
    next_seq: u64,
}

impl TurnController {
    /// Creates a controller in `Idle` with the given first mover.
    pub fn new(player_count: usize, first: PlayerIx) -> Self {
        Self {
            phase: TurnPhase::Idle,
            current: first,
            player_count,
            next_seq: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The player whose turn it is.
    pub fn current(&self) -> PlayerIx {
        self.current
    }

    /// The in-flight claim, if any.
    pub fn pending(&self) -> Option<PendingClaim> {
        match self.phase {
            TurnPhase::AwaitingConfirmation(claim) => Some(claim),
            _ => None,
        }
    }

    /// Whether the game has ended.
    pub fn is_terminal(&self) -> bool {
        self.phase == TurnPhase::Terminal
    }

    /// `Idle` → `AwaitingConfirmation`: records a claim by `actor`.
    ///
    /// Guarded: the session must not be over, no claim may already be in
    /// flight, and it must be `actor`'s turn. Line ownership is the
    /// caller's guard; the controller does not see the board.
    ///
    /// # Errors
    ///
    /// [`SubmitError`] naming the violated guard; the phase is unchanged.
    #[instrument(skip(self), fields(actor = %actor, line = %line))]
    pub fn begin_claim(&mut self, actor: PlayerIx, line: Line) -> Result<PendingClaim, SubmitError> {
        match self.phase {
            TurnPhase::Terminal => Err(SubmitError::GameOver),
            TurnPhase::AwaitingConfirmation(claim) => {
                warn!(pending = %claim.line(), "Rejecting claim while another is in flight");
                Err(SubmitError::ClaimPending(claim.line()))
            }
            TurnPhase::Idle => {
                if actor != self.current {
                    warn!(current = %self.current, "Rejecting out-of-turn claim");
                    return Err(SubmitError::NotYourTurn(self.current));
                }
                let claim = PendingClaim::new(line, self.next_seq);
                self.next_seq += 1;
                self.phase = TurnPhase::AwaitingConfirmation(claim);
                debug!(seq = claim.seq(), "Claim now awaiting confirmation");
                Ok(claim)
            }
        }
    }

    /// `AwaitingConfirmation` → `Idle`: the claim matched a confirmation.
    #[instrument(skip(self))]
    pub fn confirm_claim(&mut self) -> Option<PendingClaim> {
        let claim = self.pending()?;
        self.phase = TurnPhase::Idle;
        debug!(line = %claim.line(), "Pending claim confirmed");
        Some(claim)
    }

    /// `AwaitingConfirmation` → `Idle`: the claim is discarded without a
    /// matching confirmation (reconciliation fault, failed submission or
    /// session teardown).
    #[instrument(skip(self))]
    pub fn cancel_claim(&mut self) -> Option<PendingClaim> {
        let claim = self.pending()?;
        self.phase = TurnPhase::Idle;
        warn!(line = %claim.line(), "Pending claim discarded");
        Some(claim)
    }

    /// Advances the turn after a processed move.
    ///
    /// The turn holds when the move completed at least one box (the scorer
    /// moves again); otherwise it passes to the next player. Returns the
    /// new current player when the turn actually passed.
    #[instrument(skip(self), fields(scored))]
    pub fn advance(&mut self, scored: bool) -> Option<PlayerIx> {
        if self.is_terminal() || scored {
            return None;
        }
        self.current = self.current.next(self.player_count);
        debug!(current = %self.current, "Turn passed");
        Some(self.current)
    }

    /// Any phase → `Terminal`. Absorbing: repeated signals are no-ops.
    #[instrument(skip(self))]
    pub fn terminate(&mut self) {
        if let Some(claim) = self.pending() {
            warn!(line = %claim.line(), "Terminating with a claim in flight");
        }
        self.phase = TurnPhase::Terminal;
    }

    /// Returns to `Idle` with the given first mover, for session re-use.
    #[instrument(skip(self))]
    pub fn reset(&mut self, first: PlayerIx) {
        self.phase = TurnPhase::Idle;
        self.current = first;
        self.next_seq = 0;
    }
}
