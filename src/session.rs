//! Game session: the single entry point for local submissions and
//! authoritative confirmations.
//!
//! A session owns the grid, the ownership arenas, the player roster, the
//! turn state machine and the move source. All mutation flows through the
//! claim → confirm → score pipeline: a local claim is only predicted until
//! the source echoes it back, and a confirmation for any player commits
//! ownership, awards boxes, advances or holds the turn and checks for
//! termination. Local submissions and confirmations must be serialized
//! through one session instance; the engine has no internal parallelism.

use crate::board::{score_claim, ClaimError, Coord, Grid, Line, OwnershipTracker};
use crate::config::{ConfigError, GameConfig};
use crate::events::{GameObserver, NullObserver};
use crate::invariants;
use crate::player::{Player, PlayerIx};
use crate::reconcile::{reconcile, Confirmation, ReconcileFault, Reconciliation};
use crate::source::{MoveHandle, MoveSource};
use crate::turn::{PendingClaim, SubmitError, TurnController, TurnPhase};
use crate::winner::{self, GameOutcome};
use derive_new::new;
use tracing::{info, instrument, warn};

/// A confirmation that committed: which line, whose move, how many boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Reconciled {
    line: Line,
    owner: PlayerIx,
    scored: u8,
}

impl Reconciled {
    /// The committed line.
    pub fn line(&self) -> Line {
        self.line
    }

    /// The player whose move it was.
    pub fn owner(&self) -> PlayerIx {
        self.owner
    }

    /// Boxes completed by the move (0, 1 or 2).
    pub fn scored(&self) -> u8 {
        self.scored
    }
}

/// A single game of dots and boxes, reconciled against an authoritative
/// move source.
pub struct GameSession<S: MoveSource> {
    config: GameConfig,
    grid: Grid,
    tracker: OwnershipTracker,
    players: Vec<Player>,
    turn: TurnController,
    local: PlayerIx,
    source: S,
    observer: Box<dyn GameObserver>,
    history: Vec<Confirmation>,
    outcome: Option<GameOutcome>,
}

impl<S: MoveSource> GameSession<S> {
    /// Creates a session from a validated configuration.
    ///
    /// `local` is the player this process acts for; submissions are made
    /// on their behalf and confirmations are reconciled against their
    /// pending claim. The roster and board dimensions are fixed for the
    /// session's lifetime. Player 0 moves first.
    ///
    /// # Errors
    ///
    /// [`ConfigError::LocalPlayerOutOfRange`] when `local` is not in the
    /// roster.
    #[instrument(skip(config, source), fields(width = config.width(), height = config.height(), local = %local))]
    pub fn new(config: GameConfig, local: PlayerIx, source: S) -> Result<Self, ConfigError> {
        if local.index() >= config.player_count() {
            return Err(ConfigError::LocalPlayerOutOfRange {
                index: local.index(),
                players: config.player_count(),
            });
        }

        let grid = Grid::new(config.width(), config.height());
        let players = config
            .player_names()
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(PlayerIx::new(i), name.clone()))
            .collect();
        info!("Creating game session");

        Ok(Self {
            grid,
            tracker: OwnershipTracker::new(grid),
            players,
            turn: TurnController::new(config.player_count(), PlayerIx::new(0)),
            local,
            source,
            observer: Box::new(NullObserver),
            history: Vec::new(),
            outcome: None,
            config,
        })
    }

    /// Installs a presentation adapter. Replaces the default no-op
    /// observer.
    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = observer;
    }

    /// Submits a claim for the local actor to the move source.
    ///
    /// The move does not take effect locally: the session enters
    /// `AwaitingConfirmation` and commits only when the source echoes the
    /// move back through [`apply_confirmation`](Self::apply_confirmation).
    ///
    /// # Errors
    ///
    /// [`SubmitError`] when a guard fails: the game is over, the line is
    /// off the board or already owned, it is not the local actor's turn,
    /// another claim is in flight, or the source refuses the submission.
    /// State is unchanged on every error.
    #[instrument(skip(self), fields(line = %line, local = %self.local))]
    pub fn submit_claim(&mut self, line: Line) -> Result<MoveHandle, SubmitError> {
        if !self.grid.contains_line(line) {
            return Err(SubmitError::OffBoard(line));
        }
        if let Some(owner) = self.tracker.line_owner(line) {
            return Err(SubmitError::LineOwned { line, owner });
        }
        self.turn.begin_claim(self.local, line)?;

        match self.source.submit(line) {
            Ok(handle) => {
                info!(handle = handle.id(), "Claim submitted to move source");
                Ok(handle)
            }
            Err(err) => {
                // Submission never left the process; roll the claim back
                // so the caller can retry.
                self.turn.cancel_claim();
                Err(err.into())
            }
        }
    }

    /// Applies one authoritative confirmation, in arrival order.
    ///
    /// Resolves the confirmation into its reconciliation case and, for the
    /// two committing cases, claims the line, awards completed boxes to
    /// the confirmed owner, advances or holds the turn and checks for
    /// termination.
    ///
    /// # Errors
    ///
    /// [`ReconcileFault`] when the confirmation contradicts local state.
    /// Faults self-heal: a stale pending claim involved in the fault is
    /// discarded, ownership is never mutated twice, and the session keeps
    /// running. A duplicate delivery of an already-applied confirmation
    /// surfaces as [`ReconcileFault::AlreadyOwned`].
    #[instrument(skip(self), fields(confirmation = %confirmation))]
    pub fn apply_confirmation(
        &mut self,
        confirmation: Confirmation,
    ) -> Result<Reconciled, ReconcileFault> {
        if self.turn.is_terminal() {
            let fault = ReconcileFault::SessionOver(confirmation.line());
            warn!(%fault, "Dropping confirmation");
            return Err(fault);
        }
        if confirmation.owner().index() >= self.players.len() {
            let fault = ReconcileFault::UnknownOwner {
                owner: confirmation.owner(),
                roster: self.players.len(),
            };
            warn!(%fault, "Dropping confirmation");
            return Err(fault);
        }

        let current_owner = self.tracker.line_owner(confirmation.line());
        match reconcile(&confirmation, self.local, self.turn.pending(), current_owner) {
            Reconciliation::OwnMove(claim) => {
                info!(seq = claim.seq(), "Own move confirmed");
                self.turn.confirm_claim();
                self.commit(confirmation.line(), self.local)
            }
            Reconciliation::ForeignMove {
                line,
                owner,
                preempted,
            } => {
                if let Some(claim) = preempted {
                    // The source is authoritative: our prediction for this
                    // line lost, the foreign commit stands.
                    warn!(stale = %claim.line(), "Pending claim preempted by foreign move");
                    self.turn.cancel_claim();
                }
                self.commit(line, owner)
            }
            Reconciliation::Fault(fault) => {
                warn!(%fault, "Reconciliation fault");
                if self.fault_involves_pending(&fault, confirmation.line()) {
                    self.turn.cancel_claim();
                }
                Err(fault)
            }
        }
    }

    /// Ends the session by concession, from any state.
    ///
    /// The conceding player loses regardless of score; a pending claim is
    /// discarded without further reconciliation.
    ///
    /// # Errors
    ///
    /// [`SubmitError::GameOver`] when the session already ended, and
    /// [`SubmitError::UnknownPlayer`] for a player outside the roster.
    #[instrument(skip(self), fields(player = %player))]
    pub fn concede(&mut self, player: PlayerIx) -> Result<GameOutcome, SubmitError> {
        if self.turn.is_terminal() {
            return Err(SubmitError::GameOver);
        }
        if player.index() >= self.players.len() {
            return Err(SubmitError::UnknownPlayer(player));
        }

        self.turn.cancel_claim();
        let outcome = winner::resolve_concession(&self.players, player);
        self.finish(outcome.clone());
        Ok(outcome)
    }

    /// Returns the session to its initial empty state for re-use.
    ///
    /// Grid dimensions and roster are kept; ownership, scores, history,
    /// pending claim and outcome are cleared, and player 0 moves first
    /// again.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.turn.reset(PlayerIx::new(0));
        for player in &mut self.players {
            player.reset_score();
        }
        self.history.clear();
        self.outcome = None;
        info!("Session reset");
    }

    /// Commits a confirmed move: line, boxes, turn, termination.
    fn commit(&mut self, line: Line, owner: PlayerIx) -> Result<Reconciled, ReconcileFault> {
        self.tracker.claim(line, owner).map_err(board_fault)?;
        let scored = score_claim(&mut self.tracker, line, owner).map_err(board_fault)?;
        self.history.push(Confirmation::new(line, owner));

        if scored > 0 {
            let player = &mut self.players[owner.index()];
            player.add_score(scored);
            let new_score = player.score();
            info!(scored, new_score, "Move completed boxes");
            self.observer.score_changed(owner, new_score);
        }

        if let Some(next) = self.turn.advance(scored > 0) {
            self.observer.turn_changed(next);
        }

        if self.tracker.is_full() {
            let outcome = winner::resolve(&self.players);
            self.finish(outcome);
        }

        invariants::assert_invariants(self);
        Ok(Reconciled::new(line, owner, scored))
    }

    /// Transitions to `Terminal` and reports the outcome exactly once.
    fn finish(&mut self, outcome: GameOutcome) {
        self.turn.terminate();
        info!(%outcome, "Game ended");
        self.observer.game_ended(&outcome);
        self.outcome = Some(outcome);
    }

    /// Whether a fault invalidates the local pending claim.
    fn fault_involves_pending(&self, fault: &ReconcileFault, confirmed: Line) -> bool {
        match fault {
            ReconcileFault::PendingMismatch { .. } | ReconcileFault::UnexpectedEcho(_) => true,
            ReconcileFault::AlreadyOwned { .. } => self
                .turn
                .pending()
                .is_some_and(|claim| claim.line() == confirmed),
            _ => false,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Read-only views
    // ─────────────────────────────────────────────────────────────

    /// The session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The board topology.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// The ownership arenas.
    pub fn tracker(&self) -> &OwnershipTracker {
        &self.tracker
    }

    /// The player roster in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player this session acts for.
    pub fn local(&self) -> PlayerIx {
        self.local
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> PlayerIx {
        self.turn.current()
    }

    /// Current phase of the turn state machine.
    pub fn phase(&self) -> TurnPhase {
        self.turn.phase()
    }

    /// The in-flight local claim, if any.
    pub fn pending(&self) -> Option<PendingClaim> {
        self.turn.pending()
    }

    /// Whether the session has ended.
    pub fn is_over(&self) -> bool {
        self.turn.is_terminal()
    }

    /// Final outcome, once the session has ended.
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Every committed confirmation, in commit order.
    pub fn history(&self) -> &[Confirmation] {
        &self.history
    }

    /// The move source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Convenience lookup: the on-board line connecting two vertices.
    pub fn line_between(&self, a: Coord, b: Coord) -> Option<Line> {
        self.grid.line_between(a, b)
    }
}

impl<S: MoveSource> std::fmt::Debug for GameSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("turn", &self.turn)
            .field("local", &self.local)
            .field("owned_squares", &self.tracker.owned_square_count())
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

/// Maps a board rejection onto the reconciliation fault taxonomy.
fn board_fault(err: ClaimError) -> ReconcileFault {
    match err {
        ClaimError::AlreadyOwned { line, owner } => ReconcileFault::AlreadyOwned { line, owner },
        other => ReconcileFault::Board(other),
    }
}
