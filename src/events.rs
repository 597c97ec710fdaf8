//! Engine-to-presentation notifications.
//!
//! The engine never touches presentation state directly; a rendering
//! layer implements [`GameObserver`] and receives callbacks as the game
//! progresses. All methods default to no-ops, so an adapter implements
//! only what it displays.

use crate::player::PlayerIx;
use crate::winner::GameOutcome;

/// Callbacks exposed to a rendering/UI adapter.
#[allow(unused_variables)]
pub trait GameObserver {
    /// The turn passed to `player`.
    fn turn_changed(&mut self, player: PlayerIx) {}

    /// `player` completed one or more boxes; `new_score` is their total.
    fn score_changed(&mut self, player: PlayerIx, new_score: u32) {}

    /// The game ended with the given outcome.
    fn game_ended(&mut self, outcome: &GameOutcome) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {}
