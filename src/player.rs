//! Players and their scores.

use serde::{Deserialize, Serialize};

/// Stable 0-based index of a player in the session roster.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PlayerIx(usize);

impl PlayerIx {
    /// Creates a player index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The underlying roster index.
    pub fn index(&self) -> usize {
        self.0
    }

    /// The index of the player who moves after this one in an
    /// `player_count`-player game.
    pub fn next(&self, player_count: usize) -> Self {
        Self((self.0 + 1) % player_count)
    }
}

impl std::fmt::Display for PlayerIx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// A player in the game: display identity plus a monotonically increasing
/// score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    index: PlayerIx,
    name: String,
    score: u32,
}

impl Player {
    /// Creates a player with a zero score.
    pub fn new(index: PlayerIx, name: String) -> Self {
        Self {
            index,
            name,
            score: 0,
        }
    }

    /// Roster index of this player.
    pub fn index(&self) -> PlayerIx {
        self.index
    }

    /// Display name of this player.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of boxes this player has completed.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Adds newly completed boxes to the score. Scores only ever grow.
    pub(crate) fn add_score(&mut self, boxes: u8) {
        self.score += u32::from(boxes);
    }

    /// Returns the score to zero for session re-use.
    pub(crate) fn reset_score(&mut self) {
        self.score = 0;
    }
}
