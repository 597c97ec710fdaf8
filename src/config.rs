//! Session configuration, validated at construction.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Configuration error: the session must not be constructed at all.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    /// Board dimensions must both be at least 1.
    #[display("board must be at least 1x1, got {}x{}", width, height)]
    BoardTooSmall {
        /// Requested width in squares.
        width: u32,
        /// Requested height in squares.
        height: u32,
    },
    /// A game needs at least two players.
    #[display("need at least 2 players, got {}", _0)]
    NotEnoughPlayers(#[error(not(source))] usize),
    /// The local actor must be one of the configured players.
    #[display("local player index {} is outside a roster of {}", index, players)]
    LocalPlayerOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of configured players.
        players: usize,
    },
}

/// Fixed parameters of a game session: board dimensions and player roster.
///
/// Construction is the validation boundary; a `GameConfig` that exists is
/// well-formed, and its values never change for the session's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    width: u32,
    height: u32,
    player_names: Vec<String>,
}

impl GameConfig {
    /// Creates a configuration for a `width` × `height` board with the
    /// given players, in turn order.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when a dimension is zero or fewer than two players
    /// are named.
    #[instrument(skip(player_names), fields(players = player_names.len()))]
    pub fn new(width: u32, height: u32, player_names: Vec<String>) -> Result<Self, ConfigError> {
        if width < 1 || height < 1 {
            warn!("Rejecting degenerate board dimensions");
            return Err(ConfigError::BoardTooSmall { width, height });
        }
        if player_names.len() < 2 {
            warn!("Rejecting undersized roster");
            return Err(ConfigError::NotEnoughPlayers(player_names.len()));
        }
        info!(width, height, "Game configuration accepted");
        Ok(Self {
            width,
            height,
            player_names,
        })
    }

    /// Number of squares in the horizontal direction.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of squares in the vertical direction.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Player names in turn order.
    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    /// Number of players.
    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }

    /// Number of squares on the board.
    pub fn square_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Player {i}")).collect()
    }

    #[test]
    fn test_accepts_minimal_game() {
        let config = GameConfig::new(1, 1, names(2)).unwrap();
        assert_eq!(config.square_count(), 1);
        assert_eq!(config.player_count(), 2);
    }

    #[test]
    fn test_rejects_zero_dimension() {
        assert_eq!(
            GameConfig::new(0, 5, names(2)),
            Err(ConfigError::BoardTooSmall {
                width: 0,
                height: 5
            })
        );
        assert_eq!(
            GameConfig::new(5, 0, names(2)),
            Err(ConfigError::BoardTooSmall {
                width: 5,
                height: 0
            })
        );
    }

    #[test]
    fn test_rejects_single_player() {
        assert_eq!(
            GameConfig::new(3, 3, names(1)),
            Err(ConfigError::NotEnoughPlayers(1))
        );
    }
}
