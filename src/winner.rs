//! Winner and tie resolution at game end.

use crate::player::{Player, PlayerIx};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Final result of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// A single player had the highest score (or was the last one standing
    /// after a concession).
    Winner(PlayerIx),
    /// The highest score was shared; the tie covers exactly the players
    /// who reached it, not everyone.
    Tie(Vec<PlayerIx>),
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winner(player) => write!(f, "{player} wins"),
            Self::Tie(players) => {
                write!(f, "tie between ")?;
                for (i, player) in players.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{player}")?;
                }
                Ok(())
            }
        }
    }
}

/// Computes the outcome from final scores.
///
/// The winners are exactly the players whose score equals the maximum;
/// one of them is a winner, several are a tie among themselves.
#[instrument(skip(players), fields(players = players.len()))]
pub fn resolve(players: &[Player]) -> GameOutcome {
    let max_score = players.iter().map(Player::score).max().unwrap_or(0);
    let mut winners: Vec<PlayerIx> = players
        .iter()
        .filter(|player| player.score() == max_score)
        .map(Player::index)
        .collect();

    let outcome = if winners.len() == 1 {
        GameOutcome::Winner(winners.remove(0))
    } else {
        GameOutcome::Tie(winners)
    };
    info!(max_score, outcome = %outcome, "Outcome resolved");
    outcome
}

/// Computes the outcome of a concession.
///
/// The conceding player always loses regardless of score; every other
/// player wins. Score comparison is bypassed entirely.
#[instrument(skip(players), fields(players = players.len(), conceded = %conceded))]
pub fn resolve_concession(players: &[Player], conceded: PlayerIx) -> GameOutcome {
    let mut winners: Vec<PlayerIx> = players
        .iter()
        .map(Player::index)
        .filter(|ix| *ix != conceded)
        .collect();

    let outcome = if winners.len() == 1 {
        GameOutcome::Winner(winners.remove(0))
    } else {
        GameOutcome::Tie(winners)
    };
    info!(outcome = %outcome, "Concession resolved");
    outcome
}
