//! Box completion: detecting and awarding squares enclosed by a new claim.
//!
//! A square is complete when all four of its bounding lines are owned, by
//! any mix of players. Whoever claims the last missing side takes the box,
//! so a newly completed square always goes to the claiming player, even
//! when the other three sides belong to opponents. A single claim can
//! complete the squares on both sides of the line at once; both go to the
//! claimer in one step.

use super::coord::{Coord, Line};
use super::ownership::{ClaimError, OwnershipTracker};
use crate::player::PlayerIx;
use tracing::{debug, instrument};

/// Returns the squares adjacent to `line` that are fully enclosed but not
/// yet owned.
///
/// At most two squares qualify: one on each side of an interior line, one
/// for a boundary line. Neighbor probes past the board edge simply find no
/// square.
pub fn completed_squares(tracker: &OwnershipTracker, line: Line) -> Vec<Coord> {
    let grid = tracker.grid();
    grid.adjacent_squares(line)
        .filter(|square| tracker.square_owner(*square).is_none())
        .filter(|square| {
            grid.sides(*square)
                .iter()
                .all(|side| tracker.line_owner(*side).is_some())
        })
        .collect()
}

/// Awards every square newly completed by `line` to the claiming player.
///
/// Runs once per successfully claimed line, after the line itself has been
/// committed. Returns the number of squares awarded (0, 1 or 2); already
/// owned squares are never re-checked, so a claim can never double count.
///
/// # Errors
///
/// [`ClaimError`] if a candidate square is already owned, which the
/// unowned-square filter makes unreachable for a correctly claimed line.
#[instrument(skip(tracker), fields(line = %line, claimer = %claimer))]
pub fn score_claim(
    tracker: &mut OwnershipTracker,
    line: Line,
    claimer: PlayerIx,
) -> Result<u8, ClaimError> {
    let completed = completed_squares(tracker, line);
    for square in &completed {
        tracker.claim_square(*square, claimer)?;
    }
    if !completed.is_empty() {
        debug!(count = completed.len(), "Boxes completed");
    }
    Ok(completed.len() as u8)
}
