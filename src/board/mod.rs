//! Board model: topology, ownership and box completion.

mod coord;
mod grid;
mod ownership;
mod scoring;

pub use coord::{Coord, Line, Orientation};
pub use grid::Grid;
pub use ownership::{ClaimError, OwnershipTracker};
pub use scoring::{completed_squares, score_claim};
