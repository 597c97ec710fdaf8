//! Grid coordinates and line identifiers.
//!
//! Lines are identified by orientation plus their lesser endpoint, so the
//! same physical edge always normalizes to the same value regardless of the
//! order in which its endpoints were given.

use serde::{Deserialize, Serialize};

/// A vertex coordinate on the board.
///
/// Coordinates are signed so that neighbor probes can step past the board
/// edge; the [`Grid`](super::Grid) bounds checks answer whether a coordinate
/// actually names a vertex or square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Horizontal grid coordinate.
    pub x: i32,
    /// Vertical grid coordinate.
    pub y: i32,
}

impl Coord {
    /// Creates a new coordinate.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orientation of a line segment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    /// Connects two horizontally adjacent vertices.
    Horizontal,
    /// Connects two vertically adjacent vertices.
    Vertical,
}

/// A line segment between two adjacent vertices: the unit of player action.
///
/// The stored endpoint is always the lesser of the two (leftmost for
/// horizontal lines, topmost for vertical ones); the other endpoint is
/// derived. Two `Line` values compare equal exactly when they name the same
/// physical edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    orientation: Orientation,
    start: Coord,
}

impl Line {
    /// Creates a line from its orientation and lesser endpoint.
    pub fn new(orientation: Orientation, start: Coord) -> Self {
        Self { orientation, start }
    }

    /// Builds the line connecting two vertices, if they are adjacent.
    ///
    /// Returns `None` when the vertices are identical, diagonal, or more
    /// than one step apart. Endpoint order does not matter.
    pub fn between(a: Coord, b: Coord) -> Option<Self> {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        match (dx, dy) {
            (1, 0) => Some(Self::new(Orientation::Horizontal, a)),
            (-1, 0) => Some(Self::new(Orientation::Horizontal, b)),
            (0, 1) => Some(Self::new(Orientation::Vertical, a)),
            (0, -1) => Some(Self::new(Orientation::Vertical, b)),
            _ => None,
        }
    }

    /// Returns the line's orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the lesser endpoint.
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Returns the greater endpoint.
    pub fn end(&self) -> Coord {
        match self.orientation {
            Orientation::Horizontal => Coord::new(self.start.x + 1, self.start.y),
            Orientation::Vertical => Coord::new(self.start.x, self.start.y + 1),
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}-{}", self.orientation, self.start, self.end())
    }
}
