//! Ownership arenas for lines, vertices and squares.
//!
//! Every board element sits in a [`Slot`] that can be claimed exactly once.
//! Line and square claims are strict (claiming an owned element is an
//! error); vertex ownership merely mirrors the first line claim that
//! touches the vertex and is never read by scoring.

use super::coord::{Coord, Line};
use super::grid::Grid;
use crate::player::PlayerIx;
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// Error raised by a rejected claim.
///
/// Ownership is monotonic: an element is owned at most once and never
/// re-owned, so a claim against an owned element is a caller bug (or a
/// duplicate confirmation) and is reported rather than swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ClaimError {
    /// The line does not exist on this board.
    #[display("line {} is not on the board", _0)]
    UnknownLine(#[error(not(source))] Line),
    /// The line already has an owner.
    #[display("line {} is already owned by {}", line, owner)]
    AlreadyOwned {
        /// The rejected line.
        line: Line,
        /// The player who already owns it.
        owner: PlayerIx,
    },
    /// The square does not exist on this board.
    #[display("square {} is not on the board", _0)]
    UnknownSquare(#[error(not(source))] Coord),
    /// The square already has an owner.
    #[display("square {} is already owned by {}", square, owner)]
    SquareOwned {
        /// The rejected square.
        square: Coord,
        /// The player who already owns it.
        owner: PlayerIx,
    },
}

/// An ownable board element: empty until claimed, then owned forever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Slot(Option<PlayerIx>);

impl Slot {
    /// Current owner, if any.
    pub(crate) fn owner(self) -> Option<PlayerIx> {
        self.0
    }

    /// Claims the slot for `player`; an existing owner is returned as the
    /// error.
    pub(crate) fn claim(&mut self, player: PlayerIx) -> Result<(), PlayerIx> {
        match self.0 {
            Some(owner) => Err(owner),
            None => {
                self.0 = Some(player);
                Ok(())
            }
        }
    }

    /// First-owner-wins claim: assigns `player` if the slot is empty and
    /// silently keeps the existing owner otherwise.
    pub(crate) fn touch(&mut self, player: PlayerIx) {
        self.0.get_or_insert(player);
    }
}

/// Records which player owns each line, vertex and square of a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipTracker {
    grid: Grid,
    lines: Vec<Slot>,
    vertices: Vec<Slot>,
    squares: Vec<Slot>,
    owned_squares: usize,
}

impl OwnershipTracker {
    /// Creates an empty tracker for the given grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            lines: vec![Slot::default(); grid.line_count()],
            vertices: vec![Slot::default(); grid.vertex_count()],
            squares: vec![Slot::default(); grid.square_count()],
            owned_squares: 0,
        }
    }

    /// The grid this tracker records ownership for.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Claims a line for `player`.
    ///
    /// Also assigns the line's two endpoint vertices to `player` when they
    /// are unowned. Vertex ownership is cosmetic state for presentation
    /// adapters; scoring never reads it.
    ///
    /// # Errors
    ///
    /// [`ClaimError::UnknownLine`] when the line is off the board, and
    /// [`ClaimError::AlreadyOwned`] when it already has an owner.
    #[instrument(skip(self), fields(line = %line, player = %player))]
    pub fn claim(&mut self, line: Line, player: PlayerIx) -> Result<(), ClaimError> {
        let ix = self
            .grid
            .line_index(line)
            .ok_or(ClaimError::UnknownLine(line))?;
        self.lines[ix]
            .claim(player)
            .map_err(|owner| ClaimError::AlreadyOwned { line, owner })?;

        for vertex in [line.start(), line.end()] {
            if let Some(vix) = self.grid.vertex_index(vertex) {
                self.vertices[vix].touch(player);
            }
        }

        debug!(owned_lines = self.owned_line_count(), "Line claimed");
        Ok(())
    }

    /// Claims a square for `player`. Called by box completion only.
    #[instrument(skip(self), fields(square = %square, player = %player))]
    pub(crate) fn claim_square(&mut self, square: Coord, player: PlayerIx) -> Result<(), ClaimError> {
        let ix = self
            .grid
            .square_index(square)
            .ok_or(ClaimError::UnknownSquare(square))?;
        self.squares[ix]
            .claim(player)
            .map_err(|owner| ClaimError::SquareOwned { square, owner })?;
        self.owned_squares += 1;
        debug!(owned_squares = self.owned_squares, "Square claimed");
        Ok(())
    }

    /// Owner of a line, or `None` when unowned or off the board.
    pub fn line_owner(&self, line: Line) -> Option<PlayerIx> {
        self.grid
            .line_index(line)
            .and_then(|ix| self.lines[ix].owner())
    }

    /// Owner of a vertex, or `None` when unowned or off the board.
    pub fn vertex_owner(&self, vertex: Coord) -> Option<PlayerIx> {
        self.grid
            .vertex_index(vertex)
            .and_then(|ix| self.vertices[ix].owner())
    }

    /// Owner of a square, or `None` when unowned or off the board.
    pub fn square_owner(&self, square: Coord) -> Option<PlayerIx> {
        self.grid
            .square_index(square)
            .and_then(|ix| self.squares[ix].owner())
    }

    /// Number of owned squares.
    pub fn owned_square_count(&self) -> usize {
        self.owned_squares
    }

    /// Number of owned lines.
    pub fn owned_line_count(&self) -> usize {
        self.lines.iter().filter(|slot| slot.owner().is_some()).count()
    }

    /// Whether every square on the board is owned.
    pub fn is_full(&self) -> bool {
        self.owned_squares == self.grid.square_count()
    }

    /// Returns every element to the unowned state for session re-use.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.lines.fill(Slot::default());
        self.vertices.fill(Slot::default());
        self.squares.fill(Slot::default());
        self.owned_squares = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::coord::Orientation;

    fn tracker() -> OwnershipTracker {
        OwnershipTracker::new(Grid::new(2, 2))
    }

    #[test]
    fn test_claim_rejects_second_owner() {
        let mut tracker = tracker();
        let line = Line::new(Orientation::Horizontal, Coord::new(0, 0));
        tracker.claim(line, PlayerIx::new(0)).unwrap();

        let err = tracker.claim(line, PlayerIx::new(1)).unwrap_err();
        assert_eq!(
            err,
            ClaimError::AlreadyOwned {
                line,
                owner: PlayerIx::new(0)
            }
        );
        // First owner is untouched.
        assert_eq!(tracker.line_owner(line), Some(PlayerIx::new(0)));
    }

    #[test]
    fn test_claim_rejects_off_board_line() {
        let mut tracker = tracker();
        let line = Line::new(Orientation::Horizontal, Coord::new(0, 3));
        assert_eq!(
            tracker.claim(line, PlayerIx::new(0)),
            Err(ClaimError::UnknownLine(line))
        );
    }

    #[test]
    fn test_vertex_keeps_first_owner() {
        let mut tracker = tracker();
        let shared = Coord::new(1, 0);
        let first = Line::between(Coord::new(0, 0), shared).unwrap();
        let second = Line::between(shared, Coord::new(2, 0)).unwrap();

        tracker.claim(first, PlayerIx::new(0)).unwrap();
        tracker.claim(second, PlayerIx::new(1)).unwrap();

        // The shared vertex mirrors the first claiming line's owner.
        assert_eq!(tracker.vertex_owner(shared), Some(PlayerIx::new(0)));
        assert_eq!(tracker.vertex_owner(Coord::new(2, 0)), Some(PlayerIx::new(1)));
    }

    #[test]
    fn test_reset_clears_all_ownership() {
        let mut tracker = tracker();
        let line = Line::new(Orientation::Vertical, Coord::new(0, 0));
        tracker.claim(line, PlayerIx::new(0)).unwrap();
        tracker.claim_square(Coord::new(0, 0), PlayerIx::new(0)).unwrap();

        tracker.reset();
        assert_eq!(tracker.line_owner(line), None);
        assert_eq!(tracker.owned_square_count(), 0);
        assert_eq!(tracker.owned_line_count(), 0);
    }
}
