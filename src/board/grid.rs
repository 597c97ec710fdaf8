//! Board topology: vertices, lines and squares for a W×H game.
//!
//! The grid is pure geometry. It answers adjacency and bounds queries and
//! assigns dense indices to every element, so ownership can live in flat
//! arenas keyed by index rather than behind string-id lookups. Out-of-range
//! queries return `None`; box completion routinely probes past the board
//! edge and a missing neighbor is an ordinary answer, not an error.

use super::coord::{Coord, Line, Orientation};

/// Topology of a board with `width` × `height` squares.
///
/// Vertices span `[0, width] × [0, height]`; squares are named by their
/// top-left vertex in `[0, width) × [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    /// Creates a grid for a board of `width` × `height` squares.
    ///
    /// Dimension validation happens in [`GameConfig`](crate::GameConfig);
    /// the grid assumes both dimensions are at least 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of squares in the horizontal direction.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of squares in the vertical direction.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `c` names a vertex on this board.
    pub fn vertex_in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && c.x <= self.width as i32 && c.y <= self.height as i32
    }

    /// Whether `c` names a square on this board.
    pub fn square_in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.width as i32 && c.y < self.height as i32
    }

    /// Whether both endpoints of `line` lie on this board.
    pub fn contains_line(&self, line: Line) -> bool {
        self.vertex_in_bounds(line.start()) && self.vertex_in_bounds(line.end())
    }

    /// Returns the line connecting two vertices, or `None` when the vertices
    /// are not adjacent or the edge falls outside the board.
    pub fn line_between(&self, a: Coord, b: Coord) -> Option<Line> {
        Line::between(a, b).filter(|line| self.contains_line(*line))
    }

    /// Returns the square named by its top-left vertex, or `None` when out
    /// of bounds.
    pub fn square_at(&self, top_left: Coord) -> Option<Coord> {
        self.square_in_bounds(top_left).then_some(top_left)
    }

    /// The four lines bounding a square, as `[top, bottom, left, right]`.
    pub fn sides(&self, square: Coord) -> [Line; 4] {
        let Coord { x, y } = square;
        [
            Line::new(Orientation::Horizontal, Coord::new(x, y)),
            Line::new(Orientation::Horizontal, Coord::new(x, y + 1)),
            Line::new(Orientation::Vertical, Coord::new(x, y)),
            Line::new(Orientation::Vertical, Coord::new(x + 1, y)),
        ]
    }

    /// The squares adjacent to a line: above/below for horizontal lines,
    /// left/right for vertical ones. Boundary lines yield a single square.
    pub fn adjacent_squares(&self, line: Line) -> impl Iterator<Item = Coord> {
        let Coord { x, y } = line.start();
        let candidates = match line.orientation() {
            Orientation::Horizontal => [Coord::new(x, y - 1), Coord::new(x, y)],
            Orientation::Vertical => [Coord::new(x - 1, y), Coord::new(x, y)],
        };
        let grid = *self;
        candidates
            .into_iter()
            .filter(move |c| grid.square_in_bounds(*c))
    }

    /// Total number of lines on the board.
    pub fn line_count(&self) -> usize {
        let (w, h) = (self.width as usize, self.height as usize);
        w * (h + 1) + h * (w + 1)
    }

    /// Total number of squares on the board.
    pub fn square_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Total number of vertices on the board.
    pub fn vertex_count(&self) -> usize {
        (self.width as usize + 1) * (self.height as usize + 1)
    }

    /// Dense arena index of a line, or `None` when off the board.
    ///
    /// Horizontal lines come first in row-major order, then vertical lines.
    pub fn line_index(&self, line: Line) -> Option<usize> {
        if !self.contains_line(line) {
            return None;
        }
        let (w, h) = (self.width as usize, self.height as usize);
        let Coord { x, y } = line.start();
        let (x, y) = (x as usize, y as usize);
        match line.orientation() {
            Orientation::Horizontal => Some(y * w + x),
            Orientation::Vertical => Some(w * (h + 1) + y * (w + 1) + x),
        }
    }

    /// Dense arena index of a square, or `None` when off the board.
    pub fn square_index(&self, square: Coord) -> Option<usize> {
        self.square_in_bounds(square)
            .then(|| square.y as usize * self.width as usize + square.x as usize)
    }

    /// Dense arena index of a vertex, or `None` when off the board.
    pub fn vertex_index(&self, vertex: Coord) -> Option<usize> {
        self.vertex_in_bounds(vertex)
            .then(|| vertex.y as usize * (self.width as usize + 1) + vertex.x as usize)
    }

    /// Enumerates every line on the board in arena-index order.
    pub fn lines(&self) -> impl Iterator<Item = Line> {
        let (w, h) = (self.width as i32, self.height as i32);
        let horizontal = (0..=h).flat_map(move |y| {
            (0..w).map(move |x| Line::new(Orientation::Horizontal, Coord::new(x, y)))
        });
        let vertical = (0..h).flat_map(move |y| {
            (0..=w).map(move |x| Line::new(Orientation::Vertical, Coord::new(x, y)))
        });
        horizontal.chain(vertical)
    }

    /// Enumerates every square on the board in arena-index order.
    pub fn squares(&self) -> impl Iterator<Item = Coord> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Coord::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_between_bounds_checked() {
        let grid = Grid::new(2, 2);
        assert!(grid.line_between(Coord::new(0, 0), Coord::new(1, 0)).is_some());
        // Probing past the edge answers None, never an error.
        assert!(grid.line_between(Coord::new(0, -1), Coord::new(1, -1)).is_none());
        assert!(grid.line_between(Coord::new(2, 2), Coord::new(3, 2)).is_none());
    }

    #[test]
    fn test_square_at_out_of_bounds() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.square_at(Coord::new(2, 1)), Some(Coord::new(2, 1)));
        assert!(grid.square_at(Coord::new(3, 0)).is_none());
        assert!(grid.square_at(Coord::new(0, 2)).is_none());
        assert!(grid.square_at(Coord::new(-1, 0)).is_none());
    }

    #[test]
    fn test_sides_bound_their_square() {
        let grid = Grid::new(2, 2);
        let sides = grid.sides(Coord::new(1, 1));
        for side in sides {
            assert!(grid.contains_line(side), "side {side} should be on-board");
            assert!(
                grid.adjacent_squares(side).any(|sq| sq == Coord::new(1, 1)),
                "side {side} should touch square (1, 1)"
            );
        }
    }

    #[test]
    fn test_adjacent_squares_interior_and_boundary() {
        let grid = Grid::new(2, 2);
        // Interior horizontal line touches the squares above and below.
        let interior = Line::new(Orientation::Horizontal, Coord::new(0, 1));
        let squares: Vec<_> = grid.adjacent_squares(interior).collect();
        assert_eq!(squares, vec![Coord::new(0, 0), Coord::new(0, 1)]);

        // Top edge has no square above it.
        let top = Line::new(Orientation::Horizontal, Coord::new(0, 0));
        let squares: Vec<_> = grid.adjacent_squares(top).collect();
        assert_eq!(squares, vec![Coord::new(0, 0)]);
    }

    #[test]
    fn test_line_indices_are_dense_and_unique() {
        let grid = Grid::new(3, 2);
        let mut seen = vec![false; grid.line_count()];
        for line in grid.lines() {
            let ix = grid.line_index(line).unwrap();
            assert!(!seen[ix], "index {ix} assigned twice");
            seen[ix] = true;
        }
        assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn test_counts_match_enumeration() {
        let grid = Grid::new(8, 8);
        assert_eq!(grid.line_count(), 144);
        assert_eq!(grid.square_count(), 64);
        assert_eq!(grid.vertex_count(), 81);
        assert_eq!(grid.lines().count(), grid.line_count());
        assert_eq!(grid.squares().count(), grid.square_count());
    }
}
