//! Geometry primitives: [`Position`] and [`Range`].
//!
//! Grid coordinates are `(row, col)` pairs. A map of `width × height` cells
//! has rows in `0..width` and columns in `0..height`, the same axis mapping
//! the editor uses when it turns a pointer's x coordinate into a row.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// An integer grid position.
///
/// Positions order by row, then column. Searches rely on this ordering to
/// break priority ties deterministically.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Whether `other` is one cardinal or diagonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Position) -> bool {
        let d = other - self;
        d != Self::ZERO && d.row.abs() <= 1 && d.col.abs() <= 1
    }

    /// Whether the step from `self` to `other` moves along both axes.
    #[inline]
    pub fn is_diagonal_to(self, other: Position) -> bool {
        let d = other - self;
        d.row.abs() == 1 && d.col.abs() == 1
    }

    /// The four cardinal neighbours (north, east, south, west).
    #[inline]
    pub fn neighbors_4(self) -> [Position; 4] {
        [
            self.shift(-1, 0),
            self.shift(0, 1),
            self.shift(1, 0),
            self.shift(0, -1),
        ]
    }

    /// All eight neighbours, clockwise from north.
    #[inline]
    pub fn neighbors_8(self) -> [Position; 8] {
        [
            self.shift(-1, 0),
            self.shift(-1, 1),
            self.shift(0, 1),
            self.shift(1, 1),
            self.shift(1, 0),
            self.shift(1, -1),
            self.shift(0, -1),
            self.shift(-1, -1),
        ]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max) of positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Position,
    pub max: Position,
}

impl Range {
    /// Create a new range from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(row0: i32, col0: i32, row1: i32, col1: i32) -> Self {
        Self {
            min: Position::new(row0.min(row1), col0.min(col1)),
            max: Position::new(row0.max(row1), col0.max(col1)),
        }
    }

    /// Range covering a `width × height` map anchored at the origin.
    #[inline]
    pub fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width.max(0), height.max(0))
    }

    /// Number of rows.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.row - self.min.row
    }

    /// Number of columns.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.col - self.min.col
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.row >= self.max.row || self.min.col >= self.max.col
    }

    /// Whether `p` is inside the half-open range.
    #[inline]
    pub fn contains(self, p: Position) -> bool {
        p.row >= self.min.row && p.row < self.max.row && p.col >= self.min.col && p.col < self.max.col
    }

    /// Whether `p` lies on the outermost ring of the range.
    #[inline]
    pub fn on_border(self, p: Position) -> bool {
        self.contains(p)
            && (p.row == self.min.row
                || p.row == self.max.row - 1
                || p.col == self.min.col
                || p.col == self.max.col - 1)
    }

    /// Row-major iterator over every position in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Position;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the positions in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Position,
}

impl Iterator for RangeIter {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Position> {
        if self.cur.row >= self.range.max.row || self.range.is_empty() {
            return None;
        }
        let p = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.range.max.col {
            self.cur.col = self.range.min.col;
            self.cur.row += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.row >= self.range.max.row {
            return (0, Some(0));
        }
        let h = self.range.height() as usize;
        let remaining_in_row = (self.range.max.col - self.cur.col) as usize;
        let remaining_rows = (self.range.max.row - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * h;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_arithmetic() {
        let a = Position::new(1, 2);
        let b = Position::new(3, 4);
        assert_eq!(a + b, Position::new(4, 6));
        assert_eq!(b - a, Position::new(2, 2));
        assert_eq!(a.shift(-1, 1), Position::new(0, 3));
    }

    #[test]
    fn position_orders_row_then_column() {
        let mut ps = vec![
            Position::new(2, 0),
            Position::new(1, 5),
            Position::new(1, 2),
        ];
        ps.sort();
        assert_eq!(
            ps,
            vec![Position::new(1, 2), Position::new(1, 5), Position::new(2, 0)]
        );
    }

    #[test]
    fn adjacency_and_diagonals() {
        let p = Position::new(3, 3);
        assert!(p.is_adjacent(Position::new(2, 3)));
        assert!(p.is_adjacent(Position::new(4, 4)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Position::new(5, 3)));
        assert!(p.is_diagonal_to(Position::new(2, 2)));
        assert!(!p.is_diagonal_to(Position::new(2, 3)));
    }

    #[test]
    fn neighbor_sets() {
        let p = Position::new(1, 1);
        assert!(p.neighbors_4().iter().all(|&n| p.is_adjacent(n) && !p.is_diagonal_to(n)));
        assert_eq!(p.neighbors_8().iter().filter(|&&n| p.is_diagonal_to(n)).count(), 4);
    }

    #[test]
    fn range_basics() {
        let r = Range::sized(3, 2);
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 2);
        assert_eq!(r.len(), 6);
        assert!(r.contains(Position::new(2, 1)));
        assert!(!r.contains(Position::new(3, 0)));
        assert!(!r.contains(Position::new(0, 2)));
        assert!(!r.contains(Position::new(-1, 0)));
    }

    #[test]
    fn range_auto_canonicalize() {
        let r = Range::new(3, 2, 0, 0);
        assert_eq!(r.min, Position::new(0, 0));
        assert_eq!(r.max, Position::new(3, 2));
    }

    #[test]
    fn negative_size_is_empty() {
        let r = Range::sized(-4, 5);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }

    #[test]
    fn range_iter_is_row_major() {
        let r = Range::sized(2, 3);
        let pts: Vec<_> = r.iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Position::new(0, 0));
        assert_eq!(pts[1], Position::new(0, 1));
        assert_eq!(pts[3], Position::new(1, 0));
        assert_eq!(r.iter().size_hint(), (6, Some(6)));
    }

    #[test]
    fn border_detection() {
        let r = Range::sized(4, 4);
        assert!(r.on_border(Position::new(0, 2)));
        assert!(r.on_border(Position::new(3, 3)));
        assert!(!r.on_border(Position::new(1, 2)));
        assert!(!r.on_border(Position::new(4, 0)));
        assert_eq!(r.iter().filter(|&p| r.on_border(p)).count(), 12);
    }
}
