//! Compass headings carried by flood-search frontier points.
//!
//! A point remembers the heading it was reached by. From there the flood
//! may only continue in headings that do not point back against it (their
//! dot product with the arrival heading is non-negative), so a branch never
//! reverses onto itself.

use floodpath_core::Position;

use crate::neighbors::Adjacency;

/// 9-way compass: the eight headings plus `Origin` for the search start.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Origin,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

const CARDINAL: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

const ALL: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

impl Direction {
    /// Headings available under `adjacency`, clockwise from north.
    pub const fn headings(adjacency: Adjacency) -> &'static [Direction] {
        match adjacency {
            Adjacency::Cardinal => &CARDINAL,
            Adjacency::Octile => &ALL,
        }
    }

    /// Row/column offset of one step in this heading. North is row − 1.
    pub const fn delta(self) -> Position {
        let (row, col) = match self {
            Self::Origin => (0, 0),
            Self::North => (-1, 0),
            Self::NorthEast => (-1, 1),
            Self::East => (0, 1),
            Self::SouthEast => (1, 1),
            Self::South => (1, 0),
            Self::SouthWest => (1, -1),
            Self::West => (0, -1),
            Self::NorthWest => (-1, -1),
        };
        Position::new(row, col)
    }

    /// Heading pointing the other way. `Origin` is its own opposite.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Origin => Self::Origin,
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::East => Self::West,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
        }
    }

    /// Whether a point reached by `self` may continue in heading `next`.
    pub const fn allows(self, next: Direction) -> bool {
        if matches!(next, Self::Origin) {
            return false;
        }
        let a = self.delta();
        let b = next.delta();
        a.row * b.row + a.col * b.col >= 0
    }

    /// Fill `buf` with the headings allowed after `self` under `adjacency`.
    pub fn successors(self, adjacency: Adjacency, buf: &mut Vec<Direction>) {
        buf.clear();
        buf.extend(
            Self::headings(adjacency)
                .iter()
                .copied()
                .filter(|&d| self.allows(d)),
        );
    }
}
