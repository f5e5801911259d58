//! Error type for grid access and map parsing.

use std::fmt;

use crate::geom::Position;

/// Errors raised by [`GridMap`](crate::GridMap) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A position outside the map was addressed.
    OutOfBounds {
        pos: Position,
        width: i32,
        height: i32,
    },
    /// ASCII map lines have different lengths.
    InconsistentSize { line: usize },
    /// ASCII map contains a character with no cell meaning.
    InvalidChar { ch: char, pos: Position },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, width, height } => {
                write!(f, "position {pos} out of bounds for {width}x{height} map")
            }
            Self::InconsistentSize { line } => {
                write!(f, "map line {line} has a different length than the first line")
            }
            Self::InvalidChar { ch, pos } => {
                write!(f, "map contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let e = GridError::OutOfBounds {
            pos: Position::new(7, -1),
            width: 5,
            height: 5,
        };
        assert_eq!(e.to_string(), "position (7, -1) out of bounds for 5x5 map");
        let e = GridError::InvalidChar {
            ch: '?',
            pos: Position::new(1, 2),
        };
        assert!(e.to_string().contains("(1, 2)"));
    }
}
