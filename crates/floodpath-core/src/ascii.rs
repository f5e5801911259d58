//! Text form of a [`GridMap`].
//!
//! Each line is one row; each character one column.
//!
//! | char | cell |
//! |---|---|
//! | `#` | wall |
//! | `.` | empty |
//! | `S` | start |
//! | `E` | end |
//! | `*` | reserved |
//! | `1`–`9` | path marker with that id |
//! | `+` | path marker with id above 9 (render only) |

use crate::cell::{CellKind, PathId};
use crate::error::GridError;
use crate::geom::Position;
use crate::grid::GridMap;

impl GridMap {
    /// Parse a map from its text form.
    ///
    /// Leading and trailing whitespace of the whole text is ignored, lines
    /// are taken verbatim. No border is added. Starts register in
    /// row-major order; if the text holds several `E`, the last one wins.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s.trim().lines().collect();
        let height = lines.first().map_or(0, |l| l.chars().count());
        for (i, line) in lines.iter().enumerate() {
            if line.chars().count() != height {
                return Err(GridError::InconsistentSize { line: i });
            }
        }

        let mut map = GridMap::blank(lines.len() as i32, height as i32);
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let pos = Position::new(row as i32, col as i32);
                let kind = kind_for_char(ch).ok_or(GridError::InvalidChar { ch, pos })?;
                map.set(pos, kind)?;
            }
        }
        Ok(map)
    }

    /// Render the map in its text form, rows separated by `'\n'`.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.bounds().len() + self.width().max(0) as usize);
        for (p, kind) in self.iter() {
            if p.col == 0 && p.row > 0 {
                out.push('\n');
            }
            out.push(char_for_kind(kind));
        }
        out
    }
}

fn kind_for_char(ch: char) -> Option<CellKind> {
    let kind = match ch {
        '#' => CellKind::Wall,
        '.' => CellKind::Empty,
        'S' => CellKind::Start,
        'E' => CellKind::End,
        '*' => CellKind::Reserved,
        '1'..='9' => CellKind::PathMarker(PathId::new(ch.to_digit(10)?)?),
        _ => return None,
    };
    Some(kind)
}

fn char_for_kind(kind: CellKind) -> char {
    match kind {
        CellKind::Empty => '.',
        CellKind::Wall => '#',
        CellKind::Start => 'S',
        CellKind::End => 'E',
        CellKind::Reserved => '*',
        CellKind::PathMarker(id) => char::from_digit(id.get(), 10).unwrap_or('+'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
#####
#S..#
#.#.#
#..E#
#####";

    #[test]
    fn parse_registers_endpoints() {
        let g = GridMap::from_ascii(ROOM).unwrap();
        assert_eq!(g.width(), 5);
        assert_eq!(g.height(), 5);
        assert_eq!(g.starts(), &[Position::new(1, 1)]);
        assert_eq!(g.end(), Some(Position::new(3, 3)));
        assert_eq!(g.get(Position::new(2, 2)), Ok(CellKind::Wall));
        assert!(g.check_invariants());
    }

    #[test]
    fn text_form_round_trips() {
        let g = GridMap::from_ascii(ROOM).unwrap();
        assert_eq!(g.to_ascii(), ROOM);
    }

    #[test]
    fn default_map_renders_border() {
        assert_eq!(GridMap::new(3, 4).to_ascii(), "####\n#..#\n####");
    }

    #[test]
    fn markers_render_as_digits() {
        let mut g = GridMap::new(3, 5);
        g.set(Position::new(1, 1), CellKind::PathMarker(PathId::new(2).unwrap()))
            .unwrap();
        g.set(Position::new(1, 2), CellKind::PathMarker(PathId::new(12).unwrap()))
            .unwrap();
        g.set(Position::new(1, 3), CellKind::Reserved).unwrap();
        assert_eq!(g.to_ascii(), "#####\n#2+*#\n#####");
    }

    #[test]
    fn ragged_lines_are_rejected() {
        assert_eq!(
            GridMap::from_ascii("###\n##\n###"),
            Err(GridError::InconsistentSize { line: 1 })
        );
    }

    #[test]
    fn unknown_char_is_rejected() {
        assert_eq!(
            GridMap::from_ascii("###\n#x#"),
            Err(GridError::InvalidChar {
                ch: 'x',
                pos: Position::new(1, 1)
            })
        );
    }

    #[test]
    fn later_end_wins() {
        let g = GridMap::from_ascii("E.E").unwrap();
        assert_eq!(g.end(), Some(Position::new(0, 2)));
        assert_eq!(g.get(Position::new(0, 0)), Ok(CellKind::Empty));
    }
}
