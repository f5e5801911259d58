use floodpath_core::Position;

/// Which moves count as a single step. Fixed when a solver is built.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Adjacency {
    /// 4-way: north, east, south, west.
    #[default]
    Cardinal,
    /// 8-way: cardinal moves plus diagonals.
    Octile,
}

impl Adjacency {
    #[inline]
    pub const fn allows_diagonals(self) -> bool {
        matches!(self, Self::Octile)
    }

    /// Whether `from` → `to` is a single step under this adjacency.
    #[inline]
    pub fn is_step(self, from: Position, to: Position) -> bool {
        from.is_adjacent(to) && (self.allows_diagonals() || !from.is_diagonal_to(to))
    }
}

/// Cached neighbor computation helper.
///
/// Provides methods for enumerating cardinal (4-way) or all (8-way)
/// neighbors of a grid position, filtered by a predicate.
pub struct Neighbors {
    buf: Vec<Position>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return 4-directional (cardinal) neighbors of `p`, keeping only those
    /// for which `keep` returns `true`.
    pub fn cardinal(&mut self, p: Position, keep: impl Fn(Position) -> bool) -> &[Position] {
        self.buf.clear();
        self.buf.extend(p.neighbors_4().into_iter().filter(|&n| keep(n)));
        &self.buf
    }

    /// Return 8-directional neighbors of `p`, keeping only those for which
    /// `keep` returns `true`.
    pub fn all(&mut self, p: Position, keep: impl Fn(Position) -> bool) -> &[Position] {
        self.buf.clear();
        self.buf.extend(p.neighbors_8().into_iter().filter(|&n| keep(n)));
        &self.buf
    }

    /// Neighbors of `p` under `adjacency`.
    pub fn of(
        &mut self,
        adjacency: Adjacency,
        p: Position,
        keep: impl Fn(Position) -> bool,
    ) -> &[Position] {
        match adjacency {
            Adjacency::Cardinal => self.cardinal(p, keep),
            Adjacency::Octile => self.all(p, keep),
        }
    }
}
