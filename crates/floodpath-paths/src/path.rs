use floodpath_core::Position;

use crate::distance::step_cost;
use crate::neighbors::Adjacency;

/// The cells strictly between a start and an end, in travel order.
///
/// Neither endpoint is stored: the end keeps its `End` tag when the path
/// is drawn. Adjacent endpoints give a path with no cells; an unreachable
/// end is reported as `None` by the solvers, never as a `Path`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Position>,
}

impl Path {
    pub fn new(cells: Vec<Position>) -> Self {
        Self { cells }
    }

    /// Build a path from a full route that includes both endpoints.
    pub(crate) fn from_route(route: &[Position]) -> Self {
        let inner = match route {
            [_, inner @ .., _] => inner.to_vec(),
            _ => Vec::new(),
        };
        Self { cells: inner }
    }

    #[inline]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Position) -> bool {
        self.cells.contains(&p)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.cells.iter()
    }

    pub fn into_vec(self) -> Vec<Position> {
        self.cells
    }

    /// Every position travelled through, from `start` to `end` inclusive.
    pub fn route(&self, start: Position, end: Position) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(start)
            .chain(self.cells.iter().copied())
            .chain(std::iter::once(end))
    }

    /// Total step cost of travelling `start` → path → `end`.
    pub fn cost(&self, start: Position, end: Position) -> i32 {
        let route: Vec<Position> = self.route(start, end).collect();
        route.windows(2).map(|w| step_cost(w[0], w[1])).sum()
    }

    /// Whether `start` → path → `end` is a chain of single steps.
    pub fn is_connected(&self, start: Position, end: Position, adjacency: Adjacency) -> bool {
        let route: Vec<Position> = self.route(start, end).collect();
        route.windows(2).all(|w| adjacency.is_step(w[0], w[1]))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl From<Vec<Position>> for Path {
    fn from(cells: Vec<Position>) -> Self {
        Self::new(cells)
    }
}
