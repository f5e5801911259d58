use floodpath_core::{Position, Range};

use crate::direction::Direction;

/// Per-cell A* record. Valid only while `stamp` matches the range's.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) stamp: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            f: 0,
            parent: NO_PARENT,
            stamp: 0,
            open: false,
        }
    }
}

/// Open-list entry. The heap pops the lowest `f` first.
///
/// Equal `f` falls back to the flat index, which is row-major and therefore
/// follows [`Position`] ordering.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, idx) first.
        other.f.cmp(&self.f).then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Sentinel cost meaning "not reached yet".
pub const UNREACHABLE: i32 = i32::MAX;

/// Parent sentinel for the search origin.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Search caches for one map rectangle.
///
/// `PathRange` owns the A* node array, the flood-search predecessor map and
/// the frontier buffers, so repeated searches over the same map incur no
/// allocations after the first one.
pub struct PathRange {
    pub(crate) bounds: Range,
    pub(crate) height: usize,
    // A* caches
    pub(crate) nodes: Vec<Node>,
    pub(crate) stamp: u32,
    // flood caches
    pub(crate) flood_parents: Vec<usize>,
    pub(crate) frontier: Vec<(Position, Direction)>,
    pub(crate) next_frontier: Vec<(Position, Direction)>,
    pub(crate) dirbuf: Vec<Direction>,
    // neighbor scratch
    pub(crate) nbuf: Vec<Position>,
}

impl PathRange {
    /// Create a new `PathRange` for the given map rectangle.
    pub fn new(bounds: Range) -> Self {
        let len = bounds.len();
        Self {
            bounds,
            height: bounds.height().max(0) as usize,
            nodes: vec![Node::default(); len],
            stamp: 0,
            flood_parents: vec![NO_PARENT; len],
            frontier: Vec::new(),
            next_frontier: Vec::new(),
            dirbuf: Vec::with_capacity(8),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Replace the underlying range, reallocating caches as needed.
    ///
    /// If the new size fits within existing capacity, caches are kept and
    /// only the A* stamp is bumped. Otherwise caches are reallocated.
    pub fn set_range(&mut self, bounds: Range) {
        let new_len = bounds.len();
        let old_capacity = self.nodes.len();
        self.bounds = bounds;
        self.height = bounds.height().max(0) as usize;

        if new_len <= old_capacity {
            self.stamp = self.stamp.wrapping_add(1);
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.stamp = 0;

        self.flood_parents.clear();
        self.flood_parents.resize(new_len, NO_PARENT);
    }

    /// The map rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.bounds
    }

    /// Switch to `bounds` unless it is already the active range.
    #[inline]
    pub(crate) fn ensure_range(&mut self, bounds: Range) {
        if self.bounds != bounds {
            self.set_range(bounds);
        }
    }

    /// Convert a `Position` to a flat row-major index. Returns `None` if out
    /// of range.
    #[inline]
    pub(crate) fn idx(&self, p: Position) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let row = (p.row - self.bounds.min.row) as usize;
        let col = (p.col - self.bounds.min.col) as usize;
        Some(row * self.height + col)
    }

    /// Convert a flat index back to a `Position`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Position {
        let row = (idx / self.height) as i32 + self.bounds.min.row;
        let col = (idx % self.height) as i32 + self.bounds.min.col;
        Position::new(row, col)
    }

    /// Follow `parents` from `goal` back to the origin and return the route
    /// in origin → goal order, both ends included.
    pub(crate) fn walk_back(&self, parents: impl Fn(usize) -> usize, goal: usize) -> Vec<Position> {
        let mut route = Vec::new();
        let mut ci = goal;
        while ci != NO_PARENT {
            route.push(self.point(ci));
            ci = parents(ci);
        }
        route.reverse();
        route
    }
}

impl Default for PathRange {
    fn default() -> Self {
        Self::new(Range::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_range_smaller_preserves_capacity() {
        let mut pr = PathRange::new(Range::sized(20, 20));
        let original_cap = pr.nodes.len();

        let small = Range::sized(5, 5);
        pr.set_range(small);
        assert_eq!(pr.range(), small);
        assert_eq!(pr.nodes.len(), original_cap);
        assert_eq!(pr.height, 5);
        assert!(pr.stamp > 0);
    }

    #[test]
    fn set_range_larger_reallocates() {
        let mut pr = PathRange::new(Range::sized(5, 5));
        pr.set_range(Range::sized(20, 20));
        assert_eq!(pr.nodes.len(), 400);
        assert_eq!(pr.flood_parents.len(), 400);
    }

    #[test]
    fn index_round_trip_is_row_major() {
        let pr = PathRange::new(Range::new(2, 3, 6, 8));
        let mut last = None;
        for p in pr.range() {
            let i = pr.idx(p).unwrap();
            assert_eq!(pr.point(i), p);
            if let Some(prev) = last {
                assert_eq!(i, prev + 1);
            }
            last = Some(i);
        }
        assert_eq!(pr.idx(Position::new(6, 3)), None);
    }

    #[test]
    fn node_ref_breaks_ties_by_index() {
        use std::collections::BinaryHeap;
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 7, f: 3 });
        heap.push(NodeRef { idx: 2, f: 3 });
        heap.push(NodeRef { idx: 9, f: 1 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop()).map(|n| n.idx).collect();
        assert_eq!(order, vec![9, 2, 7]);
    }
}
