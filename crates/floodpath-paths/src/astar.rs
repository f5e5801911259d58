use std::collections::BinaryHeap;

use floodpath_core::{GridError, GridMap, Position};

use crate::PathRange;
use crate::neighbors::{Adjacency, Neighbors};
use crate::path::Path;
use crate::pathrange::{NO_PARENT, NodeRef, UNREACHABLE};
use crate::traits::{AstarPather, Pather, WeightedPather};

impl PathRange {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the full route (including both endpoints) or `None` if no path
    /// exists within the current range. Ties on `f` go to the smaller
    /// position, so identical inputs always give the identical route.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Position,
        to: Position,
    ) -> Option<Vec<Position>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        // New stamp: every node from an earlier search reads as unvisited.
        self.stamp = self.stamp.wrapping_add(1);
        let stamp = self.stamp;

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.f = pather.estimate(from, to);
            node.parent = NO_PARENT;
            node.stamp = stamp;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: self.nodes[start_idx].f,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.nodes[ci].stamp != stamp || !self.nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.nodes[ci].open = false;
            let current_g = self.nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut self.nodes[ni];
                if n.stamp == stamp {
                    // Only a strictly cheaper route replaces the record.
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.stamp = stamp;
                    n.g = UNREACHABLE;
                }

                n.g = tentative_g;
                n.f = tentative_g + pather.estimate(np, to);
                n.parent = ci;
                n.open = true;

                open.push(NodeRef { idx: ni, f: n.f });
            }
        };

        self.nbuf = nbuf;

        if !found {
            return None;
        }

        Some(self.walk_back(|i| self.nodes[i].parent, goal_idx))
    }
}

/// Adapts a [`GridMap`] to the pather traits: walls and off-map positions
/// are impassable, costs and estimate are the trait defaults.
pub struct GridPather<'a> {
    grid: &'a GridMap,
    adjacency: Adjacency,
}

impl<'a> GridPather<'a> {
    pub fn new(grid: &'a GridMap, adjacency: Adjacency) -> Self {
        Self { grid, adjacency }
    }
}

impl Pather for GridPather<'_> {
    fn passable(&self, p: Position) -> bool {
        self.grid.at(p).is_some_and(|kind| kind.is_passable())
    }

    fn neighbors(&self, p: Position, buf: &mut Vec<Position>) {
        let mut nb = Neighbors::new();
        buf.extend_from_slice(nb.of(self.adjacency, p, |n| self.passable(n)));
    }
}

impl WeightedPather for GridPather<'_> {}

impl AstarPather for GridPather<'_> {}

/// Deterministic single-path solver over a [`GridMap`].
pub struct AStarSearch {
    range: PathRange,
    adjacency: Adjacency,
}

impl AStarSearch {
    pub fn new(adjacency: Adjacency) -> Self {
        Self {
            range: PathRange::default(),
            adjacency,
        }
    }

    #[inline]
    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    /// Find the cheapest path from `start` to `end`.
    ///
    /// The returned [`Path`] excludes both endpoints. `Ok(None)` means `end`
    /// cannot be reached; an endpoint outside the map is an error.
    pub fn find_path(
        &mut self,
        grid: &GridMap,
        start: Position,
        end: Position,
    ) -> Result<Option<Path>, GridError> {
        grid.get(start)?;
        grid.get(end)?;
        self.range.ensure_range(grid.bounds());

        let pather = GridPather::new(grid, self.adjacency);
        let route = self.range.astar_path(&pather, start, end);
        match &route {
            Some(r) => log::debug!("astar {start} -> {end}: {} steps", r.len() - 1),
            None => log::debug!("astar {start} -> {end}: unreachable"),
        }
        Ok(route.map(|r| Path::from_route(&r)))
    }
}

impl Default for AStarSearch {
    fn default() -> Self {
        Self::new(Adjacency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DIAGONAL_COST, STRAIGHT_COST, chebyshev, manhattan};
    use floodpath_core::CellKind;
    use proptest::prelude::*;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn five_by_five_open_room() {
        let mut grid = GridMap::new(5, 5);
        grid.set(p(1, 1), CellKind::Start).unwrap();
        grid.set(p(3, 3), CellKind::End).unwrap();

        let mut astar = AStarSearch::default();
        let path = astar.find_path(&grid, p(1, 1), p(3, 3)).unwrap().unwrap();
        assert_eq!(path.len(), 3);
        assert!(!path.contains(p(3, 3)));
        assert!(!path.contains(p(1, 1)));
        assert!(path.is_connected(p(1, 1), p(3, 3), Adjacency::Cardinal));
        assert_eq!(path.cost(p(1, 1), p(3, 3)), 40);
    }

    #[test]
    fn ties_follow_position_order() {
        let grid = GridMap::new(5, 5);
        let mut astar = AStarSearch::default();
        let path = astar.find_path(&grid, p(1, 1), p(3, 3)).unwrap().unwrap();
        // (1, 2) sorts before (2, 1), so the route heads east first.
        assert_eq!(path.cells()[0], p(1, 2));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let grid = GridMap::from_ascii(
            "\
##########
#S.......#
#.##.###.#
#.#....#.#
#...##...#
#.#....#E#
##########",
        )
        .unwrap();
        let start = grid.starts()[0];
        let end = grid.end().unwrap();
        let mut astar = AStarSearch::default();
        let first = astar.find_path(&grid, start, end).unwrap();
        for _ in 0..5 {
            assert_eq!(astar.find_path(&grid, start, end).unwrap(), first);
            assert_eq!(AStarSearch::default().find_path(&grid, start, end).unwrap(), first);
        }
    }

    #[test]
    fn walls_detour() {
        let grid = GridMap::from_ascii(
            "\
#######
#S.#..#
#..#..#
#....E#
#######",
        )
        .unwrap();
        let mut astar = AStarSearch::default();
        let path = astar.find_path(&grid, p(1, 1), p(3, 5)).unwrap().unwrap();
        assert!(path.iter().all(|&c| grid.at(c) != Some(CellKind::Wall)));
        assert_eq!(path.cost(p(1, 1), p(3, 5)), 6 * STRAIGHT_COST);
    }

    #[test]
    fn enclosed_start_is_unreachable() {
        let grid = GridMap::from_ascii(
            "\
#####
#S#.#
###.#
#..E#
#####",
        )
        .unwrap();
        let mut astar = AStarSearch::default();
        assert_eq!(astar.find_path(&grid, p(1, 1), p(3, 3)), Ok(None));
    }

    #[test]
    fn diagonal_steps_cost_fourteen() {
        let grid = GridMap::new(6, 6);
        let mut astar = AStarSearch::new(Adjacency::Octile);
        let path = astar.find_path(&grid, p(1, 1), p(4, 4)).unwrap().unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.cost(p(1, 1), p(4, 4)), 3 * DIAGONAL_COST);
    }

    #[test]
    fn adjacent_endpoints_give_empty_path() {
        let grid = GridMap::new(5, 5);
        let mut astar = AStarSearch::default();
        assert_eq!(astar.find_path(&grid, p(1, 1), p(1, 2)), Ok(Some(Path::default())));
    }

    #[test]
    fn out_of_bounds_endpoint_is_an_error() {
        let grid = GridMap::new(5, 5);
        let mut astar = AStarSearch::default();
        assert!(matches!(
            astar.find_path(&grid, p(1, 1), p(9, 9)),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn cache_follows_grid_resize() {
        let mut astar = AStarSearch::default();
        let small = GridMap::new(5, 5);
        assert!(astar.find_path(&small, p(1, 1), p(3, 3)).unwrap().is_some());
        let big = GridMap::new(30, 12);
        let path = astar.find_path(&big, p(1, 1), p(28, 10)).unwrap().unwrap();
        assert_eq!(path.cost(p(1, 1), p(28, 10)), (27 + 9) * STRAIGHT_COST);
    }

    proptest! {
        #[test]
        fn open_grid_cost_is_optimal(
            w in 4i32..14, h in 4i32..14,
            a in (0i32..100, 0i32..100), b in (0i32..100, 0i32..100),
            octile in any::<bool>(),
        ) {
            let grid = GridMap::new(w, h);
            let start = p(1 + a.0 % (w - 2), 1 + a.1 % (h - 2));
            let end = p(1 + b.0 % (w - 2), 1 + b.1 % (h - 2));
            prop_assume!(start != end);

            let adjacency = if octile { Adjacency::Octile } else { Adjacency::Cardinal };
            let mut astar = AStarSearch::new(adjacency);
            let path = astar.find_path(&grid, start, end).unwrap().unwrap();
            prop_assert!(path.is_connected(start, end, adjacency));

            let expected = if octile {
                let diag = (start.row - end.row).abs().min((start.col - end.col).abs());
                diag * DIAGONAL_COST + (chebyshev(start, end) - diag) * STRAIGHT_COST
            } else {
                manhattan(start, end) * STRAIGHT_COST
            };
            prop_assert_eq!(path.cost(start, end), expected);
        }
    }
}
