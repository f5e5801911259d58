use floodpath_core::Position;

use crate::distance::{manhattan, step_cost};

/// A walkable graph over grid positions.
pub trait Pather {
    /// Whether a route may pass through `p`.
    fn passable(&self, p: Position) -> bool;

    /// Push the passable positions one step away from `p` onto `buf`.
    /// `buf` is cleared by the caller.
    fn neighbors(&self, p: Position, buf: &mut Vec<Position>);
}

/// A [`Pather`] whose steps have a cost.
///
/// The default is the grid rule: 10 per straight step, 14 per diagonal.
pub trait WeightedPather: Pather {
    fn cost(&self, from: Position, to: Position) -> i32 {
        step_cost(from, to)
    }
}

/// A [`WeightedPather`] that A* can drive.
///
/// `estimate` must not exceed the cheapest real cost from `from` to `to`.
/// The default, Manhattan distance in whole cells, satisfies that for the
/// default costs.
pub trait AstarPather: WeightedPather {
    fn estimate(&self, from: Position, to: Position) -> i32 {
        manhattan(from, to)
    }
}
