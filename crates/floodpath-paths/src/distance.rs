use floodpath_core::Position;

/// Cost of one axis-aligned step.
pub const STRAIGHT_COST: i32 = 10;
/// Cost of one diagonal step.
pub const DIAGONAL_COST: i32 = 14;

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Position, b: Position) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// Chebyshev (L∞) distance between two positions.
#[inline]
pub fn chebyshev(a: Position, b: Position) -> i32 {
    (a.row - b.row).abs().max((a.col - b.col).abs())
}

/// Cost of the single step `from` → `to`.
#[inline]
pub fn step_cost(from: Position, to: Position) -> i32 {
    if from.is_diagonal_to(to) {
        DIAGONAL_COST
    } else {
        STRAIGHT_COST
    }
}
