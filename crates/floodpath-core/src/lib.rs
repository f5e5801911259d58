//! **floodpath-core**: occupancy grid and geometry types.
//!
//! This crate provides the types shared by the floodpath solvers and
//! engine: grid positions, cell tags, and the [`GridMap`] that keeps the
//! start/end registries consistent with its cells.

pub mod ascii;
pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{CellKind, PathId};
pub use error::GridError;
pub use geom::{Position, Range};
pub use grid::GridMap;
