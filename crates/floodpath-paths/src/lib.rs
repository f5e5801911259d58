//! Pathfinding algorithms for floodpath grids.
//!
//! Two solvers work over a [`GridMap`](floodpath_core::GridMap):
//!
//! - **A\*** ([`AStarSearch`], built on [`PathRange::astar_path`]):
//!   deterministic, optimal under the 10/14 step costs.
//! - **Stochastic flood** ([`StochasticFloodSearch`], built on
//!   [`PathRange::flood_path`]): layer-by-layer randomized flooding,
//!   repeated over several trials, keeping the shortest result.
//!
//! Both return a [`Path`] that excludes its start and end cells.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | step costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod direction;
mod distance;
mod flood;
mod neighbors;
mod path;
mod pathrange;
mod traits;

pub use astar::{AStarSearch, GridPather};
pub use direction::Direction;
pub use distance::{DIAGONAL_COST, STRAIGHT_COST, chebyshev, manhattan, step_cost};
pub use flood::{DEFAULT_MAX_TRIALS, FloodReport, StochasticFloodSearch};
pub use neighbors::{Adjacency, Neighbors};
pub use path::Path;
pub use pathrange::{PathRange, UNREACHABLE};
pub use traits::{AstarPather, Pather, WeightedPather};
