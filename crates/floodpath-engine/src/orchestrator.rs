//! Run one solver per registered start and paint the results.

use floodpath_core::{CellKind, GridError, GridMap, PathId, Position};
use floodpath_paths::{AStarSearch, Adjacency, Path, StochasticFloodSearch};

use crate::config::{EngineConfig, Strategy};

/// The outcome for one start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutedPath {
    /// Marker tag for this start, assigned in registration order from 1.
    pub id: PathId,
    pub start: Position,
    /// `None` when the end cannot be reached from `start`.
    pub path: Option<Path>,
}

/// The solver an orchestrator drives.
pub enum Solver {
    AStar(AStarSearch),
    Flood(StochasticFloodSearch),
}

impl Solver {
    /// Build the solver `config` asks for. `seed` overrides the config seed.
    pub fn from_config(config: &EngineConfig, seed: Option<u64>) -> Self {
        match config.strategy {
            Strategy::AStar => Self::AStar(AStarSearch::new(config.adjacency)),
            Strategy::Stochastic => {
                let flood = match seed.or(config.seed) {
                    Some(seed) => StochasticFloodSearch::seeded(config.adjacency, seed),
                    None => StochasticFloodSearch::from_entropy(config.adjacency),
                };
                Self::Flood(flood.with_time_budget(config.time_budget))
            }
        }
    }

    pub fn adjacency(&self) -> Adjacency {
        match self {
            Self::AStar(s) => s.adjacency(),
            Self::Flood(s) => s.adjacency(),
        }
    }

    fn solve(
        &mut self,
        grid: &mut GridMap,
        start: Position,
        end: Position,
        max_trials: usize,
    ) -> Result<Option<Path>, GridError> {
        match self {
            Self::AStar(s) => s.find_path(grid, start, end),
            Self::Flood(s) => s.search(grid, start, end, max_trials),
        }
    }
}

/// Computes a path for every start toward the shared end.
///
/// Starts are solved one after another on the same grid. Transient cells
/// are wiped before each run, so no run sees another run's scratch marks.
pub struct MultiSourceOrchestrator {
    solver: Solver,
    max_trials: usize,
    routes: Vec<RoutedPath>,
}

impl MultiSourceOrchestrator {
    pub fn new(solver: Solver, max_trials: usize) -> Self {
        Self {
            solver,
            max_trials,
            routes: Vec::new(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(Solver::from_config(config, None), config.max_trials)
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    /// Solve every start in `starts` toward `end`, replacing the previous
    /// results.
    ///
    /// `grid` holds no transient cells on return. An endpoint outside the
    /// map aborts the whole run.
    pub fn run_all(
        &mut self,
        grid: &mut GridMap,
        starts: &[Position],
        end: Position,
    ) -> Result<&[RoutedPath], GridError> {
        self.routes.clear();
        for (i, &start) in starts.iter().enumerate() {
            grid.clear_transient();
            let id = PathId::from_index(i);
            let path = self.solver.solve(grid, start, end, self.max_trials)?;
            match &path {
                Some(path) => log::info!("path {id} from {start}: {} cells", path.len()),
                None => log::info!("path {id} from {start}: unreachable"),
            }
            self.routes.push(RoutedPath { id, start, path });
        }
        grid.clear_transient();
        Ok(&self.routes)
    }

    /// Results of the last [`run_all`](Self::run_all), in start order.
    pub fn routes(&self) -> &[RoutedPath] {
        &self.routes
    }

    /// Write each route's cells into `grid` as `PathMarker(id)`.
    ///
    /// Only `Empty` and `PathMarker` cells are painted; where routes
    /// overlap the later start's tag wins. Returns the changed positions,
    /// sorted and without duplicates.
    pub fn render(&self, grid: &mut GridMap) -> Vec<Position> {
        let mut touched = Vec::new();
        for route in &self.routes {
            let Some(path) = &route.path else {
                continue;
            };
            let marker = CellKind::PathMarker(route.id);
            for &cell in path {
                match grid.at(cell) {
                    Some(CellKind::Empty) => {}
                    Some(CellKind::PathMarker(id)) if id != route.id => {}
                    _ => continue,
                }
                if grid.set(cell, marker).is_ok() {
                    touched.push(cell);
                }
            }
        }
        touched.sort_unstable();
        touched.dedup();
        touched
    }
}
