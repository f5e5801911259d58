//! Stochastic multi-trial flood search.
//!
//! A trial floods outward from the start one layer at a time. Every empty
//! cell a branch claims is tagged [`CellKind::Reserved`] so no other branch
//! of the same trial can take it, and its predecessor is recorded. Branch
//! order is shuffled per point and per layer, so repeated trials route
//! differently; the shortest trial wins.

use std::time::{Duration, Instant};

use floodpath_core::{CellKind, GridError, GridMap, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::PathRange;
use crate::direction::Direction;
use crate::neighbors::Adjacency;
use crate::path::Path;
use crate::pathrange::NO_PARENT;

/// Improvement trials run after the first success unless told otherwise.
pub const DEFAULT_MAX_TRIALS: usize = 10;

impl PathRange {
    /// Run one flood trial from `from` to `to`.
    ///
    /// Claimed cells are left `Reserved` in `grid`; the caller clears them.
    /// Returns the full route (including both endpoints) or `None` once a
    /// layer claims nothing without reaching `to`.
    pub fn flood_path<R: Rng + ?Sized>(
        &mut self,
        grid: &mut GridMap,
        from: Position,
        to: Position,
        adjacency: Adjacency,
        rng: &mut R,
    ) -> Option<Vec<Position>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        self.flood_parents[start_idx] = NO_PARENT;

        let mut frontier = std::mem::take(&mut self.frontier);
        let mut next = std::mem::take(&mut self.next_frontier);
        let mut dirs = std::mem::take(&mut self.dirbuf);
        frontier.clear();
        frontier.push((from, Direction::Origin));

        let mut reached = false;
        let mut layer = 0usize;
        while !frontier.is_empty() {
            next.clear();
            for &(p, heading) in frontier.iter() {
                let Some(pi) = self.idx(p) else {
                    continue;
                };
                heading.successors(adjacency, &mut dirs);
                dirs.shuffle(rng);

                for &d in dirs.iter() {
                    let np = p + d.delta();
                    let Some(ni) = self.idx(np) else {
                        continue;
                    };
                    match grid.at(np) {
                        Some(kind) if ni == goal_idx && kind.is_passable() => {
                            // The rest of the layer still runs; the first
                            // branch to touch the goal keeps it.
                            if !reached {
                                self.flood_parents[ni] = pi;
                                reached = true;
                            }
                        }
                        Some(CellKind::Empty) => {
                            if grid.set(np, CellKind::Reserved).is_ok() {
                                self.flood_parents[ni] = pi;
                                next.push((np, d));
                            }
                        }
                        _ => {}
                    }
                }
            }
            layer += 1;
            log::trace!("flood layer {layer}: {} claimed", next.len());

            if reached {
                break;
            }
            next.shuffle(rng);
            std::mem::swap(&mut frontier, &mut next);
        }

        self.frontier = frontier;
        self.next_frontier = next;
        self.dirbuf = dirs;

        if !reached {
            return None;
        }
        Some(self.walk_back(|i| self.flood_parents[i], goal_idx))
    }
}

/// Outcome of one [`StochasticFloodSearch::search_report`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FloodReport {
    /// Every successful trial's path, in the order they ran.
    pub trials: Vec<Path>,
    /// Length of the best path after each successful trial.
    pub best_history: Vec<usize>,
    /// Trials started, successful or not.
    pub attempts: usize,
    best: Option<usize>,
}

impl FloodReport {
    fn record(&mut self, path: Path) {
        let better = self
            .best()
            .is_none_or(|best| path.len() < best.len());
        if better {
            self.best = Some(self.trials.len());
        }
        self.trials.push(path);
        if let Some(best) = self.best() {
            self.best_history.push(best.len());
        }
    }

    /// The shortest path found; the earliest one wins a tie.
    pub fn best(&self) -> Option<&Path> {
        self.best.map(|i| &self.trials[i])
    }

    pub fn into_best(mut self) -> Option<Path> {
        self.best.map(|i| self.trials.swap_remove(i))
    }
}

/// Randomized best-of-N solver over a [`GridMap`].
pub struct StochasticFloodSearch<R: Rng = StdRng> {
    range: PathRange,
    adjacency: Adjacency,
    time_budget: Option<Duration>,
    rng: R,
}

impl StochasticFloodSearch<StdRng> {
    /// Solver with a fixed seed; identical inputs give identical results.
    pub fn seeded(adjacency: Adjacency, seed: u64) -> Self {
        Self::with_rng(adjacency, StdRng::seed_from_u64(seed))
    }

    /// Solver seeded from the thread-local generator.
    pub fn from_entropy(adjacency: Adjacency) -> Self {
        Self::with_rng(adjacency, StdRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> StochasticFloodSearch<R> {
    pub fn with_rng(adjacency: Adjacency, rng: R) -> Self {
        Self {
            range: PathRange::default(),
            adjacency,
            time_budget: None,
            rng,
        }
    }

    /// Stop starting new trials once `budget` has elapsed. The first trial
    /// always runs.
    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    #[inline]
    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    /// Search for a short path from `start` to `end`, making up to
    /// `max_trials` improvement attempts after the first success.
    ///
    /// `Ok(None)` means `end` cannot be reached.
    pub fn search(
        &mut self,
        grid: &mut GridMap,
        start: Position,
        end: Position,
        max_trials: usize,
    ) -> Result<Option<Path>, GridError> {
        Ok(self.search_report(grid, start, end, max_trials)?.into_best())
    }

    /// Like [`search`](Self::search), but keeps every trial's result.
    ///
    /// `grid` holds no `Reserved` cells on return.
    pub fn search_report(
        &mut self,
        grid: &mut GridMap,
        start: Position,
        end: Position,
        max_trials: usize,
    ) -> Result<FloodReport, GridError> {
        grid.get(start)?;
        grid.get(end)?;
        self.range.ensure_range(grid.bounds());

        let started = Instant::now();
        let mut report = FloodReport::default();
        for trial in 0..=max_trials {
            if trial > 0
                && self
                    .time_budget
                    .is_some_and(|budget| started.elapsed() >= budget)
            {
                log::debug!("flood {start} -> {end}: time budget spent after {trial} trials");
                break;
            }

            let route = self
                .range
                .flood_path(grid, start, end, self.adjacency, &mut self.rng);
            grid.clear_reserved();
            report.attempts += 1;

            match route {
                Some(route) => {
                    let path = Path::from_route(&route);
                    log::trace!("flood {start} -> {end}: trial {trial} found {} cells", path.len());
                    report.record(path);
                }
                None if trial == 0 => {
                    log::debug!("flood {start} -> {end}: unreachable");
                    break;
                }
                None => {}
            }
        }

        if let Some(best) = report.best() {
            log::debug!(
                "flood {start} -> {end}: best of {} trials has {} cells",
                report.attempts,
                best.len()
            );
        }
        Ok(report)
    }
}
