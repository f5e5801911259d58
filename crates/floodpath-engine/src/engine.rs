//! The editing session and its background search worker.
//!
//! Edits are applied synchronously by the caller. A search runs on one
//! worker thread against a private copy of the grid; only the finished
//! path markers are written back to the shared grid.

use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use floodpath_core::{CellKind, GridMap, Position};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::events::{EngineEvent, SearchListener};
use crate::orchestrator::{MultiSourceOrchestrator, RoutedPath, Solver};
use crate::session::{Session, SessionState};

/// What an edit writes into a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditKind {
    Empty,
    Wall,
    Start,
    End,
}

impl From<EditKind> for CellKind {
    fn from(kind: EditKind) -> Self {
        match kind {
            EditKind::Empty => CellKind::Empty,
            EditKind::Wall => CellKind::Wall,
            EditKind::Start => CellKind::Start,
            EditKind::End => CellKind::End,
        }
    }
}

struct Shared {
    grid: GridMap,
    session: Session,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A grid editing session with background path search.
///
/// One search runs at a time. While it runs the session is
/// [`Busy`](SessionState::Busy) and every edit is refused; once it has
/// drawn its paths the session waits in
/// [`NeedsReset`](SessionState::NeedsReset) until [`clear_path`] or
/// [`reset_map`] is called.
///
/// Dropping the engine waits for an in-flight search.
///
/// [`clear_path`]: Engine::clear_path
/// [`reset_map`]: Engine::reset_map
pub struct Engine {
    shared: Arc<Mutex<Shared>>,
    config: EngineConfig,
    listener: Arc<dyn SearchListener>,
    worker: Option<JoinHandle<()>>,
    searches: u64,
}

impl Engine {
    pub fn new(config: EngineConfig, listener: impl SearchListener + 'static) -> Self {
        let grid = GridMap::new(config.width, config.height);
        Self {
            shared: Arc::new(Mutex::new(Shared {
                grid,
                session: Session::new(),
            })),
            config,
            listener: Arc::new(listener),
            worker: None,
            searches: 0,
        }
    }

    /// Engine that reports through a channel.
    pub fn with_channel(config: EngineConfig) -> (Self, Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(config, tx), rx)
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        lock(&self.shared).session.state()
    }

    /// Copy of the current grid.
    pub fn snapshot(&self) -> GridMap {
        lock(&self.shared).grid.clone()
    }

    /// Run `f` against the grid without copying it.
    ///
    /// Holds the engine lock for the duration of `f`.
    pub fn with_grid<T>(&self, f: impl FnOnce(&GridMap) -> T) -> T {
        f(&lock(&self.shared).grid)
    }

    /// Write `kind` at `pos`.
    ///
    /// Placing an `End` moves the end marker; the old end cell becomes
    /// `Empty`. Writing what a cell already holds is a no-op.
    pub fn place(&self, pos: Position, kind: EditKind) -> Result<(), EngineError> {
        let changed = {
            let mut shared = lock(&self.shared);
            let state = shared.session.state();
            if !shared.session.accepts_edits() {
                log::debug!("place {kind:?} at {pos} rejected: session is {state}");
                return Err(EngineError::EditRejected { state });
            }
            let target = CellKind::from(kind);
            if shared.grid.get(pos)? == target {
                return Ok(());
            }
            let displaced = shared.grid.set(pos, target)?;
            let mut changed = vec![pos];
            changed.extend(displaced);
            changed
        };
        self.listener.on_grid_changed(&changed);
        Ok(())
    }

    /// Remove every drawn path and return to `Idle`.
    pub fn clear_path(&self) -> Result<(), EngineError> {
        let cleared = {
            let mut shared = lock(&self.shared);
            if !shared.session.try_reset() {
                let state = shared.session.state();
                log::debug!("clear path rejected: session is {state}");
                return Err(EngineError::EditRejected { state });
            }
            shared.grid.clear_transient()
        };
        log::debug!("cleared {} path cells", cleared.len());
        if !cleared.is_empty() {
            self.listener.on_grid_changed(&cleared);
        }
        Ok(())
    }

    /// Replace the grid with a fresh bordered `width × height` map.
    pub fn reset_map(&self, width: i32, height: i32) -> Result<(), EngineError> {
        self.replace_grid(GridMap::new(width, height))
    }

    /// Replace the grid with `grid`, for instance one read with
    /// [`GridMap::from_ascii`]. Transient cells in `grid` are dropped.
    pub fn load(&self, mut grid: GridMap) -> Result<(), EngineError> {
        grid.clear_transient();
        self.replace_grid(grid)
    }

    fn replace_grid(&self, grid: GridMap) -> Result<(), EngineError> {
        let cells: Vec<Position> = grid.bounds().iter().collect();
        {
            let mut shared = lock(&self.shared);
            if !shared.session.try_reset() {
                let state = shared.session.state();
                log::debug!("map reset rejected: session is {state}");
                return Err(EngineError::EditRejected { state });
            }
            shared.grid = grid;
        }
        log::info!("map reset");
        self.listener.on_grid_changed(&cells);
        Ok(())
    }

    /// Start a background search from every registered start.
    ///
    /// Returns `false`, doing nothing, unless the session is `Idle` and the
    /// grid has at least one start and an end.
    pub fn request_search(&mut self) -> bool {
        let (snapshot, starts, end) = {
            let mut shared = lock(&self.shared);
            let Some(end) = shared.grid.end() else {
                log::debug!("search request ignored: no end");
                return false;
            };
            if shared.grid.starts().is_empty() {
                log::debug!("search request ignored: no start");
                return false;
            }
            if !shared.session.try_begin() {
                log::debug!("search request ignored: session is {}", shared.session.state());
                return false;
            }
            let starts = shared.grid.starts().to_vec();
            (shared.grid.clone(), starts, end)
        };

        // The previous worker already finished its grid work; this only
        // waits for its last notifications.
        self.wait();

        let seed = self.config.seed.map(|s| s.wrapping_add(self.searches));
        self.searches += 1;
        let orchestrator = MultiSourceOrchestrator::new(
            Solver::from_config(&self.config, seed),
            self.config.max_trials,
        );

        let shared = Arc::clone(&self.shared);
        let listener = Arc::clone(&self.listener);
        self.worker = Some(thread::spawn(move || {
            run_search(&shared, listener.as_ref(), orchestrator, snapshot, &starts, end);
        }));
        true
    }

    /// Block until the running search, if any, has finished and delivered
    /// its notifications.
    pub fn wait(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("search worker panicked");
            }
        }
    }

    /// Wait for any running search and drop the engine.
    pub fn shutdown(mut self) {
        self.wait();
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.wait();
    }
}

fn run_search(
    shared: &Mutex<Shared>,
    listener: &dyn SearchListener,
    mut orchestrator: MultiSourceOrchestrator,
    mut grid: GridMap,
    starts: &[Position],
    end: Position,
) {
    log::info!("search started: {} start(s) toward {end}", starts.len());
    let routes: Vec<RoutedPath> = match orchestrator.run_all(&mut grid, starts, end) {
        Ok(routes) => routes.to_vec(),
        Err(e) => {
            log::warn!("search aborted: {e}");
            Vec::new()
        }
    };

    let touched = {
        let mut shared = lock(shared);
        let touched = orchestrator.render(&mut shared.grid);
        shared.session.finish();
        touched
    };

    for route in &routes {
        match &route.path {
            Some(path) => listener.on_path_found(route.id, route.start, path),
            None => listener.on_unreachable(route.id, route.start),
        }
    }
    if !touched.is_empty() {
        listener.on_grid_changed(&touched);
    }
    log::info!("search finished: {} route(s)", routes.len());
    listener.on_search_finished(&routes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strategy;
    use crate::events::NullListener;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn small() -> EngineConfig {
        EngineConfig::default()
            .with_size(5, 5)
            .with_strategy(Strategy::AStar)
    }

    fn drain(rx: &Receiver<EngineEvent>) -> Vec<EngineEvent> {
        rx.try_iter().collect()
    }

    #[test]
    fn new_engine_is_idle_with_bordered_grid() {
        let engine = Engine::new(EngineConfig::default(), NullListener);
        assert_eq!(engine.state(), SessionState::Idle);
        let grid = engine.snapshot();
        assert_eq!((grid.width(), grid.height()), (40, 40));
        assert_eq!(grid.at(p(0, 0)), Some(CellKind::Wall));
        assert_eq!(grid.at(p(1, 1)), Some(CellKind::Empty));
    }

    #[test]
    fn place_reports_changed_cells() {
        let (engine, rx) = Engine::with_channel(small());
        engine.place(p(1, 1), EditKind::End).unwrap();
        engine.place(p(3, 3), EditKind::End).unwrap();
        assert_eq!(
            drain(&rx),
            vec![
                EngineEvent::GridChanged(vec![p(1, 1)]),
                EngineEvent::GridChanged(vec![p(3, 3), p(1, 1)]),
            ]
        );
        engine.with_grid(|g| {
            assert_eq!(g.end(), Some(p(3, 3)));
            assert_eq!(g.at(p(1, 1)), Some(CellKind::Empty));
        });
    }

    #[test]
    fn same_kind_place_is_silent() {
        let (engine, rx) = Engine::with_channel(small());
        engine.place(p(0, 0), EditKind::Wall).unwrap();
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn place_then_erase_start() {
        let engine = Engine::new(small(), NullListener);
        engine.place(p(2, 2), EditKind::Start).unwrap();
        engine.place(p(2, 2), EditKind::Empty).unwrap();
        engine.with_grid(|g| {
            assert!(g.starts().is_empty());
            assert_eq!(g.get(p(2, 2)), Ok(CellKind::Empty));
        });
    }

    #[test]
    fn out_of_bounds_place_fails() {
        let engine = Engine::new(small(), NullListener);
        assert!(matches!(
            engine.place(p(7, 0), EditKind::Wall),
            Err(EngineError::Grid(_))
        ));
    }

    #[test]
    fn search_needs_endpoints() {
        let mut engine = Engine::new(small(), NullListener);
        assert!(!engine.request_search());
        engine.place(p(1, 1), EditKind::Start).unwrap();
        assert!(!engine.request_search());
        assert_eq!(engine.state(), SessionState::Idle);
    }

    #[test]
    fn search_draws_markers_and_locks_edits() {
        let (mut engine, rx) = Engine::with_channel(small());
        engine.place(p(1, 1), EditKind::Start).unwrap();
        engine.place(p(3, 3), EditKind::End).unwrap();
        drain(&rx);

        assert!(engine.request_search());
        assert!(!engine.request_search());
        engine.wait();
        assert_eq!(engine.state(), SessionState::NeedsReset);

        let events = drain(&rx);
        let Some(EngineEvent::PathFound { id, start, path }) = events.first() else {
            panic!("expected PathFound first, got {events:?}");
        };
        assert_eq!(id.get(), 1);
        assert_eq!(*start, p(1, 1));
        assert_eq!(path.len(), 3);
        assert!(matches!(events.last(), Some(EngineEvent::SearchFinished(r)) if r.len() == 1));

        let grid = engine.snapshot();
        assert_eq!(grid.count(CellKind::PathMarker(*id)), 3);
        assert_eq!(grid.count(CellKind::Reserved), 0);

        assert_eq!(
            engine.place(p(2, 1), EditKind::Wall),
            Err(EngineError::EditRejected {
                state: SessionState::NeedsReset
            })
        );
        assert!(!engine.request_search());
    }

    #[test]
    fn clear_path_returns_to_idle() {
        let mut engine = Engine::new(small(), NullListener);
        engine.place(p(1, 1), EditKind::Start).unwrap();
        engine.place(p(3, 3), EditKind::End).unwrap();
        assert!(engine.request_search());
        engine.wait();

        engine.clear_path().unwrap();
        assert_eq!(engine.state(), SessionState::Idle);
        let grid = engine.snapshot();
        assert!(grid.iter().all(|(_, k)| !k.is_transient()));
        assert_eq!(grid.starts(), &[p(1, 1)]);
        assert_eq!(grid.end(), Some(p(3, 3)));

        engine.place(p(2, 1), EditKind::Wall).unwrap();
        assert!(engine.request_search());
    }

    #[test]
    fn reset_map_drops_everything() {
        let mut engine = Engine::new(small(), NullListener);
        engine.place(p(1, 1), EditKind::Start).unwrap();
        engine.place(p(3, 3), EditKind::End).unwrap();
        assert!(engine.request_search());
        engine.wait();

        engine.reset_map(6, 7).unwrap();
        assert_eq!(engine.state(), SessionState::Idle);
        let grid = engine.snapshot();
        assert_eq!((grid.width(), grid.height()), (6, 7));
        assert!(!grid.has_endpoints());
        assert_eq!(grid, GridMap::new(6, 7));
    }

    #[test]
    fn load_replaces_grid() {
        let engine = Engine::new(small(), NullListener);
        let grid = GridMap::from_ascii("#####\n#S.E#\n#####").unwrap();
        engine.load(grid.clone()).unwrap();
        assert_eq!(engine.snapshot(), grid);
    }

    #[test]
    fn seeded_sessions_replay() {
        let config = EngineConfig::default().with_size(9, 9).with_seed(5);
        let run = || {
            let mut engine = Engine::new(config.clone(), NullListener);
            engine.place(p(1, 1), EditKind::Start).unwrap();
            engine.place(p(7, 7), EditKind::End).unwrap();
            assert!(engine.request_search());
            engine.wait();
            let first = engine.snapshot();
            engine.clear_path().unwrap();
            assert!(engine.request_search());
            engine.wait();
            (first, engine.snapshot())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn shutdown_joins_worker() {
        let (mut engine, rx) = Engine::with_channel(
            EngineConfig::default()
                .with_size(30, 30)
                .with_seed(3),
        );
        engine.place(p(1, 1), EditKind::Start).unwrap();
        engine.place(p(28, 28), EditKind::End).unwrap();
        assert!(engine.request_search());
        engine.shutdown();
        assert!(
            rx.try_iter()
                .any(|e| matches!(e, EngineEvent::SearchFinished(_)))
        );
    }
}
