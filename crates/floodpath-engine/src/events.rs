//! Notifications from the engine to its front end.

use std::sync::mpsc::Sender;

use floodpath_core::{PathId, Position};
use floodpath_paths::Path;

use crate::orchestrator::RoutedPath;

/// Receives engine notifications.
///
/// Search results are delivered from the worker thread, after the grid
/// lock has been released, so implementations may call back into the
/// engine's read accessors. Every method defaults to doing nothing.
pub trait SearchListener: Send + Sync {
    fn on_path_found(&self, _id: PathId, _start: Position, _path: &Path) {}

    fn on_unreachable(&self, _id: PathId, _start: Position) {}

    /// Cells whose kind changed and need redrawing.
    fn on_grid_changed(&self, _cells: &[Position]) {}

    /// Sent once per search, after the per-start events.
    fn on_search_finished(&self, _routes: &[RoutedPath]) {}
}

/// A listener that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullListener;

impl SearchListener for NullListener {}

/// Listener notifications as values, for channel-based front ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    PathFound {
        id: PathId,
        start: Position,
        path: Path,
    },
    Unreachable {
        id: PathId,
        start: Position,
    },
    GridChanged(Vec<Position>),
    SearchFinished(Vec<RoutedPath>),
}

// A closed receiver just means nobody is listening any more.
impl SearchListener for Sender<EngineEvent> {
    fn on_path_found(&self, id: PathId, start: Position, path: &Path) {
        self.send(EngineEvent::PathFound {
            id,
            start,
            path: path.clone(),
        })
        .ok();
    }

    fn on_unreachable(&self, id: PathId, start: Position) {
        self.send(EngineEvent::Unreachable { id, start }).ok();
    }

    fn on_grid_changed(&self, cells: &[Position]) {
        self.send(EngineEvent::GridChanged(cells.to_vec())).ok();
    }

    fn on_search_finished(&self, routes: &[RoutedPath]) {
        self.send(EngineEvent::SearchFinished(routes.to_vec())).ok();
    }
}
