//! Editing session, multi-start orchestration and background search for
//! floodpath grids.
//!
//! An [`Engine`] owns a [`GridMap`](floodpath_core::GridMap) behind a mutex.
//! Front ends edit it with [`Engine::place`], start a search with
//! [`Engine::request_search`], and learn about results through a
//! [`SearchListener`] (or the [`EngineEvent`] channel from
//! [`Engine::with_channel`]).
//!
//! ```no_run
//! use floodpath_core::Position;
//! use floodpath_engine::{EditKind, Engine, EngineConfig, EngineEvent};
//!
//! let (mut engine, events) = Engine::with_channel(EngineConfig::default());
//! engine.place(Position::new(1, 1), EditKind::Start)?;
//! engine.place(Position::new(20, 30), EditKind::End)?;
//! engine.request_search();
//! engine.wait();
//! for event in events.try_iter() {
//!     if let EngineEvent::PathFound { id, path, .. } = event {
//!         println!("{id}: {} cells", path.len());
//!     }
//! }
//! # Ok::<(), floodpath_engine::EngineError>(())
//! ```

mod config;
mod engine;
mod error;
mod events;
mod orchestrator;
mod session;

pub use config::{EngineConfig, Strategy};
pub use engine::{EditKind, Engine};
pub use error::EngineError;
pub use events::{EngineEvent, NullListener, SearchListener};
pub use orchestrator::{MultiSourceOrchestrator, RoutedPath, Solver};
pub use session::{Session, SessionState};
