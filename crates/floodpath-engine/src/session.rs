//! Search session state machine.
//!
//! ```text
//!            try_begin            finish
//!   Idle ───────────────► Busy ──────────► NeedsReset
//!    ▲                                        │
//!    └──────────────── try_reset ─────────────┘
//! ```
//!
//! Structural edits are only accepted while `Idle`. `try_reset` is refused
//! while `Busy`: the worker owns the grid's transient cells until it
//! finishes.

use std::fmt;

/// Where the session is in its search cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    #[default]
    Idle,
    /// A worker is searching.
    Busy,
    /// A path is drawn and must be cleared first.
    NeedsReset,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Busy => "busy",
            Self::NeedsReset => "needs reset",
        })
    }
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether wall/start/end edits are allowed.
    #[inline]
    pub fn accepts_edits(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Claim the session for a search. Only succeeds from `Idle`.
    pub fn try_begin(&mut self) -> bool {
        if self.state != SessionState::Idle {
            return false;
        }
        self.state = SessionState::Busy;
        true
    }

    /// Mark the running search as done.
    pub fn finish(&mut self) {
        debug_assert_eq!(self.state, SessionState::Busy, "finish without a search");
        self.state = SessionState::NeedsReset;
    }

    /// Return to `Idle`. Refused while a search is running.
    pub fn try_reset(&mut self) -> bool {
        if self.state == SessionState::Busy {
            return false;
        }
        self.state = SessionState::Idle;
        true
    }
}
