//! The [`CellKind`] tag stored in every map cell, and the [`PathId`] used to
//! tell rendered paths apart.

use std::fmt;
use std::num::NonZeroU32;

/// Display identifier of a rendered path. Identifiers start at 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathId(NonZeroU32);

impl PathId {
    /// The first identifier handed out in a search.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Create an identifier. Returns `None` for zero.
    #[inline]
    pub const fn new(id: u32) -> Option<Self> {
        match NonZeroU32::new(id) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Identifier for the `index`-th registered start (0-based).
    #[inline]
    pub fn from_index(index: usize) -> Self {
        let id = u32::try_from(index).map_or(u32::MAX, |i| i.saturating_add(1));
        Self(NonZeroU32::new(id).unwrap_or(NonZeroU32::MAX))
    }

    /// The raw identifier value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Classification of a single map cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    /// A cell on a rendered path.
    PathMarker(PathId),
    /// Claimed by the running flood-search trial. Never outlives a pass.
    Reserved,
}

impl CellKind {
    /// Path markers and reservations: everything a solver writes.
    #[inline]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::PathMarker(_) | Self::Reserved)
    }

    /// Walls, starts and ends: everything the editor owns.
    #[inline]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Wall | Self::Start | Self::End)
    }

    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}
