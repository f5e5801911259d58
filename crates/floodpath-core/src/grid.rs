//! The [`GridMap`] type: the occupancy matrix shared by the editor and the
//! solvers.
//!
//! Besides the cells themselves a `GridMap` keeps two registries: the start
//! positions (in registration order) and the single end position. Every
//! mutation goes through [`GridMap::set`], which keeps the registries in
//! step with the cell tags.

use crate::cell::CellKind;
use crate::error::GridError;
use crate::geom::{Position, Range};

/// A `width × height` map of [`CellKind`]s with start/end registries.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    cells: Vec<CellKind>,
    bounds: Range,
    starts: Vec<Position>,
    end: Option<Position>,
}

impl GridMap {
    /// Create a map with a one-cell wall border and an empty interior.
    ///
    /// Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let mut map = Self {
            cells: Vec::new(),
            bounds: Range::default(),
            starts: Vec::new(),
            end: None,
        };
        map.create(width, height);
        map
    }

    /// Map with every cell Empty and no border.
    pub(crate) fn blank(width: i32, height: i32) -> Self {
        let bounds = Range::sized(width, height);
        Self {
            cells: vec![CellKind::Empty; bounds.len()],
            bounds,
            starts: Vec::new(),
            end: None,
        }
    }

    /// Recreate the map at the given size, dropping every registration.
    pub fn create(&mut self, width: i32, height: i32) {
        let bounds = Range::sized(width, height);
        self.bounds = bounds;
        self.cells.clear();
        self.cells.extend(bounds.iter().map(|p| {
            if bounds.on_border(p) {
                CellKind::Wall
            } else {
                CellKind::Empty
            }
        }));
        self.starts.clear();
        self.end = None;
    }

    /// Recreate the map at its current size.
    pub fn clear(&mut self) {
        self.create(self.width(), self.height());
    }

    /// Number of rows.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of columns.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn contains(&self, p: Position) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Position) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.row as usize * self.height() as usize + p.col as usize)
    }

    fn checked_index(&self, p: Position) -> Result<usize, GridError> {
        self.index(p).ok_or(GridError::OutOfBounds {
            pos: p,
            width: self.width(),
            height: self.height(),
        })
    }

    /// Read the cell at `p`.
    pub fn get(&self, p: Position) -> Result<CellKind, GridError> {
        let i = self.checked_index(p)?;
        Ok(self.cells[i])
    }

    /// Read the cell at `p`, or `None` outside the map.
    #[inline]
    pub fn at(&self, p: Position) -> Option<CellKind> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Write `kind` at `p`, keeping the start/end registries consistent.
    ///
    /// Turning a cell into `End` moves the end marker: the previous end cell
    /// reverts to `Empty` and its position is returned so the caller can
    /// redraw it. Writing the value a cell already holds changes nothing.
    pub fn set(&mut self, p: Position, kind: CellKind) -> Result<Option<Position>, GridError> {
        let i = self.checked_index(p)?;
        let old = self.cells[i];
        if old == kind {
            return Ok(None);
        }

        match old {
            CellKind::Start => self.starts.retain(|&s| s != p),
            CellKind::End => self.end = None,
            _ => {}
        }

        let mut displaced = None;
        match kind {
            CellKind::Start => self.starts.push(p),
            CellKind::End => {
                if let Some(prev) = self.end.replace(p) {
                    if let Some(pi) = self.index(prev) {
                        self.cells[pi] = CellKind::Empty;
                    }
                    displaced = Some(prev);
                }
            }
            _ => {}
        }
        self.cells[i] = kind;

        debug_assert!(self.check_invariants(), "registry out of sync after set({p})");
        Ok(displaced)
    }

    /// Reset every `Reserved` and `PathMarker` cell to `Empty`.
    ///
    /// Returns the positions that changed.
    pub fn clear_transient(&mut self) -> Vec<Position> {
        self.reset_where(CellKind::is_transient)
    }

    /// Reset only `Reserved` cells to `Empty`; path markers stay.
    pub fn clear_reserved(&mut self) -> Vec<Position> {
        self.reset_where(|k| k == CellKind::Reserved)
    }

    fn reset_where(&mut self, pred: impl Fn(CellKind) -> bool) -> Vec<Position> {
        let mut touched = Vec::new();
        for (p, cell) in self.bounds.iter().zip(self.cells.iter_mut()) {
            if pred(*cell) {
                *cell = CellKind::Empty;
                touched.push(p);
            }
        }
        touched
    }

    /// At least one start and an end are registered.
    #[inline]
    pub fn has_endpoints(&self) -> bool {
        !self.starts.is_empty() && self.end.is_some()
    }

    /// Registered starts, oldest first.
    #[inline]
    pub fn starts(&self) -> &[Position] {
        &self.starts
    }

    #[inline]
    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// Iterate over `(Position, CellKind)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellKind)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// Count how many cells equal `kind`.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }

    /// Whether the registries agree with the cell tags: every `Start` cell
    /// is registered exactly once, and the `End` cell (at most one) is the
    /// registered end.
    pub fn check_invariants(&self) -> bool {
        if self.cells.len() != self.bounds.len() {
            return false;
        }
        let mut seen_starts = 0;
        let mut ends = Vec::new();
        for (p, kind) in self.iter() {
            match kind {
                CellKind::Start => {
                    if self.starts.iter().filter(|&&s| s == p).count() != 1 {
                        return false;
                    }
                    seen_starts += 1;
                }
                CellKind::End => ends.push(p),
                _ => {}
            }
        }
        seen_starts == self.starts.len() && ends.len() <= 1 && ends.first().copied() == self.end
    }
}
