//! GridManager: owns every grid the editor has announced.

use super::grid::{Grid, GridId, Run};
use crate::error::{Result, StateError};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// Immutable copy of a grid, shared with the renderer for cross-fades.
pub type GridSnapshot = Arc<Grid>;

/// Owner of all grids, keyed by the editor's grid id.
///
/// Grids are created implicitly by the first resize and removed by
/// [`destroy`](Self::destroy). Everything else addresses an existing grid and
/// fails with [`StateError::UnknownGrid`] otherwise.
#[derive(Debug, Default)]
pub struct GridManager {
    grids: BTreeMap<GridId, Grid>,
}

impl GridManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live grids.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Whether no grid exists.
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Whether `id` names a live grid.
    pub fn contains(&self, id: GridId) -> bool {
        self.grids.contains_key(&id)
    }

    /// Get a grid by id.
    pub fn get(&self, id: GridId) -> Option<&Grid> {
        self.grids.get(&id)
    }

    /// Get a mutable grid by id.
    pub fn get_mut(&mut self, id: GridId) -> Option<&mut Grid> {
        self.grids.get_mut(&id)
    }

    /// Iterate over all grids in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Grid> {
        self.grids.values()
    }

    /// Iterate mutably over all grids in id order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Grid> {
        self.grids.values_mut()
    }

    /// Grids changed since the renderer last cleared their flag.
    pub fn dirty_grids(&self) -> impl Iterator<Item = &Grid> {
        self.grids.values().filter(|g| g.is_dirty())
    }

    fn grid_mut(&mut self, id: GridId) -> Result<&mut Grid> {
        self.grids.get_mut(&id).ok_or(StateError::UnknownGrid(id))
    }

    /// Create the grid if absent, otherwise resize it keeping content
    /// top-left aligned.
    pub fn resize(&mut self, id: GridId, width: u16, height: u16) -> &Grid {
        trace!(grid = id, width, height, "grid resize");
        self.grids
            .entry(id)
            .and_modify(|grid| grid.resize(width, height))
            .or_insert_with(|| Grid::new(id, width, height))
    }

    /// Fill the grid with blank cells and reset its cursor.
    pub fn clear(&mut self, id: GridId) -> Result<()> {
        self.grid_mut(id)?.clear();
        Ok(())
    }

    /// Record the grid-local cursor cell. This does not move the rendered
    /// cursor by itself.
    pub fn cursor_goto(&mut self, id: GridId, row: u16, col: u16) -> Result<()> {
        self.grid_mut(id)?.cursor_goto(row, col);
        Ok(())
    }

    /// Apply a line update.
    pub fn line(&mut self, id: GridId, row: u16, col_start: u16, runs: &[Run]) -> Result<()> {
        let grid = self.grid_mut(id)?;
        if row >= grid.height() {
            return Err(StateError::RowOutOfRange {
                grid: id,
                row,
                height: grid.height(),
            });
        }
        grid.line(row, col_start, runs);
        Ok(())
    }

    /// Shift a sub-rectangle of the grid. See [`Grid::scroll`].
    #[allow(clippy::too_many_arguments)]
    pub fn scroll(
        &mut self,
        id: GridId,
        top: u16,
        bottom: u16,
        left: u16,
        right: u16,
        rows: i32,
        cols: i32,
    ) -> Result<()> {
        self.grid_mut(id)?.scroll(top, bottom, left, right, rows, cols);
        Ok(())
    }

    /// Remove the grid and return its id so dependent windows can be
    /// removed as well.
    pub fn destroy(&mut self, id: GridId) -> Result<GridId> {
        self.grids
            .remove(&id)
            .map(|grid| grid.id())
            .ok_or(StateError::UnknownGrid(id))
    }

    /// Take an immutable copy of a grid.
    pub fn snapshot(&self, id: GridId) -> Option<GridSnapshot> {
        self.grids.get(&id).map(|grid| Arc::new(grid.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn test_resize_creates_then_preserves() {
        let mut grids = GridManager::new();
        grids.resize(2, 4, 2);
        grids.line(2, 0, 0, &[Run::new("a").with_hl(1)]).unwrap();
        grids.resize(2, 8, 4);

        let grid = grids.get(2).unwrap();
        assert_eq!((grid.width(), grid.height()), (8, 4));
        assert_eq!(grid.grapheme(0, 0), Some("a"));
    }

    #[test]
    fn test_resize_then_clear_is_blank() {
        let mut grids = GridManager::new();
        grids.resize(1, 7, 3);
        grids.cursor_goto(1, 2, 5).unwrap();
        grids.clear(1).unwrap();

        let grid = grids.get(1).unwrap();
        assert_eq!(grid.len(), 21);
        assert!(grid.cells().iter().all(|c| *c == Cell::EMPTY));
        assert_eq!(grid.cursor(), (0, 0));
    }

    #[test]
    fn test_unknown_grid_errors() {
        let mut grids = GridManager::new();
        assert_eq!(grids.clear(9), Err(StateError::UnknownGrid(9)));
        assert_eq!(grids.cursor_goto(9, 0, 0), Err(StateError::UnknownGrid(9)));
        assert_eq!(grids.destroy(9), Err(StateError::UnknownGrid(9)));
    }

    #[test]
    fn test_line_row_out_of_range() {
        let mut grids = GridManager::new();
        grids.resize(1, 3, 2);
        let err = grids.line(1, 2, 0, &[Run::new("x")]).unwrap_err();
        assert_eq!(
            err,
            StateError::RowOutOfRange {
                grid: 1,
                row: 2,
                height: 2
            }
        );
    }

    #[test]
    fn test_destroy_returns_id() {
        let mut grids = GridManager::new();
        grids.resize(4, 1, 1);
        assert_eq!(grids.destroy(4), Ok(4));
        assert!(!grids.contains(4));
    }

    #[test]
    fn test_dirty_grids_and_snapshot() {
        let mut grids = GridManager::new();
        grids.resize(1, 2, 2);
        grids.resize(2, 2, 2);
        for grid in grids.iter_mut() {
            grid.clear_dirty();
        }
        grids.line(2, 1, 0, &[Run::new("q").with_hl(3)]).unwrap();

        let dirty: Vec<_> = grids.dirty_grids().map(Grid::id).collect();
        assert_eq!(dirty, vec![2]);

        let snap = grids.snapshot(2).unwrap();
        grids.clear(2).unwrap();
        assert_eq!(snap.grapheme(1, 0), Some("q"));
    }
}
