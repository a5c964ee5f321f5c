//! EditorState: the aggregate root every redraw frame mutates.
//!
//! The engine shares it behind one coarse lock; frame application,
//! animation, rendering and resize all happen with that lock held, so each
//! of them sees a consistent state.

use crate::config::AnimationConfig;
use crate::cursor::{Cursor, ModeInfo};
use crate::error::{Result, StateError};
use crate::grid::{GridId, GridManager};
use crate::highlight::HighlightTable;
use crate::layout::{Sizes, Vec2};
use crate::redraw::Value;
use crate::window::{MouseInfo, WinManager};
use std::collections::HashMap;
use tracing::debug;

/// Everything the editor has told the frontend so far.
#[derive(Debug)]
pub struct EditorState {
    /// All grids.
    pub grids: GridManager,
    /// All windows.
    pub wins: WinManager,
    /// Highlight definitions.
    pub highlights: HighlightTable,
    /// Mode list, indexed by mode index.
    pub modes: Vec<ModeInfo>,
    /// Index of the active mode.
    pub mode_index: Option<usize>,
    /// The animated cursor.
    pub cursor: Cursor,
    /// Surface metrics.
    pub sizes: Sizes,
    /// Window title.
    pub title: String,
    /// Iconified window title.
    pub icon: String,
    /// Editor working directory.
    pub cwd: Option<String>,
    /// Editor options by name.
    pub options: HashMap<String, Value>,
    /// Whether the editor accepts mouse input.
    pub mouse_enabled: bool,
    /// Whether the editor is busy (cursor hidden).
    pub busy: bool,
    /// Whether the editor wants mode cursor styles applied.
    pub cursor_style_enabled: bool,
    /// Highlight group name to highlight id.
    pub hl_groups: HashMap<String, u32>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Sizes::default(), &AnimationConfig::default())
    }
}

impl EditorState {
    /// Create an empty state for a surface.
    pub fn new(sizes: Sizes, animation: &AnimationConfig) -> Self {
        Self {
            grids: GridManager::new(),
            wins: WinManager::new(animation.scroll_time),
            highlights: HighlightTable::new(),
            modes: Vec::new(),
            mode_index: None,
            cursor: Cursor::new(
                sizes.char_size,
                animation.cursor_jump_time,
                animation.cursor_corner_time,
            ),
            sizes,
            title: String::new(),
            icon: String::new(),
            cwd: None,
            options: HashMap::new(),
            mouse_enabled: false,
            busy: false,
            cursor_style_enabled: false,
            hl_groups: HashMap::new(),
        }
    }

    /// Switch to mode `index` and rebind the cursor to it.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownMode`] if no mode has that index; the
    /// active mode is then unchanged.
    pub fn set_mode(&mut self, index: usize) -> Result<()> {
        let mode = self.modes.get(index).ok_or(StateError::UnknownMode {
            index,
            len: self.modes.len(),
        })?;
        self.cursor.set_mode(index, mode.clone());
        self.mode_index = Some(index);
        Ok(())
    }

    /// The active mode record.
    pub fn mode(&self) -> Option<&ModeInfo> {
        self.mode_index.and_then(|i| self.modes.get(i))
    }

    /// Pixel position of the cursor cell: the active window's origin plus
    /// its grid's cursor.
    pub fn cursor_target(&self) -> Option<Vec2> {
        let win = self.wins.active_win()?;
        let grid = self.grids.get(win.grid_id)?;
        let (row, col) = grid.cursor();
        Some(self.sizes.cell_to_pixel(
            f32::from(win.start_row()) + f32::from(row),
            f32::from(win.start_col()) + f32::from(col),
        ))
    }

    /// Advance animations by `dt` seconds. Returns whether anything is
    /// still moving, so a renderer can keep requesting frames.
    pub fn update(&mut self, dt: f32) -> bool {
        if let Some(target) = self.cursor_target() {
            self.cursor.set_dest_pos(target);
        }
        self.cursor.update(dt);
        let scrolling = self.wins.update_scrolling(dt);
        scrolling || self.cursor.is_animating()
    }

    /// Record that the renderer presented `grid`: keep a snapshot for the
    /// next scroll cross-fade and clear the dirty flag.
    pub fn mark_presented(&mut self, grid: GridId) {
        if let Some(snapshot) = self.grids.snapshot(grid) {
            self.wins.record_render(grid, snapshot);
        }
        if let Some(grid) = self.grids.get_mut(grid) {
            grid.clear_dirty();
        }
    }

    /// Recompute surface metrics after a resize, DPI or font change.
    pub fn resize(&mut self, size: Vec2, dpi_scale: f32, char_size: Vec2) {
        self.sizes.update(size, dpi_scale, char_size);
        self.cursor.set_cell_size(char_size);
        debug!(
            width = self.sizes.ui_width,
            height = self.sizes.ui_height,
            "surface resized"
        );
    }

    /// Grid cell under a pixel position, optionally relative to an explicit
    /// grid.
    pub fn mouse_info(&self, pos: Vec2, grid: Option<GridId>) -> Option<MouseInfo> {
        self.wins.mouse_info(&self.grids, &self.sizes, pos, grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::CursorShape;

    #[test]
    fn test_set_mode_out_of_range() {
        let mut state = EditorState::default();
        assert_eq!(
            state.set_mode(2),
            Err(StateError::UnknownMode { index: 2, len: 0 })
        );
        assert!(state.mode().is_none());
    }

    #[test]
    fn test_set_mode_binds_cursor() {
        let mut state = EditorState::default();
        state.modes.push(ModeInfo {
            cursor_shape: CursorShape::Block,
            ..ModeInfo::default()
        });
        state.set_mode(0).unwrap();
        assert_eq!(state.mode_index, Some(0));
        assert!(state.cursor.can_render());
    }

    #[test]
    fn test_cursor_follows_active_window() {
        let mut state = EditorState::new(
            Sizes::new(Vec2::new(100.0, 100.0), 1.0, Vec2::new(10.0, 20.0)),
            &AnimationConfig::default(),
        );
        state.grids.resize(2, 5, 3);
        state.wins.pos(&state.grids, 1000, 2, 1, 2, 5, 3).unwrap();
        state.grids.cursor_goto(2, 1, 1).unwrap();
        state.wins.set_active(2);

        assert_eq!(state.cursor_target(), Some(Vec2::new(30.0, 40.0)));
        state.update(1.0);
        assert_eq!(state.cursor.pos(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_mark_presented_clears_dirty() {
        let mut state = EditorState::default();
        state.grids.resize(1, 4, 2);
        state.wins.pos(&state.grids, 0, 1, 0, 0, 4, 2).unwrap();
        state.mark_presented(1);

        assert!(!state.grids.get(1).unwrap().is_dirty());
        assert!(state.wins.get(1).unwrap().last_render.is_some());
    }

    #[test]
    fn test_resize_updates_sizes() {
        let mut state = EditorState::default();
        state.resize(Vec2::new(200.0, 100.0), 2.0, Vec2::new(10.0, 25.0));
        assert_eq!(state.sizes.ui_width, 20);
        assert_eq!(state.sizes.ui_height, 4);
    }
}
