//! WinManager: owns every window and maps between pixels and grid cells.

use super::win::{Anchor, FloatData, Margins, ScrollTransition, Viewport, Win, WinHandle, WinKind};
use crate::error::{Result, StateError};
use crate::grid::{GridId, GridManager, GridSnapshot};
use crate::layout::{Rect, Sizes, Vec2};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// Grid id of the base grid. The editor never positions it explicitly.
pub const BASE_GRID: GridId = 1;

/// Target of a mouse event in grid-local cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseInfo {
    /// Grid under the pointer.
    pub grid_id: GridId,
    /// Row inside that grid.
    pub row: u16,
    /// Column inside that grid.
    pub col: u16,
}

/// Owner of all windows.
///
/// Windows are keyed by the grid they show: the editor addresses hide,
/// close and message events by grid, and at most one window shows a grid.
#[derive(Debug)]
pub struct WinManager {
    windows: BTreeMap<GridId, Win>,
    /// Window positions captured when the current frame started.
    frame_anchors: HashMap<GridId, Rect>,
    /// Grid most recently targeted by a cursor goto.
    active_grid: Option<GridId>,
    next_seq: u64,
    scroll_time: f32,
}

impl Default for WinManager {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl WinManager {
    /// Create an empty manager whose scroll transitions last `scroll_time`
    /// seconds.
    pub fn new(scroll_time: f32) -> Self {
        Self {
            windows: BTreeMap::new(),
            frame_anchors: HashMap::new(),
            active_grid: None,
            next_seq: 0,
            scroll_time,
        }
    }

    /// Number of windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether there are no windows.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Get the window showing `grid`.
    pub fn get(&self, grid: GridId) -> Option<&Win> {
        self.windows.get(&grid)
    }

    /// Get the window showing `grid`, mutably.
    pub fn get_mut(&mut self, grid: GridId) -> Option<&mut Win> {
        self.windows.get_mut(&grid)
    }

    /// Iterate over all windows in grid id order.
    pub fn iter(&self) -> impl Iterator<Item = &Win> {
        self.windows.values()
    }

    fn win_mut(&mut self, grid: GridId) -> Result<&mut Win> {
        self.windows.get_mut(&grid).ok_or(StateError::UnknownWindow(grid))
    }

    /// Create or update the window for `grid`, reusing its registration
    /// order if it already exists.
    fn place(&mut self, handle: WinHandle, grid: GridId, rect: Rect, kind: WinKind) -> &mut Win {
        let seq = self.next_seq;
        let win = self.windows.entry(grid).or_insert_with(|| {
            debug!(grid, handle, "window created");
            Win::new(handle, grid, rect, kind, seq)
        });
        if win.seq == seq {
            self.next_seq += 1;
        }
        win.handle = handle;
        win.rect = rect;
        win.kind = kind;
        win.hidden = false;
        win
    }

    /// Capture window positions at the start of a frame. Float anchors in
    /// this frame resolve against these, not against positions updated
    /// mid-frame.
    pub fn begin_frame(&mut self) {
        self.frame_anchors.clear();
        self.frame_anchors
            .extend(self.windows.iter().map(|(grid, win)| (*grid, win.rect)));
    }

    /// Position a normal window and unhide it.
    #[allow(clippy::too_many_arguments)]
    pub fn pos(
        &mut self,
        grids: &GridManager,
        handle: WinHandle,
        grid: GridId,
        start_row: u16,
        start_col: u16,
        width: u16,
        height: u16,
    ) -> Result<()> {
        if !grids.contains(grid) {
            return Err(StateError::UnknownGrid(grid));
        }
        let rect = Rect::new(start_col, start_row, width, height);
        self.place(handle, grid, rect, WinKind::Normal);
        Ok(())
    }

    /// Position a floating window relative to its anchor window.
    ///
    /// The float takes its size from its grid. The anchor window's position
    /// is the one it had when the frame started; an anchor created during
    /// this frame falls back to its current position, and an unknown anchor
    /// to the origin.
    pub fn float_pos(
        &mut self,
        grids: &GridManager,
        handle: WinHandle,
        grid: GridId,
        float: FloatData,
    ) -> Result<()> {
        let size = grids.get(grid).ok_or(StateError::UnknownGrid(grid))?;
        let (width, height) = (size.width(), size.height());

        let base = self
            .frame_anchors
            .get(&float.anchor_grid)
            .or_else(|| self.windows.get(&float.anchor_grid).map(|w| &w.rect))
            .map_or((0.0, 0.0), |r| (f32::from(r.row), f32::from(r.col)));

        let (mut row, mut col) = (base.0 + float.anchor_row, base.1 + float.anchor_col);
        match float.anchor {
            Anchor::NW => {}
            Anchor::NE => col -= f32::from(width),
            Anchor::SW => row -= f32::from(height),
            Anchor::SE => {
                row -= f32::from(height);
                col -= f32::from(width);
            }
        }

        let clamp = |v: f32| v.floor().clamp(0.0, f32::from(u16::MAX)) as u16;
        let rect = Rect::new(clamp(col), clamp(row), width, height);
        trace!(grid, ?rect, anchor = ?float.anchor, "float positioned");
        self.place(handle, grid, rect, WinKind::Floating(float));
        Ok(())
    }

    /// Externally drawn windows are not supported; the event is accepted
    /// and ignored.
    pub fn external_pos(&mut self, grid: GridId) {
        trace!(grid, "external window ignored");
    }

    /// Hide the window. Its grid stays bound and may keep changing.
    pub fn hide(&mut self, grid: GridId) -> Result<()> {
        self.win_mut(grid)?.hidden = true;
        Ok(())
    }

    /// Remove the window. The grid itself is untouched.
    pub fn close(&mut self, grid: GridId) -> Result<()> {
        self.windows
            .remove(&grid)
            .map(|_| debug!(grid, "window closed"))
            .ok_or(StateError::UnknownWindow(grid))
    }

    /// Position the message window at `row`, spanning the full width.
    pub fn msg_set(
        &mut self,
        grids: &GridManager,
        sizes: &Sizes,
        grid: GridId,
        row: u16,
        scrolled: bool,
    ) -> Result<()> {
        let msg_grid = grids.get(grid).ok_or(StateError::UnknownGrid(grid))?;
        let (screen_width, screen_height) = grids
            .get(BASE_GRID)
            .map_or((sizes.ui_width, sizes.ui_height), |g| (g.width(), g.height()));

        let height = msg_grid.height().min(screen_height.saturating_sub(row));
        let rect = Rect::new(0, row, screen_width, height);
        self.place(0, grid, rect, WinKind::Message { scrolled });
        Ok(())
    }

    /// Record the visible buffer range of a window.
    pub fn viewport(&mut self, grid: GridId, viewport: Viewport) -> Result<()> {
        let win = self.win_mut(grid)?;
        if let Some(prev) = win.viewport {
            win.pending_scroll += viewport.topline as i64 - prev.topline as i64;
        }
        win.viewport = Some(viewport);
        Ok(())
    }

    /// Set the window's fixed margins and arm a scroll cross-fade for any
    /// topline movement since the last one.
    pub fn viewport_margins(&mut self, sizes: &Sizes, grid: GridId, margins: Margins) -> Result<()> {
        let scroll_time = self.scroll_time;
        let win = self.win_mut(grid)?;
        win.margins = margins;

        if win.pending_scroll != 0 {
            let distance = win.pending_scroll as f32 * sizes.char_size.y;
            trace!(grid, distance, "scroll transition armed");
            win.scroll = Some(ScrollTransition {
                distance,
                elapsed: 0.0,
                duration: scroll_time,
                snapshot: win.last_render.clone(),
            });
            win.pending_scroll = 0;
        }
        Ok(())
    }

    /// Extmarks are not tracked; the event is accepted and ignored.
    pub fn extmark(&mut self, grid: GridId) {
        trace!(grid, "extmark ignored");
    }

    /// Advance all scroll transitions by `dt` seconds, dropping finished
    /// ones together with their snapshots. Returns whether any is still
    /// running.
    pub fn update_scrolling(&mut self, dt: f32) -> bool {
        let mut running = false;
        for win in self.windows.values_mut() {
            if let Some(scroll) = win.scroll.as_mut() {
                scroll.elapsed += dt;
                if scroll.is_finished() {
                    win.scroll = None;
                } else {
                    running = true;
                }
            }
        }
        running
    }

    /// Store what the renderer presented for `grid`, used as the "before"
    /// image of the next scroll transition.
    pub fn record_render(&mut self, grid: GridId, snapshot: GridSnapshot) {
        if let Some(win) = self.windows.get_mut(&grid) {
            win.last_render = Some(snapshot);
        }
    }

    /// Mark `grid` as holding the editor's cursor.
    pub const fn set_active(&mut self, grid: GridId) {
        self.active_grid = Some(grid);
    }

    /// The window bound to the grid most recently targeted by a cursor
    /// goto, if one exists.
    pub fn active_win(&self) -> Option<&Win> {
        self.active_grid.and_then(|grid| self.windows.get(&grid))
    }

    /// Visible windows whose grid exists, bottom to top: base grid, tiled
    /// windows, message window, then floats by z-index and registration.
    pub fn draw_order<'a>(&'a self, grids: &GridManager) -> Vec<&'a Win> {
        let mut base = Vec::new();
        let mut tiled = Vec::new();
        let mut messages = Vec::new();
        let mut floats = Vec::new();

        for win in self.windows.values() {
            if !grids.contains(win.grid_id) {
                continue;
            }
            if win.grid_id == BASE_GRID {
                base.push(win);
                continue;
            }
            if win.hidden {
                continue;
            }
            match win.kind {
                WinKind::Normal => tiled.push(win),
                WinKind::Message { .. } => messages.push(win),
                WinKind::Floating(_) => floats.push(win),
            }
        }

        floats.sort_by_key(|w| (w.float_data().map_or(0, |f| f.zindex), w.seq));
        base.extend(tiled);
        base.extend(messages);
        base.extend(floats);
        base
    }

    /// Map a pixel position to the grid cell under it.
    ///
    /// Without `grid`, the topmost visible window containing the point
    /// wins. With `grid` (e.g. while dragging), the position is mapped
    /// relative to that grid's window even if it lies outside. The result is
    /// clamped to the grid's bounds.
    pub fn mouse_info(
        &self,
        grids: &GridManager,
        sizes: &Sizes,
        pixel: Vec2,
        grid: Option<GridId>,
    ) -> Option<MouseInfo> {
        let (row, col) = sizes.pixel_to_cell(pixel);

        let win = match grid {
            Some(id) => self.windows.get(&id)?,
            None => self
                .draw_order(grids)
                .into_iter()
                .rev()
                .find(|w| w.rect.contains(row, col))?,
        };

        let target = grids.get(win.grid_id)?;
        let clamp = |v: f32, len: u16| {
            let max = f32::from(len.saturating_sub(1));
            v.floor().clamp(0.0, max) as u16
        };
        Some(MouseInfo {
            grid_id: win.grid_id,
            row: clamp(row - f32::from(win.start_row()), target.height()),
            col: clamp(col - f32::from(win.start_col()), target.width()),
        })
    }
}
