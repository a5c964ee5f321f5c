//! Grid: A rectangular buffer of cells forming one displayable surface.
//!
//! The grid uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order.

use super::cell::Cell;
use std::collections::{HashMap, HashSet};

/// Identifier the editor assigns to a grid.
pub type GridId = u64;

/// One compact run of a line update: `text` repeated `repeat` times.
///
/// An omitted `hl_id` reuses the highlight of the previous run in the same
/// line update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Grapheme written to every cell of the run.
    pub text: String,
    /// Highlight id, or `None` to reuse the previous run's id.
    pub hl_id: Option<u32>,
    /// Number of cells the run covers.
    pub repeat: u16,
}

impl Run {
    /// A single cell carrying `text` with the previous run's highlight.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hl_id: None,
            repeat: 1,
        }
    }

    /// Set the highlight id (builder pattern).
    #[must_use]
    pub const fn with_hl(mut self, hl_id: u32) -> Self {
        self.hl_id = Some(hl_id);
        self
    }

    /// Set the repeat count (builder pattern).
    #[must_use]
    pub const fn repeated(mut self, repeat: u16) -> Self {
        self.repeat = repeat;
        self
    }
}

/// A grid of cells owned by the [`GridManager`](super::GridManager).
///
/// Access is in row-major order: `index = row * width + col`.
///
/// # Overflow Storage
///
/// Complex graphemes (> 4 bytes) are stored in a separate `HashMap`.
/// The cell contains an index into this overflow storage when the
/// `OVERFLOW` flag is set.
///
/// # Dirty Flag
///
/// Every mutation sets `dirty`. Only the renderer clears it, after it has
/// drawn the grid.
#[derive(Clone)]
pub struct Grid {
    id: GridId,
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    width: u16,
    height: u16,
    /// Overflow storage for complex graphemes.
    overflow: HashMap<u32, String>,
    /// Next overflow index to assign.
    next_overflow_index: u32,
    cursor_row: u16,
    cursor_col: u16,
    dirty: bool,
}

impl Grid {
    /// Create a new grid with the given dimensions.
    ///
    /// All cells are initialized to empty (space with highlight 0).
    pub fn new(id: GridId, width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            id,
            cells: vec![Cell::EMPTY; size],
            width,
            height,
            overflow: HashMap::new(),
            next_overflow_index: 0,
            cursor_row: 0,
            cursor_col: 0,
            dirty: true,
        }
    }

    /// The editor-assigned id of this grid.
    #[inline]
    pub const fn id(&self) -> GridId {
        self.id
    }

    /// Get the grid width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the grid has no cells (zero width or height).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Grid-local cursor position as `(row, col)`.
    #[inline]
    pub const fn cursor(&self) -> (u16, u16) {
        (self.cursor_row, self.cursor_col)
    }

    /// Whether the grid changed since the renderer last cleared the flag.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag. Called by the renderer once the grid is drawn.
    #[inline]
    pub const fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Convert (row, col) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, row: u16, col: u16) -> Option<usize> {
        if col < self.width && row < self.height {
            Some((row as usize) * (self.width as usize) + (col as usize))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (row, col).
    #[inline]
    pub fn get(&self, row: u16, col: u16) -> Option<&Cell> {
        self.index_of(row, col).map(|i| &self.cells[i])
    }

    /// Get the grapheme at (row, col), including overflow lookup.
    ///
    /// Continuation cells yield an empty string.
    pub fn grapheme(&self, row: u16, col: u16) -> Option<&str> {
        let cell = self.get(row, col)?;
        match cell.overflow_index() {
            Some(idx) => self.overflow.get(&idx).map(String::as_str),
            None => cell.grapheme(),
        }
    }

    /// Text of a whole row, continuation cells skipped.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.width)
            .filter_map(|col| self.grapheme(row, col))
            .collect()
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Write one grapheme with its highlight at (row, col).
    ///
    /// Returns `false` if coordinates are out of bounds.
    pub fn put(&mut self, row: u16, col: u16, text: &str, hl_id: u32) -> bool {
        let Some(idx) = self.index_of(row, col) else {
            return false;
        };
        if let Some(old) = self.cells[idx].overflow_index() {
            self.overflow.remove(&old);
        }

        let cell = Cell::from_grapheme(text).unwrap_or_else(|| {
            let overflow_idx = self.next_overflow_index;
            self.next_overflow_index = self.next_overflow_index.wrapping_add(1);
            self.overflow.insert(overflow_idx, text.to_string());
            let width = unicode_width::UnicodeWidthStr::width(text).min(2) as u8;
            Cell::overflow(overflow_idx, width)
        });

        self.cells[idx] = cell.with_hl_id(hl_id);
        self.dirty = true;
        true
    }

    /// Apply compact runs to `row` starting at `col_start`.
    ///
    /// Cells beyond the last run are left untouched, and cells past the
    /// right edge are clipped. Returns the column after the last written
    /// cell.
    pub fn line(&mut self, row: u16, col_start: u16, runs: &[Run]) -> u16 {
        let mut col = col_start;
        let mut hl_id = 0;
        for run in runs {
            if let Some(id) = run.hl_id {
                hl_id = id;
            }
            for _ in 0..run.repeat {
                if col >= self.width {
                    break;
                }
                self.put(row, col, &run.text, hl_id);
                col += 1;
            }
        }
        self.dirty = true;
        col
    }

    /// Fill the grid with empty cells and reset the cursor to (0, 0).
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
        self.overflow.clear();
        self.next_overflow_index = 0;
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.dirty = true;
    }

    /// Record the grid-local cursor cell.
    pub const fn cursor_goto(&mut self, row: u16, col: u16) {
        self.cursor_row = row;
        self.cursor_col = col;
        self.dirty = true;
    }

    /// Shift the contents of the sub-rectangle `[top, bottom) x [left, right)`
    /// by `(rows, cols)`.
    ///
    /// Positive `rows` moves content upward (towards row 0), positive `cols`
    /// moves it left. Cells whose source falls outside the rectangle are
    /// filled with empty cells.
    pub fn scroll(&mut self, top: u16, bottom: u16, left: u16, right: u16, rows: i32, cols: i32) {
        let bottom = bottom.min(self.height);
        let right = right.min(self.width);
        if top >= bottom || left >= right {
            return;
        }

        let region_width = (right - left) as usize;
        let mut region = Vec::with_capacity(region_width * (bottom - top) as usize);
        for row in top..bottom {
            let start = (row as usize) * (self.width as usize) + left as usize;
            region.extend_from_slice(&self.cells[start..start + region_width]);
        }

        for row in top..bottom {
            for col in left..right {
                let src_row = i32::from(row) + rows;
                let src_col = i32::from(col) + cols;
                let inside = src_row >= i32::from(top)
                    && src_row < i32::from(bottom)
                    && src_col >= i32::from(left)
                    && src_col < i32::from(right);
                let cell = if inside {
                    let r = (src_row - i32::from(top)) as usize;
                    let c = (src_col - i32::from(left)) as usize;
                    region[r * region_width + c]
                } else {
                    Cell::EMPTY
                };
                let idx = (row as usize) * (self.width as usize) + col as usize;
                self.cells[idx] = cell;
            }
        }
        self.release_dropped_overflow();
        self.dirty = true;
    }

    /// Resize the grid, preserving content top-left aligned.
    ///
    /// New cells are initialized to empty; cells outside the new extent are
    /// dropped. The cursor is clamped into the new extent.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        self.dirty = true;
        if new_width == self.width && new_height == self.height {
            return;
        }

        let new_size = (new_width as usize) * (new_height as usize);
        let mut new_cells = vec![Cell::EMPTY; new_size];

        let copy_width = self.width.min(new_width) as usize;
        let copy_height = self.height.min(new_height) as usize;

        for y in 0..copy_height {
            let old_start = y * (self.width as usize);
            let new_start = y * (new_width as usize);
            new_cells[new_start..new_start + copy_width]
                .copy_from_slice(&self.cells[old_start..old_start + copy_width]);
        }

        self.cells = new_cells;
        self.width = new_width;
        self.height = new_height;
        self.cursor_row = self.cursor_row.min(new_height.saturating_sub(1));
        self.cursor_col = self.cursor_col.min(new_width.saturating_sub(1));
        self.release_dropped_overflow();
    }

    /// Drop overflow entries no cell refers to any more.
    fn release_dropped_overflow(&mut self) {
        if self.overflow.is_empty() {
            return;
        }
        let live: HashSet<u32> = self.cells.iter().filter_map(Cell::overflow_index).collect();
        self.overflow.retain(|idx, _| live.contains(idx));
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cursor", &self.cursor())
            .field("dirty", &self.dirty)
            .field("overflow_count", &self.overflow.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_rows(rows: &[&str]) -> Grid {
        let width = rows[0].len() as u16;
        let mut grid = Grid::new(2, width, rows.len() as u16);
        for (row, text) in rows.iter().enumerate() {
            for (col, ch) in text.chars().enumerate() {
                grid.put(row as u16, col as u16, &ch.to_string(), 0);
            }
        }
        grid
    }

    #[test]
    fn test_grid_new() {
        let grid = Grid::new(1, 80, 24);
        assert_eq!(grid.width(), 80);
        assert_eq!(grid.height(), 24);
        assert_eq!(grid.len(), 80 * 24);
        assert!(grid.is_dirty());
    }

    #[test]
    fn test_grid_zero_sized() {
        let grid = Grid::new(1, 0, 5);
        assert!(grid.is_empty());
        assert_eq!(grid.rows().count(), 0);
    }

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(1, 80, 24);
        assert!(grid.get(23, 79).is_some());
        assert!(grid.get(23, 80).is_none());
        assert!(grid.get(24, 79).is_none());
    }

    #[test]
    fn test_line_leaves_outside_cells() {
        let mut grid = grid_with_rows(&["abcdefghij"]);
        grid.line(0, 2, &[Run::new("x").with_hl(4).repeated(3)]);

        assert_eq!(grid.row_text(0), "abxxxfghij");
        assert_eq!(grid.get(0, 1).unwrap().hl_id(), 0);
        assert_eq!(grid.get(0, 4).unwrap().hl_id(), 4);
        assert_eq!(grid.get(0, 5).unwrap().hl_id(), 0);
    }

    #[test]
    fn test_line_reuses_previous_hl() {
        let mut grid = Grid::new(1, 10, 1);
        grid.line(0, 0, &[Run::new("a").with_hl(7), Run::new("b"), Run::new("c").with_hl(2)]);

        assert_eq!(grid.get(0, 0).unwrap().hl_id(), 7);
        assert_eq!(grid.get(0, 1).unwrap().hl_id(), 7);
        assert_eq!(grid.get(0, 2).unwrap().hl_id(), 2);
    }

    #[test]
    fn test_line_clips_at_edge() {
        let mut grid = Grid::new(1, 4, 1);
        let end = grid.line(0, 2, &[Run::new("z").with_hl(1).repeated(10)]);
        assert_eq!(end, 4);
        assert_eq!(grid.row_text(0), "  zz");
    }

    #[test]
    fn test_wide_and_overflow_graphemes() {
        let mut grid = Grid::new(1, 6, 1);
        let emoji = "👨‍👩‍👧‍👦";
        grid.line(0, 0, &[Run::new("日").with_hl(1), Run::new(""), Run::new(emoji)]);

        assert!(grid.get(0, 1).unwrap().is_wide_continuation());
        assert!(grid.get(0, 2).unwrap().is_overflow());
        assert_eq!(grid.grapheme(0, 2), Some(emoji));
        assert_eq!(grid.row_text(0), format!("日{emoji}   "));
    }

    #[test]
    fn test_overwrite_releases_overflow() {
        let mut grid = Grid::new(1, 2, 1);
        for _ in 0..10 {
            grid.put(0, 0, "👨‍👩‍👧‍👦", 0);
        }
        assert_eq!(grid.overflow.len(), 1);
        grid.put(0, 0, "a", 0);
        assert!(grid.overflow.is_empty());
    }

    fn live_overflow(grid: &Grid) -> usize {
        grid.cells().iter().filter(|c| c.is_overflow()).count()
    }

    #[test]
    fn test_scroll_releases_overflow() {
        let family = "👨‍👩‍👧‍👦";
        let mut grid = Grid::new(1, 4, 3);
        for _ in 0..100 {
            grid.line(2, 0, &[Run::new(family).repeated(4)]);
            grid.scroll(0, 3, 0, 4, 1, 0);
        }
        assert_eq!(live_overflow(&grid), 8);
        assert_eq!(grid.overflow.len(), 8);
        assert_eq!(grid.grapheme(0, 3), Some(family));
    }

    #[test]
    fn test_resize_releases_overflow() {
        let mut grid = Grid::new(1, 4, 3);
        for row in 0..3 {
            grid.line(row, 0, &[Run::new("👩‍🔬").repeated(4)]);
        }
        grid.resize(2, 1);
        assert_eq!(grid.overflow.len(), 2);
        assert_eq!(grid.row_text(0), "👩‍🔬👩‍🔬");
    }

    #[test]
    fn test_scroll_up() {
        let mut grid = grid_with_rows(&["00", "11", "22", "33", "44"]);
        grid.scroll(0, 5, 0, 2, 2, 0);

        assert_eq!(grid.row_text(0), "22");
        assert_eq!(grid.row_text(1), "33");
        assert_eq!(grid.row_text(2), "44");
        assert_eq!(grid.row_text(3), "  ");
        assert_eq!(grid.row_text(4), "  ");
    }

    #[test]
    fn test_scroll_down_inside_region() {
        let mut grid = grid_with_rows(&["00", "11", "22", "33", "44"]);
        grid.scroll(1, 4, 0, 2, -1, 0);

        assert_eq!(grid.row_text(0), "00");
        assert_eq!(grid.row_text(1), "  ");
        assert_eq!(grid.row_text(2), "11");
        assert_eq!(grid.row_text(3), "22");
        assert_eq!(grid.row_text(4), "44");
    }

    #[test]
    fn test_scroll_respects_columns() {
        let mut grid = grid_with_rows(&["abcd", "efgh", "ijkl"]);
        grid.scroll(0, 3, 1, 3, 1, 0);

        assert_eq!(grid.row_text(0), "afgd");
        assert_eq!(grid.row_text(1), "ejkh");
        assert_eq!(grid.row_text(2), "i  l");
    }

    #[test]
    fn test_scroll_horizontal() {
        let mut grid = grid_with_rows(&["abcd"]);
        grid.scroll(0, 1, 0, 4, 0, 1);
        assert_eq!(grid.row_text(0), "bcd ");
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut grid = grid_with_rows(&["ab", "cd"]);
        grid.cursor_goto(1, 1);
        grid.clear();
        assert_eq!(grid.cursor(), (0, 0));
        assert!(grid.cells().iter().all(|c| *c == Cell::EMPTY));
    }

    #[test]
    fn test_resize_preserves_top_left() {
        let mut grid = grid_with_rows(&["abc", "def"]);
        grid.resize(5, 3);
        assert_eq!(grid.row_text(0), "abc  ");
        assert_eq!(grid.row_text(1), "def  ");
        assert_eq!(grid.row_text(2), "     ");

        grid.resize(2, 1);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.row_text(0), "ab");
    }

    #[test]
    fn test_resize_clamps_cursor() {
        let mut grid = Grid::new(1, 10, 10);
        grid.cursor_goto(9, 9);
        grid.resize(4, 3);
        assert_eq!(grid.cursor(), (2, 3));
    }

    #[test]
    fn test_dirty_handshake() {
        let mut grid = Grid::new(1, 3, 3);
        grid.clear_dirty();
        assert!(!grid.is_dirty());
        grid.put(0, 0, "x", 0);
        assert!(grid.is_dirty());
    }
}
