//! Property-based invariant tests for grids.
//!
//! 1. Resize followed by clear yields `w * h` blank cells and cursor (0, 0).
//! 2. A line update never touches cells outside its span.
//! 3. Resize keeps the overlapping top-left content.
//! 4. Scroll never writes outside its region.

use gridline::{Cell, Grid, GridManager, Run};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn filled(width: u16, height: u16) -> Grid {
    let mut grid = Grid::new(1, width, height);
    for row in 0..height {
        for col in 0..width {
            let ch = char::from(b'a' + ((row * 7 + col) % 26) as u8);
            grid.put(row, col, &ch.to_string(), u32::from(row));
        }
    }
    grid
}

fn runs_strategy() -> impl Strategy<Value = Vec<Run>> {
    prop::collection::vec(
        ("[A-Z]", prop::option::of(1u32..8), 1u16..6).prop_map(|(text, hl, repeat)| Run {
            text,
            hl_id: hl,
            repeat,
        }),
        1..6,
    )
}

proptest! {
    #[test]
    fn resize_then_clear_is_blank(
        w1 in 1u16..60, h1 in 1u16..30,
        w2 in 1u16..60, h2 in 1u16..30,
    ) {
        let mut grids = GridManager::new();
        grids.resize(3, w1, h1);
        grids.line(3, 0, 0, &[Run::new("x").with_hl(2).repeated(w1)]).unwrap();
        grids.cursor_goto(3, h1 - 1, w1 - 1).unwrap();
        grids.resize(3, w2, h2);
        grids.clear(3).unwrap();

        let grid = grids.get(3).unwrap();
        prop_assert_eq!(grid.len(), usize::from(w2) * usize::from(h2));
        prop_assert!(grid.cells().iter().all(|c| *c == Cell::EMPTY));
        prop_assert_eq!(grid.cursor(), (0, 0));
    }
}

proptest! {
    #[test]
    fn line_touches_only_its_span(
        width in 1u16..40, height in 1u16..10,
        row_seed in any::<u16>(), col_start in 0u16..50,
        runs in runs_strategy(),
    ) {
        let row = row_seed % height;
        let before = filled(width, height);
        let mut after = before.clone();
        let end = after.line(row, col_start, &runs);

        for r in 0..height {
            for c in 0..width {
                let inside = r == row && c >= col_start && c < end;
                if !inside {
                    prop_assert_eq!(before.get(r, c), after.get(r, c), "cell ({}, {}) changed", r, c);
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn resize_keeps_top_left(
        w1 in 1u16..40, h1 in 1u16..20,
        w2 in 1u16..40, h2 in 1u16..20,
    ) {
        let original = filled(w1, h1);
        let mut grid = original.clone();
        grid.resize(w2, h2);

        prop_assert_eq!(grid.width(), w2);
        prop_assert_eq!(grid.height(), h2);
        for r in 0..h1.min(h2) {
            for c in 0..w1.min(w2) {
                prop_assert_eq!(grid.get(r, c), original.get(r, c));
            }
        }
    }
}

proptest! {
    #[test]
    fn scroll_stays_in_region(
        top in 0u16..10, bottom in 0u16..12,
        left in 0u16..15, right in 0u16..18,
        rows in -12i32..12, cols in -8i32..8,
    ) {
        let original = filled(16, 11);
        let mut grid = original.clone();
        grid.scroll(top, bottom, left, right, rows, cols);

        for r in 0..11 {
            for c in 0..16 {
                let inside = r >= top && r < bottom && c >= left && c < right;
                if !inside {
                    prop_assert_eq!(grid.get(r, c), original.get(r, c));
                }
            }
        }
    }
}
