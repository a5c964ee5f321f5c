//! Grid benchmark: cell writes, region scrolls, resize and snapshots.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridline::{Cell, Grid, GridManager, Run};

fn filled_grid(width: u16, height: u16) -> Grid {
    let mut grid = Grid::new(1, width, height);
    for row in 0..height {
        let runs = [Run::new("a").with_hl(1).repeated(width)];
        grid.line(row, 0, &runs);
    }
    grid
}

fn bench_cell_size(c: &mut Criterion) {
    c.bench_function("cell_new_ascii", |b| b.iter(|| Cell::new(black_box('x'))));
    c.bench_function("cell_from_grapheme_cjk", |b| {
        b.iter(|| Cell::from_grapheme(black_box("日")));
    });
}

fn bench_put(c: &mut Criterion) {
    let mut grid = filled_grid(200, 50);
    c.bench_function("grid_put_overflow_emoji", |b| {
        b.iter(|| grid.put(10, 10, black_box("👨‍👩‍👧"), 2));
    });
}

fn bench_scroll(c: &mut Criterion) {
    let mut grid = filled_grid(200, 50);
    c.bench_function("grid_scroll_200x50", |b| {
        b.iter(|| grid.scroll(0, 50, 0, 200, black_box(1), 0));
    });
}

fn bench_resize(c: &mut Criterion) {
    let grid = filled_grid(200, 50);
    c.bench_function("grid_resize_shrink_grow", |b| {
        b.iter(|| {
            let mut g = grid.clone();
            g.resize(black_box(120), 30);
            g.resize(200, 50);
            g
        });
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut grids = GridManager::new();
    grids.resize(2, 200, 50);
    c.bench_function("grid_snapshot_200x50", |b| {
        b.iter(|| grids.snapshot(black_box(2)));
    });
}

criterion_group!(
    benches,
    bench_cell_size,
    bench_put,
    bench_scroll,
    bench_resize,
    bench_snapshot
);
criterion_main!(benches);
