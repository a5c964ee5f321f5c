//! Frame processing benchmark: apply full-screen redraw frames.
//!
//! Target: < 1ms for a full 200×50 repaint frame

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridline::{EditorState, RedrawEvent, RedrawEventProcessor, Run};

/// One grid_line per row, highlight changing every 8 cells.
fn full_repaint(grid: u64, width: u16, height: u16, seed: u16) -> Vec<RedrawEvent> {
    let mut events = Vec::with_capacity(height as usize + 1);
    for row in 0..height {
        let runs = (0..width)
            .map(|col| {
                let ch = char::from(b'A' + ((col + row + seed) % 26) as u8);
                let run = Run::new(ch.to_string());
                if col % 8 == 0 {
                    run.with_hl(u32::from(col / 8))
                } else {
                    run
                }
            })
            .collect();
        events.push(RedrawEvent::GridLine {
            grid,
            row,
            col_start: 0,
            runs,
        });
    }
    events.push(RedrawEvent::Flush);
    events
}

fn setup(width: u16, height: u16) -> (EditorState, RedrawEventProcessor) {
    let mut state = EditorState::default();
    let mut processor = RedrawEventProcessor::new();
    processor.apply_frame(
        &mut state,
        &[
            RedrawEvent::GridResize {
                grid: 1,
                width,
                height,
            },
            RedrawEvent::Flush,
        ],
    );
    (state, processor)
}

fn bench_full_repaint(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_repaint");
    for (width, height) in [(80u16, 24u16), (200, 50)] {
        let (mut state, mut processor) = setup(width, height);
        let frame = full_repaint(1, width, height, 0);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &frame,
            |b, frame| b.iter(|| processor.apply_frame(&mut state, black_box(frame))),
        );
    }
    group.finish();
}

fn bench_scroll_frame(c: &mut Criterion) {
    let (mut state, mut processor) = setup(200, 50);
    let frame = vec![
        RedrawEvent::GridScroll {
            grid: 1,
            top: 0,
            bottom: 49,
            left: 0,
            right: 200,
            rows: 1,
            cols: 0,
        },
        RedrawEvent::GridLine {
            grid: 1,
            row: 48,
            col_start: 0,
            runs: vec![Run::new("x").with_hl(3).repeated(200)],
        },
        RedrawEvent::GridCursorGoto {
            grid: 1,
            row: 48,
            col: 0,
        },
        RedrawEvent::Flush,
    ];

    c.bench_function("scroll_one_line_200x50", |b| {
        b.iter(|| processor.apply_frame(&mut state, black_box(&frame)));
    });
}

fn bench_animation_tick(c: &mut Criterion) {
    let (mut state, _) = setup(200, 50);
    c.bench_function("update_tick", |b| {
        b.iter(|| state.update(black_box(1.0 / 60.0)));
    });
}

criterion_group!(
    benches,
    bench_full_repaint,
    bench_scroll_frame,
    bench_animation_tick
);
criterion_main!(benches);
