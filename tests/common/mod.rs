//! Shared helpers for integration tests.

#![allow(dead_code)]

use gridline::{EditorState, RedrawEvent, RedrawEventProcessor, Run};
use std::io;
use std::sync::{Arc, Mutex};

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

/// Run `f` with a thread-local subscriber and return its result together
/// with everything it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, buffer.contents())
}

/// Apply one frame (a flush is appended).
pub fn apply(state: &mut EditorState, events: Vec<RedrawEvent>) {
    let mut frame = events;
    frame.push(RedrawEvent::Flush);
    RedrawEventProcessor::new().apply_frame(state, &frame);
}

pub fn resize(grid: u64, width: u16, height: u16) -> RedrawEvent {
    RedrawEvent::GridResize {
        grid,
        width,
        height,
    }
}

pub fn win_pos(grid: u64, row: u16, col: u16, width: u16, height: u16) -> RedrawEvent {
    RedrawEvent::WinPos {
        grid,
        win: 1000 + grid,
        start_row: row,
        start_col: col,
        width,
        height,
    }
}

pub fn line(grid: u64, row: u16, col_start: u16, text: &str, hl: u32) -> RedrawEvent {
    let mut runs: Vec<Run> = text.chars().map(|c| Run::new(c.to_string())).collect();
    if let Some(first) = runs.first_mut() {
        first.hl_id = Some(hl);
    }
    RedrawEvent::GridLine {
        grid,
        row,
        col_start,
        runs,
    }
}
