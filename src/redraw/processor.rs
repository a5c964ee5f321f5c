//! RedrawEventProcessor: applies frames to the editor state.
//!
//! Within a frame, events that only touch scalar state apply in arrival
//! order. Grid and window events are buffered by index and replayed at the
//! flush: all grid events first, then all window events, so a window can
//! be positioned on a grid created later in the same frame.

use super::decode::{decode_highlight, decode_mode_info};
use super::events::{EventClass, RedrawEvent};
use super::queue::FrameReceiver;
use crate::editor::EditorState;
use crate::error::{Result, StateError};
use crate::highlight::Rgba;
use crate::window::BASE_GRID;
use tracing::{debug, trace, warn};

/// Dispatcher for redraw frames.
///
/// Holds only the per-frame index buffers, reused across frames.
#[derive(Debug, Default)]
pub struct RedrawEventProcessor {
    grid_events: Vec<usize>,
    win_events: Vec<usize>,
    frames_applied: u64,
}

impl RedrawEventProcessor {
    /// Create a processor with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total frames applied so far.
    #[inline]
    pub const fn frames_applied(&self) -> u64 {
        self.frames_applied
    }

    /// Apply exactly the frames that were complete when called. Frames
    /// flushed meanwhile wait for the next call. Returns the number applied.
    pub fn drain(&mut self, state: &mut EditorState, frames: &FrameReceiver) -> usize {
        let count = frames.buffered();
        let mut applied = 0;
        for _ in 0..count {
            let Some(frame) = frames.try_recv() else {
                break;
            };
            self.apply_frame(state, &frame);
            frames.mark_replayed();
            applied += 1;
        }
        if applied > 0 {
            debug!(applied, "frames drained");
        }
        applied
    }

    /// Apply one frame. A frame missing its trailing flush is still
    /// completed.
    pub fn apply_frame(&mut self, state: &mut EditorState, events: &[RedrawEvent]) {
        state.wins.begin_frame();
        for (index, event) in events.iter().enumerate() {
            trace!(event = event.name(), "redraw event");
            match event.class() {
                EventClass::Immediate => Self::apply_immediate(state, event),
                EventClass::Grid => self.grid_events.push(index),
                EventClass::Window => self.win_events.push(index),
                EventClass::Flush => self.flush(state, events),
            }
        }
        if !self.grid_events.is_empty() || !self.win_events.is_empty() {
            debug!("frame ended without flush");
            self.flush(state, events);
        }
        self.frames_applied += 1;
    }

    fn flush(&mut self, state: &mut EditorState, events: &[RedrawEvent]) {
        for event in self.grid_events.iter().filter_map(|&i| events.get(i)) {
            if let Err(err) = Self::apply_grid(state, event) {
                warn!(%err, event = event.name(), "grid event ignored");
            }
        }
        for event in self.win_events.iter().filter_map(|&i| events.get(i)) {
            if let Err(err) = Self::apply_window(state, event) {
                warn!(%err, event = event.name(), "window event ignored");
            }
        }
        self.grid_events.clear();
        self.win_events.clear();
    }

    fn apply_immediate(state: &mut EditorState, event: &RedrawEvent) {
        match event {
            RedrawEvent::SetTitle { title } => state.title.clone_from(title),
            RedrawEvent::SetIcon { icon } => state.icon.clone_from(icon),
            RedrawEvent::ModeInfoSet {
                cursor_style_enabled,
                modes,
            } => {
                state.cursor_style_enabled = *cursor_style_enabled;
                state.modes.extend(modes.iter().map(decode_mode_info));
            }
            RedrawEvent::OptionSet { name, value } => {
                state.options.insert(name.clone(), value.clone());
            }
            RedrawEvent::Chdir { path } => state.cwd = Some(path.clone()),
            RedrawEvent::ModeChange { name, index } => {
                if let Err(err) = state.set_mode(*index) {
                    warn!(%err, mode = name.as_str(), "mode change ignored");
                }
            }
            RedrawEvent::MouseOn => state.mouse_enabled = true,
            RedrawEvent::MouseOff => state.mouse_enabled = false,
            RedrawEvent::BusyStart => state.busy = true,
            RedrawEvent::BusyStop => state.busy = false,
            RedrawEvent::UpdateMenu => {}
            RedrawEvent::DefaultColorsSet {
                foreground,
                background,
                special,
            } => state.highlights.set_default_colors(
                Rgba::from_packed(*foreground),
                Rgba::from_packed(*background),
                Rgba::from_packed(*special),
            ),
            RedrawEvent::HlAttrDefine { id, attrs } => {
                state.highlights.define(*id, decode_highlight(attrs));
            }
            RedrawEvent::HlGroupSet { name, hl_id } => {
                state.hl_groups.insert(name.clone(), *hl_id);
            }
            RedrawEvent::Unknown { name } => warn!(event = name.as_str(), "unknown redraw event"),
            // Grid, window and flush events are dispatched by class.
            _ => {}
        }
    }

    fn apply_grid(state: &mut EditorState, event: &RedrawEvent) -> Result<()> {
        match *event {
            RedrawEvent::GridResize {
                grid,
                width,
                height,
            } => {
                state.grids.resize(grid, width, height);
                // The base grid never gets a position event.
                if grid == BASE_GRID {
                    state.wins.pos(&state.grids, 0, grid, 0, 0, width, height)?;
                }
            }
            RedrawEvent::GridClear { grid } => state.grids.clear(grid)?,
            RedrawEvent::GridCursorGoto { grid, row, col } => {
                state.grids.cursor_goto(grid, row, col)?;
                state.wins.set_active(grid);
            }
            RedrawEvent::GridLine {
                grid,
                row,
                col_start,
                ref runs,
            } => state.grids.line(grid, row, col_start, runs)?,
            RedrawEvent::GridScroll {
                grid,
                top,
                bottom,
                left,
                right,
                rows,
                cols,
            } => state
                .grids
                .scroll(grid, top, bottom, left, right, rows, cols)?,
            RedrawEvent::GridDestroy { grid } => {
                let grid = state.grids.destroy(grid)?;
                match state.wins.close(grid) {
                    Ok(()) | Err(StateError::UnknownWindow(_)) => {}
                    Err(err) => return Err(err),
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn apply_window(state: &mut EditorState, event: &RedrawEvent) -> Result<()> {
        match *event {
            RedrawEvent::WinPos {
                grid,
                win,
                start_row,
                start_col,
                width,
                height,
            } => state
                .wins
                .pos(&state.grids, win, grid, start_row, start_col, width, height)?,
            RedrawEvent::WinFloatPos { grid, win, float } => {
                state.wins.float_pos(&state.grids, win, grid, float)?;
            }
            RedrawEvent::WinExternalPos { grid, .. } => state.wins.external_pos(grid),
            RedrawEvent::WinHide { grid } => state.wins.hide(grid)?,
            RedrawEvent::WinClose { grid } => state.wins.close(grid)?,
            RedrawEvent::MsgSetPos {
                grid, row, scrolled, ..
            } => state
                .wins
                .msg_set(&state.grids, &state.sizes, grid, row, scrolled)?,
            RedrawEvent::WinViewport { grid, viewport, .. } => {
                state.wins.viewport(grid, viewport)?;
            }
            RedrawEvent::WinViewportMargins { grid, margins, .. } => {
                state.wins.viewport_margins(&state.sizes, grid, margins)?;
            }
            RedrawEvent::WinExtmark { grid, .. } => state.wins.extmark(grid),
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Run;
    use crate::redraw::{frame_queue, Value};

    fn resize(grid: u64, width: u16, height: u16) -> RedrawEvent {
        RedrawEvent::GridResize {
            grid,
            width,
            height,
        }
    }

    fn win_pos(grid: u64, row: u16, col: u16) -> RedrawEvent {
        RedrawEvent::WinPos {
            grid,
            win: 1000 + grid,
            start_row: row,
            start_col: col,
            width: 10,
            height: 5,
        }
    }

    #[test]
    fn test_window_events_apply_after_grid_events() {
        let mut state = EditorState::default();
        let mut processor = RedrawEventProcessor::new();
        processor.apply_frame(
            &mut state,
            &[win_pos(2, 1, 1), resize(2, 10, 5), RedrawEvent::Flush],
        );
        assert!(state.wins.get(2).is_some());
    }

    #[test]
    fn test_base_grid_gets_implicit_window() {
        let mut state = EditorState::default();
        RedrawEventProcessor::new().apply_frame(&mut state, &[resize(1, 80, 24), RedrawEvent::Flush]);
        let win = state.wins.get(BASE_GRID).unwrap();
        assert_eq!((win.width(), win.height()), (80, 24));
    }

    #[test]
    fn test_cursor_goto_sets_active() {
        let mut state = EditorState::default();
        RedrawEventProcessor::new().apply_frame(
            &mut state,
            &[
                resize(2, 10, 5),
                win_pos(2, 0, 0),
                RedrawEvent::GridCursorGoto {
                    grid: 2,
                    row: 3,
                    col: 4,
                },
                RedrawEvent::Flush,
            ],
        );
        assert_eq!(state.wins.active_win().map(|w| w.grid_id), Some(2));
        assert_eq!(state.grids.get(2).unwrap().cursor(), (3, 4));
    }

    #[test]
    fn test_immediate_events() {
        let mut state = EditorState::default();
        RedrawEventProcessor::new().apply_frame(
            &mut state,
            &[
                RedrawEvent::SetTitle {
                    title: "main.rs".into(),
                },
                RedrawEvent::OptionSet {
                    name: "guifont".into(),
                    value: Value::from("Mono:h12"),
                },
                RedrawEvent::Chdir { path: "/tmp".into() },
                RedrawEvent::MouseOn,
                RedrawEvent::BusyStart,
                RedrawEvent::HlGroupSet {
                    name: "Normal".into(),
                    hl_id: 7,
                },
                RedrawEvent::Unknown {
                    name: "frobnicate".into(),
                },
                RedrawEvent::Flush,
            ],
        );
        assert_eq!(state.title, "main.rs");
        assert_eq!(state.options.get("guifont"), Some(&Value::from("Mono:h12")));
        assert_eq!(state.cwd.as_deref(), Some("/tmp"));
        assert!(state.mouse_enabled);
        assert!(state.busy);
        assert_eq!(state.hl_groups.get("Normal"), Some(&7));
    }

    #[test]
    fn test_errors_do_not_abort_frame() {
        let mut state = EditorState::default();
        RedrawEventProcessor::new().apply_frame(
            &mut state,
            &[
                RedrawEvent::GridClear { grid: 9 },
                RedrawEvent::GridLine {
                    grid: 9,
                    row: 0,
                    col_start: 0,
                    runs: vec![Run::new("x")],
                },
                resize(2, 3, 1),
                RedrawEvent::GridLine {
                    grid: 2,
                    row: 0,
                    col_start: 0,
                    runs: vec![Run::new("x").with_hl(1)],
                },
                RedrawEvent::WinHide { grid: 9 },
                RedrawEvent::Flush,
            ],
        );
        assert_eq!(state.grids.get(2).unwrap().row_text(0), "x  ");
    }

    #[test]
    fn test_drain_applies_buffered_frames() {
        let mut state = EditorState::default();
        let mut processor = RedrawEventProcessor::new();
        let (mut tx, rx) = frame_queue();
        tx.extend([
            RedrawEvent::SetTitle { title: "one".into() },
            RedrawEvent::Flush,
            RedrawEvent::SetTitle { title: "two".into() },
            RedrawEvent::Flush,
            RedrawEvent::SetTitle {
                title: "partial".into(),
            },
        ])
        .unwrap();

        assert_eq!(processor.drain(&mut state, &rx), 2);
        assert_eq!(state.title, "two");
        assert_eq!(rx.buffered(), 0);
        assert_eq!(processor.frames_applied(), 2);
    }
}
