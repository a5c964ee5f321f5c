//! # Gridline
//!
//! Client-side state for a GUI frontend driven by an external text editor
//! over a batched redraw protocol.
//!
//! The editor sends grid, window, highlight and mode notifications in
//! atomic frames terminated by a flush. Gridline applies them to an
//! in-memory model that a renderer reads once per tick.
//!
//! ## Core Concepts
//!
//! - **Grids**: character surfaces updated by run-length line updates and
//!   region scrolls
//! - **Windows**: positioned views onto grids; tiled, floating or message
//! - **Two-phase frames**: grid events apply before window events
//! - **Animated cursor**: elastic corner interpolation and blinking
//!
//! ## Example
//!
//! ```rust
//! use gridline::{EditorState, RedrawEvent, RedrawEventProcessor, Run};
//!
//! let mut state = EditorState::default();
//! let mut processor = RedrawEventProcessor::new();
//! processor.apply_frame(&mut state, &[
//!     RedrawEvent::GridResize { grid: 1, width: 10, height: 2 },
//!     RedrawEvent::GridLine {
//!         grid: 1,
//!         row: 0,
//!         col_start: 0,
//!         runs: vec![Run::new("h").with_hl(0), Run::new("i")],
//!     },
//!     RedrawEvent::Flush,
//! ]);
//! assert_eq!(state.grids.get(1).unwrap().row_text(0).trim_end(), "hi");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod grid;
pub mod highlight;
pub mod layout;
pub mod redraw;
pub mod window;

// Re-exports for convenience
pub use actor::{Engine, HeadlessRenderer, Renderer};
pub use config::{AnimationConfig, EngineConfig};
pub use cursor::{BlinkState, Cursor, CursorShape, ModeInfo};
pub use editor::EditorState;
pub use error::{Result, StateError};
pub use grid::{Cell, CellFlags, Grid, GridId, GridManager, Run};
pub use highlight::{Colors, Highlight, HighlightTable, Rgba, Style, Underline};
pub use layout::{Rect, Sizes, Vec2};
pub use redraw::{frame_queue, FrameReceiver, FrameSender, RedrawEvent, RedrawEventProcessor, Value};
pub use window::{Anchor, FloatData, Margins, MouseInfo, Viewport, Win, WinManager, BASE_GRID};
