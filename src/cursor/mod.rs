//! Cursor module: editor modes and the animated cursor.
//!
//! This module contains:
//! - [`ModeInfo`]: Cursor appearance for one editor mode
//! - [`Cursor`]: Position/corner animation and blink state machine

#[allow(clippy::module_inception)]
mod cursor;
mod mode;

pub use cursor::{BlinkState, Corners, Cursor, DEFAULT_CORNER_TIME, DEFAULT_JUMP_TIME};
pub use mode::{CursorShape, ModeInfo};
