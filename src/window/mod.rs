//! Window module: positioned views that bind grids into the composed layout.
//!
//! This module contains:
//! - [`Win`]: One window (normal, floating or message) and its animation state
//! - [`WinManager`]: Owner of all windows, float anchoring, draw order and
//!   pixel to cell mapping for input

mod manager;
mod win;

pub use manager::{MouseInfo, WinManager, BASE_GRID};
pub use win::{Anchor, FloatData, Margins, ScrollTransition, Viewport, Win, WinHandle, WinKind};
