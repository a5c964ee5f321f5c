//! Layout module: geometry primitives and size-derived pixel metrics.
//!
//! Metrics are computed once at initialization and again on surface
//! resize or DPI change. Window and cursor code only read them.

mod rect;
mod sizes;

pub use rect::{Rect, Vec2};
pub use sizes::Sizes;
