//! Highlight module: colors and the id → style table.

mod color;
mod table;

pub use color::Rgba;
pub use table::{Colors, Highlight, HighlightTable, Style, Underline};
