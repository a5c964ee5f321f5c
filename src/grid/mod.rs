//! Grid module: character grids and their owner.
//!
//! This module contains:
//! - [`Cell`]: The atomic unit of display, a grapheme plus a highlight id
//! - [`Grid`]: A rectangular buffer of cells with a local cursor and dirty flag
//! - [`GridManager`]: Owner of all grids, keyed by the editor's grid id

mod cell;
#[allow(clippy::module_inception)]
mod grid;
mod manager;

pub use cell::{Cell, CellFlags};
pub use grid::{Grid, GridId, Run};
pub use manager::{GridManager, GridSnapshot};
