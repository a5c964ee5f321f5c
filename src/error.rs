//! Error types for state mutation.
//!
//! None of these are fatal. The redraw processor logs them and moves on to
//! the next event; the editor re-sends full state when it detects a desync.

use crate::grid::GridId;
use thiserror::Error;

/// A single operation could not be applied to the editor state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The referenced grid does not exist.
    #[error("unknown grid {0}")]
    UnknownGrid(GridId),

    /// No window is bound to the referenced grid.
    #[error("no window bound to grid {0}")]
    UnknownWindow(GridId),

    /// A line update addressed a row outside the grid.
    #[error("row {row} out of range for grid {grid} with height {height}")]
    RowOutOfRange {
        /// Target grid.
        grid: GridId,
        /// Requested row.
        row: u16,
        /// Current grid height.
        height: u16,
    },

    /// The highlight id has not been defined.
    #[error("missing highlight {0}")]
    MissingHighlight(u32),

    /// A mode change referenced an index past the mode list.
    #[error("unknown mode index {index} ({len} modes defined)")]
    UnknownMode {
        /// Requested index.
        index: usize,
        /// Number of modes defined so far.
        len: usize,
    },
}

/// Convenience alias for state operations.
pub type Result<T> = std::result::Result<T, StateError>;
