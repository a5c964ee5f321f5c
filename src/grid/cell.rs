//! Cell: The atomic unit of a character grid.
//!
//! # Memory Layout
//!
//! The `Cell` struct is kept small so that large grids stay cache friendly:
//! - 12 bytes total
//! - Inline grapheme storage covers 99%+ of real-world characters
//! - Complex graphemes (emoji ZWJ sequences) spill to the owning grid's overflow table
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Cell Layout (12 bytes)                                      │
//! ├─────────────┬──────────────┬───────┬─────────┬───────────────┤
//! │  grapheme   │  len + width │ flags │ padding │     hl_id     │
//! │  [u8; 4]    │  u8 + u8     │  u8   │   u8    │      u32      │
//! └─────────────┴──────────────┴───────┴─────────┴───────────────┘
//! ```
//!
//! Colors are not stored in the cell. A cell only references a highlight id,
//! resolved against the [`HighlightTable`](crate::highlight::HighlightTable)
//! at render time.

use bitflags::bitflags;
use std::hash::{Hash, Hasher};

bitflags! {
    /// Cell-level flags for special states.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Grapheme overflows inline storage; check the grid's overflow table
        const OVERFLOW = 0b0000_0001;
        /// This cell is a continuation of a wide character
        const WIDE_CONTINUATION = 0b0000_0010;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single grid cell.
///
/// Each cell contains:
/// - A grapheme (the text to display, empty for wide-character continuations)
/// - The highlight id used to style it
///
/// # Grapheme Handling
///
/// Most characters (ASCII, Latin, CJK) fit within the 4-byte inline storage.
/// For complex graphemes like emoji ZWJ sequences (👨‍👩‍👧‍👦), the `OVERFLOW`
/// flag is set and the grapheme bytes hold an index into the overflow table
/// of the grid that owns the cell.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Cell {
    /// Inline grapheme storage (UTF-8 bytes).
    /// For overflowed graphemes, this contains a u32 index.
    grapheme: [u8; 4],
    /// Actual byte length of the grapheme (0-4, or 0 if overflowed).
    grapheme_len: u8,
    /// Display width of the grapheme (0=continuation, 1=normal, 2=wide CJK).
    display_width: u8,
    /// Cell flags (overflow, continuation).
    flags: CellFlags,
    _padding: u8,
    /// Highlight id.
    hl_id: u32,
}

const _: () = assert!(
    std::mem::size_of::<Cell>() == 12,
    "Cell must stay 12 bytes"
);

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space character, highlight 0).
    pub const EMPTY: Self = Self {
        grapheme: [b' ', 0, 0, 0],
        grapheme_len: 1,
        display_width: 1,
        flags: CellFlags::empty(),
        _padding: 0,
        hl_id: 0,
    };

    /// Create a new cell with a single ASCII character.
    ///
    /// # Panics
    /// Panics in debug builds if the character is not ASCII.
    #[inline]
    pub fn new(c: char) -> Self {
        debug_assert!(c.is_ascii(), "Use Cell::from_grapheme for non-ASCII");
        Self {
            grapheme: [c as u8, 0, 0, 0],
            ..Self::EMPTY
        }
    }

    /// Create a cell from a grapheme string.
    ///
    /// An empty string yields a wide-character continuation cell.
    /// If the grapheme fits in 4 bytes, it's stored inline.
    /// Otherwise, returns `None` and the caller should use overflow storage.
    #[inline]
    pub fn from_grapheme(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.is_empty() {
            return Some(Self::wide_continuation());
        }
        if bytes.len() > 4 {
            return None;
        }

        let mut grapheme = [0u8; 4];
        grapheme[..bytes.len()].copy_from_slice(bytes);
        let width = u8::try_from(unicode_width::UnicodeWidthStr::width(s)).unwrap_or(1);

        Some(Self {
            grapheme,
            grapheme_len: bytes.len() as u8,
            display_width: width,
            flags: CellFlags::empty(),
            _padding: 0,
            hl_id: 0,
        })
    }

    /// Create an overflow cell with an index to external storage.
    ///
    /// The index is stored in the grapheme bytes as a little-endian u32.
    #[inline]
    pub const fn overflow(index: u32, display_width: u8) -> Self {
        Self {
            grapheme: index.to_le_bytes(),
            grapheme_len: 0,
            display_width,
            flags: CellFlags::OVERFLOW,
            _padding: 0,
            hl_id: 0,
        }
    }

    /// Create a wide-character continuation cell.
    ///
    /// The editor sends an empty string for the column following a
    /// double-width character.
    #[inline]
    pub const fn wide_continuation() -> Self {
        Self {
            grapheme: [0, 0, 0, 0],
            grapheme_len: 0,
            display_width: 0,
            flags: CellFlags::WIDE_CONTINUATION,
            _padding: 0,
            hl_id: 0,
        }
    }

    /// Get the grapheme as a string slice.
    ///
    /// Returns `None` if this is an overflow cell (caller should look it up
    /// through the owning grid). Continuation cells yield `Some("")`.
    #[inline]
    pub fn grapheme(&self) -> Option<&str> {
        if self.flags.contains(CellFlags::OVERFLOW) {
            return None;
        }
        std::str::from_utf8(&self.grapheme[..self.grapheme_len as usize]).ok()
    }

    /// Get the overflow index if this is an overflow cell.
    #[inline]
    pub const fn overflow_index(&self) -> Option<u32> {
        if self.flags.contains(CellFlags::OVERFLOW) {
            Some(u32::from_le_bytes(self.grapheme))
        } else {
            None
        }
    }

    /// Check if this cell uses overflow storage.
    #[inline]
    pub const fn is_overflow(&self) -> bool {
        self.flags.contains(CellFlags::OVERFLOW)
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Get the display width (0, 1, or 2).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.display_width
    }

    /// Get the highlight id.
    #[inline]
    pub const fn hl_id(&self) -> u32 {
        self.hl_id
    }

    /// Get the flags.
    #[inline]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    /// Set the highlight id (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_hl_id(mut self, hl_id: u32) -> Self {
        self.hl_id = hl_id;
        self
    }

    /// Reset the cell to empty (space, highlight 0).
    #[inline]
    pub const fn reset(&mut self) {
        *self = Self::EMPTY;
    }
}

impl PartialEq for Cell {
    /// Grapheme bytes are compared first since they differ most often.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.grapheme == other.grapheme
            && self.grapheme_len == other.grapheme_len
            && self.hl_id == other.hl_id
            && self.flags == other.flags
            && self.display_width == other.display_width
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grapheme.hash(state);
        self.grapheme_len.hash(state);
        self.display_width.hash(state);
        self.flags.hash(state);
        self.hl_id.hash(state);
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let grapheme = self.grapheme().unwrap_or("<overflow>");
        f.debug_struct("Cell")
            .field("grapheme", &grapheme)
            .field("hl_id", &self.hl_id)
            .field("width", &self.display_width)
            .field("flags", &self.flags)
            .finish()
    }
}
