//! Highlight table: numbered style bundles referenced by cells.

use super::color::Rgba;
use crate::error::{Result, StateError};
use bitflags::bitflags;
use std::collections::HashMap;

bitflags! {
    /// Text style flags of a highlight.
    ///
    /// # Example
    /// ```
    /// use gridline::Style;
    /// let style = Style::BOLD | Style::ITALIC;
    /// assert!(style.contains(Style::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Style: u8 {
        /// Swap foreground and background
        const REVERSE = 0b0000_0001;
        /// Italic text
        const ITALIC = 0b0000_0010;
        /// Bold text
        const BOLD = 0b0000_0100;
        /// Strikethrough text
        const STRIKETHROUGH = 0b0000_1000;
    }
}

impl std::fmt::Debug for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Underline decoration. At most one is active per highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Underline {
    /// No underline.
    #[default]
    None,
    /// Straight line.
    Underline,
    /// Wavy line.
    Undercurl,
    /// Two straight lines.
    Underdouble,
    /// Dotted line.
    Underdotted,
    /// Dashed line.
    Underdashed,
}

/// Style attributes for one highlight id.
///
/// Unset colors fall back to the default highlight (id 0) at resolution
/// time, see [`HighlightTable::colors`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Highlight {
    /// Foreground color.
    pub foreground: Option<Rgba>,
    /// Background color.
    pub background: Option<Rgba>,
    /// Color for underline/undercurl decorations.
    pub special: Option<Rgba>,
    /// Style flags.
    pub style: Style,
    /// Underline decoration.
    pub underline: Underline,
    /// Blend level for floating windows, 0 (opaque) to 100.
    pub blend: u8,
}

impl Highlight {
    /// Whether foreground and background are swapped.
    #[inline]
    pub const fn reverse(&self) -> bool {
        self.style.contains(Style::REVERSE)
    }

    /// Whether the text is italic.
    #[inline]
    pub const fn italic(&self) -> bool {
        self.style.contains(Style::ITALIC)
    }

    /// Whether the text is bold.
    #[inline]
    pub const fn bold(&self) -> bool {
        self.style.contains(Style::BOLD)
    }

    /// Whether the text is struck through.
    #[inline]
    pub const fn strikethrough(&self) -> bool {
        self.style.contains(Style::STRIKETHROUGH)
    }
}

/// Resolved colors for drawing one highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colors {
    /// Effective foreground.
    pub foreground: Rgba,
    /// Effective background.
    pub background: Rgba,
    /// Effective decoration color.
    pub special: Rgba,
}

/// Mapping of highlight id to [`Highlight`].
///
/// Id 0 is the default highlight. It always exists: the table is seeded with
/// white on black until the editor sends its default colors.
#[derive(Debug, Clone)]
pub struct HighlightTable {
    default: Highlight,
    entries: HashMap<u32, Highlight>,
}

impl Default for HighlightTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightTable {
    /// Create a table holding only the seeded default highlight.
    pub fn new() -> Self {
        Self {
            default: Highlight {
                foreground: Some(Rgba::WHITE),
                background: Some(Rgba::BLACK),
                special: Some(Rgba::WHITE),
                ..Highlight::default()
            },
            entries: HashMap::new(),
        }
    }

    /// Number of defined highlights, the default included.
    pub fn len(&self) -> usize {
        self.entries.len() + 1
    }

    /// Always false: the default highlight exists from construction.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Replace the record at `id`. Nothing of a previous record survives.
    pub fn define(&mut self, id: u32, hl: Highlight) {
        if id == 0 {
            self.default = hl;
        } else {
            self.entries.insert(id, hl);
        }
    }

    /// Replace the default highlight with the editor's default colors.
    pub fn set_default_colors(&mut self, fg: Rgba, bg: Rgba, sp: Rgba) {
        self.default = Highlight {
            foreground: Some(fg),
            background: Some(bg),
            special: Some(sp),
            ..Highlight::default()
        };
    }

    /// The default highlight (id 0).
    #[inline]
    pub const fn default_hl(&self) -> &Highlight {
        &self.default
    }

    /// Look up a highlight.
    pub fn get(&self, id: u32) -> Result<&Highlight> {
        if id == 0 {
            return Ok(&self.default);
        }
        self.entries.get(&id).ok_or(StateError::MissingHighlight(id))
    }

    /// Look up a highlight, substituting the default for unknown ids.
    pub fn get_or_default(&self, id: u32) -> &Highlight {
        self.get(id).unwrap_or(&self.default)
    }

    fn default_fg(&self) -> Rgba {
        self.default.foreground.unwrap_or(Rgba::WHITE)
    }

    fn default_bg(&self) -> Rgba {
        self.default.background.unwrap_or(Rgba::BLACK)
    }

    /// Foreground after applying `reverse` and default fallback.
    pub fn effective_fg(&self, hl: &Highlight) -> Rgba {
        if hl.reverse() {
            hl.background.unwrap_or_else(|| self.default_bg())
        } else {
            hl.foreground.unwrap_or_else(|| self.default_fg())
        }
    }

    /// Background after applying `reverse` and default fallback.
    pub fn effective_bg(&self, hl: &Highlight) -> Rgba {
        if hl.reverse() {
            hl.foreground.unwrap_or_else(|| self.default_fg())
        } else {
            hl.background.unwrap_or_else(|| self.default_bg())
        }
    }

    /// Decoration color, falling back to the default special and then to
    /// the effective foreground.
    pub fn effective_sp(&self, hl: &Highlight) -> Rgba {
        hl.special
            .or(self.default.special)
            .unwrap_or_else(|| self.effective_fg(hl))
    }

    /// Resolve all colors for `id`; unknown ids resolve as the default.
    pub fn colors(&self, id: u32) -> Colors {
        let hl = self.get_or_default(id);
        Colors {
            foreground: self.effective_fg(hl),
            background: self.effective_bg(hl),
            special: self.effective_sp(hl),
        }
    }
}
