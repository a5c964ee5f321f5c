//! Win: a positioned view binding one grid into the composed layout.

use crate::grid::{GridId, GridSnapshot};
use crate::layout::Rect;

/// Handle of the editor-side window, as sent with position events.
pub type WinHandle = u64;

/// Corner of a floating window placed at its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    /// Top-left corner at the anchor.
    #[default]
    NW,
    /// Top-right corner at the anchor.
    NE,
    /// Bottom-left corner at the anchor.
    SW,
    /// Bottom-right corner at the anchor.
    SE,
}

impl Anchor {
    /// Parse the editor's anchor name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "NW" => Some(Self::NW),
            "NE" => Some(Self::NE),
            "SW" => Some(Self::SW),
            "SE" => Some(Self::SE),
            _ => None,
        }
    }
}

/// Placement data of a floating window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatData {
    /// Which corner sits on the anchor point.
    pub anchor: Anchor,
    /// Grid the anchor point is relative to.
    pub anchor_grid: GridId,
    /// Anchor row, relative to the anchor grid's window.
    pub anchor_row: f32,
    /// Anchor column, relative to the anchor grid's window.
    pub anchor_col: f32,
    /// Whether the window can take focus.
    pub focusable: bool,
    /// Stacking order; higher is drawn on top.
    pub zindex: u64,
}

/// What kind of window this is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WinKind {
    /// A tiled window.
    Normal,
    /// A floating window drawn above tiled ones.
    Floating(FloatData),
    /// The message area window.
    Message {
        /// Whether the message area is scrolled over the tiled windows.
        scrolled: bool,
    },
}

/// Fixed rows/columns at the window edges that do not scroll (winbar,
/// gutters).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    /// Rows fixed at the top.
    pub top: f32,
    /// Rows fixed at the bottom.
    pub bottom: f32,
    /// Columns fixed on the left.
    pub left: f32,
    /// Columns fixed on the right.
    pub right: f32,
}

/// Buffer lines visible in the window, as last reported by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// First visible buffer line.
    pub topline: u64,
    /// Line after the last visible one.
    pub botline: u64,
    /// Cursor line.
    pub curline: u64,
    /// Cursor column.
    pub curcol: u64,
    /// Total lines in the buffer.
    pub line_count: u64,
}

/// An in-flight scroll cross-fade.
///
/// The renderer blends `snapshot` (what was on screen before the scroll)
/// with the live grid, offsetting both by the remaining distance.
#[derive(Debug, Clone)]
pub struct ScrollTransition {
    /// Total scroll distance in pixels; positive scrolls content up.
    pub distance: f32,
    /// Seconds since the transition was armed.
    pub elapsed: f32,
    /// Length of the transition in seconds.
    pub duration: f32,
    /// Last presented content of the window, if the renderer recorded one.
    pub snapshot: Option<GridSnapshot>,
}

impl ScrollTransition {
    /// Completion in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Pixel offset still to be covered.
    pub fn remaining(&self) -> f32 {
        self.distance * (1.0 - self.progress())
    }

    /// Whether the transition has run its full duration.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// A window, keyed in the [`WinManager`](super::WinManager) by the grid it
/// shows.
///
/// `grid_id` is a lookup key, not a reference: the grid can be destroyed
/// independently, so every access re-validates it.
#[derive(Debug, Clone)]
pub struct Win {
    /// Editor-side window handle (0 for the implicit base window).
    pub handle: WinHandle,
    /// Grid this window shows.
    pub grid_id: GridId,
    /// Position and size in cells on the composed surface.
    pub rect: Rect,
    /// Hidden windows keep their grid binding but are not drawn.
    pub hidden: bool,
    /// Normal, floating or message window.
    pub kind: WinKind,
    /// Non-scrolling edge rows/columns.
    pub margins: Margins,
    /// Last reported viewport.
    pub viewport: Option<Viewport>,
    /// Scroll cross-fade in progress, if any.
    pub scroll: Option<ScrollTransition>,
    /// Content the renderer last presented for this window.
    pub last_render: Option<GridSnapshot>,
    /// Topline movement not yet turned into a transition.
    pub(super) pending_scroll: i64,
    /// Registration order, used to stack floats of equal z-index.
    pub(super) seq: u64,
}

impl Win {
    pub(super) fn new(
        handle: WinHandle,
        grid_id: GridId,
        rect: Rect,
        kind: WinKind,
        seq: u64,
    ) -> Self {
        Self {
            handle,
            grid_id,
            rect,
            hidden: false,
            kind,
            margins: Margins::default(),
            viewport: None,
            scroll: None,
            last_render: None,
            pending_scroll: 0,
            seq,
        }
    }

    /// First row on the composed surface.
    #[inline]
    pub const fn start_row(&self) -> u16 {
        self.rect.row
    }

    /// First column on the composed surface.
    #[inline]
    pub const fn start_col(&self) -> u16 {
        self.rect.col
    }

    /// Width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.rect.width
    }

    /// Height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.rect.height
    }

    /// Float placement, if this is a floating window.
    pub const fn float_data(&self) -> Option<&FloatData> {
        match &self.kind {
            WinKind::Floating(data) => Some(data),
            _ => None,
        }
    }

    /// Whether this is a floating window.
    pub const fn is_floating(&self) -> bool {
        matches!(self.kind, WinKind::Floating(_))
    }

    /// Whether this is the message window.
    pub const fn is_message(&self) -> bool {
        matches!(self.kind, WinKind::Message { .. })
    }

    /// Whether a scroll transition is running.
    pub const fn is_scrolling(&self) -> bool {
        self.scroll.is_some()
    }
}
