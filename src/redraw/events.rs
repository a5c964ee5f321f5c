//! Redraw events: the closed set of notifications the editor sends.

use super::value::Value;
use crate::grid::{GridId, Run};
use crate::window::{FloatData, Margins, Viewport, WinHandle};

/// Decoded property map (highlight attributes, mode info).
pub type Properties = Vec<(String, Value)>;

/// When an event is applied during frame processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventClass {
    /// Applied in place, in arrival order.
    Immediate,
    /// Buffered and replayed against the grids at flush.
    Grid,
    /// Buffered and replayed against the windows at flush, after grids.
    Window,
    /// End of frame.
    Flush,
}

/// One redraw notification.
#[derive(Debug, Clone, PartialEq)]
pub enum RedrawEvent {
    /// Window title.
    SetTitle {
        /// New title.
        title: String,
    },
    /// Iconified window title.
    SetIcon {
        /// New icon title.
        icon: String,
    },
    /// Replace the mode list.
    ModeInfoSet {
        /// Whether the editor wants the cursor style applied.
        cursor_style_enabled: bool,
        /// One property map per mode, in mode-index order.
        modes: Vec<Properties>,
    },
    /// An editor option changed.
    OptionSet {
        /// Option name.
        name: String,
        /// New value.
        value: Value,
    },
    /// Working directory changed.
    Chdir {
        /// New directory.
        path: String,
    },
    /// Editor switched mode.
    ModeChange {
        /// Mode name.
        name: String,
        /// Index into the mode list.
        index: usize,
    },
    /// Mouse support enabled.
    MouseOn,
    /// Mouse support disabled.
    MouseOff,
    /// Editor is busy; hide the cursor.
    BusyStart,
    /// Editor is no longer busy.
    BusyStop,
    /// Menus changed.
    UpdateMenu,
    /// Default colors, as packed 24-bit RGB.
    DefaultColorsSet {
        /// Default foreground.
        foreground: i64,
        /// Default background.
        background: i64,
        /// Default special color.
        special: i64,
    },
    /// Define (or redefine) a highlight.
    HlAttrDefine {
        /// Highlight id.
        id: u32,
        /// Attribute map.
        attrs: Properties,
    },
    /// Bind a highlight group name to an id.
    HlGroupSet {
        /// Group name.
        name: String,
        /// Highlight id.
        hl_id: u32,
    },

    /// Create or resize a grid.
    GridResize {
        /// Grid.
        grid: GridId,
        /// Columns.
        width: u16,
        /// Rows.
        height: u16,
    },
    /// Blank a grid.
    GridClear {
        /// Grid.
        grid: GridId,
    },
    /// Move a grid's cursor.
    GridCursorGoto {
        /// Grid.
        grid: GridId,
        /// Row.
        row: u16,
        /// Column.
        col: u16,
    },
    /// Update part of one grid row.
    GridLine {
        /// Grid.
        grid: GridId,
        /// Row.
        row: u16,
        /// First column written.
        col_start: u16,
        /// Cell runs, left to right.
        runs: Vec<Run>,
    },
    /// Shift a region of a grid.
    GridScroll {
        /// Grid.
        grid: GridId,
        /// First row of the region.
        top: u16,
        /// Row after the region.
        bottom: u16,
        /// First column of the region.
        left: u16,
        /// Column after the region.
        right: u16,
        /// Rows to shift up (negative shifts down).
        rows: i32,
        /// Columns to shift left (negative shifts right).
        cols: i32,
    },
    /// Remove a grid.
    GridDestroy {
        /// Grid.
        grid: GridId,
    },

    /// Position a normal window.
    WinPos {
        /// Grid shown by the window.
        grid: GridId,
        /// Editor window handle.
        win: WinHandle,
        /// Row on the base grid.
        start_row: u16,
        /// Column on the base grid.
        start_col: u16,
        /// Columns.
        width: u16,
        /// Rows.
        height: u16,
    },
    /// Position a floating window.
    WinFloatPos {
        /// Grid shown by the window.
        grid: GridId,
        /// Editor window handle.
        win: WinHandle,
        /// Anchor placement.
        float: FloatData,
    },
    /// Show a window as an external top-level window.
    WinExternalPos {
        /// Grid shown by the window.
        grid: GridId,
        /// Editor window handle.
        win: WinHandle,
    },
    /// Hide a window.
    WinHide {
        /// Grid shown by the window.
        grid: GridId,
    },
    /// Close a window.
    WinClose {
        /// Grid shown by the window.
        grid: GridId,
    },
    /// Position the message window.
    MsgSetPos {
        /// Message grid.
        grid: GridId,
        /// Row on the base grid.
        row: u16,
        /// Whether messages scrolled over the tiled windows.
        scrolled: bool,
        /// Separator character drawn above the message area.
        sep_char: String,
    },
    /// Visible buffer range of a window.
    WinViewport {
        /// Grid shown by the window.
        grid: GridId,
        /// Editor window handle.
        win: WinHandle,
        /// Viewport data.
        viewport: Viewport,
    },
    /// Fixed margins of a window.
    WinViewportMargins {
        /// Grid shown by the window.
        grid: GridId,
        /// Editor window handle.
        win: WinHandle,
        /// Margins in cells.
        margins: Margins,
    },
    /// Extmark placed in a window.
    WinExtmark {
        /// Grid shown by the window.
        grid: GridId,
        /// Editor window handle.
        win: WinHandle,
    },

    /// End of an atomic frame.
    Flush,
    /// An event kind the decoder did not recognize.
    Unknown {
        /// Event name as sent.
        name: String,
    },
}

impl RedrawEvent {
    /// Processing class of this event.
    pub const fn class(&self) -> EventClass {
        match self {
            Self::GridResize { .. }
            | Self::GridClear { .. }
            | Self::GridCursorGoto { .. }
            | Self::GridLine { .. }
            | Self::GridScroll { .. }
            | Self::GridDestroy { .. } => EventClass::Grid,
            Self::WinPos { .. }
            | Self::WinFloatPos { .. }
            | Self::WinExternalPos { .. }
            | Self::WinHide { .. }
            | Self::WinClose { .. }
            | Self::MsgSetPos { .. }
            | Self::WinViewport { .. }
            | Self::WinViewportMargins { .. }
            | Self::WinExtmark { .. } => EventClass::Window,
            Self::Flush => EventClass::Flush,
            _ => EventClass::Immediate,
        }
    }

    /// Protocol name of the event.
    pub fn name(&self) -> &str {
        match self {
            Self::SetTitle { .. } => "set_title",
            Self::SetIcon { .. } => "set_icon",
            Self::ModeInfoSet { .. } => "mode_info_set",
            Self::OptionSet { .. } => "option_set",
            Self::Chdir { .. } => "chdir",
            Self::ModeChange { .. } => "mode_change",
            Self::MouseOn => "mouse_on",
            Self::MouseOff => "mouse_off",
            Self::BusyStart => "busy_start",
            Self::BusyStop => "busy_stop",
            Self::UpdateMenu => "update_menu",
            Self::DefaultColorsSet { .. } => "default_colors_set",
            Self::HlAttrDefine { .. } => "hl_attr_define",
            Self::HlGroupSet { .. } => "hl_group_set",
            Self::GridResize { .. } => "grid_resize",
            Self::GridClear { .. } => "grid_clear",
            Self::GridCursorGoto { .. } => "grid_cursor_goto",
            Self::GridLine { .. } => "grid_line",
            Self::GridScroll { .. } => "grid_scroll",
            Self::GridDestroy { .. } => "grid_destroy",
            Self::WinPos { .. } => "win_pos",
            Self::WinFloatPos { .. } => "win_float_pos",
            Self::WinExternalPos { .. } => "win_external_pos",
            Self::WinHide { .. } => "win_hide",
            Self::WinClose { .. } => "win_close",
            Self::MsgSetPos { .. } => "msg_set_pos",
            Self::WinViewport { .. } => "win_viewport",
            Self::WinViewportMargins { .. } => "win_viewport_margins",
            Self::WinExtmark { .. } => "win_extmark",
            Self::Flush => "flush",
            Self::Unknown { name } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(RedrawEvent::GridClear { grid: 1 }.class(), EventClass::Grid);
        assert_eq!(RedrawEvent::WinHide { grid: 2 }.class(), EventClass::Window);
        assert_eq!(RedrawEvent::MouseOn.class(), EventClass::Immediate);
        assert_eq!(RedrawEvent::Flush.class(), EventClass::Flush);
        assert_eq!(
            RedrawEvent::Unknown { name: "x".into() }.class(),
            EventClass::Immediate
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(RedrawEvent::BusyStart.name(), "busy_start");
        assert_eq!(
            RedrawEvent::Unknown {
                name: "grid_frobnicate".into()
            }
            .name(),
            "grid_frobnicate"
        );
    }
}
