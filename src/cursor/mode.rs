//! Mode info: per-mode cursor appearance announced by the editor.

/// Shape of the cursor in a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    /// Full cell.
    Block,
    /// Horizontal bar at the bottom of the cell.
    Horizontal,
    /// Vertical bar at the left of the cell.
    Vertical,
    /// Not drawn.
    #[default]
    None,
}

impl CursorShape {
    /// Parse the editor's shape name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "block" => Some(Self::Block),
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }
}

/// Cursor appearance for one editor mode. Immutable once appended to the
/// mode list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModeInfo {
    /// Mode name, e.g. `"normal"`.
    pub name: String,
    /// Short mode name, e.g. `"n"`.
    pub short_name: String,
    /// Cursor shape.
    pub cursor_shape: CursorShape,
    /// Percentage of the cell covered by bar shapes.
    pub cell_percentage: Option<u8>,
    /// Delay before blinking starts, in milliseconds.
    pub blinkwait: u64,
    /// Time the cursor is shown while blinking, in milliseconds.
    pub blinkon: u64,
    /// Time the cursor is hidden while blinking, in milliseconds.
    pub blinkoff: u64,
    /// Highlight id for the cursor colors.
    pub attr_id: Option<u32>,
}

impl ModeInfo {
    /// Blinking is disabled when any of the three timings is zero.
    pub const fn blinks(&self) -> bool {
        self.blinkwait != 0 && self.blinkon != 0 && self.blinkoff != 0
    }

    /// Fraction of the cell covered by bar shapes, in `(0, 1]`.
    pub fn cell_fraction(&self) -> f32 {
        self.cell_percentage
            .filter(|p| *p > 0)
            .map_or(1.0, |p| f32::from(p.min(100)) / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_from_name() {
        assert_eq!(CursorShape::from_name("vertical"), Some(CursorShape::Vertical));
        assert_eq!(CursorShape::from_name("beam"), None);
        assert_eq!(CursorShape::default(), CursorShape::None);
    }

    #[test]
    fn test_blinks() {
        let mut mode = ModeInfo {
            blinkwait: 700,
            blinkon: 400,
            blinkoff: 250,
            ..ModeInfo::default()
        };
        assert!(mode.blinks());
        mode.blinkoff = 0;
        assert!(!mode.blinks());
    }

    #[test]
    fn test_cell_fraction() {
        let mut mode = ModeInfo::default();
        assert_eq!(mode.cell_fraction(), 1.0);
        mode.cell_percentage = Some(25);
        assert_eq!(mode.cell_fraction(), 0.25);
        mode.cell_percentage = Some(0);
        assert_eq!(mode.cell_fraction(), 1.0);
    }
}
