//! Size-derived geometry shared by windows, cursor and input mapping.
//!
//! Recomputed on window resize and DPI changes. The engine does this under
//! the same lock as frame application so a frame never observes a half
//! updated set of sizes.

use super::rect::Vec2;

/// Pixel metrics of the drawable surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizes {
    /// Surface size in logical pixels.
    pub size: Vec2,
    /// Physical pixels per logical pixel.
    pub dpi_scale: f32,
    /// Size of one grid cell in logical pixels.
    pub char_size: Vec2,
    /// Columns that fit on the surface.
    pub ui_width: u16,
    /// Rows that fit on the surface.
    pub ui_height: u16,
    /// Top-left of the grid area, centering leftover pixels.
    pub offset: Vec2,
}

impl Default for Sizes {
    fn default() -> Self {
        Self::new(Vec2::new(800.0, 600.0), 1.0, Vec2::new(10.0, 20.0))
    }
}

impl Sizes {
    /// Compute all metrics for a surface.
    pub fn new(size: Vec2, dpi_scale: f32, char_size: Vec2) -> Self {
        let mut sizes = Self {
            size,
            dpi_scale,
            char_size,
            ui_width: 0,
            ui_height: 0,
            offset: Vec2::ZERO,
        };
        sizes.update(size, dpi_scale, char_size);
        sizes
    }

    /// Recompute after a resize, DPI change or font change.
    pub fn update(&mut self, size: Vec2, dpi_scale: f32, char_size: Vec2) {
        self.size = size;
        self.dpi_scale = dpi_scale;
        self.char_size = char_size;

        if char_size.x <= 0.0 || char_size.y <= 0.0 {
            self.ui_width = 0;
            self.ui_height = 0;
            self.offset = Vec2::ZERO;
            return;
        }

        self.ui_width = (size.x / char_size.x).floor().clamp(0.0, f32::from(u16::MAX)) as u16;
        self.ui_height = (size.y / char_size.y).floor().clamp(0.0, f32::from(u16::MAX)) as u16;
        self.offset = ((size - self.ui_size()) / 2.0).floor();
    }

    /// Pixel size of the grid area.
    pub fn ui_size(&self) -> Vec2 {
        Vec2::new(
            f32::from(self.ui_width) * self.char_size.x,
            f32::from(self.ui_height) * self.char_size.y,
        )
    }

    /// Surface size in physical pixels.
    pub fn fb_size(&self) -> Vec2 {
        self.size * self.dpi_scale
    }

    /// Top-left pixel of a cell position, offset included.
    pub fn cell_to_pixel(&self, row: f32, col: f32) -> Vec2 {
        self.offset + Vec2::new(col * self.char_size.x, row * self.char_size.y)
    }

    /// Fractional `(row, col)` under a pixel position, offset removed.
    pub fn pixel_to_cell(&self, pos: Vec2) -> (f32, f32) {
        if self.char_size.x <= 0.0 || self.char_size.y <= 0.0 {
            return (0.0, 0.0);
        }
        let local = pos - self.offset;
        (local.y / self.char_size.y, local.x / self.char_size.x)
    }
}
