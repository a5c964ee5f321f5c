//! Rgba: normalized color as handed to the renderer.

/// Color with `f32` channels in `[0, 1]`.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Rgba {
    /// Create a new color.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Decode a packed 24-bit RGB integer (e.g. `0xFF5500`).
    ///
    /// Only the low 24 bits are read, so out-of-range values (including the
    /// editor's `-1` for "unset") are masked rather than rejected. Alpha is
    /// always 1.
    #[inline]
    pub fn from_packed(value: i64) -> Self {
        Self::new(
            ((value >> 16) & 0xFF) as f32 / 255.0,
            ((value >> 8) & 0xFF) as f32 / 255.0,
            (value & 0xFF) as f32 / 255.0,
            1.0,
        )
    }
}

impl std::fmt::Debug for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}/{:.2}",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            self.a
        )
    }
}

impl From<(f32, f32, f32, f32)> for Rgba {
    #[inline]
    fn from((r, g, b, a): (f32, f32, f32, f32)) -> Self {
        Self::new(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_packed() {
        assert_eq!(Rgba::from_packed(0xFF0000), Rgba::new(1.0, 0.0, 0.0, 1.0));
        let c = Rgba::from_packed(0x0080FF);
        assert_eq!(c.r, 0.0);
        assert!((c.g - 128.0 / 255.0).abs() < f32::EPSILON);
        assert_eq!(c.b, 1.0);
    }

    #[test]
    fn test_from_packed_masks_garbage() {
        assert_eq!(Rgba::from_packed(-1), Rgba::WHITE);
        assert_eq!(Rgba::from_packed(0x7F00_0000), Rgba::BLACK);
    }

    #[test]
    fn test_debug_hex() {
        assert_eq!(format!("{:?}", Rgba::from_packed(0x102030)), "#102030/1.00");
    }
}
