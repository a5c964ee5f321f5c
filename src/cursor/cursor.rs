//! Cursor: animated position, shape and blink state.
//!
//! The cursor position and its four corners are interpolated separately.
//! Corners that lead in the direction of travel settle faster than trailing
//! ones, so a long jump stretches the box and then lets it catch up.

use super::mode::{CursorShape, ModeInfo};
use crate::highlight::{Colors, HighlightTable};
use crate::layout::Vec2;

/// Default duration of a position jump, in seconds.
pub const DEFAULT_JUMP_TIME: f32 = 0.06;
/// Default duration of the corner animation, in seconds.
pub const DEFAULT_CORNER_TIME: f32 = 0.06;

/// Fraction of `corner_time` the leading corner needs.
const LEADING_CORNER_FACTOR: f32 = 0.5;

/// Blink phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlinkState {
    /// Visible, waiting `blinkwait` before blinking starts.
    Wait,
    /// Visible for `blinkon`.
    On,
    /// Hidden for `blinkoff`.
    Off,
}

/// Corner points of the cursor box: top-left, top-right, bottom-right,
/// bottom-left.
pub type Corners = [Vec2; 4];

/// The single animated cursor.
#[derive(Debug, Clone)]
pub struct Cursor {
    mode: Option<ModeInfo>,
    active_mode_index: Option<usize>,
    cell_size: Vec2,

    start_pos: Vec2,
    dest_pos: Vec2,
    pos: Vec2,
    jump_time: f32,
    jump_elapsed: f32,

    start_corners: Corners,
    dest_corners: Corners,
    corners: Corners,
    corner_factors: [f32; 4],
    corner_time: f32,
    corner_elapsed: f32,

    blink_state: BlinkState,
    blink_elapsed: f32,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(Vec2::new(10.0, 20.0), DEFAULT_JUMP_TIME, DEFAULT_CORNER_TIME)
    }
}

impl Cursor {
    /// Create a cursor at the origin with no mode bound.
    pub fn new(cell_size: Vec2, jump_time: f32, corner_time: f32) -> Self {
        let corners = shape_corners(None, Vec2::ZERO, cell_size);
        Self {
            mode: None,
            active_mode_index: None,
            cell_size,
            start_pos: Vec2::ZERO,
            dest_pos: Vec2::ZERO,
            pos: Vec2::ZERO,
            jump_time,
            jump_elapsed: jump_time,
            start_corners: corners,
            dest_corners: corners,
            corners,
            corner_factors: [1.0; 4],
            corner_time,
            corner_elapsed: corner_time,
            blink_state: BlinkState::Wait,
            blink_elapsed: 0.0,
        }
    }

    /// Current interpolated position (top-left of the cell, in pixels).
    #[inline]
    pub const fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Position the cursor is moving towards.
    #[inline]
    pub const fn dest_pos(&self) -> Vec2 {
        self.dest_pos
    }

    /// Current interpolated corner points, in pixels.
    #[inline]
    pub const fn corners(&self) -> &Corners {
        &self.corners
    }

    /// Current blink phase.
    #[inline]
    pub const fn blink_state(&self) -> BlinkState {
        self.blink_state
    }

    /// The bound mode, if any.
    #[inline]
    pub const fn mode(&self) -> Option<&ModeInfo> {
        self.mode.as_ref()
    }

    /// Index of the bound mode in the editor's mode list.
    #[inline]
    pub const fn active_mode_index(&self) -> Option<usize> {
        self.active_mode_index
    }

    /// Whether the cursor has a drawable shape.
    pub fn can_render(&self) -> bool {
        self.mode
            .as_ref()
            .is_some_and(|m| m.cursor_shape != CursorShape::None)
    }

    /// Whether the cursor should be drawn this frame (shape and blink).
    pub fn is_visible(&self) -> bool {
        self.can_render() && self.blink_state != BlinkState::Off
    }

    /// Whether position or corners are still moving.
    pub fn is_animating(&self) -> bool {
        self.jump_elapsed < self.jump_time || self.corner_elapsed < self.corner_time
    }

    /// Move the target. A changed target restarts the animation from the
    /// current pose and restarts blinking.
    pub fn set_dest_pos(&mut self, dest: Vec2) {
        if dest == self.dest_pos {
            return;
        }
        self.start_pos = self.pos;
        self.start_corners = self.corners;
        self.dest_pos = dest;
        self.dest_corners = shape_corners(self.mode.as_ref(), dest, self.cell_size);
        self.corner_factors = corner_factors(&self.start_corners, &self.dest_corners);
        self.jump_elapsed = 0.0;
        self.corner_elapsed = 0.0;
        self.reset_blink();
    }

    /// Bind a mode. The target position is unchanged; the box animates to
    /// the new shape.
    pub fn set_mode(&mut self, index: usize, mode: ModeInfo) {
        self.mode = Some(mode);
        self.active_mode_index = Some(index);
        self.start_corners = self.corners;
        self.dest_corners = shape_corners(self.mode.as_ref(), self.dest_pos, self.cell_size);
        self.corner_factors = [1.0; 4];
        self.corner_elapsed = 0.0;
        self.reset_blink();
    }

    /// Update the cell size after a font or DPI change. The box snaps to
    /// the new size.
    pub fn set_cell_size(&mut self, cell_size: Vec2) {
        self.cell_size = cell_size;
        self.dest_corners = shape_corners(self.mode.as_ref(), self.dest_pos, cell_size);
        self.start_corners = self.dest_corners;
        self.corners = self.dest_corners;
        self.corner_elapsed = self.corner_time;
    }

    fn reset_blink(&mut self) {
        self.blink_state = BlinkState::Wait;
        self.blink_elapsed = 0.0;
    }

    /// Advance the animation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.jump_elapsed = (self.jump_elapsed + dt).min(self.jump_time);
        let t = fraction(self.jump_elapsed, self.jump_time);
        self.pos = self.start_pos.lerp(self.dest_pos, t);

        self.corner_elapsed = (self.corner_elapsed + dt).min(self.corner_time);
        for i in 0..4 {
            let t = fraction(self.corner_elapsed, self.corner_time * self.corner_factors[i]);
            self.corners[i] = self.start_corners[i].lerp(self.dest_corners[i], t);
        }

        self.update_blink(dt);
    }

    fn update_blink(&mut self, dt: f32) {
        let Some(mode) = self.mode.as_ref().filter(|m| m.blinks()) else {
            self.blink_state = BlinkState::On;
            return;
        };

        self.blink_elapsed += dt * 1000.0;
        loop {
            let phase = match self.blink_state {
                BlinkState::Wait => mode.blinkwait,
                BlinkState::On => mode.blinkon,
                BlinkState::Off => mode.blinkoff,
            } as f32;
            if self.blink_elapsed < phase {
                break;
            }
            self.blink_elapsed -= phase;
            self.blink_state = match self.blink_state {
                BlinkState::Wait | BlinkState::Off => BlinkState::On,
                BlinkState::On => BlinkState::Off,
            };
        }
    }

    /// Cursor colors from the mode's highlight. Without an attribute (or
    /// with id 0) the default colors are inverted.
    pub fn colors(&self, table: &HighlightTable) -> Colors {
        let default = table.colors(0);
        match self.mode.as_ref().and_then(|m| m.attr_id) {
            Some(id) if id != 0 => table.colors(id),
            _ => Colors {
                foreground: default.background,
                background: default.foreground,
                special: default.special,
            },
        }
    }
}

fn fraction(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

/// Box of the mode's shape for a cell whose top-left is `pos`.
fn shape_corners(mode: Option<&ModeInfo>, pos: Vec2, cell: Vec2) -> Corners {
    let (x0, y0, x1, y1) = match mode {
        Some(m) if m.cursor_shape == CursorShape::Horizontal => {
            (0.0, cell.y * (1.0 - m.cell_fraction()), cell.x, cell.y)
        }
        Some(m) if m.cursor_shape == CursorShape::Vertical => {
            (0.0, 0.0, cell.x * m.cell_fraction(), cell.y)
        }
        _ => (0.0, 0.0, cell.x, cell.y),
    };
    [
        pos + Vec2::new(x0, y0),
        pos + Vec2::new(x1, y0),
        pos + Vec2::new(x1, y1),
        pos + Vec2::new(x0, y1),
    ]
}

/// Per-corner duration factors: corners pointing along the direction of
/// travel get `LEADING_CORNER_FACTOR`, corners pointing away get 1.
fn corner_factors(start: &Corners, dest: &Corners) -> [f32; 4] {
    let center = |c: &Corners| (c[0] + c[2]) * 0.5;
    let travel = center(dest) - center(start);
    let distance = travel.length();
    if distance <= f32::EPSILON {
        return [1.0; 4];
    }
    let dir = travel / distance;
    let dest_center = center(dest);

    let mut factors = [1.0; 4];
    for (factor, corner) in factors.iter_mut().zip(dest) {
        let rel = *corner - dest_center;
        let len = rel.length();
        let alignment = if len <= f32::EPSILON {
            0.0
        } else {
            rel.dot(dir) / len
        };
        // alignment 1 → leading factor, alignment -1 → 1.0
        let lead = (alignment + 1.0) / 2.0;
        *factor = 1.0 - lead * (1.0 - LEADING_CORNER_FACTOR);
    }
    factors
}
