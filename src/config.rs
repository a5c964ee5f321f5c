//! Configuration for the engine loop and animations.

use crate::cursor::{DEFAULT_CORNER_TIME, DEFAULT_JUMP_TIME};

/// Animation durations, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    /// Time for the cursor to travel to a new cell.
    pub cursor_jump_time: f32,
    /// Time for the cursor corners to settle after a move or shape change.
    pub cursor_corner_time: f32,
    /// Length of a scroll cross-fade.
    pub scroll_time: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            cursor_jump_time: DEFAULT_JUMP_TIME,
            cursor_corner_time: DEFAULT_CORNER_TIME,
            scroll_time: 0.3,
        }
    }
}

/// Configuration for the [`Engine`](crate::actor::Engine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Target frames per second of the drain/animate/render loop.
    pub target_fps: u32,
    /// Animation durations.
    pub animation: AnimationConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            animation: AnimationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Interval between ticks. A zero rate is treated as 1 fps.
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.target_fps.max(1)
    }
}
