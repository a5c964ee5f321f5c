//! Redraw module: the event stream from the editor and its application.
//!
//! This module contains:
//! - [`RedrawEvent`]: The closed set of redraw notifications
//! - [`Value`]: Dynamic property values carried by some events
//! - [`frame_queue`]: Producer/consumer pair that moves complete frames
//! - [`RedrawEventProcessor`]: Two-phase application of frames to
//!   [`EditorState`](crate::EditorState)

mod decode;
mod events;
mod processor;
mod queue;
mod value;

pub use decode::{decode_highlight, decode_mode_info};
pub use events::{EventClass, Properties, RedrawEvent};
pub use processor::RedrawEventProcessor;
pub use queue::{frame_queue, Frame, FrameReceiver, FrameSender, QueueClosed};
pub use value::Value;
