//! Actor Model: the threads that move frames from the editor to the screen.
//!
//! - **Transport** (outside this crate): decodes editor notifications and
//!   pushes them into a [`FrameSender`](crate::redraw::FrameSender)
//! - **Ticker**: paces the engine at the target frame rate
//! - **Engine**: drains complete frames, animates, renders
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Frame (crossbeam)   ┌──────────────────────────────┐
//! │  Transport   │ ────────────────────▶ │           Engine             │
//! └──────────────┘                       │  lock(EditorState)           │
//!                                        │    drain → update → render   │
//! ┌──────────────┐        Tick           │                              │
//! │    Ticker    │ ────────────────────▶ │                              │
//! └──────────────┘                       └──────────────────────────────┘
//!                                                      ▲
//!                              resize / mouse_info     │ same lock
//!                                        ┌─────────────┴┐
//!                                        │ Window system│
//!                                        └──────────────┘
//! ```

mod engine;
mod renderer;
mod ticker;

pub use engine::Engine;
pub use renderer::{HeadlessRenderer, Renderer};
pub use ticker::{Tick, TickerActor};
