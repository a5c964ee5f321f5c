//! Engine: the fixed-rate drain → animate → render loop.
//!
//! The engine owns the editor state behind one coarse lock and runs on its
//! own thread, paced by a [`TickerActor`]. Each tick it applies every frame
//! complete at that moment, advances animations and calls the renderer,
//! all under the lock. Resize and mouse queries from the window-system
//! thread take the same lock.

use super::renderer::Renderer;
use super::ticker::TickerActor;
use crate::config::EngineConfig;
use crate::editor::EditorState;
use crate::grid::GridId;
use crate::layout::{Sizes, Vec2};
use crate::redraw::{FrameReceiver, RedrawEventProcessor};
use crate::window::MouseInfo;
use crossbeam_channel::RecvTimeoutError;
use parking_lot::Mutex;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// Handle to the running engine thread.
///
/// Dropping the handle stops the loop and waits for it.
#[derive(Debug)]
pub struct Engine {
    state: Arc<Mutex<EditorState>>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Engine {
    /// Start the engine thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine or ticker thread cannot be spawned.
    pub fn spawn<R>(
        config: &EngineConfig,
        sizes: Sizes,
        frames: FrameReceiver,
        renderer: R,
    ) -> io::Result<Self>
    where
        R: Renderer + 'static,
    {
        let state = Arc::new(Mutex::new(EditorState::new(sizes, &config.animation)));
        let shutdown = Arc::new(AtomicBool::new(false));
        let ticker = TickerActor::spawn(config.frame_interval())?;

        let loop_state = state.clone();
        let loop_shutdown = shutdown.clone();
        let handle = thread::Builder::new()
            .name("gridline-engine".to_string())
            .spawn(move || {
                Self::run_loop(&loop_state, &frames, renderer, &loop_shutdown, &ticker);
                ticker.join();
            })?;

        info!(fps = config.target_fps, "engine started");
        Ok(Self {
            state,
            shutdown,
            handle: Some(handle),
        })
    }

    /// Shared handle to the editor state.
    pub fn state(&self) -> Arc<Mutex<EditorState>> {
        self.state.clone()
    }

    /// Run `f` with the state locked.
    pub fn with_state<T>(&self, f: impl FnOnce(&mut EditorState) -> T) -> T {
        f(&mut self.state.lock())
    }

    /// Apply a surface resize, DPI or font change.
    pub fn resize(&self, size: Vec2, dpi_scale: f32, char_size: Vec2) {
        self.state.lock().resize(size, dpi_scale, char_size);
    }

    /// Grid cell under a pixel position.
    pub fn mouse_info(&self, pos: Vec2, grid: Option<GridId>) -> Option<MouseInfo> {
        self.state.lock().mouse_info(pos, grid)
    }

    /// Whether the loop is still running.
    pub fn is_running(&self) -> bool {
        !self.shutdown.load(Ordering::SeqCst)
    }

    /// Ask the loop to stop after the current tick.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn join(mut self) {
        self.stop_and_wait();
    }

    fn stop_and_wait(&mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop<R: Renderer>(
        state: &Mutex<EditorState>,
        frames: &FrameReceiver,
        mut renderer: R,
        shutdown: &AtomicBool,
        ticker: &TickerActor,
    ) {
        let mut processor = RedrawEventProcessor::new();

        while !shutdown.load(Ordering::SeqCst) {
            let tick = match ticker.receiver().recv_timeout(std::time::Duration::from_millis(100)) {
                Ok(tick) => tick,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            };

            {
                let mut state = state.lock();
                processor.drain(&mut state, frames);
                state.update(tick.delta.as_secs_f32());
                renderer.render(&mut state);
            }

            if frames.is_exhausted() {
                info!("frame source lost, stopping engine");
                shutdown.store(true, Ordering::SeqCst);
            }
        }
        debug!(frames = processor.frames_applied(), "engine loop exited");
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop_and_wait();
    }
}
