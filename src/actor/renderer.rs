//! Renderer seam: the engine hands the locked state to a renderer once per
//! tick.

use crate::editor::EditorState;

/// Draws the editor state.
///
/// Called on the engine thread with the state lock held, after pending
/// frames were applied and animations advanced. A renderer typically walks
/// [`WinManager::draw_order`](crate::WinManager::draw_order), draws dirty
/// grids and calls [`EditorState::mark_presented`] for each of them.
pub trait Renderer: Send {
    /// Draw one frame.
    fn render(&mut self, state: &mut EditorState);
}

impl<F> Renderer for F
where
    F: FnMut(&mut EditorState) + Send,
{
    fn render(&mut self, state: &mut EditorState) {
        self(state);
    }
}

/// Renderer that only acknowledges dirty grids. Useful for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessRenderer;

impl Renderer for HeadlessRenderer {
    fn render(&mut self, state: &mut EditorState) {
        let dirty: Vec<_> = state.grids.dirty_grids().map(crate::Grid::id).collect();
        for grid in dirty {
            state.mark_presented(grid);
        }
    }
}
