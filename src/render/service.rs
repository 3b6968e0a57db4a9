//! Render coordination helpers.
//!
//! Provides the state machine that mediates between input actions, rotation events and view
//! updates. `Application::run` owns the loop and calls into this on every event.

use crate::input::InputAction;
use crate::render::ui::ViewState;
use crate::rotator::Rotation;

/// Tracks render-related state that must persist across events.
#[derive(Debug)]
pub struct RenderLoopState {
    /// Set whenever the view changed since the last frame
    dirty: bool,
}

impl RenderLoopState {
    pub fn new() -> Self {
        // Draw the first frame unconditionally.
        Self { dirty: true }
    }

    /// Whether a redraw is pending.
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Mark the pending redraw as done.
    pub fn mark_drawn(&mut self) {
        self.dirty = false;
    }

    /// Apply an input action. Returns false when the loop should stop.
    pub fn process_action(&mut self, action: InputAction, view_state: &mut ViewState) -> bool {
        match action {
            InputAction::Quit => false,
            InputAction::Resize { width, height } => {
                if view_state.update_terminal_size(width, height) {
                    self.dirty = true;
                }
                true
            }
            InputAction::NoAction => true,
        }
    }

    /// Apply a completed transition.
    pub fn apply_rotation(&mut self, rotation: Rotation, view_state: &mut ViewState) {
        view_state.apply_rotation(rotation);
        self.dirty = true;
    }
}

impl Default for RenderLoopState {
    fn default() -> Self {
        Self::new()
    }
}
