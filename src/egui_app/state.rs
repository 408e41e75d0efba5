//! Shared state types for the feedback widget UI.

mod feedback_form;
mod toasts;

pub use feedback_form::*;
pub use toasts::*;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub form: FeedbackFormState,
    /// Visible notifications, oldest first.
    pub toasts: Vec<Toast>,
}
