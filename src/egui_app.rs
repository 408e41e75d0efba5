//! Embeddable egui feedback widget.

/// Form state machine and submission jobs.
pub mod controller;
/// Plain data consumed by the renderer.
pub mod state;
/// egui rendering.
pub mod ui;

pub use controller::FeedbackController;
pub use ui::FeedbackWidget;
