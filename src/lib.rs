//! Library exports for the feedback widget, its host binary, benchmarks and tests.
/// Per-user application directories.
pub mod app_dirs;
/// Widget configuration.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Report model, payload formatting and delivery.
pub mod feedback;
/// Shared HTTP agent.
pub(crate) mod http_client;
/// Tracing setup.
pub mod logging;

pub use config::WidgetConfig;
pub use egui_app::FeedbackWidget;
