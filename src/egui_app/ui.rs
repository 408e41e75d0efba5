//! egui rendering for the feedback widget (trigger, modal, notifications).

mod feedback_form;
mod overlay_layers;
pub mod style;
mod toasts;
mod trigger;

use crate::config::WidgetConfig;
use crate::egui_app::controller::FeedbackController;
use crate::feedback::FeedbackTransport;
use eframe::egui;
use std::time::Duration;

/// Frame interval requested while a submission or notification is live.
const LIVE_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Embeddable feedback widget; call [`FeedbackWidget::show`] every frame.
pub struct FeedbackWidget {
    controller: FeedbackController,
}

impl FeedbackWidget {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            controller: FeedbackController::new(config),
        }
    }

    /// Widget delivering through a custom transport.
    pub fn with_transport(config: WidgetConfig, transport: FeedbackTransport) -> Self {
        Self {
            controller: FeedbackController::with_transport(config, transport),
        }
    }

    /// Register a callback fired every time the modal closes.
    pub fn on_close(mut self, callback: impl FnMut() + 'static) -> Self {
        self.controller.set_on_close(callback);
        self
    }

    pub fn controller(&self) -> &FeedbackController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FeedbackController {
        &mut self.controller
    }

    /// Render the widget above whatever the host drew this frame.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.controller.poll_background_jobs();
        self.render_trigger(ctx);
        self.render_feedback_form(ctx);
        self.render_toasts(ctx);
        if self.controller.is_submitting() || !self.controller.ui.toasts.is_empty() {
            ctx.request_repaint_after(LIVE_REPAINT_INTERVAL);
        }
    }
}
