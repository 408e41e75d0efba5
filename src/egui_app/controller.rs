//! Form state controller bridging the feedback pipeline to the egui UI.

mod feedback_form;
mod jobs;
mod updates;


use crate::config::WidgetConfig;
use crate::egui_app::state::{FeedbackFormState, Toast, ToastTone, UiState};
use crate::feedback::FeedbackTransport;
use jobs::ControllerJobs;
use std::time::Instant;

/// Callback invoked every time the modal closes.
pub type CloseCallback = Box<dyn FnMut()>;

/// Owns the in-progress submission and drives formatting and delivery.
pub struct FeedbackController {
    pub ui: UiState,
    config: WidgetConfig,
    transport: FeedbackTransport,
    jobs: ControllerJobs,
    on_close: Option<CloseCallback>,
}

impl FeedbackController {
    /// Controller delivering over HTTP with the shared agent.
    pub fn new(config: WidgetConfig) -> Self {
        Self::with_transport(config, FeedbackTransport::default())
    }

    /// Controller delivering through `transport`.
    pub fn with_transport(config: WidgetConfig, transport: FeedbackTransport) -> Self {
        let mut ui = UiState::default();
        ui.form = FeedbackFormState::new(config.locked_email());
        Self {
            ui,
            config,
            transport,
            jobs: ControllerJobs::new(),
            on_close: None,
        }
    }

    /// Register the host callback fired whenever the modal closes.
    pub fn set_on_close(&mut self, callback: impl FnMut() + 'static) {
        self.on_close = Some(Box::new(callback));
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn is_submitting(&self) -> bool {
        self.ui.form.is_submitting()
    }

    /// Drain finished background work and expire old notifications.
    pub fn poll_background_jobs(&mut self) {
        while let Ok(message) = self.jobs.try_recv_message() {
            updates::handle_submission_finished(self, message);
        }
        self.prune_toasts(Instant::now());
    }

    /// Remove the notification at `index`, if present.
    pub fn dismiss_toast(&mut self, index: usize) {
        if index < self.ui.toasts.len() {
            self.ui.toasts.remove(index);
        }
    }

    fn push_toast(&mut self, title: &str, description: &str, tone: ToastTone) {
        self.ui.toasts.push(Toast::new(title, description, tone));
    }

    fn prune_toasts(&mut self, now: Instant) {
        self.ui.toasts.retain(|toast| !toast.expired(now));
    }

    fn notify_closed(&mut self) {
        if let Some(callback) = self.on_close.as_mut() {
            callback();
        }
    }
}
