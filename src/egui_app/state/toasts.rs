use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastTone {
    Success,
    Error,
}

/// A transient notification shown after a submission finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub tone: ToastTone,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>, tone: ToastTone) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tone,
            shown_at: Instant::now(),
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= TOAST_DURATION
    }
}
