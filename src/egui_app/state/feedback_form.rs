use crate::feedback::{Attachment, FeedbackCategory, FieldErrors};

/// Lifecycle of one submission.
///
/// The finished phases accept input exactly like `Editing`; only
/// `Submitting` locks the form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    SubmittedOk,
    SubmittedError,
}

/// UI state for the feedback modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedbackFormState {
    /// Whether the modal is open.
    pub open: bool,
    pub phase: FormPhase,
    pub category: FeedbackCategory,
    pub email: String,
    /// Email supplied by the host; the field is read-only when set.
    pub locked_email: Option<String>,
    pub subject: String,
    pub message: String,
    /// Screenshot picked by the user, replaced on every new pick.
    pub attachment: Option<Attachment>,
    /// Inline validation and attachment messages.
    pub errors: FieldErrors,
    /// Whether to focus the first editable field on the next frame.
    pub focus_first_field_requested: bool,
}

impl FeedbackFormState {
    /// Fresh form, pre-filled with the host email when one is provided.
    pub fn new(locked_email: Option<&str>) -> Self {
        Self {
            email: locked_email.unwrap_or_default().to_string(),
            locked_email: locked_email.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn email_locked(&self) -> bool {
        self.locked_email.is_some()
    }

    /// Clear every field and the attachment, keeping the host email.
    pub fn clear_fields(&mut self) {
        self.category = FeedbackCategory::default();
        self.email = self.locked_email.clone().unwrap_or_default();
        self.subject.clear();
        self.message.clear();
        self.attachment = None;
        self.errors = FieldErrors::default();
    }
}
