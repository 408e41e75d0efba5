use super::jobs::SubmissionJob;
use super::*;
use crate::egui_app::state::FormPhase;
use crate::feedback::{Attachment, FeedbackDraft, FieldErrors};
use rfd::FileDialog;
use std::path::Path;

/// Extensions offered by the screenshot picker.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

impl FeedbackController {
    /// Open the modal with a fresh form.
    pub fn open_feedback_form(&mut self) {
        if self.ui.form.open {
            return;
        }
        self.ui.form = FeedbackFormState::new(self.config.locked_email());
        self.ui.form.open = true;
        self.ui.form.focus_first_field_requested = true;
        tracing::debug!("Feedback form opened");
    }

    /// Close the modal and discard everything typed so far.
    ///
    /// Refused while a submission is in flight; returns whether the modal closed.
    pub fn close_feedback_form(&mut self) -> bool {
        if !self.ui.form.open {
            return false;
        }
        if self.ui.form.is_submitting() {
            tracing::debug!("Ignoring close while feedback is being sent");
            return false;
        }
        self.discard_and_close();
        true
    }

    /// Validate the form and start delivering it in the background.
    ///
    /// Returns whether a submission was started.
    pub fn submit_feedback(&mut self) -> bool {
        let form = &mut self.ui.form;
        if !form.open || form.is_submitting() {
            return false;
        }
        let email = self
            .config
            .locked_email()
            .map(str::to_string)
            .unwrap_or_else(|| form.email.clone());
        let draft = FeedbackDraft {
            category: form.category,
            email: &email,
            subject: &form.subject,
            message: &form.message,
        };
        let mut report = match draft.validate() {
            Ok(report) => report,
            Err(errors) => {
                tracing::debug!("Feedback blocked by validation: {errors}");
                let attachment = form.errors.attachment.take();
                form.errors = FieldErrors {
                    attachment,
                    ..errors
                };
                form.phase = FormPhase::Editing;
                return false;
            }
        };
        report.attachment = form.attachment.clone();
        form.errors = Default::default();
        form.phase = FormPhase::Submitting;
        tracing::info!(
            category = report.category.wire_name(),
            attachment = report.has_attachment(),
            "Submitting feedback"
        );
        self.jobs.begin_submission(SubmissionJob {
            report,
            integration: self.config.integration_type,
            url: self.config.delivery_url().to_string(),
            transport: self.transport.clone(),
        })
    }

    /// Ask the user for a screenshot with the native file dialog.
    pub fn pick_screenshot(&mut self) {
        if !self.can_edit_attachment() {
            return;
        }
        let Some(path) = FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        self.attach_screenshot(&path);
    }

    /// Hold `path` as the screenshot, replacing any previous one.
    ///
    /// Returns whether the file was accepted.
    pub fn attach_screenshot(&mut self, path: &Path) -> bool {
        if !self.can_edit_attachment() {
            return false;
        }
        match Attachment::from_path(path) {
            Ok(attachment) => {
                tracing::debug!(
                    file = attachment.file_name(),
                    size = attachment.size_bytes(),
                    "Screenshot attached"
                );
                self.ui.form.attachment = Some(attachment);
                self.ui.form.errors.attachment = None;
                true
            }
            Err(err) => {
                tracing::warn!("Rejected screenshot {}: {err}", path.display());
                self.ui.form.errors.attachment = Some(err.to_string());
                false
            }
        }
    }

    pub fn remove_screenshot(&mut self) {
        if !self.can_edit_attachment() {
            return;
        }
        self.ui.form.attachment = None;
        self.ui.form.errors.attachment = None;
    }

    fn can_edit_attachment(&self) -> bool {
        self.ui.form.open && !self.ui.form.is_submitting()
    }

    pub(super) fn discard_and_close(&mut self) {
        self.ui.form.clear_fields();
        self.ui.form.open = false;
        self.ui.form.focus_first_field_requested = false;
        tracing::debug!("Feedback form closed");
        self.notify_closed();
    }
}
