use super::FeedbackController;
use super::jobs::SubmissionResult;
use crate::egui_app::state::{FormPhase, ToastTone};

pub(super) fn handle_submission_finished(
    controller: &mut FeedbackController,
    message: SubmissionResult,
) {
    controller.jobs.clear_submission();
    match message.result {
        Ok(outcome) => {
            tracing::info!(?outcome, "Feedback submitted");
            controller.ui.form.phase = FormPhase::SubmittedOk;
            controller.push_toast(
                "Feedback Sent",
                "Thank you for your feedback!",
                ToastTone::Success,
            );
            controller.discard_and_close();
        }
        Err(err) => {
            tracing::warn!("Error submitting feedback: {err}");
            controller.ui.form.phase = FormPhase::SubmittedError;
            controller.push_toast(
                "Something went wrong",
                "Please try again later.",
                ToastTone::Error,
            );
        }
    }
}
