use crate::config::IntegrationType;
use crate::feedback::{DeliveryOutcome, FeedbackReport, FeedbackTransport, TransportError};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

/// Everything a background submission needs, moved onto the worker thread.
#[derive(Debug)]
pub(crate) struct SubmissionJob {
    pub(crate) report: FeedbackReport,
    pub(crate) integration: IntegrationType,
    pub(crate) url: String,
    pub(crate) transport: FeedbackTransport,
}

#[derive(Debug)]
pub(crate) struct SubmissionResult {
    pub(crate) result: Result<DeliveryOutcome, TransportError>,
}

/// Runs at most one submission at a time and hands results back to the UI thread.
pub(crate) struct ControllerJobs {
    message_tx: Sender<SubmissionResult>,
    message_rx: Receiver<SubmissionResult>,
    pub(super) submission_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<SubmissionResult>();
        Self {
            message_tx,
            message_rx,
            submission_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<SubmissionResult, TryRecvError> {
        self.message_rx.try_recv()
    }

    /// Start delivering `job` on a worker thread. Ignored while another runs.
    pub(super) fn begin_submission(&mut self, job: SubmissionJob) -> bool {
        if self.submission_in_progress {
            return false;
        }
        self.submission_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = job.transport.send(&job.report, job.integration, &job.url);
            let _ = tx.send(SubmissionResult { result });
        });
        true
    }

    pub(super) fn clear_submission(&mut self) {
        self.submission_in_progress = false;
    }
}
