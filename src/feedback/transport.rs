//! Best-effort delivery of formatted feedback to Slack or a generic webhook.
//!
//! Every delivery is a single POST. The remote status is treated as opaque:
//! any response counts as sent, and only a network-level failure is an error.
//! Without a usable `http(s)` URL the network is skipped entirely and the
//! delivery is reported as simulated.

use std::borrow::Cow;
use std::sync::Arc;

use url::Url;

use super::formatter::{self, WireMessage};
use super::FeedbackReport;
use crate::config::IntegrationType;
use crate::http_client;

/// Number of leading characters of an encoded screenshot written to the log.
const LOGGED_ATTACHMENT_PREFIX: usize = 50;

/// Result of a delivery that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The request went out and some response came back.
    Sent,
    /// No valid URL was configured; nothing was sent.
    Simulated,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
}

/// Sends a JSON message to a URL.
pub trait HttpPost: Send + Sync {
    /// POST `message` as JSON and return the response status.
    fn post_json(&self, url: &str, message: &WireMessage) -> Result<u16, TransportError>;
}

/// [`HttpPost`] backed by the shared ureq agent.
#[derive(Clone, Copy, Debug, Default)]
pub struct UreqPost;

impl HttpPost for UreqPost {
    fn post_json(&self, url: &str, message: &WireMessage) -> Result<u16, TransportError> {
        http_client::post_json(url, message).map_err(|err| TransportError::Network(err.to_string()))
    }
}

/// True when `url` parses as an absolute `http` or `https` URL with a host.
pub fn looks_like_http_url(url: &str) -> bool {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return false;
    }
    Url::parse(trimmed)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.has_host())
        .unwrap_or(false)
}

/// Formats reports and hands them to an [`HttpPost`] implementation.
#[derive(Clone)]
pub struct FeedbackTransport {
    poster: Arc<dyn HttpPost>,
}

impl Default for FeedbackTransport {
    fn default() -> Self {
        Self::new(Arc::new(UreqPost))
    }
}

impl std::fmt::Debug for FeedbackTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackTransport").finish_non_exhaustive()
    }
}

impl FeedbackTransport {
    pub fn new(poster: Arc<dyn HttpPost>) -> Self {
        Self { poster }
    }

    /// Send `report` to the target selected by `integration`.
    pub fn send(
        &self,
        report: &FeedbackReport,
        integration: IntegrationType,
        url: &str,
    ) -> Result<DeliveryOutcome, TransportError> {
        match integration {
            IntegrationType::Slack => self.send_to_slack(report, url),
            IntegrationType::Webhook => self.send_to_webhook(report, url),
        }
    }

    /// Format `report` as Slack blocks and post it to `webhook_url`.
    pub fn send_to_slack(
        &self,
        report: &FeedbackReport,
        webhook_url: &str,
    ) -> Result<DeliveryOutcome, TransportError> {
        self.send_formatted(report, IntegrationType::Slack, webhook_url)
    }

    /// Format `report` as a flat JSON object and post it to `webhook_url`.
    pub fn send_to_webhook(
        &self,
        report: &FeedbackReport,
        webhook_url: &str,
    ) -> Result<DeliveryOutcome, TransportError> {
        self.send_formatted(report, IntegrationType::Webhook, webhook_url)
    }

    /// Post an already formatted message.
    pub fn deliver(
        &self,
        message: &WireMessage,
        url: &str,
    ) -> Result<DeliveryOutcome, TransportError> {
        if !looks_like_http_url(url) {
            tracing::info!("No delivery URL configured; simulating a successful send");
            return Ok(DeliveryOutcome::Simulated);
        }
        match self.poster.post_json(url.trim(), message) {
            Ok(status) => {
                tracing::debug!(status, "Feedback delivered; response treated as opaque");
                Ok(DeliveryOutcome::Sent)
            }
            Err(err) => {
                tracing::error!("Failed to send feedback: {err}");
                Err(err)
            }
        }
    }

    fn send_formatted(
        &self,
        report: &FeedbackReport,
        provider: IntegrationType,
        url: &str,
    ) -> Result<DeliveryOutcome, TransportError> {
        if !looks_like_http_url(url) {
            tracing::info!(?provider, "No delivery URL configured; simulating a successful send");
            return Ok(DeliveryOutcome::Simulated);
        }
        let report = with_encoded_attachment(report);
        let message = formatter::format_now(&report, provider);
        self.deliver(&message, url)
    }
}

/// Encode the screenshot, dropping it from the report if encoding fails.
///
/// The encoded data never leaves the process; only its presence is reported.
fn with_encoded_attachment(report: &FeedbackReport) -> Cow<'_, FeedbackReport> {
    let Some(attachment) = report.attachment.as_ref() else {
        return Cow::Borrowed(report);
    };
    match attachment.encode_data_url() {
        Ok(encoded) => {
            let prefix: String = encoded.chars().take(LOGGED_ATTACHMENT_PREFIX).collect();
            tracing::debug!(
                file = attachment.file_name(),
                "Screenshot encoded but not uploaded: {prefix}..."
            );
            Cow::Borrowed(report)
        }
        Err(err) => {
            tracing::warn!("Error encoding screenshot, sending without it: {err}");
            let mut stripped = report.clone();
            stripped.attachment = None;
            Cow::Owned(stripped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{Attachment, FeedbackCategory, MAX_ATTACHMENT_BYTES};
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingPost {
        fail: bool,
        calls: Mutex<Vec<(String, WireMessage)>>,
    }

    impl HttpPost for RecordingPost {
        fn post_json(&self, url: &str, message: &WireMessage) -> Result<u16, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), message.clone()));
            if self.fail {
                Err(TransportError::Network("connection refused".into()))
            } else {
                Ok(200)
            }
        }
    }

    fn transport(fail: bool) -> (FeedbackTransport, Arc<RecordingPost>) {
        let poster = Arc::new(RecordingPost {
            fail,
            ..RecordingPost::default()
        });
        (FeedbackTransport::new(poster.clone()), poster)
    }

    fn report() -> FeedbackReport {
        FeedbackReport {
            category: FeedbackCategory::Issue,
            email: "a@b.com".into(),
            subject: "Bug".into(),
            message: "It crashes".into(),
            attachment: None,
        }
    }

    #[test]
    fn url_check_accepts_http_and_https_only() {
        assert!(looks_like_http_url("https://hooks.slack.com/services/T/B/X"));
        assert!(looks_like_http_url(" http://localhost:8080/hook "));
        assert!(!looks_like_http_url(""));
        assert!(!looks_like_http_url("   "));
        assert!(!looks_like_http_url("hooks.slack.com/services"));
        assert!(!looks_like_http_url("ftp://example.com/hook"));
        assert!(!looks_like_http_url("http://"));
    }

    #[test]
    fn invalid_urls_simulate_without_network() {
        let (transport, poster) = transport(false);
        for url in ["", "not a url", "mailto:a@b.com"] {
            assert_eq!(
                transport.send_to_slack(&report(), url).unwrap(),
                DeliveryOutcome::Simulated
            );
            assert_eq!(
                transport.send_to_webhook(&report(), url).unwrap(),
                DeliveryOutcome::Simulated
            );
        }
        assert_eq!(poster.calls.lock().unwrap().len(), 0);
    }

    #[test]
    fn slack_send_posts_block_message_once() {
        let (transport, poster) = transport(false);
        let outcome = transport
            .send(&report(), IntegrationType::Slack, "https://hooks.slack.com/x")
            .unwrap();
        assert_eq!(outcome, DeliveryOutcome::Sent);
        let calls = poster.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://hooks.slack.com/x");
        assert!(matches!(calls[0].1, WireMessage::Slack(_)));
    }

    #[test]
    fn webhook_send_posts_flat_payload() {
        let (transport, poster) = transport(false);
        transport
            .send(&report(), IntegrationType::Webhook, "https://example.com/hook")
            .unwrap();
        let calls = poster.calls.lock().unwrap();
        match &calls[0].1 {
            WireMessage::Webhook(payload) => {
                assert_eq!(payload.category, "issue");
                assert!(!payload.has_screenshot);
            }
            other => panic!("expected webhook payload, got {other:?}"),
        }
    }

    #[test]
    fn network_failure_is_rejected_without_retry() {
        let (transport, poster) = transport(true);
        let result = transport.send_to_webhook(&report(), "https://example.com/hook");
        assert!(matches!(result, Err(TransportError::Network(_))));
        assert_eq!(poster.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn readable_screenshot_is_signalled_but_not_embedded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, b"not really a png").unwrap();
        let mut report = report();
        report.attachment = Some(Attachment::from_path(&path).unwrap());

        let (transport, poster) = transport(false);
        transport.send_to_webhook(&report, "https://example.com/hook").unwrap();
        let calls = poster.calls.lock().unwrap();
        let json = serde_json::to_string(&calls[0].1).unwrap();
        assert!(json.contains("\"hasScreenshot\":true"));
        assert!(!json.contains("base64"));
    }

    #[test]
    fn unreadable_screenshot_is_dropped_and_send_still_succeeds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, b"png").unwrap();
        let mut report = report();
        report.attachment = Some(Attachment::from_path(&path).unwrap());
        std::fs::remove_file(&path).unwrap();

        let (transport, poster) = transport(false);
        let outcome = transport
            .send_to_slack(&report, "https://hooks.slack.com/x")
            .unwrap();
        assert_eq!(outcome, DeliveryOutcome::Sent);
        let calls = poster.calls.lock().unwrap();
        match &calls[0].1 {
            WireMessage::Slack(message) => assert_eq!(message.blocks.len(), 5),
            other => panic!("expected slack message, got {other:?}"),
        }
    }

    #[test]
    fn oversized_screenshot_is_dropped_and_send_still_succeeds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_ATTACHMENT_BYTES + 1).unwrap();
        let mut report = report();
        report.attachment = Some(Attachment::from_path(&path).unwrap());

        let (transport, poster) = transport(false);
        assert_eq!(
            transport
                .send_to_slack(&report, "https://hooks.slack.com/x")
                .unwrap(),
            DeliveryOutcome::Sent
        );
        assert_eq!(
            transport
                .send_to_webhook(&report, "https://example.com/hook")
                .unwrap(),
            DeliveryOutcome::Sent
        );

        let calls = poster.calls.lock().unwrap();
        match &calls[0].1 {
            WireMessage::Slack(message) => {
                assert_eq!(message.blocks.len(), 5);
                let json = serde_json::to_string(message).unwrap();
                assert!(!json.contains("Screenshot"));
            }
            other => panic!("expected slack message, got {other:?}"),
        }
        match &calls[1].1 {
            WireMessage::Webhook(payload) => assert!(!payload.has_screenshot),
            other => panic!("expected webhook payload, got {other:?}"),
        }
    }

    #[test]
    fn deliver_skips_network_for_blank_url() {
        let (transport, poster) = transport(true);
        let message = formatter::format_now(&report(), IntegrationType::Slack);
        assert_eq!(
            transport.deliver(&message, "").unwrap(),
            DeliveryOutcome::Simulated
        );
        assert!(poster.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn ureq_post_fails_against_closed_port() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let transport = FeedbackTransport::default();
        let result = transport.send_to_slack(&report(), &format!("http://{addr}/hook"));
        assert!(result.is_err());
    }
}
