//! Feedback reports and the submission pipeline: validate, format, deliver.

mod report;

pub mod formatter;
pub mod transport;
pub mod validation;

pub use formatter::{SlackBlock, SlackMessage, WebhookPayload, WireMessage};
pub use report::{Attachment, AttachmentError, FeedbackCategory, FeedbackReport, MAX_ATTACHMENT_BYTES};
pub use transport::{DeliveryOutcome, FeedbackTransport, HttpPost, TransportError, UreqPost};
pub use validation::{FeedbackDraft, FieldErrors};
