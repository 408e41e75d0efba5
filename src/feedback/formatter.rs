//! Conversion of feedback reports into provider-specific JSON messages.
//!
//! Formatting is pure: the caller supplies the submission time and every
//! empty field falls back to a placeholder string.

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

use super::FeedbackReport;
use crate::config::IntegrationType;

const NO_SUBJECT: &str = "No Subject";
const ANONYMOUS: &str = "Anonymous";
const NO_MESSAGE: &str = "No message provided";
const SCREENSHOT_NOTE: &str = "*Screenshot:* Screenshot was included in the feedback, but Slack has a size limit for images in messages. The screenshot has been attached separately.";

const HUMAN_TIME: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const ISO_TIME: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// Kind of text object inside a Slack block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    PlainText,
    Mrkdwn,
}

/// Slack text object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackText {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
}

impl SlackText {
    fn plain(text: String) -> Self {
        Self {
            kind: TextKind::PlainText,
            text,
            emoji: Some(true),
        }
    }

    fn markdown(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
            emoji: None,
        }
    }
}

/// One block of a Slack block-kit message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackBlock {
    Header {
        text: SlackText,
    },
    Section {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<SlackText>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fields: Vec<SlackText>,
    },
    Divider,
    Context {
        elements: Vec<SlackText>,
    },
}

/// Body posted to a Slack incoming webhook.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub blocks: Vec<SlackBlock>,
}

/// Flat body posted to a generic webhook.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub category: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub timestamp: String,
    pub has_screenshot: bool,
}

/// Provider-specific message derived from a report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WireMessage {
    Slack(SlackMessage),
    Webhook(WebhookPayload),
}

/// Format `report` for `provider`, stamping it with `submitted_at`.
pub fn format(
    report: &FeedbackReport,
    provider: IntegrationType,
    submitted_at: OffsetDateTime,
) -> WireMessage {
    match provider {
        IntegrationType::Slack => WireMessage::Slack(slack_message(report, submitted_at)),
        IntegrationType::Webhook => WireMessage::Webhook(webhook_payload(report, submitted_at)),
    }
}

/// Format `report` stamped with the current local time.
pub fn format_now(report: &FeedbackReport, provider: IntegrationType) -> WireMessage {
    let now = OffsetDateTime::now_utc();
    let local = UtcOffset::current_local_offset()
        .map(|offset| now.to_offset(offset))
        .unwrap_or(now);
    format(report, provider, local)
}

/// Build the Slack block list for `report`.
///
/// The Slack timestamp is rendered in the offset carried by `submitted_at`.
pub fn slack_message(report: &FeedbackReport, submitted_at: OffsetDateTime) -> SlackMessage {
    let category = report.category;
    let subject = or_fallback(&report.subject, NO_SUBJECT);
    let email = or_fallback(&report.email, ANONYMOUS);
    let message = or_fallback(&report.message, NO_MESSAGE);

    let mut blocks = vec![
        SlackBlock::Header {
            text: SlackText::plain(format!(
                "{} New Feedback: {subject}",
                category.emoji()
            )),
        },
        SlackBlock::Section {
            text: None,
            fields: vec![
                SlackText::markdown(format!("*Type:*\n{}", category.label())),
                SlackText::markdown(format!("*From:*\n{email}")),
            ],
        },
        SlackBlock::Section {
            text: Some(SlackText::markdown(format!("*Message:*\n{message}"))),
            fields: Vec::new(),
        },
    ];
    if report.has_attachment() {
        blocks.push(SlackBlock::Section {
            text: Some(SlackText::markdown(SCREENSHOT_NOTE)),
            fields: Vec::new(),
        });
    }
    blocks.push(SlackBlock::Divider);
    blocks.push(SlackBlock::Context {
        elements: vec![SlackText::markdown(format!(
            "Submitted on {}",
            human_timestamp(submitted_at)
        ))],
    });
    SlackMessage { blocks }
}

/// Build the flat generic-webhook payload for `report`.
pub fn webhook_payload(report: &FeedbackReport, submitted_at: OffsetDateTime) -> WebhookPayload {
    WebhookPayload {
        category: report.category.wire_name().to_string(),
        email: report.email.clone(),
        subject: report.subject.clone(),
        message: report.message.clone(),
        timestamp: iso_timestamp(submitted_at),
        has_screenshot: report.has_attachment(),
    }
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn human_timestamp(at: OffsetDateTime) -> String {
    at.format(HUMAN_TIME)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

fn iso_timestamp(at: OffsetDateTime) -> String {
    let utc = at.to_offset(UtcOffset::UTC);
    utc.format(ISO_TIME)
        .unwrap_or_else(|_| utc.unix_timestamp().to_string())
}
