use std::sync::LazyLock;

use regex::Regex;

use super::{FeedbackCategory, FeedbackReport};

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email address";
pub const SUBJECT_REQUIRED: &str = "Subject is required";
pub const MESSAGE_REQUIRED: &str = "Message is required";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email regex must compile")
});

/// Per-field validation messages. Empty when the form is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) need attention", self.count())]
pub struct FieldErrors {
    pub email: Option<&'static str>,
    pub subject: Option<&'static str>,
    pub message: Option<&'static str>,
    pub attachment: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn count(&self) -> usize {
        [
            self.email.is_some(),
            self.subject.is_some(),
            self.message.is_some(),
            self.attachment.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

/// True when `email` has the usual `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Raw form input awaiting validation.
#[derive(Clone, Copy, Debug)]
pub struct FeedbackDraft<'a> {
    pub category: FeedbackCategory,
    pub email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
}

impl FeedbackDraft<'_> {
    /// Check required fields and email shape, producing a trimmed report.
    pub fn validate(&self) -> Result<FeedbackReport, FieldErrors> {
        let email = self.email.trim();
        let subject = self.subject.trim();
        let message = self.message.trim();
        let mut errors = FieldErrors::default();
        if email.is_empty() {
            errors.email = Some(EMAIL_REQUIRED);
        } else if !is_valid_email(email) {
            errors.email = Some(EMAIL_INVALID);
        }
        if subject.is_empty() {
            errors.subject = Some(SUBJECT_REQUIRED);
        }
        if message.is_empty() {
            errors.message = Some(MESSAGE_REQUIRED);
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(FeedbackReport {
            category: self.category,
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
            attachment: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft<'a>(email: &'a str, subject: &'a str, message: &'a str) -> FeedbackDraft<'a> {
        FeedbackDraft {
            category: FeedbackCategory::Issue,
            email,
            subject,
            message,
        }
    }

    #[test]
    fn accepts_common_email_shapes() {
        for email in ["a@b.com", "First.Last+tag@Sub.Example.ORG", "x_y%z@host-1.io"] {
            assert!(is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["not-an-email", "a@b", "a@b.c", "@b.com", "a b@c.com", "a@b.com "] {
            assert!(!is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = draft("", " ", "").validate().unwrap_err();
        assert_eq!(errors.email, Some(EMAIL_REQUIRED));
        assert_eq!(errors.subject, Some(SUBJECT_REQUIRED));
        assert_eq!(errors.message, Some(MESSAGE_REQUIRED));
        assert_eq!(errors.to_string(), "3 field(s) need attention");
        assert!(std::error::Error::source(&errors).is_none());
    }

    #[test]
    fn invalid_email_is_flagged_alone() {
        let errors = draft("not-an-email", "Bug", "It crashes")
            .validate()
            .unwrap_err();
        assert_eq!(errors.email, Some(EMAIL_INVALID));
        assert_eq!(errors.subject, None);
        assert_eq!(errors.message, None);
    }

    #[test]
    fn valid_draft_is_trimmed() {
        let report = draft(" a@b.com ", " Bug ", "It crashes\n")
            .validate()
            .unwrap();
        assert_eq!(report.email, "a@b.com");
        assert_eq!(report.subject, "Bug");
        assert_eq!(report.message, "It crashes");
        assert_eq!(report.category, FeedbackCategory::Issue);
        assert!(report.attachment.is_none());
    }
}
