use std::path::{Path, PathBuf};

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Largest screenshot that will be encoded for delivery.
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Kind of feedback the user is sending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    #[default]
    Issue,
    Suggestion,
    Question,
    Other,
}

struct CategoryInfo {
    wire_name: &'static str,
    label: &'static str,
    description: &'static str,
    emoji: &'static str,
}

static CATEGORY_TABLE: [(FeedbackCategory, CategoryInfo); 4] = [
    (
        FeedbackCategory::Issue,
        CategoryInfo {
            wire_name: "issue",
            label: "Issue",
            description: "Report a bug or problem",
            emoji: "🐞",
        },
    ),
    (
        FeedbackCategory::Suggestion,
        CategoryInfo {
            wire_name: "suggestion",
            label: "Suggestion",
            description: "Share your ideas",
            emoji: "💡",
        },
    ),
    (
        FeedbackCategory::Question,
        CategoryInfo {
            wire_name: "question",
            label: "Question",
            description: "Ask about something",
            emoji: "❓",
        },
    ),
    (
        FeedbackCategory::Other,
        CategoryInfo {
            wire_name: "other",
            label: "Other",
            description: "Something else",
            emoji: "📝",
        },
    ),
];

impl FeedbackCategory {
    /// All categories in display order.
    pub const ALL: [FeedbackCategory; 4] = [
        FeedbackCategory::Issue,
        FeedbackCategory::Suggestion,
        FeedbackCategory::Question,
        FeedbackCategory::Other,
    ];

    fn info(self) -> &'static CategoryInfo {
        // The table covers every variant in declaration order.
        &CATEGORY_TABLE[self as usize].1
    }

    /// Lowercase name used in webhook payloads.
    pub fn wire_name(self) -> &'static str {
        self.info().wire_name
    }

    /// Capitalized name shown to users and in Slack messages.
    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// One-line hint shown under the label in the form.
    pub fn description(self) -> &'static str {
        self.info().description
    }

    /// Emoji prefixed to the Slack header.
    pub fn emoji(self) -> &'static str {
        self.info().emoji
    }
}

/// A screenshot the user picked, referenced by path until delivery.
///
/// The file is only read when the report is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    path: PathBuf,
    file_name: String,
    size_bytes: u64,
    mime_type: &'static str,
}

/// Errors raised while picking or encoding a screenshot.
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} is not a file")]
    NotAFile(PathBuf),
    #[error("Only image files can be attached")]
    NotAnImage,
    #[error("Screenshot is too large ({size} bytes, limit {limit})")]
    TooLarge { size: u64, limit: u64 },
}

impl Attachment {
    /// Reference an image file on disk, rejecting non-image files.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AttachmentError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|source| AttachmentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(AttachmentError::NotAFile(path.to_path_buf()));
        }
        let format =
            image::ImageFormat::from_path(path).map_err(|_| AttachmentError::NotAnImage)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            size_bytes: metadata.len(),
            mime_type: format.to_mime_type(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Size formatted as kilobytes with two decimals, e.g. `"12.50 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.size_bytes as f64 / 1024.0)
    }

    /// Read the file and encode it as a `data:` URL.
    pub fn encode_data_url(&self) -> Result<String, AttachmentError> {
        let io_err = |source| AttachmentError::Io {
            path: self.path.clone(),
            source,
        };
        let size = std::fs::metadata(&self.path).map_err(io_err)?.len();
        if size > MAX_ATTACHMENT_BYTES {
            return Err(AttachmentError::TooLarge {
                size,
                limit: MAX_ATTACHMENT_BYTES,
            });
        }
        let bytes = std::fs::read(&self.path).map_err(io_err)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(format!("data:{};base64,{encoded}", self.mime_type))
    }
}

/// A validated submission ready to be formatted and delivered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedbackReport {
    pub category: FeedbackCategory,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub attachment: Option<Attachment>,
}

impl FeedbackReport {
    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }
}
