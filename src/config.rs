//! Host-facing widget configuration.
//!
//! Hosts either build a [`WidgetConfig`] in code or load one from
//! `config.toml` inside the `.feedbox` directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// File name of the widget configuration inside the app directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

const SLACK_URL_ENV: &str = "FEEDBOX_SLACK_WEBHOOK_URL";
const WEBHOOK_URL_ENV: &str = "FEEDBOX_WEBHOOK_URL";
const USER_EMAIL_ENV: &str = "FEEDBOX_USER_EMAIL";

/// Which delivery target receives submitted feedback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationType {
    #[default]
    Slack,
    Webhook,
}

/// Screen corner the trigger button is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl TriggerPosition {
    /// True for the two bottom corners.
    pub fn is_bottom(self) -> bool {
        matches!(self, Self::BottomRight | Self::BottomLeft)
    }
}

/// Color variant of the trigger button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerColor {
    #[default]
    Default,
    Secondary,
    Destructive,
    Outline,
    Ghost,
    Link,
}

/// Icon drawn on the trigger button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerIcon {
    #[default]
    Message,
    Help,
    Flag,
    Alert,
    Info,
}

/// Size of the trigger button when the label is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerSize {
    Sm,
    #[default]
    Default,
    Lg,
}

/// Corner rounding of the trigger button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerRounding {
    #[default]
    Full,
    Md,
}

/// Options supplied by the host application when embedding the widget.
///
/// The config is read once when the widget is created and never changes
/// afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Slack incoming-webhook URL.
    pub slack_webhook_url: String,
    /// Generic webhook URL.
    pub webhook_url: String,
    /// Selects which of the two URLs is used.
    pub integration_type: IntegrationType,
    pub position: TriggerPosition,
    pub color: TriggerColor,
    pub icon: TriggerIcon,
    pub size: TriggerSize,
    pub rounded: TriggerRounding,
    /// Accessible label, also drawn next to the icon when `show_label` is set.
    pub label: String,
    pub show_label: bool,
    /// Slowly pulse the trigger to draw attention.
    pub animate: bool,
    /// Pre-fills and locks the email field.
    pub user_email: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            slack_webhook_url: String::new(),
            webhook_url: String::new(),
            integration_type: IntegrationType::Slack,
            position: TriggerPosition::BottomRight,
            color: TriggerColor::Default,
            icon: TriggerIcon::Message,
            size: TriggerSize::Default,
            rounded: TriggerRounding::Full,
            label: "Feedback".to_string(),
            show_label: false,
            animate: false,
            user_email: None,
        }
    }
}

impl WidgetConfig {
    /// URL of the active delivery target.
    pub fn delivery_url(&self) -> &str {
        match self.integration_type {
            IntegrationType::Slack => &self.slack_webhook_url,
            IntegrationType::Webhook => &self.webhook_url,
        }
    }

    /// Host-provided email, ignoring blank values.
    pub fn locked_email(&self) -> Option<&str> {
        self.user_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    /// Apply `FEEDBOX_*` environment overrides on top of the loaded values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(SLACK_URL_ENV) {
            self.slack_webhook_url = url;
        }
        if let Some(url) = lookup(WEBHOOK_URL_ENV) {
            self.webhook_url = url;
        }
        if let Some(email) = lookup(USER_EMAIL_ENV) {
            self.user_email = Some(email);
        }
        self
    }
}

/// Errors that may occur while loading or saving the widget configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No suitable config directory found: {0}")]
    NoConfigDir(#[from] app_dirs::AppDirError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the configuration from the app directory, returning defaults if missing.
pub fn load_or_default() -> Result<WidgetConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load the configuration from `path`, returning defaults if the file is missing.
pub fn load_from(path: &Path) -> Result<WidgetConfig, ConfigError> {
    if !path.exists() {
        return Ok(WidgetConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Save the configuration to `path`, creating parent directories as needed.
pub fn save_to_path(config: &WidgetConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
