use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ICON: &str = "/favicon.ico";
pub const AUTO_DISMISS: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    Default,
}

impl Permission {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "granted" => Some(Self::Granted),
            "denied" => Some(Self::Denied),
            "default" => Some(Self::Default),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Default => "default",
        }
    }

    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub body: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    // lets the client coalesce repeats for the same asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(default)]
    pub require_interaction: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            icon: None,
            tag: None,
            require_interaction: false,
            data: None,
        }
    }

    pub fn icon_or_default(&self) -> &str {
        self.icon
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ICON)
    }

    /// None when the notification stays until the user dismisses it.
    pub fn auto_dismiss_after(&self) -> Option<Duration> {
        if self.require_interaction {
            None
        } else {
            Some(AUTO_DISMISS)
        }
    }

    /// URL opened when the notification is clicked.
    pub fn click_url(&self) -> Option<&str> {
        self.data.as_ref()?.get("url")?.as_str()
    }
}
