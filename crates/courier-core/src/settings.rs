use serde::{Deserialize, Serialize};
use std::fmt;

/// Default base URL of the Slack Web API.
pub const SLACK_API_BASE: &str = "https://slack.com/api";

/// The delivery backend a message is dispatched to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    /// Slack Web API (`chat.postMessage`).
    Api,
    /// Slack incoming webhook.
    Webhook,
    /// Local output callback.
    #[default]
    Stdout,
    /// Structured log sink (Google Cloud Logging entry shape).
    #[serde(alias = "google")]
    Logging,
}

impl RequestType {
    /// Whether the mode needs a channel on every payload.
    ///
    /// Webhooks are bound to a channel when created, and log entries are not
    /// routed at all.
    pub fn requires_channel(self) -> bool {
        !matches!(self, RequestType::Webhook | RequestType::Logging)
    }

    /// Lowercase name, as written in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            RequestType::Api => "api",
            RequestType::Webhook => "webhook",
            RequestType::Stdout => "stdout",
            RequestType::Logging => "logging",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery settings, usually read from the `[slack]` table of `courier.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackSettings {
    /// Delivery mode; `type` is accepted as the key too.
    #[serde(default, alias = "type")]
    pub mode: RequestType,
    /// Channel used when a payload carries none.
    pub default_channel: Option<String>,
    /// Bot token (`xoxb-...`) for the Web API client.
    pub token: Option<String>,
    /// Incoming webhook URL for the webhook mode.
    pub webhook_url: Option<String>,
    /// Web API base URL override.
    pub api_base_url: Option<String>,
    /// HTTP client timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self {
            mode: RequestType::default(),
            default_channel: None,
            token: None,
            webhook_url: None,
            api_base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SlackSettings {
    /// Web API base URL without a trailing slash, defaulting to [`SLACK_API_BASE`].
    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .map_or(SLACK_API_BASE, |url| url.trim_end_matches('/'))
    }
}
