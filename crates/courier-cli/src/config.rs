//! `courier.toml` loading.

use courier_core::{CourierError, CourierResult, SlackSettings};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable consulted when the file sets no bot token.
pub const TOKEN_ENV: &str = "SLACK_TOKEN";
/// Environment variable consulted when the file sets no webhook URL.
pub const WEBHOOK_URL_ENV: &str = "SLACK_WEBHOOK_URL";

/// Contents of `courier.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct CourierConfig {
    /// The `[slack]` table.
    #[serde(default)]
    pub slack: SlackSettings,
}

impl CourierConfig {
    /// Read `path`, falling back to defaults when the file does not exist.
    pub async fn load(path: &Path) -> CourierResult<Self> {
        let config = match tokio::fs::read_to_string(path).await {
            Ok(raw) => Self::parse(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => {
                return Err(CourierError::Config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                )))
            }
        };
        Ok(config)
    }

    /// Parse TOML text.
    pub fn parse(raw: &str) -> CourierResult<Self> {
        toml::from_str(raw).map_err(|e| CourierError::Config(format!("invalid config: {e}")))
    }

    /// Fill the token and webhook URL from `lookup` when the file leaves them
    /// unset. Empty values count as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let slack = &mut self.slack;
        if slack.token.as_deref().map_or(true, str::is_empty) {
            slack.token = lookup(TOKEN_ENV).filter(|v| !v.is_empty());
            if slack.token.is_some() {
                debug!("bot token taken from {TOKEN_ENV}");
            }
        }
        if slack.webhook_url.as_deref().map_or(true, str::is_empty) {
            slack.webhook_url = lookup(WEBHOOK_URL_ENV).filter(|v| !v.is_empty());
            if slack.webhook_url.is_some() {
                debug!("webhook url taken from {WEBHOOK_URL_ENV}");
            }
        }
    }
}
