use async_trait::async_trait;
use courier_core::{CourierError, CourierResult, SlackMessage, SLACK_API_BASE};
use serde::Deserialize;
use tracing::{debug, warn};

/// A client able to post a message through the Slack Web API.
///
/// The dispatcher only depends on this trait, so tests and embedders can
/// plug in their own client.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Post `message` as-is. The channel is already resolved.
    async fn post_message(&self, message: &SlackMessage) -> CourierResult<()>;
}

/// Slack Web API client backed by `reqwest`.
///
/// Calls `chat.postMessage` with a bot token (`xoxb-...`).
pub struct SlackWebClient {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

// ── Slack API types ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SlackApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

// ── Implementation ──────────────────────────────────────────────────────────

impl SlackWebClient {
    /// Create a client for the public Slack API.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: SLACK_API_BASE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at another API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reuse an existing HTTP client (timeouts, proxies, connection pool).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The API base URL requests go to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatClient for SlackWebClient {
    async fn post_message(&self, message: &SlackMessage) -> CourierResult<()> {
        let url = format!("{}/chat.postMessage", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(message)
            .send()
            .await
            .map_err(|e| CourierError::Transport(format!("Slack send error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!(%status, "Slack chat.postMessage rejected");
            return Err(CourierError::Transport(format!(
                "Slack chat.postMessage failed ({status}): {body}"
            )));
        }

        let body: SlackApiResponse = response
            .json()
            .await
            .map_err(|e| CourierError::Transport(format!("Slack parse error: {e}")))?;

        if !body.ok {
            let error = body.error.unwrap_or_default();
            warn!(error = %error, "Slack chat.postMessage returned ok=false");
            return Err(CourierError::Transport(format!(
                "Slack chat.postMessage failed: {error}"
            )));
        }

        debug!(channel = ?message.channel, "Slack chat.postMessage ok");
        Ok(())
    }
}
