use crate::client::{ChatClient, SlackWebClient};
use crate::logging::{JsonLogSink, LogEntry, LogMetadata, LogSink, LOG_MESSAGE_KEY};
use crate::output::{stdout_output, OutputFn};
use crate::webhook::post_webhook;
use courier_core::{CourierError, CourierResult, RequestType, SlackMessage, SlackSettings};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Immutable dispatch options: the mode, the fallback channel, and the
/// output callback of the stdout mode.
#[derive(Clone)]
pub struct SlackConfig {
    /// Delivery mode.
    pub mode: RequestType,
    /// Channel used when a payload carries none.
    pub default_channel: Option<String>,
    /// Callback of the stdout mode.
    pub output: OutputFn,
}

impl SlackConfig {
    /// Options for `mode`, no default channel, output to stdout.
    pub fn new(mode: RequestType) -> Self {
        Self {
            mode,
            default_channel: None,
            output: stdout_output(),
        }
    }

    /// Set the fallback channel.
    pub fn with_default_channel(mut self, channel: impl Into<String>) -> Self {
        self.default_channel = Some(channel.into());
        self
    }

    /// Replace the stdout-mode callback.
    pub fn with_output(mut self, output: OutputFn) -> Self {
        self.output = output;
        self
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self::new(RequestType::default())
    }
}

impl fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackConfig")
            .field("mode", &self.mode)
            .field("default_channel", &self.default_channel)
            .finish_non_exhaustive()
    }
}

/// Dispatches Slack messages to the transport selected by the configured mode.
///
/// Collaborators are optional and only checked when the mode that needs them
/// is used, so an unused, unconfigured collaborator never blocks another
/// mode. The service holds no per-call state and is cheap to clone.
#[derive(Clone)]
pub struct SlackService {
    config: SlackConfig,
    client: Option<Arc<dyn ChatClient>>,
    log: Option<Arc<dyn LogSink>>,
    webhook_url: Option<String>,
    http: reqwest::Client,
}

impl SlackService {
    /// Create a service from explicit collaborators.
    pub fn new(
        config: SlackConfig,
        client: Option<Arc<dyn ChatClient>>,
        log: Option<Arc<dyn LogSink>>,
        webhook_url: Option<String>,
    ) -> Self {
        Self {
            config,
            client,
            log,
            webhook_url,
            http: reqwest::Client::new(),
        }
    }

    /// Build a service and its default collaborators from settings.
    ///
    /// A Web API client is created when a token is set, and a stdout JSON log
    /// sink when the mode is `logging`. Output goes to stdout.
    pub fn from_settings(settings: &SlackSettings) -> CourierResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| CourierError::Config(format!("failed to build HTTP client: {e}")))?;

        let client = settings.token.as_ref().map(|token| {
            Arc::new(
                SlackWebClient::new(token.as_str())
                    .with_base_url(settings.api_base_url())
                    .with_http_client(http.clone()),
            ) as Arc<dyn ChatClient>
        });

        let log = (settings.mode == RequestType::Logging)
            .then(|| Arc::new(JsonLogSink::stdout()) as Arc<dyn LogSink>);

        let mut config = SlackConfig::new(settings.mode);
        config.default_channel = settings.default_channel.clone();

        Ok(Self::new(config, client, log, settings.webhook_url.clone()).with_http_client(http))
    }

    /// Use `http` for webhook requests.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// The configured delivery mode.
    pub fn mode(&self) -> RequestType {
        self.config.mode
    }

    /// The dispatch options.
    pub fn config(&self) -> &SlackConfig {
        &self.config
    }

    /// Whether a chat client is configured.
    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Whether a log sink is configured.
    pub fn has_log_sink(&self) -> bool {
        self.log.is_some()
    }

    /// The configured webhook URL, if any. An empty URL counts as unset.
    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook_url.as_deref().filter(|u| !u.is_empty())
    }

    /// Send plain text. `text` always wins over `opts`, and blocks in
    /// `opts` are dropped.
    pub async fn send_text(
        &self,
        text: impl Into<String>,
        opts: Option<SlackMessage>,
    ) -> CourierResult<()> {
        let mut message = opts.unwrap_or_default();
        message.text = Some(text.into());
        message.blocks = None;
        self.post_message(message).await
    }

    /// Send Block Kit blocks. `blocks` always wins over `opts`; a fallback
    /// `text` in `opts` is kept.
    pub async fn send_blocks(
        &self,
        blocks: Vec<Value>,
        opts: Option<SlackMessage>,
    ) -> CourierResult<()> {
        let mut message = opts.unwrap_or_default();
        message.blocks = Some(blocks);
        self.post_message(message).await
    }

    /// Resolve the channel, then hand `message` to the transport of the
    /// configured mode.
    pub async fn post_message(&self, mut message: SlackMessage) -> CourierResult<()> {
        let mode = self.config.mode;

        if !message.has_channel() && mode.requires_channel() {
            let channel = self
                .config
                .default_channel
                .as_deref()
                .filter(|c| !c.is_empty())
                .ok_or_else(|| {
                    CourierError::Config("neither channel nor defaultChannel was applied".into())
                })?;
            message.channel = Some(channel.to_string());
        }

        debug!(mode = %mode, channel = ?message.channel, "dispatching Slack message");

        match mode {
            RequestType::Api => self.run_api_request(&message).await,
            RequestType::Webhook => self.run_webhook_request(&message).await,
            RequestType::Stdout => self.run_stdout_request(&message),
            RequestType::Logging => self.run_logging_request(message).await,
        }
    }

    async fn run_api_request(&self, message: &SlackMessage) -> CourierResult<()> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| CourierError::Config("expected a chat client to be configured".into()))?;
        if !message.has_channel() {
            return Err(CourierError::Config("expected channel to be applied".into()));
        }

        client.post_message(message).await
    }

    async fn run_webhook_request(&self, message: &SlackMessage) -> CourierResult<()> {
        let url = self
            .webhook_url()
            .ok_or_else(|| CourierError::Config("expected webhook url to exist".into()))?;

        post_webhook(&self.http, url, message).await
    }

    fn run_stdout_request(&self, message: &SlackMessage) -> CourierResult<()> {
        (self.config.output)(message)
    }

    async fn run_logging_request(&self, message: SlackMessage) -> CourierResult<()> {
        let log = self
            .log
            .as_ref()
            .ok_or_else(|| CourierError::Config("expected a log sink to be configured".into()))?;

        let mut data = Map::new();
        data.insert(LOG_MESSAGE_KEY.to_string(), serde_json::to_value(message)?);

        log.write(LogEntry::new(LogMetadata::slack_notice(), data)).await
    }
}

impl fmt::Debug for SlackService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackService")
            .field("config", &self.config)
            .field("has_client", &self.client.is_some())
            .field("has_log_sink", &self.log.is_some())
            .field("webhook_url", &self.webhook_url)
            .finish()
    }
}
