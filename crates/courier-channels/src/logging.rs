use async_trait::async_trait;
use courier_core::CourierResult;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Value of the `type` label on every Courier log entry.
pub const LOG_LABEL_TYPE: &str = "courier";
/// Producer tag of the operation attached to every Courier log entry.
pub const LOG_PRODUCER: &str = "github.com/courier-rs/courier@v1";
/// Key the Slack payload is stored under in the entry body.
pub const LOG_MESSAGE_KEY: &str = "slack";

/// Cloud Logging severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// No assigned severity.
    Default,
    /// Debug or trace information.
    Debug,
    /// Routine information.
    Info,
    /// Normal but significant events.
    Notice,
    /// Events that might cause problems.
    Warning,
    /// Events likely to cause problems.
    Error,
    /// Events that cause more severe problems or outages.
    Critical,
    /// A person must take action immediately.
    Alert,
    /// One or more systems are unusable.
    Emergency,
}

/// Operation an entry belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogOperation {
    /// Identifies the producer of the operation.
    pub producer: String,
}

/// Entry metadata, serialized with the special field names the Cloud Logging
/// agent lifts out of structured JSON lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogMetadata {
    /// Entry severity.
    pub severity: Severity,
    /// User-defined labels.
    #[serde(rename = "logging.googleapis.com/labels")]
    pub labels: BTreeMap<String, String>,
    /// Operation the entry belongs to.
    #[serde(rename = "logging.googleapis.com/operation")]
    pub operation: LogOperation,
}

impl LogMetadata {
    /// The fixed metadata attached to dispatched Slack messages.
    pub fn slack_notice() -> Self {
        let mut labels = BTreeMap::new();
        labels.insert("type".to_string(), LOG_LABEL_TYPE.to_string());
        Self {
            severity: Severity::Notice,
            labels,
            operation: LogOperation {
                producer: LOG_PRODUCER.to_string(),
            },
        }
    }
}

/// A structured log entry: metadata plus a JSON body, flattened into one
/// object when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    /// Severity, labels, and operation.
    #[serde(flatten)]
    pub metadata: LogMetadata,
    /// Entry body.
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl LogEntry {
    /// Pair `metadata` with a body.
    pub fn new(metadata: LogMetadata, data: Map<String, Value>) -> Self {
        Self { metadata, data }
    }
}

/// Destination for structured log entries.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Write one entry.
    async fn write(&self, entry: LogEntry) -> CourierResult<()>;
}

/// Writes each entry as one JSON line.
///
/// On stdout this is the format the Cloud Logging agent ingests. Writes go
/// through a mutex so lines never interleave.
pub struct JsonLogSink<W = tokio::io::Stdout> {
    writer: Mutex<W>,
}

impl JsonLogSink<tokio::io::Stdout> {
    /// Sink writing to the process stdout.
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> JsonLogSink<W> {
    /// Sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W> LogSink for JsonLogSink<W>
where
    W: AsyncWrite + Send + Unpin + 'static,
{
    async fn write(&self, entry: LogEntry) -> CourierResult<()> {
        let mut line = serde_json::to_vec(&entry)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        writer.flush().await?;
        Ok(())
    }
}
