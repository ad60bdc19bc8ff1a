//! Slack message dispatch for Courier.
//!
//! [`SlackService`] takes one [`SlackMessage`](courier_core::SlackMessage),
//! resolves its channel, and forwards it to the transport picked by the
//! configured [`RequestType`](courier_core::RequestType).
//!
//! # Main types
//!
//! - [`SlackService`] — The dispatcher.
//! - [`SlackConfig`] — Mode, default channel, and stdout output callback.
//! - [`ChatClient`] / [`SlackWebClient`] — Web API seam and its `reqwest` client.
//! - [`LogSink`] / [`JsonLogSink`] — Structured log seam and its JSON-lines sink.
//! - [`OutputFn`] — Callback used by the stdout mode.

/// Slack Web API client.
pub mod client;
/// Structured log entries and sinks.
pub mod logging;
/// Output callbacks for the stdout mode.
pub mod output;
/// The message dispatcher.
pub mod service;
/// Incoming webhook transport.
pub mod webhook;

pub use client::{ChatClient, SlackWebClient};
pub use logging::{JsonLogSink, LogEntry, LogMetadata, LogOperation, LogSink, Severity};
pub use output::{output_fn, stdout_output, OutputFn};
pub use service::{SlackConfig, SlackService};
pub use webhook::post_webhook;
