//! Core types and error definitions for Courier.
//!
//! This crate holds what every Courier crate shares: the message payload,
//! the delivery settings, and the error type.
//!
//! # Main types
//!
//! - [`SlackMessage`] — Payload handed to a transport.
//! - [`RequestType`] — Delivery mode (api, webhook, stdout, logging).
//! - [`SlackSettings`] — Serializable delivery settings.
//! - [`CourierError`] — Unified error enum.
//! - [`CourierResult`] — Convenience alias for `Result<T, CourierError>`.

/// Error types.
pub mod error;
/// Slack message payload.
pub mod message;
/// Delivery mode and settings.
pub mod settings;

pub use error::{CourierError, CourierResult};
pub use message::SlackMessage;
pub use settings::{RequestType, SlackSettings, SLACK_API_BASE};
