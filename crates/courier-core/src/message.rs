use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Slack message payload, shaped like the arguments of `chat.postMessage`.
///
/// Every field is optional. Absent fields are left out of the JSON body, and
/// attributes without a dedicated field are kept in [`SlackMessage::extra`]
/// so they reach the transport untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlackMessage {
    /// Channel, private group, or IM channel to send the message to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Message text; also the notification fallback when `blocks` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Block Kit layout blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Value>>,
    /// Legacy secondary attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Value>>,
    /// Timestamp of the parent message when replying in a thread.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    /// Also post a threaded reply to the channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_broadcast: Option<bool>,
    /// Bot display name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Emoji used as the bot icon, e.g. `:robot_face:`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    /// Image URL used as the bot icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Disable Slack markup parsing when `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrkdwn: Option<bool>,
    /// Unfurl text-based content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfurl_links: Option<bool>,
    /// Unfurl media content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfurl_media: Option<bool>,
    /// Find and link user groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_names: Option<bool>,
    /// Message parsing mode (`none` or `full`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse: Option<String>,
    /// Post as the authed user instead of the bot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_user: Option<bool>,
    /// Structured message metadata (`event_type` and `event_payload`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Any other transport-specific attribute.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SlackMessage {
    /// A payload carrying only `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// A payload carrying only `blocks`.
    pub fn blocks(blocks: Vec<Value>) -> Self {
        Self {
            blocks: Some(blocks),
            ..Self::default()
        }
    }

    /// Set the target channel.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Reply in the thread rooted at `thread_ts`.
    pub fn with_thread_ts(mut self, thread_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(thread_ts.into());
        self
    }

    /// Set an attribute by its wire name.
    ///
    /// Keys that name a dedicated field (`channel`, `text`, ...) set that
    /// field, so the serialized body never carries a key twice. Other keys go
    /// to [`SlackMessage::extra`]. A value of the wrong type for a dedicated
    /// field leaves the message unchanged.
    pub fn with_extra(self, key: impl Into<String>, value: Value) -> Self {
        let Ok(Value::Object(mut body)) = serde_json::to_value(&self) else {
            return self;
        };
        body.insert(key.into(), value);
        serde_json::from_value(Value::Object(body)).unwrap_or(self)
    }

    /// Whether a non-empty channel is present.
    pub fn has_channel(&self) -> bool {
        self.channel.as_deref().is_some_and(|c| !c.is_empty())
    }
}
