use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message-create event delivered by the chat gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub id: String,
    pub author_id: String,
    pub channel_id: String,
    /// Set when the gateway already knows the originating guild.
    #[serde(default)]
    pub guild_id: Option<String>,
    /// Sent in a direct-message channel, outside any guild.
    #[serde(default)]
    pub direct: bool,
    pub content: String,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(
        id: impl Into<String>,
        author_id: impl Into<String>,
        channel_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            channel_id: channel_id.into(),
            guild_id: None,
            direct: false,
            content: content.into(),
            received_at: Utc::now(),
        }
    }

    pub fn with_guild(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }

    pub fn as_direct(mut self) -> Self {
        self.direct = true;
        self.guild_id = None;
        self
    }
}
