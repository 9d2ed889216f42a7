use serde::{Deserialize, Serialize};

/// A persisted message/response association, scoped to one guild.
///
/// Items are never mutated in place; unlearn-then-relearn is the only
/// update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedItem {
    /// Scope identifier (the guild the item was learned in)
    #[serde(rename = "guildID")]
    pub guild_id: String,
    /// Trigger name, unique within a guild
    pub message: String,
    /// Reply text, sent back verbatim
    pub response: String,
}

impl LearnedItem {
    pub fn new(
        guild_id: impl Into<String>,
        message: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            guild_id: guild_id.into(),
            message: message.into(),
            response: response.into(),
        }
    }

    /// Composite store key `(guild_id, message)`.
    pub fn key(&self) -> (String, String) {
        (self.guild_id.clone(), self.message.clone())
    }
}
