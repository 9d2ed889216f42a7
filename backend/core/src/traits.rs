use async_trait::async_trait;

use crate::embed::Embed;
use crate::error::BotError;

/// Narrow view of a chat-gateway session, as seen by the command core.
///
/// One handle is built per inbound event; implementations wrap whatever
/// session state the underlying client exposes (cache, HTTP client).
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Identity of the bot's own user, used to drop self-authored messages.
    fn bot_user_id(&self) -> String;

    /// Number of guilds the bot is currently a member of.
    fn guild_count(&self) -> usize;

    /// Resolve the guild owning a channel, or `None` for a channel outside
    /// any guild. May require a network round-trip when the channel is not
    /// cached locally.
    async fn channel_guild(&self, channel_id: &str) -> Result<Option<String>, BotError>;

    /// Send plain text to a channel.
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), BotError>;

    /// Send structured content to a channel.
    async fn send_embed(&self, channel_id: &str, embed: &Embed) -> Result<(), BotError>;
}
