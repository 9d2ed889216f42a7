//! Per-dispatch request context handed to command handlers.
use std::sync::Arc;

use mimic_core::{BotError, Embed, Gateway, InboundMessage};
use mimic_memory::LearnStore;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

use crate::registry::CommandRegistry;
use crate::settings::BotSettings;

/// Everything a handler may touch while handling one message.
///
/// Built by the dispatcher for a single invocation and dropped when the
/// handler returns. Clones share the same underlying handles.
#[derive(Clone)]
pub struct Context {
    message: Arc<InboundMessage>,
    gateway: Arc<dyn Gateway>,
    store: Arc<dyn LearnStore>,
    registry: Arc<CommandRegistry>,
    settings: Arc<BotSettings>,
    guild: Arc<OnceCell<String>>,
    cancel: CancellationToken,
}

impl Context {
    pub fn new(
        message: InboundMessage,
        gateway: Arc<dyn Gateway>,
        store: Arc<dyn LearnStore>,
        registry: Arc<CommandRegistry>,
        settings: Arc<BotSettings>,
    ) -> Self {
        Self {
            message: Arc::new(message),
            gateway,
            store,
            registry,
            settings,
            guild: Arc::new(OnceCell::new()),
            cancel: CancellationToken::new(),
        }
    }

    /// The message that triggered this invocation.
    pub fn message(&self) -> &InboundMessage {
        &self.message
    }

    /// The gateway session the message arrived on.
    pub fn session(&self) -> &Arc<dyn Gateway> {
        &self.gateway
    }

    pub fn store(&self) -> &Arc<dyn LearnStore> {
        &self.store
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &BotSettings {
        &self.settings
    }

    pub fn prefix(&self) -> &str {
        &self.settings.prefix
    }

    /// Scope of this invocation; cancelled once the dispatch finishes.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Guild the message was sent in.
    ///
    /// Uses the guild carried by the event when present, otherwise asks the
    /// gateway (possibly a network call). Direct messages fail with
    /// [`BotError::NoGuild`] without a lookup. The answer is cached for the
    /// rest of the invocation.
    pub async fn guild(&self) -> Result<String, BotError> {
        if self.message.direct {
            return Err(BotError::NoGuild(self.message.channel_id.clone()));
        }
        let guild = self
            .guild
            .get_or_try_init(|| async {
                if let Some(id) = &self.message.guild_id {
                    return Ok(id.clone());
                }
                self.gateway
                    .channel_guild(&self.message.channel_id)
                    .await?
                    .ok_or_else(|| BotError::NoGuild(self.message.channel_id.clone()))
            })
            .await?;
        Ok(guild.clone())
    }

    /// Reply with plain text in the originating channel.
    pub async fn send(&self, text: &str) -> Result<(), BotError> {
        self.gateway.send_message(&self.message.channel_id, text).await
    }

    /// Reply with structured content in the originating channel.
    pub async fn send_embed(&self, embed: &Embed) -> Result<(), BotError> {
        self.gateway.send_embed(&self.message.channel_id, embed).await
    }
}
