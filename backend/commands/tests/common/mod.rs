use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mimic_commands::{builtin_registry, BotSettings, CommandRegistry, Dispatcher, FnCommand};
use mimic_core::{BotError, Embed, Gateway, InboundMessage};
use mimic_memory::InMemoryLearnStore;

pub const BOT_ID: &str = "424242";

/// Gateway double that maps channels to guilds and records every reply per channel.
#[derive(Default)]
pub struct FakeGateway {
    channels: HashMap<String, String>,
    direct_channels: Vec<String>,
    replies: Mutex<Vec<(String, String)>>,
    embeds: Mutex<Vec<(String, Embed)>>,
}

impl FakeGateway {
    pub fn with_channels(pairs: &[(&str, &str)]) -> Self {
        Self {
            channels: pairs
                .iter()
                .map(|(c, g)| (c.to_string(), g.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Register a channel that belongs to no guild.
    pub fn with_direct_channel(mut self, channel: &str) -> Self {
        self.direct_channels.push(channel.to_string());
        self
    }

    /// Plain-text replies sent to `channel`, oldest first.
    pub fn replies_in(&self, channel: &str) -> Vec<String> {
        self.replies
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == channel)
            .map(|(_, t)| t.clone())
            .collect()
    }

    pub fn reply_count(&self) -> usize {
        self.replies.lock().unwrap().len() + self.embeds.lock().unwrap().len()
    }

    pub fn embeds(&self) -> Vec<Embed> {
        self.embeds.lock().unwrap().iter().map(|(_, e)| e.clone()).collect()
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    fn bot_user_id(&self) -> String {
        BOT_ID.to_string()
    }

    fn guild_count(&self) -> usize {
        self.channels.values().collect::<std::collections::HashSet<_>>().len()
    }

    async fn channel_guild(&self, channel_id: &str) -> Result<Option<String>, BotError> {
        if self.direct_channels.iter().any(|c| c == channel_id) {
            return Ok(None);
        }
        self.channels
            .get(channel_id)
            .map(|g| Some(g.clone()))
            .ok_or_else(|| BotError::Gateway(format!("no such channel: {channel_id}")))
    }

    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), BotError> {
        self.replies
            .lock()
            .unwrap()
            .push((channel_id.to_string(), text.to_string()));
        Ok(())
    }

    async fn send_embed(&self, channel_id: &str, embed: &Embed) -> Result<(), BotError> {
        self.embeds
            .lock()
            .unwrap()
            .push((channel_id.to_string(), embed.clone()));
        Ok(())
    }
}

pub struct Harness {
    pub gateway: Arc<FakeGateway>,
    pub store: Arc<InMemoryLearnStore>,
    pub dispatcher: Dispatcher,
}

impl Harness {
    /// Two guilds: `G1` owns channel `c1`, `G2` owns channel `c2`.
    /// Channel `d1` is a direct-message channel.
    pub fn new() -> Self {
        Self::with_registry(builtin_registry().unwrap())
    }

    pub fn with_extra(extra: Vec<FnCommand>) -> Self {
        let mut registry = builtin_registry().unwrap();
        for cmd in extra {
            registry.register(cmd).unwrap();
        }
        Self::with_registry(registry)
    }

    fn with_registry(registry: CommandRegistry) -> Self {
        let gateway = Arc::new(FakeGateway::with_channels(&[("c1", "G1"), ("c2", "G2")]).with_direct_channel("d1"));
        let store = Arc::new(InMemoryLearnStore::new());
        let dispatcher = Dispatcher::new(registry, store.clone(), BotSettings::default());
        Self { gateway, store, dispatcher }
    }

    pub async fn say(&self, channel: &str, text: &str) -> mimic_commands::DispatchOutcome {
        let msg = InboundMessage::new("m", "user-1", channel, text);
        self.dispatcher.dispatch(self.gateway.clone(), msg).await
    }

    /// Send `text` as a direct message, flagged as such by the event.
    pub async fn say_direct(&self, text: &str) -> mimic_commands::DispatchOutcome {
        let msg = InboundMessage::new("m", "user-1", "d1", text).as_direct();
        self.dispatcher.dispatch(self.gateway.clone(), msg).await
    }
}
