//! Fakes shared by unit tests.
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mimic_core::{BotError, Embed, Gateway, InboundMessage};
use mimic_memory::{InMemoryLearnStore, LearnStore, LearnedItem, StoreError};

use crate::context::Context;
use crate::registry::CommandRegistry;
use crate::settings::BotSettings;

pub const BOT_ID: &str = "bot";
pub const CHANNEL: &str = "c1";
pub const GUILD: &str = "G1";
pub const DM_CHANNEL: &str = "d1";

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text(String),
    Embed(Embed),
}

/// Gateway that records replies instead of sending them.
pub struct RecordingGateway {
    channels: HashMap<String, String>,
    sent: Mutex<Vec<Sent>>,
    guild_lookups: AtomicUsize,
    fail_sends: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            channels: HashMap::from([(CHANNEL.to_string(), GUILD.to_string())]),
            sent: Mutex::new(Vec::new()),
            guild_lookups: AtomicUsize::new(0),
            fail_sends: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::new()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(t) => Some(t),
                Sent::Embed(_) => None,
            })
            .collect()
    }

    pub fn guild_lookups(&self) -> usize {
        self.guild_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    fn bot_user_id(&self) -> String {
        BOT_ID.to_string()
    }

    fn guild_count(&self) -> usize {
        3
    }

    async fn channel_guild(&self, channel_id: &str) -> Result<Option<String>, BotError> {
        self.guild_lookups.fetch_add(1, Ordering::SeqCst);
        if channel_id == DM_CHANNEL {
            return Ok(None);
        }
        self.channels
            .get(channel_id)
            .map(|g| Some(g.clone()))
            .ok_or_else(|| BotError::Gateway(format!("unknown channel {channel_id}")))
    }

    async fn send_message(&self, _channel_id: &str, text: &str) -> Result<(), BotError> {
        if self.fail_sends {
            return Err(BotError::Gateway("send refused".into()));
        }
        self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_embed(&self, _channel_id: &str, embed: &Embed) -> Result<(), BotError> {
        if self.fail_sends {
            return Err(BotError::Gateway("send refused".into()));
        }
        self.sent.lock().unwrap().push(Sent::Embed(embed.clone()));
        Ok(())
    }
}

pub fn message(content: &str) -> InboundMessage {
    InboundMessage::new("m1", "user", CHANNEL, content)
}

/// Store whose every call fails with a backend error. Counts writes attempted.
#[derive(Default)]
pub struct BrokenStore {
    writes: AtomicUsize,
}

impl BrokenStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

fn broken() -> StoreError {
    StoreError::Backend("database is locked".into())
}

#[async_trait]
impl LearnStore for BrokenStore {
    async fn get(&self, _scope: &str, _key: &str) -> Result<LearnedItem, StoreError> {
        Err(broken())
    }

    async fn new_item(&self, _item: LearnedItem) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(broken())
    }

    async fn insert_if_absent(&self, _item: LearnedItem) -> Result<bool, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(broken())
    }

    async fn remove(&self, _scope: &str, _key: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(broken())
    }
}

/// Build a context around the default built-in registry.
pub fn context(gateway: Arc<RecordingGateway>, store: Arc<InMemoryLearnStore>) -> Context {
    context_with(gateway, store, message("!test"))
}

pub fn context_with(
    gateway: Arc<RecordingGateway>,
    store: Arc<dyn LearnStore>,
    message: InboundMessage,
) -> Context {
    let registry = crate::builtin_registry().unwrap();
    Context::new(
        message,
        gateway,
        store,
        Arc::new(registry),
        Arc::new(BotSettings::default()),
    )
}

pub fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn registry_with(extra: Vec<crate::FnCommand>) -> CommandRegistry {
    let mut registry = crate::builtin_registry().unwrap();
    for cmd in extra {
        registry.register(cmd).unwrap();
    }
    registry
}
