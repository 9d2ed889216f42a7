use std::sync::Arc;

use async_trait::async_trait;
use mimic_commands::Dispatcher;
use mimic_core::{BotError, Embed, Gateway, InboundMessage};
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::{Channel, Message as DiscordMessage};
use serenity::model::gateway::Ready;
use serenity::model::id::ChannelId;
use serenity::prelude::*;
use tracing::{debug, error, info};

use crate::ChannelAdapter;

/// Discord's maximum message content length in characters.
const MAX_DISCORD_LEN: usize = 2000;

/// Truncate a string to Discord's 2000-character limit.
fn truncate(s: &str) -> &str {
    match s.char_indices().nth(MAX_DISCORD_LEN) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

fn build_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new();
    if let Some(ref title) = embed.title {
        builder = builder.title(title);
    }
    if let Some(ref desc) = embed.description {
        builder = builder.description(desc);
    }
    for field in &embed.fields {
        builder = builder.field(&field.name, &field.value, field.inline);
    }
    builder
}

fn parse_channel(channel_id: &str) -> Result<ChannelId, BotError> {
    channel_id
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(ChannelId::new)
        .ok_or_else(|| BotError::Gateway(format!("invalid channel id: {channel_id}")))
}

fn gateway_err(e: serenity::Error) -> BotError {
    BotError::Gateway(e.to_string())
}

fn to_inbound(msg: &DiscordMessage) -> InboundMessage {
    let inbound = InboundMessage::new(
        msg.id.to_string(),
        msg.author.id.to_string(),
        msg.channel_id.to_string(),
        msg.content.clone(),
    );
    // Gateway message events carry the guild for every guild channel.
    match msg.guild_id {
        Some(guild_id) => inbound.with_guild(guild_id.to_string()),
        None => inbound.as_direct(),
    }
}

/// `Gateway` over the serenity context of a single event.
pub struct SerenityGateway {
    ctx: Context,
}

impl SerenityGateway {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Gateway for SerenityGateway {
    fn bot_user_id(&self) -> String {
        self.ctx.cache.current_user().id.to_string()
    }

    fn guild_count(&self) -> usize {
        self.ctx.cache.guild_count()
    }

    async fn channel_guild(&self, channel_id: &str) -> Result<Option<String>, BotError> {
        let id = parse_channel(channel_id)?;

        let cached = self.ctx.cache.channel(id).map(|c| c.guild_id);
        if let Some(guild_id) = cached {
            return Ok(Some(guild_id.to_string()));
        }

        debug!(channel_id, "Channel not cached; fetching");
        match id.to_channel(&self.ctx).await.map_err(gateway_err)? {
            Channel::Guild(channel) => Ok(Some(channel.guild_id.to_string())),
            _ => Ok(None),
        }
    }

    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), BotError> {
        let id = parse_channel(channel_id)?;
        id.say(&self.ctx.http, truncate(text))
            .await
            .map_err(gateway_err)?;
        Ok(())
    }

    async fn send_embed(&self, channel_id: &str, embed: &Embed) -> Result<(), BotError> {
        let id = parse_channel(channel_id)?;
        id.send_message(&self.ctx.http, CreateMessage::new().embed(build_embed(embed)))
            .await
            .map_err(gateway_err)?;
        Ok(())
    }
}

struct Handler {
    dispatcher: Arc<Dispatcher>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: DiscordMessage) {
        let inbound = to_inbound(&msg);
        let gateway = Arc::new(SerenityGateway::new(ctx));
        let outcome = self.dispatcher.dispatch(gateway, inbound).await;
        debug!(?outcome, channel_id = %msg.channel_id, "Dispatch finished");
    }

    async fn ready(&self, _: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
    }
}

pub struct DiscordAdapter {
    token: String,
    dispatcher: Arc<Dispatcher>,
}

impl DiscordAdapter {
    pub fn new(token: String, dispatcher: Arc<Dispatcher>) -> Self {
        Self { token, dispatcher }
    }
}

#[async_trait]
impl ChannelAdapter for DiscordAdapter {
    fn name(&self) -> &str { "discord" }

    async fn start(&self) -> anyhow::Result<()> {
        info!(prefix = %self.dispatcher.prefix(), "Starting Discord adapter");

        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let mut client = Client::builder(&self.token, intents)
            .event_handler(Handler { dispatcher: Arc::clone(&self.dispatcher) })
            .await?;

        if let Err(why) = client.start().await {
            error!("Client error: {:?}", why);
            anyhow::bail!("Discord client error: {:?}", why);
        }

        Ok(())
    }
}
