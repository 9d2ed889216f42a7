//! Built-in command handlers.
//!
//! Each handler is a concrete struct implementing `Command`. User-facing
//! rejections are plain replies and return `Ok`; store and gateway failures
//! are returned for the dispatcher to log.
use async_trait::async_trait;
use mimic_core::{BotError, Embed};
use mimic_memory::{LearnStore, LearnedItem};
use tracing::info;

use crate::context::Context;
use crate::registry::CommandRegistry;
use crate::types::Command;

const VERY_FUNNY: &str = "Very funny...";
const ALREADY_LEARNED: &str = "haha, no";
const GUILD_ONLY: &str = "Learned commands only work inside a server";

/// The invocation's guild, or `None` after telling the user there is none.
async fn guild_or_reply(ctx: &Context) -> Result<Option<String>, BotError> {
    match ctx.guild().await {
        Ok(guild) => Ok(Some(guild)),
        Err(BotError::NoGuild(_)) => ctx.send(GUILD_ONLY).await.map(|()| None),
        Err(e) => Err(e),
    }
}

/// Registry holding `help`, `info`, `learn` and `unlearn`.
pub fn builtin_registry() -> Result<CommandRegistry, BotError> {
    let mut registry = CommandRegistry::new();
    registry.register(HelpHandler)?;
    registry.register(InfoHandler)?;
    registry.register(LearnHandler)?;
    registry.register(UnlearnHandler)?;
    Ok(registry)
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

pub struct HelpHandler;

#[async_trait]
impl Command for HelpHandler {
    fn name(&self) -> &str {
        "help"
    }

    fn help(&self) -> &str {
        "Sends an help message"
    }

    async fn run(&self, ctx: &Context, _args: &[String]) -> Result<(), BotError> {
        let prefix = ctx.prefix();
        let text: String = ctx
            .registry()
            .all()
            .iter()
            .map(|cmd| format!("`{}{}` {}\n", prefix, cmd.name(), cmd.help()))
            .collect();
        ctx.send(&text).await
    }
}

// ---------------------------------------------------------------------------
// info
// ---------------------------------------------------------------------------

pub struct InfoHandler;

#[async_trait]
impl Command for InfoHandler {
    fn name(&self) -> &str {
        "info"
    }

    fn help(&self) -> &str {
        "Sends info about the bot"
    }

    async fn run(&self, ctx: &Context, _args: &[String]) -> Result<(), BotError> {
        let info = &ctx.settings().info;
        let session = ctx.session();
        let embed = Embed::new()
            .title(&info.name)
            .description("Info")
            .field("Author", &info.author)
            .field("Server count", session.guild_count().to_string())
            .field(
                "Invite link",
                format!(
                    "https://discordapp.com/oauth2/authorize?client_id={}&scope=bot",
                    session.bot_user_id()
                ),
            )
            .field("Github", &info.repository);
        ctx.send_embed(&embed).await
    }
}

// ---------------------------------------------------------------------------
// learn / unlearn
// ---------------------------------------------------------------------------

pub struct LearnHandler;

#[async_trait]
impl Command for LearnHandler {
    fn name(&self) -> &str {
        "learn"
    }

    fn help(&self) -> &str {
        "Teach a message-response command to the bot"
    }

    async fn run(&self, ctx: &Context, args: &[String]) -> Result<(), BotError> {
        let Some(name) = args.first() else {
            return ctx
                .send(&format!("Usage: `{}learn <name> <response...>`", ctx.prefix()))
                .await;
        };
        if ctx.registry().is_reserved(name) {
            return ctx.send(VERY_FUNNY).await;
        }

        let Some(guild) = guild_or_reply(ctx).await? else {
            return Ok(());
        };
        match ctx.store().get(&guild, name).await {
            Ok(_) => return ctx.send(ALREADY_LEARNED).await,
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let item = LearnedItem::new(&guild, name, args[1..].join(" "));
        if !ctx.store().insert_if_absent(item).await? {
            // Another dispatch learned the same name since the check above.
            return ctx.send(ALREADY_LEARNED).await;
        }

        info!(guild_id = %guild, item = %name, "Learned command");
        ctx.send(&format!("Learned {name} successfully")).await
    }
}

pub struct UnlearnHandler;

#[async_trait]
impl Command for UnlearnHandler {
    fn name(&self) -> &str {
        "unlearn"
    }

    fn help(&self) -> &str {
        "Unlearn a message-response command"
    }

    async fn run(&self, ctx: &Context, args: &[String]) -> Result<(), BotError> {
        let Some(name) = args.first() else {
            return ctx
                .send(&format!("Usage: `{}unlearn <name>`", ctx.prefix()))
                .await;
        };
        if ctx.registry().is_reserved(name) {
            return ctx.send(VERY_FUNNY).await;
        }

        let Some(guild) = guild_or_reply(ctx).await? else {
            return Ok(());
        };
        ctx.store().remove(&guild, name).await?;

        info!(guild_id = %guild, item = %name, "Unlearned command");
        ctx.send(&format!("Unlearned {name} successfully")).await
    }
}
