//! Command dispatch: route one inbound message to a static or learned command.
//!
//! Per message: drop self-authored text, check the prefix, tokenize, look
//! the name up in the static registry, fall back to the guild's learned
//! items, then run the command in its own task. Nothing propagates back to
//! the gateway; every failure is logged here and reported as an outcome.
use std::sync::Arc;

use mimic_core::{BotError, Gateway, InboundMessage};
use mimic_memory::LearnStore;
use tracing::{debug, error};

use crate::context::Context;
use crate::detection::detect_command;
use crate::learned::resolve_learned;
use crate::registry::CommandRegistry;
use crate::settings::BotSettings;
use crate::types::Command;

/// How a single dispatch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The bot authored the message itself.
    SelfAuthored,
    /// The message does not start with the prefix.
    NoPrefix,
    /// Neither a static nor a learned command matched.
    NotFound { name: String },
    /// Resolution or the command's action failed; already logged.
    Failed { name: String, error: String },
    /// The command ran to completion.
    Completed { name: String, learned: bool },
}

struct Resolved {
    command: Arc<dyn Command>,
    learned: bool,
}

#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    store: Arc<dyn LearnStore>,
    settings: Arc<BotSettings>,
}

impl Dispatcher {
    /// Seal `registry` and build a dispatcher around it.
    pub fn new(registry: CommandRegistry, store: Arc<dyn LearnStore>, settings: BotSettings) -> Self {
        Self {
            registry: Arc::new(registry),
            store,
            settings: Arc::new(settings),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn prefix(&self) -> &str {
        &self.settings.prefix
    }

    /// Handle one inbound message end to end.
    pub async fn dispatch(&self, gateway: Arc<dyn Gateway>, message: InboundMessage) -> DispatchOutcome {
        if message.author_id == gateway.bot_user_id() {
            return DispatchOutcome::SelfAuthored;
        }

        let Some(invocation) = detect_command(&message.content, &self.settings.prefix) else {
            return DispatchOutcome::NoPrefix;
        };
        let name = invocation.name;

        let ctx = Context::new(
            message,
            gateway,
            Arc::clone(&self.store),
            Arc::clone(&self.registry),
            Arc::clone(&self.settings),
        );
        let _scope = ctx.cancellation().clone().drop_guard();

        let resolved = match self.resolve(&ctx, &name).await {
            Ok(resolved) => resolved,
            Err(e) if e.is_not_found() => {
                debug!(handler = "command", command = %name, "Command not found");
                return DispatchOutcome::NotFound { name };
            }
            Err(e) => {
                error!(handler = "command", command = %name, error = %e, "Get command");
                return DispatchOutcome::Failed { name, error: e.to_string() };
            }
        };

        let learned = resolved.learned;
        match invoke(resolved.command, ctx.clone(), invocation.args).await {
            Ok(()) => DispatchOutcome::Completed { name, learned },
            Err(e) => {
                let guild_id = ctx.message().guild_id.clone().unwrap_or_default();
                error!(
                    handler = "command",
                    command = %name,
                    learned,
                    guild_id = %guild_id,
                    channel_id = %ctx.message().channel_id,
                    error = %e,
                    "Command failed"
                );
                DispatchOutcome::Failed { name, error: e.to_string() }
            }
        }
    }

    /// Static registry first, so built-ins always win over learned items.
    async fn resolve(&self, ctx: &Context, name: &str) -> Result<Resolved, BotError> {
        if let Some(command) = self.registry.lookup(name) {
            return Ok(Resolved { command, learned: false });
        }

        let guild = ctx.guild().await?;
        let command = resolve_learned(self.store.as_ref(), &guild, name).await?;
        Ok(Resolved {
            command: Arc::new(command),
            learned: true,
        })
    }
}

/// Run a command in its own task so a panic stays inside this dispatch.
async fn invoke(command: Arc<dyn Command>, ctx: Context, args: Vec<String>) -> Result<(), BotError> {
    let handle = tokio::spawn(async move { command.run(&ctx, &args).await });
    match handle.await {
        Ok(result) => result,
        Err(join) if join.is_panic() => Err(BotError::Aborted("handler panicked".into())),
        Err(join) => Err(BotError::Aborted(join.to_string())),
    }
}
