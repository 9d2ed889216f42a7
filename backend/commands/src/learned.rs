//! Learned commands: per-guild message/response pairs read from the store.
use async_trait::async_trait;
use mimic_core::BotError;
use mimic_memory::{LearnStore, LearnedItem};

use crate::context::Context;
use crate::types::Command;

/// An ephemeral command materialized from a stored item for one dispatch.
#[derive(Debug, Clone)]
pub struct LearnedCommand {
    item: LearnedItem,
}

impl LearnedCommand {
    pub fn new(item: LearnedItem) -> Self {
        Self { item }
    }
}

#[async_trait]
impl Command for LearnedCommand {
    fn name(&self) -> &str {
        &self.item.message
    }

    fn help(&self) -> &str {
        ""
    }

    async fn run(&self, ctx: &Context, _args: &[String]) -> Result<(), BotError> {
        ctx.send(&self.item.response).await
    }
}

/// Look up `name` among the items learned in `guild`.
///
/// A missing item yields [`BotError::NotFound`]; any other store failure
/// yields [`BotError::Storage`].
pub async fn resolve_learned(
    store: &dyn LearnStore,
    guild: &str,
    name: &str,
) -> Result<LearnedCommand, BotError> {
    let item = store.get(guild, name).await?;
    Ok(LearnedCommand::new(item))
}
