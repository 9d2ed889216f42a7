//! Command types.
//!
//! A command is anything with a name, a help line and an async action.
//! Two variants exist: closure-backed static commands ([`FnCommand`]) and
//! store-backed learned commands ([`crate::LearnedCommand`]).
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use mimic_core::BotError;

use crate::context::Context;

#[async_trait]
pub trait Command: Send + Sync {
    /// Name the command is invoked by (without prefix).
    fn name(&self) -> &str;

    /// One-line description for the help listing.
    fn help(&self) -> &str;

    /// Run the command. Errors are logged by the dispatcher, never shown to the user.
    async fn run(&self, ctx: &Context, args: &[String]) -> Result<(), BotError>;
}

type Action = Arc<dyn Fn(Context, Vec<String>) -> BoxFuture<'static, Result<(), BotError>> + Send + Sync>;

/// A static command built from a name, a help line and an async closure.
#[derive(Clone)]
pub struct FnCommand {
    name: String,
    help: String,
    action: Action,
}

impl FnCommand {
    pub fn new<F, Fut>(name: impl Into<String>, help: impl Into<String>, action: F) -> Self
    where
        F: Fn(Context, Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BotError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            help: help.into(),
            action: Arc::new(move |ctx, args| action(ctx, args).boxed()),
        }
    }
}

impl fmt::Debug for FnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand")
            .field("name", &self.name)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Command for FnCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn help(&self) -> &str {
        &self.help
    }

    async fn run(&self, ctx: &Context, args: &[String]) -> Result<(), BotError> {
        (self.action)(ctx.clone(), args.to_vec()).await
    }
}
