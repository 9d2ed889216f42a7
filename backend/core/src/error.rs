use thiserror::Error;

/// Top-level error type for the Mimic bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// No static or learned command matched the requested name.
    #[error("command not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("gateway error: {0}")]
    Gateway(String),

    /// A static command name was registered twice.
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),

    /// The message was not sent inside a guild, so it has no learned commands.
    #[error("no guild for channel: {0}")]
    NoGuild(String),

    /// A command handler panicked or was aborted.
    #[error("command aborted: {0}")]
    Aborted(String),
}

impl BotError {
    /// True for the expected "nothing matched" outcome, including messages
    /// sent outside any guild.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BotError::NotFound(_) | BotError::NoGuild(_))
    }

    /// True for store and gateway failures.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, BotError::Storage(_) | BotError::Gateway(_))
    }
}
