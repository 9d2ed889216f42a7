use async_trait::async_trait;

pub mod discord;

pub use discord::{DiscordAdapter, SerenityGateway};

/// All channel adapters implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Connect and feed inbound messages to the dispatcher until the
    /// connection ends.
    async fn start(&self) -> anyhow::Result<()>;
}
