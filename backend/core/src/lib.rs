pub mod embed;
pub mod error;
pub mod message;
pub mod traits;

pub use embed::{Embed, EmbedField};
pub use error::BotError;
pub use message::InboundMessage;
pub use traits::Gateway;
