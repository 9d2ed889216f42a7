pub mod context;
pub mod detection;
pub mod dispatch;
pub mod handlers;
pub mod learned;
pub mod registry;
pub mod settings;
pub mod types;

#[cfg(test)]
mod test_support;

pub use context::Context;
pub use detection::{detect_command, CommandInvocation};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use handlers::{builtin_registry, HelpHandler, InfoHandler, LearnHandler, UnlearnHandler};
pub use learned::{resolve_learned, LearnedCommand};
pub use registry::CommandRegistry;
pub use settings::{BotInfo, BotSettings};
pub use types::{Command, FnCommand};
