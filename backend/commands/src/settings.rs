use serde::{Deserialize, Serialize};

/// Runtime settings the dispatcher and built-in commands read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSettings {
    /// Text every command message must start with.
    pub prefix: String,
    pub info: BotInfo,
}

/// What the `info` command reports about the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInfo {
    pub name: String,
    pub author: String,
    pub repository: String,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            prefix: "!".to_string(),
            info: BotInfo::default(),
        }
    }
}

impl Default for BotInfo {
    fn default() -> Self {
        Self {
            name: "Mimic".to_string(),
            author: "Mimic contributors".to_string(),
            repository: "https://github.com/mimic-bot/mimic".to_string(),
        }
    }
}
