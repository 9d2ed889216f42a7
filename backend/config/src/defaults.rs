//! Config defaults: applies default values to parsed config.

use crate::schema::{BotConfig, InfoConfig, LoggingConfig, StorageConfig};

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_DB_PATH: &str = "mimic.db";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_BOT_NAME: &str = "Mimic";
pub const DEFAULT_AUTHOR: &str = "Mimic contributors";
pub const DEFAULT_REPOSITORY: &str = "https://github.com/mimic-bot/mimic";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: BotConfig) -> BotConfig {
    let config = apply_prefix_default(config);
    let config = apply_storage_defaults(config);
    let config = apply_logging_defaults(config);
    apply_info_defaults(config)
}

fn apply_prefix_default(mut config: BotConfig) -> BotConfig {
    if config.prefix.is_none() {
        config.prefix = Some(DEFAULT_PREFIX.to_string());
    }
    config
}

fn apply_storage_defaults(mut config: BotConfig) -> BotConfig {
    let storage = config.storage.get_or_insert_with(StorageConfig::default);
    storage.backend.get_or_insert_with(Default::default);
    storage
        .db_path
        .get_or_insert_with(|| DEFAULT_DB_PATH.to_string());
    config
}

fn apply_logging_defaults(mut config: BotConfig) -> BotConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.dir.get_or_insert_with(|| DEFAULT_LOG_DIR.to_string());
    config
}

fn apply_info_defaults(mut config: BotConfig) -> BotConfig {
    let info = config.info.get_or_insert_with(InfoConfig::default);
    info.name.get_or_insert_with(|| DEFAULT_BOT_NAME.to_string());
    info.author.get_or_insert_with(|| DEFAULT_AUTHOR.to_string());
    info.repository
        .get_or_insert_with(|| DEFAULT_REPOSITORY.to_string());
    config
}
