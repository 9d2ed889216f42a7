//! Startup wiring: config → store, sealed registry, dispatcher.

use std::sync::Arc;

use anyhow::{Context, Result};
use mimic_commands::{builtin_registry, BotInfo, BotSettings, Dispatcher, FnCommand};
use mimic_config::{redact, BotConfig, StorageBackend};
use mimic_logging::redact_sensitive_data;
use mimic_memory::{InMemoryLearnStore, LearnStore, SqliteLearnStore};
use tracing::info;

/// Settings the dispatcher needs, taken from a prepared config.
pub fn settings_from_config(config: &BotConfig) -> BotSettings {
    BotSettings {
        prefix: config.prefix().to_string(),
        info: BotInfo {
            name: config.info_name().to_string(),
            author: config.info_author().to_string(),
            repository: config.info_repository().to_string(),
        },
    }
}

/// Open the configured learned-item store.
pub fn open_store(config: &BotConfig) -> Result<Arc<dyn LearnStore>> {
    match config.storage_backend() {
        StorageBackend::Sqlite => {
            let store = SqliteLearnStore::open(config.db_path())
                .with_context(|| format!("Failed to open store at {}", config.db_path()))?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            info!("Using in-memory store; learned commands will not survive a restart");
            Ok(Arc::new(InMemoryLearnStore::new()))
        }
    }
}

/// Single-line rendering of the config for logs. Secret keys are masked
/// and token-shaped values elsewhere are scrubbed.
pub fn effective_config(config: &BotConfig) -> Result<String> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;
    Ok(redact_sensitive_data(&redact(&value).to_string()))
}

fn ping_command() -> FnCommand {
    FnCommand::new("ping", "Checks that the bot is alive", |ctx, _args| async move {
        ctx.send("pong").await
    })
}

/// Register every static command, then seal the registry inside a dispatcher.
pub fn build_dispatcher(config: &BotConfig, store: Arc<dyn LearnStore>) -> Result<Dispatcher> {
    let mut registry = builtin_registry().context("Failed to register built-in commands")?;
    registry
        .register(ping_command())
        .context("Failed to register ping command")?;

    info!(commands = registry.len(), prefix = %config.prefix(), "Command registry sealed");
    Ok(Dispatcher::new(registry, store, settings_from_config(config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_config::{apply_all_defaults, DiscordConfig, InfoConfig, StorageConfig};

    #[test]
    fn settings_follow_config() {
        let mut config = BotConfig::default();
        config.prefix = Some("mu!".into());
        config.info = Some(InfoConfig {
            name: Some("Mu".into()),
            ..Default::default()
        });
        let settings = settings_from_config(&apply_all_defaults(config));
        assert_eq!(settings.prefix, "mu!");
        assert_eq!(settings.info.name, "Mu");
        assert!(!settings.info.repository.is_empty());
    }

    #[test]
    fn dispatcher_has_builtins_and_ping() {
        let config = BotConfig::default();
        let dispatcher = build_dispatcher(&config, Arc::new(InMemoryLearnStore::new())).unwrap();
        let names: Vec<&str> = dispatcher.registry().names().collect();
        assert_eq!(names, vec!["help", "info", "learn", "unlearn", "ping"]);
        assert_eq!(dispatcher.prefix(), "!");
    }

    #[test]
    fn effective_config_hides_secrets() {
        let leaked = "Bot MTIzNDU2Nzg5MDEyMzQ1Njc4.GabcDE.abcdefghijklmnopqrstuvwxyz0123456789";
        let mut config = BotConfig::default();
        config.discord = Some(DiscordConfig {
            token: Some("super-secret-token-value".into()),
        });
        config.info = Some(InfoConfig {
            author: Some(leaked.into()),
            ..Default::default()
        });

        let line = effective_config(&config).unwrap();
        assert!(!line.contains("super-secret-token-value"));
        assert!(!line.contains("GabcDE"));
        assert!(line.contains("[REDACTED_TOKEN]"));
    }

    #[test]
    fn opens_sqlite_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = BotConfig::default();
        config.storage = Some(StorageConfig {
            backend: Some(StorageBackend::Sqlite),
            db_path: Some(dir.path().join("learn.db").to_string_lossy().into_owned()),
        });
        assert!(open_store(&config).is_ok());
        assert!(dir.path().join("learn.db").exists());
    }
}
