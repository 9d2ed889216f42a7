//! Mimic runtime configuration schema.
//!
//! Every section is optional in the file; [`crate::apply_all_defaults`]
//! fills the gaps and the accessors below read the filled values.

use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_AUTHOR, DEFAULT_BOT_NAME, DEFAULT_DB_PATH, DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL,
    DEFAULT_PREFIX, DEFAULT_REPOSITORY,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    /// Text every command message must start with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<DiscordConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    /// What the `info` command reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<InfoConfig>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<StorageBackend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for the rolling NDJSON log files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl BotConfig {
    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    pub fn discord_token(&self) -> Option<&str> {
        self.discord
            .as_ref()
            .and_then(|d| d.token.as_deref())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage
            .as_ref()
            .and_then(|s| s.backend)
            .unwrap_or_default()
    }

    pub fn db_path(&self) -> &str {
        self.storage
            .as_ref()
            .and_then(|s| s.db_path.as_deref())
            .unwrap_or(DEFAULT_DB_PATH)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.dir.as_deref())
            .unwrap_or(DEFAULT_LOG_DIR)
    }

    pub fn info_name(&self) -> &str {
        self.info
            .as_ref()
            .and_then(|i| i.name.as_deref())
            .unwrap_or(DEFAULT_BOT_NAME)
    }

    pub fn info_author(&self) -> &str {
        self.info
            .as_ref()
            .and_then(|i| i.author.as_deref())
            .unwrap_or(DEFAULT_AUTHOR)
    }

    pub fn info_repository(&self) -> &str {
        self.info
            .as_ref()
            .and_then(|i| i.repository.as_deref())
            .unwrap_or(DEFAULT_REPOSITORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
prefix: "mu!"
discord:
  token: abc.def.ghi
storage:
  backend: memory
  dbPath: /var/lib/mimic.db
logging:
  level: debug
  dir: /var/log/mimic
info:
  name: Mu
  author: Someone
  repository: https://example.com/mu
"#;
        let config: BotConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.prefix(), "mu!");
        assert_eq!(config.discord_token(), Some("abc.def.ghi"));
        assert_eq!(config.storage_backend(), StorageBackend::Memory);
        assert_eq!(config.db_path(), "/var/lib/mimic.db");
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_dir(), "/var/log/mimic");
        assert_eq!(config.info_name(), "Mu");
        assert_eq!(config.info_repository(), "https://example.com/mu");
    }

    #[test]
    fn test_empty_config_accessors() {
        let config = BotConfig::default();
        assert_eq!(config.prefix(), "!");
        assert_eq!(config.discord_token(), None);
        assert_eq!(config.storage_backend(), StorageBackend::Sqlite);
        assert_eq!(config.db_path(), "mimic.db");
    }

    #[test]
    fn test_blank_token_is_absent() {
        let config: BotConfig = serde_yaml::from_str("discord:\n  token: '  '\n").unwrap();
        assert_eq!(config.discord_token(), None);
    }
}
