//! Config validation with user-friendly error messages.

use crate::schema::{BotConfig, StorageBackend};
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &BotConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_prefix(config, &mut report);
    validate_discord(config, &mut report);
    validate_storage(config, &mut report);
    report
}

fn validate_prefix(config: &BotConfig, report: &mut ValidationReport) {
    let prefix = config.prefix();
    if prefix.is_empty() {
        report.error("prefix", "Prefix must not be empty; every message would be a command");
    } else if prefix.chars().any(char::is_whitespace) {
        report.warn("prefix", "Prefix contains whitespace; it must be typed exactly");
    }
}

fn validate_discord(config: &BotConfig, report: &mut ValidationReport) {
    if config.discord_token().is_none() {
        report.error("discord.token", "No Discord bot token configured (set DISCORD_TOKEN)");
    }
}

fn validate_storage(config: &BotConfig, report: &mut ValidationReport) {
    match config.storage_backend() {
        StorageBackend::Sqlite if config.db_path().trim().is_empty() => {
            report.error("storage.dbPath", "SQLite backend requires a database path");
        }
        StorageBackend::Memory => {
            report.warn("storage.backend", "Memory backend forgets learned commands on restart");
        }
        StorageBackend::Sqlite => {}
    }
}
