//! `mimic-config`: Mimic runtime configuration management.
//!
//! Provides:
//! - Typed config schema (prefix, Discord, storage, logging, info)
//! - YAML loading
//! - `${ENV_VAR}` substitution and whole-field env overrides
//! - Default value application
//! - Validation report
//! - Config redaction for safe logging/display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config};
pub use redact::redact;
pub use schema::{BotConfig, DiscordConfig, InfoConfig, LoggingConfig, StorageBackend, StorageConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// A loaded config together with its validation report.
#[derive(Debug)]
pub struct PreparedConfig {
    pub config: BotConfig,
    pub report: ValidationReport,
}

/// Load, apply env substitution and overrides, apply defaults, and validate.
///
/// This is the main entry point for loading a config at runtime. Nothing is
/// logged here, since logging is usually configured from the result; callers
/// report the warnings and decide whether errors are fatal.
pub async fn load_and_prepare(path: &Path) -> Result<PreparedConfig> {
    let raw_config = load_config(path).await?;

    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;
    let config: BotConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_all_defaults(apply_env_overrides(config));

    let report = validate(&config);
    Ok(PreparedConfig { config, report })
}
