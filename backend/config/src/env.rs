//! Environment variable handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` substitution inside string values, resolved at load time.
//!   Only uppercase `[A-Z_][A-Z0-9_]*` names are matched; `$${VAR}` escapes
//!   to a literal `${VAR}`.
//! - Whole-field overrides (`MIMIC_PREFIX`, `DISCORD_TOKEN`, `MIMIC_DB`,
//!   `RUST_LOG`) applied after the file is parsed.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{BotConfig, DiscordConfig, LoggingConfig, StorageConfig};

/// Matches `${VAR}` and the escaped form `$${VAR}`.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config JSON value tree.
///
/// Returns an error if any referenced env var is not set or is empty.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    substitute_value(value, &std::env::vars().collect(), "")
}

/// Substitute env vars using a provided map (useful for testing).
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &regex::Captures| {
        let var_name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Apply whole-field overrides from the process environment.
pub fn apply_env_overrides(config: BotConfig) -> BotConfig {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply whole-field overrides from a provided map (useful for testing).
pub fn apply_env_overrides_with(mut config: BotConfig, env: &HashMap<String, String>) -> BotConfig {
    let get = |key: &str| env.get(key).filter(|v| !v.is_empty()).cloned();

    if let Some(prefix) = get("MIMIC_PREFIX") {
        config.prefix = Some(prefix);
    }
    if let Some(token) = get("DISCORD_TOKEN") {
        config.discord.get_or_insert_with(DiscordConfig::default).token = Some(token);
    }
    if let Some(db) = get("MIMIC_DB") {
        config.storage.get_or_insert_with(StorageConfig::default).db_path = Some(db);
    }
    if let Some(level) = get("RUST_LOG") {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_simple_var() {
        let v = json!({"discord": {"token": "${DISCORD_BOT_TOKEN}"}});
        let env = env(&[("DISCORD_BOT_TOKEN", "abc.def")]);
        let result = resolve_env_vars_with(&v, &env).unwrap();
        assert_eq!(result["discord"]["token"], "abc.def");
    }

    #[test]
    fn substitutes_inside_text() {
        let v = json!({"dbPath": "/data/${GUILD_SET}/mimic.db"});
        let env = env(&[("GUILD_SET", "prod")]);
        let result = resolve_env_vars_with(&v, &env).unwrap();
        assert_eq!(result["dbPath"], "/data/prod/mimic.db");
    }

    #[test]
    fn error_on_missing_var() {
        let v = json!({"info": {"name": "${MISSING_VAR}"}});
        let err = resolve_env_vars_with(&v, &HashMap::new()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("MISSING_VAR"));
        assert!(msg.contains("info.name"));
    }

    #[test]
    fn escaped_reference_is_kept_literal() {
        let v = json!({"prefix": "$${NOT_A_VAR}"});
        let result = resolve_env_vars_with(&v, &HashMap::new()).unwrap();
        assert_eq!(result["prefix"], "${NOT_A_VAR}");
    }

    #[test]
    fn passthrough_non_var_strings() {
        let v = json!({"prefix": "$", "n": 3, "list": ["a", "${X}"]});
        let env = env(&[("X", "x")]);
        let result = resolve_env_vars_with(&v, &env).unwrap();
        assert_eq!(result["prefix"], "$");
        assert_eq!(result["n"], 3);
        assert_eq!(result["list"][1], "x");
    }

    #[test]
    fn overrides_replace_fields() {
        let config = BotConfig::default();
        let env = env(&[
            ("MIMIC_PREFIX", "?"),
            ("DISCORD_TOKEN", "tok"),
            ("MIMIC_DB", "/tmp/x.db"),
            ("RUST_LOG", ""),
        ]);
        let config = apply_env_overrides_with(config, &env);
        assert_eq!(config.prefix(), "?");
        assert_eq!(config.discord_token(), Some("tok"));
        assert_eq!(config.db_path(), "/tmp/x.db");
        assert!(config.logging.is_none());
    }
}
