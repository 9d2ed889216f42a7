//! `mimic check-config`: load, validate, and print the effective config.

use std::path::Path;

use anyhow::{bail, Result};
use mimic_config::{load_and_prepare, redact, PreparedConfig};

pub async fn run(path: &Path) -> Result<()> {
    println!("\n🔍 Checking Mimic config at {}\n", path.display());

    let PreparedConfig { config, report } = load_and_prepare(path).await?;

    let effective = redact(&serde_json::to_value(&config)?);
    println!("{}\n", serde_json::to_string_pretty(&effective)?);

    for warning in &report.warnings {
        println!("  🟡 {}: {}", warning.path, warning.message);
    }
    for error in &report.errors {
        println!("  🔴 {}: {}", error.path, error.message);
    }

    println!();
    if report.is_valid() {
        println!("✅ Config is valid.");
        Ok(())
    } else {
        bail!("{} config error(s) found", report.errors.len());
    }
}
