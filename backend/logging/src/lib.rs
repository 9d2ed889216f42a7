//! Structured logging components for Mimic.
//!
//! Handles subscriber setup (console + rolling NDJSON file) and secret redaction.

pub mod logger;
pub mod redact;

pub use logger::{build_env_filter, init_logger};
pub use redact::redact_sensitive_data;
