//! Log Redaction
//!
//! Scrubs Discord bot tokens and bearer tokens from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

/// Discord bot tokens: base64 user id, timestamp, and HMAC joined by dots.
static DISCORD_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[MNO][A-Za-z\d_-]{23,25}\.[A-Za-z\d_-]{6}\.[A-Za-z\d_-]{27,38}").unwrap()
});
static BEARER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Bot|Bearer)\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "$1 [REDACTED_TOKEN]");
    DISCORD_TOKEN_RE
        .replace_all(&redacted, "[REDACTED_TOKEN]")
        .into_owned()
}
