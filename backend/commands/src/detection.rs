//! Prefix detection and tokenization of inbound message text.
//!
//! Splitting is naive: the text after the prefix is split on every single
//! space, so consecutive spaces yield empty tokens. There is no quoting.

/// A detected command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// First token after the prefix.
    pub name: String,
    /// Remaining tokens, in order.
    pub args: Vec<String>,
}

/// Detect a prefixed command at the very start of `text`.
///
/// Returns `None` if the text does not start with `prefix` (exact,
/// case-sensitive, no trimming).
pub fn detect_command(text: &str, prefix: &str) -> Option<CommandInvocation> {
    let rest = text.strip_prefix(prefix)?;
    let mut tokens = rest.split(' ').map(str::to_string);
    let name = tokens.next().unwrap_or_default();

    Some(CommandInvocation {
        name,
        args: tokens.collect(),
    })
}
