//! Shared helper functions for CLI commands

use std::io::{self, IsTerminal};

/// Truncate a string to `max_len` characters, adding "..." if truncated
///
/// Counts characters, not bytes, so board names with accents or CJK text are
/// never split mid-codepoint.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Value or "N/A"
pub fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("N/A")
}

/// True when both stdin and stderr are attached to a terminal
///
/// dialoguer draws its prompts on stderr, so piped stdin or redirected stderr
/// means plain line reads instead.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}
