// crates/host/src/log.rs

//! Logging setup and colored console output for forge_tool calls.

use tracing_subscriber::EnvFilter;

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";

const DEFAULT_FILTER: &str = "forge_core=info,forge_host=info";

/// Install the stderr tracing subscriber. `RUST_LOG` overrides the default
/// filter. Calling this more than once is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log a tool call.
pub fn tool_call(name: &str, args: &str) {
    eprintln!(
        "{MAGENTA}{BOLD}[Forge]{RESET} {CYAN}→ {}{RESET} {DIM}{}{RESET}",
        name,
        truncate(args, 100)
    );
}

/// Log a tool result.
pub fn tool_result(name: &str, result: &str, is_error: bool) {
    let (symbol, color) = if is_error { ("✗", RED) } else { ("✓", GREEN) };
    eprintln!(
        "{MAGENTA}{BOLD}[Forge]{RESET} {color}{symbol} {}{RESET}: {DIM}{}{RESET}",
        name,
        truncate(result, 150)
    );
}

/// Truncate and clean string for display.
fn truncate(s: &str, max: usize) -> String {
    let clean: String = s
        .chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .collect();
    let trimmed = clean.trim();
    match trimmed.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_strips_control_characters() {
        assert_eq!(truncate("  a\nb\tc  ", 10), "abc");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("ééééé", 3), "ééé...");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn init_twice_is_fine() {
        init();
        init();
    }
}
