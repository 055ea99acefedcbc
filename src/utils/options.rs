use std::sync::LazyLock;

use regex::Regex;

/// Options are authored either one per line or separated by `<br>` tags.
static OPTION_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\n|<br>").expect("option separator regex is valid"));

/// Splits a stored option list into trimmed, non-empty options, keeping their order.
pub fn parse_options(raw: &str) -> Vec<String> {
    OPTION_SEPARATOR
        .split(raw)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
