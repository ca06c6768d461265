//! Display label, fallback name and description text.

use std::sync::LazyLock;

use core_text::{TextError, is_ascii};
use regex::Regex;

pub const HOMOGRAPH_WARNING: &str = " ⚠️ ATTENTION: This name contains non-ASCII characters as shown above. \
Please be aware that there are characters that look identical or very \
similar to English letters, especially characters from Cyrillic and Greek. \
Also, traditional Chinese characters can look identical or very similar to \
simplified variants. For more information: \
https://en.wikipedia.org/wiki/IDN_homograph_attack";

// Fixed-pattern substitution, not a length check: ids under 4 chars do not match.
static OBFUSCATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(.{0,6}).*(.{4})$").expect("static pattern compiles"));

/// Leading label of `name`, up to (excluding) the first `.`.
pub fn label(name: &str) -> Result<&str, TextError> {
    name.split_once('.')
        .map(|(head, _)| head)
        .ok_or(TextError::EmptyLabel)
}

/// `name` when normalized, otherwise `[<first 6>...<last 4>].mon` built from `token_id`.
pub fn display_name(name: &str, token_id: &str, is_normalized: bool) -> String {
    if is_normalized {
        return name.to_string();
    }
    OBFUSCATE.replace(token_id, "[${1}...${2}].mon").into_owned()
}

/// Homograph advisory for labels carrying non-ASCII characters, else empty.
pub fn homograph_warning(label: &str) -> &'static str {
    if is_ascii(label) { "" } else { HOMOGRAPH_WARNING }
}

/// Base text, then the normalization caveat, then the homograph advisory.
pub fn description(
    name: &str,
    display_name: &str,
    provided: Option<&str>,
    is_normalized: bool,
) -> String {
    let mut out = match provided {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => format!("{display_name}, an MNS name."),
    };
    if !is_normalized {
        out.push_str(&format!(" ({name} is not in normalized form)"));
    }
    let head = label(name).unwrap_or_default();
    out.push_str(homograph_warning(head));
    out
}
