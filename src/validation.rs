use std::sync::LazyLock;

use regex::Regex;

use crate::error::LookupError;

/// Letters, digits, ASCII whitespace and the punctuation found in English terms.
static ENGLISH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[A-Za-z0-9\s\-_.,!?'"():;]*$"#).expect("valid regex"));

/// Check that `text` is a non-empty English term and return it trimmed.
pub fn validate_input(text: &str) -> Result<&str, LookupError> {
    let term = text.trim();
    if term.is_empty() {
        return Err(LookupError::EmptyInput);
    }

    // `\s` is Unicode-aware in the regex crate; only ASCII whitespace is English.
    if !term.is_ascii() || !ENGLISH_RE.is_match(term) {
        return Err(LookupError::UnsupportedLanguage);
    }

    Ok(term)
}
