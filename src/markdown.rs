//! Markdown to plain text conversion for model output.
//!
//! The host renders paragraphs as plain text, so the explanation returned by
//! the chat model is flattened before it is split into paragraphs. Each pass
//! is a regex replacement applied in a fixed order: code is unwrapped before
//! emphasis stripping, and bracketed structures before whitespace collapsing.

use std::sync::LazyLock;

use regex::Regex;

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($re).expect("valid regex"));
    };
}

pattern!(FENCED_CODE_RE, r"(?s)```[A-Za-z0-9_+.-]*[ \t]*\n?(.*?)```");
pattern!(INLINE_CODE_RE, r"`([^`\n]+)`");
pattern!(HEADING_RE, r"(?m)^#{1,6}[ \t]+(.+)$");
pattern!(BOLD_STAR_RE, r"\*\*([^*\n]+?)\*\*");
pattern!(ITALIC_STAR_RE, r"\*([^*\s][^*\n]*?)\*");
pattern!(BOLD_UNDERSCORE_RE, r"__([^_\n]+?)__");
pattern!(ITALIC_UNDERSCORE_RE, r"_([^_\s][^_\n]*?)_");
pattern!(BULLET_RE, r"(?m)^[ \t]*[-*+][ \t]+");
pattern!(ORDERED_RE, r"(?m)^[ \t]*(\d+\.)[ \t]+");
pattern!(BLOCKQUOTE_RE, r"(?m)^[ \t]*>[ \t]*");
pattern!(RULE_RE, r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*$");
pattern!(IMAGE_RE, r"!\[([^\]]*)\]\([^)]+\)");
pattern!(LINK_RE, r"\[([^\]]+)\]\([^)]+\)");
pattern!(SPACES_RE, r" {2,}");
pattern!(BLANK_LINES_RE, r"\n{3,}");

/// Strip Markdown formatting, keeping the readable text and line structure.
pub fn strip_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut result = FENCED_CODE_RE.replace_all(text, "$1").into_owned();
    result = INLINE_CODE_RE.replace_all(&result, "$1").into_owned();
    result = HEADING_RE.replace_all(&result, "$1").into_owned();

    result = BOLD_STAR_RE.replace_all(&result, "$1").into_owned();
    result = ITALIC_STAR_RE.replace_all(&result, "$1").into_owned();
    result = BOLD_UNDERSCORE_RE.replace_all(&result, "$1").into_owned();
    result = ITALIC_UNDERSCORE_RE.replace_all(&result, "$1").into_owned();

    result = BULLET_RE.replace_all(&result, "• ").into_owned();
    result = ORDERED_RE.replace_all(&result, "$1 ").into_owned();
    result = BLOCKQUOTE_RE.replace_all(&result, "").into_owned();
    result = RULE_RE.replace_all(&result, "\n---\n").into_owned();

    // Images first, otherwise the link pass leaves a stray `!` behind.
    result = IMAGE_RE.replace_all(&result, "$1").into_owned();
    result = LINK_RE.replace_all(&result, "$1").into_owned();

    result = flatten_tables(&result);

    result = SPACES_RE.replace_all(&result, " ").into_owned();
    BLANK_LINES_RE.replace_all(&result, "\n\n").into_owned()
}

/// Drop `---|---` separator rows and turn cell pipes into spacing.
fn flatten_tables(text: &str) -> String {
    if !text.contains('|') {
        return text.to_string();
    }

    text.split('\n')
        .filter(|line| !is_table_separator(line))
        .map(|line| line.replace('|', "  "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_table_separator(line: &str) -> bool {
    let line = line.trim();
    line.contains('|')
        && line.contains('-')
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}
