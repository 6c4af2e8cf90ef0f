//! Target-language support.
//!
//! Input is always English; the language code only selects which language the
//! OpenAI explanation is written in.
//!
//! - `registry`: the static table of target languages
//! - `language`: `Language`, a resolved entry with English fallback
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::Language;
//!
//! let japanese = Language::resolve("ja");
//! assert_eq!(japanese.name(), "Japanese");
//!
//! // Unknown codes (including "auto") explain in English
//! assert_eq!(Language::resolve("auto").name(), "English");
//! ```

mod language;
mod registry;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry, AUTO_CODE, FALLBACK_CODE};

/// Language codes advertised to the host.
pub fn supported_languages() -> Vec<&'static str> {
    LanguageRegistry::get().supported_codes()
}
