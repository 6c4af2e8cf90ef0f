//! Language type: a target language resolved against the registry.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// A language from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    config: &'static LanguageConfig,
}

impl Language {
    /// Strict lookup: fails for codes the registry does not know.
    ///
    /// # Example
    /// ```ignore
    /// let korean = Language::from_code("ko")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Language { config }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Lenient lookup used for explanations: unknown codes resolve to English.
    pub fn resolve(code: &str) -> Language {
        Self::from_code(code).unwrap_or_else(|_| Self::fallback())
    }

    pub fn fallback() -> Language {
        Language {
            config: LanguageRegistry::get().fallback(),
        }
    }

    /// English name, used when instructing the model.
    pub fn name(&self) -> &'static str {
        self.config.name
    }

    /// Localized name, used inside the user prompt.
    pub fn native_name(&self) -> &'static str {
        self.config.native_name
    }
}
