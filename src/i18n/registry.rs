//! Language registry: the fixed table of target languages.
//!
//! The lookup itself only accepts English, but the explanation can be
//! written in any language listed here. Each entry carries the name used to
//! instruct the model ("respond in Japanese") and the name shown inside the
//! user-facing prompt ("日本語").

/// Metadata for one target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Host language code (e.g. "en", "zh-Hans")
    pub code: &'static str,

    /// English name, used in the model instruction (e.g. "Simplified Chinese")
    pub name: &'static str,

    /// Localized name, used in the user prompt (e.g. "简体中文")
    pub native_name: &'static str,
}

/// Code the host sends when it wants the language detected for it.
pub const AUTO_CODE: &str = "auto";

/// Code every unknown target falls back to.
pub const FALLBACK_CODE: &str = "en";

/// Static registry of target languages.
pub struct LanguageRegistry {
    languages: &'static [LanguageConfig],
}

static REGISTRY: LanguageRegistry = LanguageRegistry {
    languages: &[
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
        },
        LanguageConfig {
            code: "zh-Hans",
            name: "Simplified Chinese",
            native_name: "简体中文",
        },
        LanguageConfig {
            code: "zh-Hant",
            name: "Traditional Chinese",
            native_name: "繁體中文",
        },
        LanguageConfig {
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
        },
        LanguageConfig {
            code: "ko",
            name: "Korean",
            native_name: "한국어",
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
        },
        LanguageConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
        },
    ],
};

impl LanguageRegistry {
    pub fn get() -> &'static LanguageRegistry {
        &REGISTRY
    }

    /// Look up a language by its exact host code.
    pub fn get_by_code(&self, code: &str) -> Option<&'static LanguageConfig> {
        let languages: &'static [LanguageConfig] = self.languages;
        languages.iter().find(|lang| lang.code == code)
    }

    /// The English entry, used whenever a code is unknown.
    pub fn fallback(&self) -> &'static LanguageConfig {
        let languages: &'static [LanguageConfig] = self.languages;
        self.get_by_code(FALLBACK_CODE).unwrap_or(&languages[0])
    }

    pub fn list_all(&self) -> &'static [LanguageConfig] {
        self.languages
    }

    /// Codes advertised to the host: `auto` followed by every registry entry.
    pub fn supported_codes(&self) -> Vec<&'static str> {
        std::iter::once(AUTO_CODE)
            .chain(self.languages.iter().map(|lang| lang.code))
            .collect()
    }
}
