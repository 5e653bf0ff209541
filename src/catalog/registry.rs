//! Language registry: single source of truth for all supported languages.
//!
//! The registry uses a singleton pattern with `OnceLock` for thread-safe
//! initialization and access. Entries are immutable and keep their insertion
//! order, which is the order selection UIs present them in.

use std::sync::OnceLock;

/// Rendering direction of a language's script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

/// Metadata for one supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Locale tag (e.g., "en", "pt-BR", "zh-Hans")
    pub code: &'static str,

    /// English name of the language (e.g., "Spanish", "Japanese")
    pub name: &'static str,

    /// Name of the language in the language itself (e.g., "Español", "日本語")
    pub native_name: &'static str,

    /// Direction translated text renders in
    pub direction: TextDirection,
}

/// Read-only catalog of every supported language.
pub struct LanguageCatalog {
    languages: Vec<LanguageConfig>,
}

/// Global catalog instance (initialized lazily)
static CATALOG: OnceLock<LanguageCatalog> = OnceLock::new();

impl LanguageCatalog {
    /// Get the global catalog instance.
    pub fn get() -> &'static LanguageCatalog {
        CATALOG.get_or_init(|| LanguageCatalog {
            languages: default_languages(),
        })
    }

    /// Look up a language by its locale tag.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Whether a locale tag exists in the catalog.
    pub fn contains(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// All languages, in stable insertion order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Number of languages in the catalog.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether the catalog is empty (it never is in practice).
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// The supported language set.
///
/// Codes are the locale tags the translation engine understands. Arabic is
/// the one right-to-left entry.
fn default_languages() -> Vec<LanguageConfig> {
    use TextDirection::{LeftToRight, RightToLeft};

    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "pt-BR",
            name: "Portuguese",
            native_name: "Português",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "ko",
            name: "Korean",
            native_name: "한국어",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "zh-Hans",
            name: "Chinese (Simplified)",
            native_name: "简体中文",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "ar",
            name: "Arabic",
            native_name: "العربية",
            direction: RightToLeft,
        },
        LanguageConfig {
            code: "hi",
            name: "Hindi",
            native_name: "हिन्दी",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "tr",
            name: "Turkish",
            native_name: "Türkçe",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "nl",
            name: "Dutch",
            native_name: "Nederlands",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "pl",
            name: "Polish",
            native_name: "Polski",
            direction: LeftToRight,
        },
        LanguageConfig {
            code: "sv",
            name: "Swedish",
            native_name: "Svenska",
            direction: LeftToRight,
        },
    ]
}
