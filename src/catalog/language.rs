//! Catalog-validated language handle.

use crate::catalog::{LanguageCatalog, LanguageConfig, TextDirection};
use anyhow::{bail, Result};
use std::fmt;

/// A language known to the catalog.
///
/// Constructed through [`Language::from_code`], so holding a `Language`
/// guarantees its code resolves to a catalog entry. The handle is `Copy`;
/// all metadata lives in the catalog and is borrowed `'static`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// Locale tag (e.g., "en", "pt-BR")
    code: &'static str,
}

impl Language {
    /// Create a Language from a locale tag.
    ///
    /// # Errors
    /// Fails when the code is not in the catalog. Detection results go
    /// through this path: a locale the catalog does not know is treated as a
    /// failed detection by the caller, never a crash.
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageCatalog::get().get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The locale tag.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full catalog entry for this language.
    ///
    /// # Panics
    /// Panics if the code is missing from the catalog, which cannot happen
    /// for a `Language` built via `from_code`.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageCatalog::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Name of the language in the language itself.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Rendering direction of the language's script.
    pub fn direction(&self) -> TextDirection {
        self.config().direction
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
