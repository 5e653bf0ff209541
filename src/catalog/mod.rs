//! Language catalog: the static set of languages available for translation.
//!
//! - `registry`: single source of truth for supported languages and their
//!   metadata (code, names, text direction)
//! - `language`: catalog-validated `Language` handle used everywhere else
//!
//! The catalog is pure reference data, built once at first access and never
//! mutated.

mod language;
mod registry;

pub use language::Language;
pub use registry::{LanguageCatalog, LanguageConfig, TextDirection};
