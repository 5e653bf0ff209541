use crate::options::Tone;
use anyhow::{Context, Result};
use std::time::Duration;

/// Runtime configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    // Engine
    pub engine_url: String,
    /// Engine credential; absence surfaces as a credential prompt on submit
    pub engine_api_key: Option<String>,
    /// Optional per-call budget; a call over budget settles its task as failed
    pub request_timeout: Option<Duration>,

    // Display
    /// Dwell between batch settlement and the immersive display auto-closing
    pub immersive_dwell: Duration,

    // Session defaults
    /// Explicit source locale; `None` means auto-detect
    pub source_language: Option<String>,
    pub target_languages: Vec<String>,
    pub tone: Tone,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            engine_url: std::env::var("TRANSLATION_ENGINE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api/translate".to_string()),
            engine_api_key: std::env::var("TRANSLATION_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            request_timeout: std::env::var("TRANSLATION_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),

            immersive_dwell: Duration::from_millis(
                std::env::var("IMMERSIVE_DWELL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(3500),
            ),

            source_language: std::env::var("SOURCE_LANGUAGE")
                .ok()
                .filter(|v| !v.is_empty() && v != "auto"),
            target_languages: std::env::var("TARGET_LANGUAGES")
                .unwrap_or_else(|_| "es,fr,ja".to_string())
                .split(',')
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty())
                .collect(),
            tone: std::env::var("TRANSLATION_TONE")
                .ok()
                .map(|v| v.parse())
                .transpose()
                .context("TRANSLATION_TONE is not a recognized tone")?
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "TRANSLATION_ENGINE_URL",
            "TRANSLATION_API_KEY",
            "TRANSLATION_TIMEOUT_SECS",
            "IMMERSIVE_DWELL_MS",
            "SOURCE_LANGUAGE",
            "TARGET_LANGUAGES",
            "TRANSLATION_TONE",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().expect("Should succeed");

        assert_eq!(config.engine_url, "http://localhost:3000/api/translate");
        assert_eq!(config.engine_api_key, None);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.immersive_dwell, Duration::from_millis(3500));
        assert_eq!(config.source_language, None);
        assert_eq!(config.target_languages, vec!["es", "fr", "ja"]);
        assert_eq!(config.tone, Tone::Default);
    }

    #[test]
    #[serial]
    fn test_explicit_values() {
        clear_env();
        std::env::set_var("TRANSLATION_ENGINE_URL", "https://engine.test/api");
        std::env::set_var("TRANSLATION_API_KEY", "secret");
        std::env::set_var("TRANSLATION_TIMEOUT_SECS", "30");
        std::env::set_var("IMMERSIVE_DWELL_MS", "100");
        std::env::set_var("SOURCE_LANGUAGE", "en");
        std::env::set_var("TARGET_LANGUAGES", "de, it ,ar");
        std::env::set_var("TRANSLATION_TONE", "formal");

        let config = Config::from_env().expect("Should succeed");
        assert_eq!(config.engine_url, "https://engine.test/api");
        assert_eq!(config.engine_api_key.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.immersive_dwell, Duration::from_millis(100));
        assert_eq!(config.source_language.as_deref(), Some("en"));
        assert_eq!(config.target_languages, vec!["de", "it", "ar"]);
        assert_eq!(config.tone, Tone::Formal);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_auto_source_and_empty_key_mean_unset() {
        clear_env();
        std::env::set_var("SOURCE_LANGUAGE", "auto");
        std::env::set_var("TRANSLATION_API_KEY", "");

        let config = Config::from_env().expect("Should succeed");
        assert_eq!(config.source_language, None);
        assert_eq!(config.engine_api_key, None);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_tone_is_an_error() {
        clear_env();
        std::env::set_var("TRANSLATION_TONE", "sarcastic");

        let result = Config::from_env();
        assert!(result.is_err());

        clear_env();
    }
}
