//! Translation engine client: one outbound request per operation.
//!
//! Wraps the opaque detect/translate service behind two calls, each a single
//! JSON request/response round trip. The credential travels with every call.
//! Every failure mode (a transport error, a non-2xx status, a
//! backend-reported error string, a body missing its payload) is normalized
//! into [`EngineError`] before it reaches the store; the error's display
//! text is what a failed task shows in place of translated text.

use crate::options::TranslationOptions;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Normalized failure for a single detect or translate round trip.
///
/// No retryable/fatal distinction is made here; a settled failure is simply
/// recorded on its task.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to reach translation engine: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("translation engine error ({status}): {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The engine answered 2xx but reported an error of its own.
    #[error("{0}")]
    Backend(String),

    /// 2xx answer with neither a payload nor an error field.
    #[error("translation engine returned an incomplete response")]
    Incomplete,

    #[error("translation request timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectRequest<'a> {
    api_key: &'a str,
    action: &'static str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    api_key: &'a str,
    action: &'static str,
    text: &'a str,
    /// Explicit source locale, or null for per-call auto-detection.
    source_locale: Option<&'a str>,
    target_locale: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hints: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    locale: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    text: Option<String>,
    error: Option<String>,
}

/// HTTP client for the translation engine.
#[derive(Debug, Clone)]
pub struct EngineClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl EngineClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    /// Bound every call; a call over budget fails with
    /// [`EngineError::Timeout`]. Calls are unbounded by default, matching a
    /// backend that is trusted to answer eventually.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Ask the engine which locale the text is written in.
    ///
    /// Callers must not pass empty or whitespace-only text; the orchestrator
    /// guards submissions before detection is ever attempted.
    pub async fn detect_locale(&self, api_key: &str, text: &str) -> Result<String, EngineError> {
        let request = DetectRequest {
            api_key,
            action: "detect",
            text,
        };
        let body: DetectResponse = self.send(&request).await?;
        if let Some(error) = body.error {
            return Err(EngineError::Backend(error));
        }
        body.locale.ok_or(EngineError::Incomplete)
    }

    /// Translate `text` into `target`.
    ///
    /// `source` is `None` under auto-detect; the engine then detects per
    /// call on its own. Options compose into a hint payload; when they are
    /// all empty, no hints are sent.
    pub async fn translate(
        &self,
        api_key: &str,
        text: &str,
        source: Option<&str>,
        target: &str,
        options: &TranslationOptions,
    ) -> Result<String, EngineError> {
        let request = TranslateRequest {
            api_key,
            action: "translate",
            text,
            source_locale: source,
            target_locale: target,
            hints: build_hints(options),
        };
        let body: TranslateResponse = self.send(&request).await?;
        if let Some(error) = body.error {
            return Err(EngineError::Backend(error));
        }
        body.text.ok_or(EngineError::Incomplete)
    }

    async fn send<Req, Resp>(&self, request: &Req) -> Result<Resp, EngineError>
    where
        Req: Serialize,
        Resp: for<'de> Deserialize<'de>,
    {
        let round_trip = self.round_trip(request);
        match self.timeout {
            Some(budget) => match tokio::time::timeout(budget, round_trip).await {
                Ok(result) => result,
                Err(_) => Err(EngineError::Timeout(budget)),
            },
            None => round_trip.await,
        }
    }

    async fn round_trip<Req, Resp>(&self, request: &Req) -> Result<Resp, EngineError>
    where
        Req: Serialize,
        Resp: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            // The engine reports failures as {"error": "..."} with a non-2xx
            // status; fall back to the raw body for anything else.
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .get("error")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or(body);
            return Err(EngineError::Status { status, message });
        }

        Ok(response.json::<Resp>().await?)
    }
}

/// Build the hints object the engine understands: a `_context` entry with the
/// composed instruction plus one entry per preserve-term.
fn build_hints(options: &TranslationOptions) -> Option<Value> {
    let instruction = options.hint_instruction()?;
    let mut hints = serde_json::Map::new();
    hints.insert("_context".to_string(), json!([instruction]));
    for term in &options.preserve_terms {
        hints.insert(term.clone(), json!([term]));
    }
    Some(Value::Object(hints))
}
