//! Batch orchestration: fan one submission out into per-language engine
//! calls and drive the session lifecycle from their settlement.
//!
//! Every translate call is its own spawned task that writes its settlement
//! into the store independently, so a failure in one language never touches
//! its siblings and partial success is an ordinary outcome. A driver task
//! joins the workers purely for bookkeeping: it stops the batch timer and,
//! after a dwell, closes the immersive display the submission opened.
//!
//! Superseding a batch mid-flight is allowed. Nothing is cancelled; the
//! store's generation guard discards late settlements from the old batch.

use crate::catalog::Language;
use crate::engine::EngineClient;
use crate::store::{BatchGeneration, SessionStore, SourceSelection, TaskStatus};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

/// Dwell between batch settlement and the immersive display closing itself.
pub const DEFAULT_IMMERSIVE_DWELL: Duration = Duration::from_millis(3500);

/// Why a submission could not start.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// No engine credential configured. The batch never leaves idle, no
    /// network call is made, and the store's credential prompt is raised.
    #[error("translation engine credential is not configured")]
    MissingCredential,
}

/// Outcome of a submission attempt that passed the credential check.
#[derive(Debug)]
pub enum Submission {
    /// Nothing to do: empty source text or no target languages selected.
    Skipped,
    /// A batch was started.
    Started(BatchHandle),
}

/// Handle on a running batch.
#[derive(Debug)]
pub struct BatchHandle {
    generation: BatchGeneration,
    driver: JoinHandle<()>,
}

impl BatchHandle {
    pub fn generation(&self) -> BatchGeneration {
        self.generation
    }

    /// Wait until every task in this batch has settled and the elapsed time
    /// is recorded. Partial progress stays observable through the store
    /// while this waits; the immersive auto-close happens later, after the
    /// dwell, and is not waited on here.
    pub async fn settled(self) {
        // The driver finishes once all workers have; it neither panics nor
        // gets aborted.
        let _ = self.driver.await;
    }
}

/// Orchestrates submissions against a shared session store.
pub struct Orchestrator {
    engine: Arc<EngineClient>,
    store: Arc<SessionStore>,
    dwell: Duration,
}

impl Orchestrator {
    pub fn new(engine: EngineClient, store: Arc<SessionStore>) -> Self {
        Self {
            engine: Arc::new(engine),
            store,
            dwell: DEFAULT_IMMERSIVE_DWELL,
        }
    }

    /// Override the immersive auto-close dwell.
    pub fn with_dwell(mut self, dwell: Duration) -> Self {
        self.dwell = dwell;
        self
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Submit the current session state as a new batch.
    ///
    /// Guards, in order: a missing credential fails before any network call;
    /// empty trimmed source text or an empty target set is a no-op. A
    /// started submission opens the immersive display, begins a new batch
    /// generation, spawns detection when the source is auto-detect, and fans
    /// out one concurrent translate call per target language. Must be called
    /// within a Tokio runtime.
    pub fn submit(&self) -> Result<Submission, SubmitError> {
        let snapshot = self.store.snapshot();

        let Some(api_key) = snapshot.api_key else {
            self.store.request_credential();
            return Err(SubmitError::MissingCredential);
        };

        let text = snapshot.source_text.trim().to_string();
        if text.is_empty() || snapshot.target_languages.is_empty() {
            debug!("skipping submission: nothing to translate");
            return Ok(Submission::Skipped);
        }

        self.store.open_immersive_for_batch();
        let generation = self.store.start_batch(&snapshot.target_languages);
        info!(
            generation,
            targets = snapshot.target_languages.len(),
            "starting translation batch"
        );

        // Detection is informational and runs alongside the fan-out; the
        // translate calls below pass no source locale under auto-detect, and
        // a failed or unrecognized detection changes nothing.
        if snapshot.source_language == SourceSelection::AutoDetect {
            self.spawn_detection(api_key.clone(), text.clone());
        }

        let source_code = snapshot.source_language.outgoing_code();
        let text = Arc::new(text);
        let options = Arc::new(snapshot.options);

        let mut workers = JoinSet::new();
        for language in snapshot.target_languages {
            self.store
                .update_task(generation, language.code(), TaskStatus::InFlight);

            let engine = Arc::clone(&self.engine);
            let store = Arc::clone(&self.store);
            let api_key = api_key.clone();
            let text = Arc::clone(&text);
            let options = Arc::clone(&options);
            workers.spawn(async move {
                let status = match engine
                    .translate(&api_key, &text, source_code, language.code(), &options)
                    .await
                {
                    Ok(translated) => {
                        info!(language = language.code(), "translation settled");
                        TaskStatus::Succeeded(translated)
                    }
                    Err(error) => {
                        warn!(language = language.code(), %error, "translation failed");
                        TaskStatus::Failed(error.to_string())
                    }
                };
                store.update_task(generation, language.code(), status);
            });
        }

        let store = Arc::clone(&self.store);
        let dwell = self.dwell;
        let driver = tokio::spawn(async move {
            // The join is bookkeeping only: each settlement already reached
            // the store from its own worker, in whatever order it arrived.
            while workers.join_next().await.is_some() {}
            store.finish_batch(generation);
            info!(generation, "translation batch settled");

            tokio::spawn(async move {
                tokio::time::sleep(dwell).await;
                store.auto_close_immersive(generation);
            });
        });

        Ok(Submission::Started(BatchHandle { generation, driver }))
    }

    fn spawn_detection(&self, api_key: String, text: String) {
        let engine = Arc::clone(&self.engine);
        let store = Arc::clone(&self.store);
        store.set_detecting(true);
        tokio::spawn(async move {
            match engine.detect_locale(&api_key, &text).await {
                Ok(code) => match Language::from_code(&code) {
                    Ok(language) => {
                        info!(code = language.code(), "detected source language");
                        store.set_detected_language(Some(language));
                    }
                    // A locale the catalog does not know behaves exactly
                    // like a failed detection.
                    Err(_) => debug!(%code, "detection returned a locale outside the catalog"),
                },
                Err(error) => debug!(%error, "language detection failed"),
            }
            store.set_detecting(false);
        });
    }
}
