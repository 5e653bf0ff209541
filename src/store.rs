//! Session state store: the single shared, mutable session container.
//!
//! Every mutation the UI or the orchestrator performs goes through one of
//! the atomic operations here; no component holds a private copy of batch or
//! task state. Batches carry a generation tag, and task updates are keyed by
//! generation + language code, so a late settlement from a superseded batch
//! can never touch the current one and concurrent settlements commute.
//!
//! Operations never await while holding the lock, so the store can be shared
//! freely across spawned tasks behind an `Arc`.

use crate::catalog::Language;
use crate::options::{Tone, TranslationOptions};
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

/// Monotonically increasing identifier for one submission's batch.
pub type BatchGeneration = u64;

/// Lifecycle of a single per-language translation task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    InFlight,
    Succeeded(String),
    Failed(String),
}

impl TaskStatus {
    /// A settled task has reached success or failure; it never changes again
    /// within its batch generation.
    pub fn is_settled(&self) -> bool {
        matches!(self, TaskStatus::Succeeded(_) | TaskStatus::Failed(_))
    }
}

/// One unit of translation work inside a batch.
#[derive(Debug, Clone)]
pub struct TranslationTask {
    pub language: Language,
    pub status: TaskStatus,
}

/// The set of tasks spawned by one submission, plus batch-level bookkeeping.
#[derive(Debug, Clone)]
pub struct Batch {
    generation: BatchGeneration,
    started_at: DateTime<Utc>,
    started: Instant,
    elapsed: Option<Duration>,
    tasks: Vec<TranslationTask>,
}

impl Batch {
    pub fn generation(&self) -> BatchGeneration {
        self.generation
    }

    /// Wall-clock time the submission was made.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time from start to full settlement. `None` while any task is still
    /// pending or in flight.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Tasks in target-selection order.
    pub fn tasks(&self) -> &[TranslationTask] {
        &self.tasks
    }

    pub fn task(&self, code: &str) -> Option<&TranslationTask> {
        self.tasks.iter().find(|task| task.language.code() == code)
    }

    /// Whether every task has reached a terminal state.
    pub fn is_settled(&self) -> bool {
        self.tasks.iter().all(|task| task.status.is_settled())
    }
}

/// The user's source-language choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceSelection {
    /// Let the engine detect the source per call.
    #[default]
    AutoDetect,
    Explicit(Language),
}

impl SourceSelection {
    /// Locale code passed on outgoing translate calls. Auto-detect always
    /// passes nothing, even after a successful detection: the detected
    /// language is informational and the engine re-detects per call.
    pub fn outgoing_code(&self) -> Option<&'static str> {
        match self {
            SourceSelection::AutoDetect => None,
            SourceSelection::Explicit(language) => Some(language.code()),
        }
    }
}

/// Immersive display flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImmersiveDisplay {
    pub open: bool,

    /// Set when the display was opened by a submission; such a display
    /// closes itself once the batch settles. Manual opens never auto-close.
    pub auto_close: bool,
}

#[derive(Debug, Default)]
struct SessionState {
    source_text: String,
    source_language: SourceSelection,
    detected_language: Option<Language>,
    detecting: bool,
    target_languages: Vec<Language>,
    options: TranslationOptions,
    api_key: Option<String>,
    credential_prompt: bool,
    batch: Option<Batch>,
    next_generation: BatchGeneration,
    immersive: ImmersiveDisplay,
}

/// Read-only copy of the session for display and orchestration code.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub source_text: String,
    pub source_language: SourceSelection,
    pub detected_language: Option<Language>,
    pub detecting: bool,
    pub target_languages: Vec<Language>,
    pub options: TranslationOptions,
    pub api_key: Option<String>,
    pub credential_prompt: bool,
    pub batch: Option<Batch>,
    pub immersive: ImmersiveDisplay,
}

/// Shared session store.
///
/// Constructed at session start, passed by `Arc` to the orchestrator and the
/// display layer, discarded at session end.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: Mutex<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().expect("session state mutex poisoned")
    }

    // ==================== Selections ====================

    pub fn set_source_text(&self, text: impl Into<String>) {
        self.state().source_text = text.into();
    }

    pub fn source_text(&self) -> String {
        self.state().source_text.clone()
    }

    /// Selecting an explicit source clears any previous detection result;
    /// the detected language only describes auto-detect submissions.
    pub fn set_source_language(&self, selection: SourceSelection) {
        let mut state = self.state();
        state.source_language = selection;
        if matches!(selection, SourceSelection::Explicit(_)) {
            state.detected_language = None;
        }
    }

    pub fn source_language(&self) -> SourceSelection {
        self.state().source_language
    }

    pub fn set_detected_language(&self, language: Option<Language>) {
        self.state().detected_language = language;
    }

    pub fn detected_language(&self) -> Option<Language> {
        self.state().detected_language
    }

    pub fn set_detecting(&self, detecting: bool) {
        self.state().detecting = detecting;
    }

    pub fn is_detecting(&self) -> bool {
        self.state().detecting
    }

    /// Add the language to the target set if absent, remove it otherwise.
    ///
    /// Removal also drops the language's task from the current batch, even
    /// mid-flight; the underlying call is not cancelled, its late settlement
    /// just no-ops. Returns whether the language is selected afterwards.
    pub fn toggle_target_language(&self, language: Language) -> bool {
        let mut state = self.state();
        let position = state
            .target_languages
            .iter()
            .position(|selected| selected.code() == language.code());

        match position {
            Some(index) => {
                state.target_languages.remove(index);
                if let Some(batch) = state.batch.as_mut() {
                    batch
                        .tasks
                        .retain(|task| task.language.code() != language.code());
                }
                false
            }
            None => {
                state.target_languages.push(language);
                true
            }
        }
    }

    /// Target languages in user selection order.
    pub fn target_languages(&self) -> Vec<Language> {
        self.state().target_languages.clone()
    }

    // ==================== Options ====================

    pub fn set_tone(&self, tone: Tone) {
        self.state().options.tone = tone;
    }

    pub fn set_context(&self, context: impl Into<String>) {
        self.state().options.context = context.into();
    }

    pub fn set_preserve_terms(&self, terms: Vec<String>) {
        self.state().options.preserve_terms = terms;
    }

    pub fn options(&self) -> TranslationOptions {
        self.state().options.clone()
    }

    // ==================== Credential ====================

    pub fn set_api_key(&self, key: impl Into<String>) {
        let mut state = self.state();
        state.api_key = Some(key.into());
        state.credential_prompt = false;
    }

    pub fn api_key(&self) -> Option<String> {
        self.state().api_key.clone()
    }

    /// Raised when a submission was attempted without a credential; display
    /// code watches this flag to prompt for one.
    pub fn request_credential(&self) {
        self.state().credential_prompt = true;
    }

    pub fn credential_prompt(&self) -> bool {
        self.state().credential_prompt
    }

    // ==================== Batch ====================

    /// Replace the current batch with a fresh one, one `Pending` task per
    /// supplied language. Duplicate codes collapse to their first occurrence,
    /// so the task set never holds two tasks for one language. Returns the
    /// new batch's generation.
    pub fn start_batch(&self, languages: &[Language]) -> BatchGeneration {
        let mut state = self.state();
        state.next_generation += 1;
        let generation = state.next_generation;

        let mut tasks: Vec<TranslationTask> = Vec::with_capacity(languages.len());
        for language in languages {
            let duplicate = tasks
                .iter()
                .any(|task| task.language.code() == language.code());
            if !duplicate {
                tasks.push(TranslationTask {
                    language: *language,
                    status: TaskStatus::Pending,
                });
            }
        }

        state.batch = Some(Batch {
            generation,
            started_at: Utc::now(),
            started: Instant::now(),
            elapsed: None,
            tasks,
        });
        generation
    }

    /// Set one task's status.
    ///
    /// No-op when the generation is stale, the code is no longer in the
    /// current batch, or the transition would move a task backwards: statuses
    /// only advance `Pending → InFlight → settled`, and a settled task never
    /// changes within its generation.
    pub fn update_task(&self, generation: BatchGeneration, code: &str, status: TaskStatus) {
        let mut state = self.state();
        let Some(batch) = state.batch.as_mut() else {
            debug!(code, "dropping task update: no active batch");
            return;
        };
        if batch.generation != generation {
            debug!(
                code,
                generation,
                current = batch.generation,
                "dropping task update from superseded batch"
            );
            return;
        }
        let Some(task) = batch
            .tasks
            .iter_mut()
            .find(|task| task.language.code() == code)
        else {
            debug!(code, "dropping task update: language no longer in batch");
            return;
        };
        if task.status.is_settled() {
            debug!(code, "dropping task update: task already settled");
            return;
        }
        if status == TaskStatus::Pending && task.status != TaskStatus::Pending {
            debug!(code, "dropping task update: status would regress");
            return;
        }
        task.status = status;
    }

    /// Record the batch's elapsed time. No-op unless the generation is
    /// current, every task has settled, and the time was not already taken.
    pub fn finish_batch(&self, generation: BatchGeneration) {
        let mut state = self.state();
        if let Some(batch) = state.batch.as_mut() {
            if batch.generation == generation && batch.is_settled() && batch.elapsed.is_none() {
                batch.elapsed = Some(batch.started.elapsed());
            }
        }
    }

    /// Drop all tasks and timing.
    pub fn clear_batch(&self) {
        self.state().batch = None;
    }

    pub fn batch(&self) -> Option<Batch> {
        self.state().batch.clone()
    }

    pub fn current_generation(&self) -> Option<BatchGeneration> {
        self.state().batch.as_ref().map(Batch::generation)
    }

    /// Whether a batch exists and every one of its tasks has settled.
    pub fn batch_settled(&self) -> bool {
        self.state()
            .batch
            .as_ref()
            .map(Batch::is_settled)
            .unwrap_or(false)
    }

    // ==================== Immersive display ====================

    /// Open the immersive display for a starting batch; it will close itself
    /// once the batch settles and the dwell elapses.
    pub fn open_immersive_for_batch(&self) {
        self.state().immersive = ImmersiveDisplay {
            open: true,
            auto_close: true,
        };
    }

    /// Manual open/close from the display layer. Manual opens stay open
    /// until dismissed.
    pub fn set_immersive_open(&self, open: bool) {
        self.state().immersive = ImmersiveDisplay {
            open,
            auto_close: false,
        };
    }

    /// User dismissal of the immersive display.
    pub fn dismiss_immersive(&self) {
        self.set_immersive_open(false);
    }

    /// Close the display after the post-settlement dwell. Honored only while
    /// the display is still in auto-close mode and the settled batch is the
    /// one that opened it.
    pub fn auto_close_immersive(&self, generation: BatchGeneration) {
        let mut state = self.state();
        let settled = state
            .batch
            .as_ref()
            .map(|batch| batch.generation == generation && batch.is_settled())
            .unwrap_or(false);
        if settled && state.immersive.open && state.immersive.auto_close {
            state.immersive = ImmersiveDisplay::default();
        }
    }

    pub fn immersive(&self) -> ImmersiveDisplay {
        self.state().immersive
    }

    // ==================== Reads ====================

    /// Atomic read of the whole session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state();
        SessionSnapshot {
            source_text: state.source_text.clone(),
            source_language: state.source_language,
            detected_language: state.detected_language,
            detecting: state.detecting,
            target_languages: state.target_languages.clone(),
            options: state.options.clone(),
            api_key: state.api_key.clone(),
            credential_prompt: state.credential_prompt,
            batch: state.batch.clone(),
            immersive: state.immersive,
        }
    }
}
