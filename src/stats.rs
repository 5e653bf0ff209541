//! Derived aggregates for progress display.
//!
//! Everything here is computed from store reads; nothing is stored or
//! mutated. Display layers poll these after each observed change.

use crate::store::{Batch, TaskStatus};
use serde::Serialize;

/// Word and character counts for the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceStats {
    pub words: usize,
    pub chars: usize,
}

impl SourceStats {
    pub fn of(text: &str) -> SourceStats {
        let trimmed = text.trim();
        let words = if trimmed.is_empty() {
            0
        } else {
            trimmed.split_whitespace().count()
        };
        SourceStats {
            words,
            chars: text.chars().count(),
        }
    }
}

/// Batch completion aggregates, as the progress ring reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchProgress {
    pub fn of(batch: &Batch) -> BatchProgress {
        let mut progress = BatchProgress {
            total: batch.tasks().len(),
            succeeded: 0,
            failed: 0,
        };
        for task in batch.tasks() {
            match &task.status {
                TaskStatus::Succeeded(_) => progress.succeeded += 1,
                TaskStatus::Failed(_) => progress.failed += 1,
                TaskStatus::Pending | TaskStatus::InFlight => {}
            }
        }
        progress
    }

    /// Tasks that reached a terminal state.
    pub fn settled(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.settled() == self.total
    }

    /// Completion percentage shown on the progress ring. Counts successes
    /// only, so a batch with failures tops out below 100.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.total as f64 * 100.0
        }
    }
}
