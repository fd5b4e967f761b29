// ============================================================
// PROCESSING STATE
// ============================================================
// Progress snapshot mutated in place during one run, plus the
// cancellation flag checked at chunk boundaries

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStage {
    Parsing,
    Validating,
    Importing,
    Complete,
    Error,
    Cancelled,
}

/// Progress snapshot for one import run. Discarded at run end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingState {
    pub stage: ProcessingStage,

    /// Percent complete, 0-100, rounded. Never decreases within one run.
    pub progress: u8,

    /// Last data row processed (1-based file order)
    pub current_row: usize,

    pub total_rows: usize,
    pub message: String,
}

impl ProcessingState {
    pub fn new(stage: ProcessingStage, message: &str) -> Self {
        Self {
            stage,
            progress: 0,
            current_row: 0,
            total_rows: 0,
            message: message.to_string(),
        }
    }

    pub fn enter(&mut self, stage: ProcessingStage, message: &str) {
        self.stage = stage;
        self.message = message.to_string();
    }

    /// Record progress through the row set. `processed` out of `total`
    /// rows are done; the last of them had index `current_row`.
    pub fn advance(&mut self, processed: usize, total: usize, current_row: usize) {
        self.progress = percent_complete(processed, total);
        self.current_row = current_row;
        self.total_rows = total;
    }
}

/// Rounded percentage, safe for total == 0.
pub(crate) fn percent_complete(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (((processed as f64) / (total as f64)) * 100.0).round() as u8
}

/// Caller-controlled flag observed by the engine between chunks.
/// Cloning shares the underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
