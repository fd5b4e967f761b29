// ============================================================
// VALIDATION OUTCOME TYPES
// ============================================================
// Field-level errors and the final result of one import run

use serde::{Deserialize, Serialize};

use super::ImportedRecord;

/// How many errors are surfaced to the caller. The true invalid-row count
/// stays derivable from `total_rows - valid_rows`.
pub const MAX_SURFACED_ERRORS: usize = 5;

/// One field failure at one row. `row` 0 means the header line itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    pub row: usize,
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(row: usize, field: &str, message: String) -> Self {
        Self {
            row,
            field: field.to_string(),
            message,
            value: None,
        }
    }

    pub fn with_value(row: usize, field: &str, message: String, value: &str) -> Self {
        Self {
            row,
            field: field.to_string(),
            message,
            value: Some(value.to_string()),
        }
    }

    pub fn missing_header(field: &str) -> Self {
        Self::new(0, field, format!("Missing required header: {}", field))
    }
}

/// Outcome of one import run. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,

    /// First few field errors, in file order. Capped at
    /// [`MAX_SURFACED_ERRORS`]; the full invalid count may be larger.
    pub errors: Vec<ValidationError>,

    pub total_rows: usize,
    pub valid_rows: usize,

    /// Validated records, present only when `success`. Callers must never
    /// act on partially valid data implicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ImportedRecord>>,
}

impl ImportResult {
    /// Rows that failed validation. Always `total_rows - valid_rows`.
    pub fn invalid_rows(&self) -> usize {
        self.total_rows - self.valid_rows
    }
}
