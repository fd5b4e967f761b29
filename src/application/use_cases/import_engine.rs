// ============================================================
// IMPORT ENGINE
// ============================================================
// Drive parser + validator over the full row set in bounded
// chunks, yielding between chunks, reporting progress, and
// honoring cancellation at chunk boundaries

use crate::application::use_cases::import_schema::schema_for;
use crate::application::use_cases::row_validator::{RowOutcome, RowValidator};
use crate::domain::csv::{ImportLimits, DEFAULT_CHUNK_SIZE};
use crate::domain::error::{AppError, Result};
use crate::domain::import::{
    CancellationToken, ImportKind, ImportResult, ImportedRecord, ProcessingStage, ProcessingState,
    ValidationError, MAX_SURFACED_ERRORS,
};
use crate::infrastructure::csv::CsvParser;

/// Options for one import run
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Rows validated between suspension points (default: 100)
    pub chunk_size: usize,

    /// Hard caps checked before validation begins
    pub limits: ImportLimits,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            limits: ImportLimits::default(),
        }
    }
}

impl ImportOptions {
    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be > 0".to_string());
        }
        self.limits.validate()
    }
}

/// Terminal outcome of one run. Cancellation is not an error and never
/// produces an [`ImportResult`].
#[derive(Debug)]
pub enum ImportOutcome {
    Completed(ImportResult),
    Cancelled,
}

/// Chunked import engine.
///
/// Holds no state across runs; every run starts from row 0 with fresh
/// accumulators and never touches any persistent store.
pub struct ImportEngine;

impl ImportEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline over one in-memory CSV upload.
    ///
    /// `on_progress` fires once per completed chunk, in strictly increasing
    /// row order, with a monotonically non-decreasing percentage. After a
    /// cancellation is observed no further callbacks fire and no result is
    /// produced.
    pub async fn run<F>(
        &self,
        content: &str,
        kind: ImportKind,
        options: &ImportOptions,
        token: &CancellationToken,
        mut on_progress: F,
    ) -> Result<ImportOutcome>
    where
        F: FnMut(&ProcessingState),
    {
        options
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid import options: {}", e)))?;

        let mut state = ProcessingState::new(ProcessingStage::Parsing, "Parsing CSV input");

        let parsed = match CsvParser::new().parse(content, &options.limits) {
            Ok(parsed) => parsed,
            Err(e) => {
                state.enter(ProcessingStage::Error, &e.to_string());
                on_progress(&state);
                return Err(e);
            }
        };

        let schema = schema_for(kind);
        let validator = RowValidator::new(schema, &parsed.headers);

        let header_errors = validator.missing_required_headers();
        if !header_errors.is_empty() {
            state.enter(ProcessingStage::Error, "Required columns are missing");
            on_progress(&state);
            return Ok(ImportOutcome::Completed(RunTotals::header_failure(
                header_errors,
            )));
        }

        state.enter(ProcessingStage::Validating, "Validating rows");
        let total = parsed.rows.len();
        let mut totals = RunTotals::new();
        let mut processed = 0usize;

        for chunk in parsed.rows.chunks(options.chunk_size) {
            for row in chunk {
                match validator.validate_row(row)? {
                    RowOutcome::Valid(record) => totals.add_valid(record),
                    RowOutcome::Invalid(errors) => totals.add_invalid(errors),
                }
            }

            processed += chunk.len();
            let current_row = chunk.last().map(|row| row.index).unwrap_or(0);
            state.advance(processed, total, current_row);
            on_progress(&state);

            if token.is_cancelled() {
                state.enter(ProcessingStage::Cancelled, "Import cancelled");
                return Ok(ImportOutcome::Cancelled);
            }

            // The engine's single suspension point: hand control back to
            // the scheduler before the next chunk.
            tokio::task::yield_now().await;
        }

        state.enter(ProcessingStage::Complete, "Validation complete");
        Ok(ImportOutcome::Completed(totals.finalize(total)))
    }
}

impl Default for ImportEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-run accumulator, folded into the final [`ImportResult`].
struct RunTotals {
    records: Vec<ImportedRecord>,
    errors: Vec<ValidationError>,
    invalid_rows: usize,
}

impl RunTotals {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            errors: Vec::new(),
            invalid_rows: 0,
        }
    }

    fn add_valid(&mut self, record: ImportedRecord) {
        self.records.push(record);
    }

    /// One invalid row contributes all of its field errors but counts once.
    fn add_invalid(&mut self, errors: Vec<ValidationError>) {
        self.invalid_rows += 1;
        self.errors.extend(errors);
    }

    fn finalize(self, total_rows: usize) -> ImportResult {
        let valid_rows = self.records.len();
        // Success is judged on the full error tally, not the surfaced cap.
        let success = self.invalid_rows == 0 && total_rows > 0;

        let mut errors = self.errors;
        errors.truncate(MAX_SURFACED_ERRORS);

        ImportResult {
            success,
            errors,
            total_rows,
            valid_rows,
            data: if success { Some(self.records) } else { None },
        }
    }

    /// A run stopped by missing required columns: one error per column at
    /// row 0, nothing validated.
    fn header_failure(errors: Vec<ValidationError>) -> ImportResult {
        let mut errors = errors;
        errors.truncate(MAX_SURFACED_ERRORS);

        ImportResult {
            success: false,
            errors,
            total_rows: 0,
            valid_rows: 0,
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIONS_CSV: &str = "\
title,why,owner_role,engine,eta_days,status,due_date
Call 10 lapsed customers,Win back dormant revenue,Owner,Marketing & Sales,14,todo,2025-09-30
Tighten invoice follow-up,Cut overdue receivables,Finance,Finance,30,doing,
Document onboarding steps,Reduce ramp-up time,Ops,Operations,60,todo,2025-11-15";

    async fn run(
        content: &str,
        kind: ImportKind,
        options: &ImportOptions,
        token: &CancellationToken,
    ) -> Result<ImportOutcome> {
        ImportEngine::new()
            .run(content, kind, options, token, |_| {})
            .await
    }

    #[tokio::test]
    async fn test_well_formed_actions_import() {
        let outcome = run(
            ACTIONS_CSV,
            ImportKind::Actions,
            &ImportOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        match outcome {
            ImportOutcome::Completed(result) => {
                assert!(result.success);
                assert_eq!(result.total_rows, 3);
                assert_eq!(result.valid_rows, 3);
                assert_eq!(result.invalid_rows(), 0);
                assert_eq!(result.data.unwrap().len(), 3);
            }
            ImportOutcome::Cancelled => panic!("run was unexpectedly cancelled"),
        }
    }

    #[tokio::test]
    async fn test_missing_header_fails_whole_run() {
        let csv = "why,owner_role,engine,eta_days,status\nw,Owner,Finance,10,todo";
        let outcome = run(
            csv,
            ImportKind::Actions,
            &ImportOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        match outcome {
            ImportOutcome::Completed(result) => {
                assert!(!result.success);
                assert_eq!(result.total_rows, 0);
                assert_eq!(result.errors.len(), 1);
                assert_eq!(result.errors[0].row, 0);
                assert_eq!(result.errors[0].field, "title");
                assert_eq!(result.errors[0].message, "Missing required header: title");
                assert!(result.data.is_none());
            }
            ImportOutcome::Cancelled => panic!("run was unexpectedly cancelled"),
        }
    }

    #[tokio::test]
    async fn test_field_errors_do_not_stop_the_run() {
        // Row 2 has a bad status; rows 1 and 3 stay valid.
        let csv = "\
title,why,owner_role,engine,eta_days,status
First,w,Owner,Finance,10,todo
Second,w,Owner,Finance,10,blocked
Third,w,Owner,Finance,10,done";

        let outcome = run(
            csv,
            ImportKind::Actions,
            &ImportOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        match outcome {
            ImportOutcome::Completed(result) => {
                assert!(!result.success);
                assert_eq!(result.total_rows, 3);
                assert_eq!(result.valid_rows, 2);
                assert_eq!(result.invalid_rows(), 1);
                assert_eq!(result.errors.len(), 1);
                assert_eq!(result.errors[0].row, 2);
                assert_eq!(result.errors[0].field, "status");
                assert!(result.data.is_none());
            }
            ImportOutcome::Cancelled => panic!("run was unexpectedly cancelled"),
        }
    }

    #[tokio::test]
    async fn test_surfaced_errors_are_capped_but_counts_are_not() {
        let mut csv = String::from("title,why,owner_role,engine,eta_days,status\n");
        for _ in 0..8 {
            csv.push_str("T,w,Owner,Finance,10,blocked\n");
        }

        let outcome = run(
            &csv,
            ImportKind::Actions,
            &ImportOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        match outcome {
            ImportOutcome::Completed(result) => {
                assert_eq!(result.errors.len(), MAX_SURFACED_ERRORS);
                assert_eq!(result.total_rows, 8);
                assert_eq!(result.valid_rows, 0);
                assert_eq!(result.invalid_rows(), 8);
            }
            ImportOutcome::Cancelled => panic!("run was unexpectedly cancelled"),
        }
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_and_in_row_order() {
        let mut csv = String::from("title,why,owner_role,engine,eta_days,status\n");
        for i in 0..25 {
            csv.push_str(&format!("Task {},w,Owner,Finance,10,todo\n", i));
        }

        let options = ImportOptions {
            chunk_size: 4,
            limits: ImportLimits::default(),
        };

        let mut snapshots: Vec<(u8, usize)> = Vec::new();
        let outcome = ImportEngine::new()
            .run(
                &csv,
                ImportKind::Actions,
                &options,
                &CancellationToken::new(),
                |state| snapshots.push((state.progress, state.current_row)),
            )
            .await
            .unwrap();

        assert!(matches!(outcome, ImportOutcome::Completed(_)));
        // 25 rows in chunks of 4 -> 7 callbacks, last at row 25 / 100%.
        assert_eq!(snapshots.len(), 7);
        assert_eq!(snapshots.last(), Some(&(100, 25)));
        for pair in snapshots.windows(2) {
            assert!(pair[1].0 >= pair[0].0);
            assert!(pair[1].1 > pair[0].1);
        }
    }

    #[tokio::test]
    async fn test_cancellation_stops_between_chunks() {
        let mut csv = String::from("title,why,owner_role,engine,eta_days,status\n");
        for i in 0..30 {
            csv.push_str(&format!("Task {},w,Owner,Finance,10,todo\n", i));
        }

        let options = ImportOptions {
            chunk_size: 10,
            limits: ImportLimits::default(),
        };

        let token = CancellationToken::new();
        let cancel_after = token.clone();
        let mut last_row = 0usize;
        let mut callbacks = 0usize;

        let outcome = ImportEngine::new()
            .run(
                &csv,
                ImportKind::Actions,
                &options,
                &token,
                |state| {
                    callbacks += 1;
                    last_row = state.current_row;
                    if state.current_row >= 10 {
                        cancel_after.cancel();
                    }
                },
            )
            .await
            .unwrap();

        assert!(matches!(outcome, ImportOutcome::Cancelled));
        // Cancelled after the first chunk: exactly one callback, no row
        // past the chunk boundary, and no terminal result.
        assert_eq!(callbacks, 1);
        assert_eq!(last_row, 10);
    }

    #[tokio::test]
    async fn test_formula_payload_is_stored_escaped() {
        let csv = "\
title,why,owner_role,engine,eta_days,status
Review spreadsheet,=SUM(A1:A9),Owner,Finance,10,todo";

        let outcome = run(
            csv,
            ImportKind::Actions,
            &ImportOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        match outcome {
            ImportOutcome::Completed(result) => {
                assert!(result.success);
                let records = result.data.unwrap();
                match &records[0] {
                    ImportedRecord::Action(action) => {
                        assert_eq!(action.why, "'=SUM(A1:A9)");
                    }
                    other => panic!("expected action record, got {:?}", other),
                }
            }
            ImportOutcome::Cancelled => panic!("run was unexpectedly cancelled"),
        }
    }

    #[tokio::test]
    async fn test_row_cap_aborts_before_validation() {
        let mut csv = String::from("title,why,owner_role,engine,eta_days,status\n");
        for i in 0..1200 {
            csv.push_str(&format!("Task {},w,Owner,Finance,10,todo\n", i));
        }

        let options = ImportOptions {
            chunk_size: DEFAULT_CHUNK_SIZE,
            limits: ImportLimits {
                max_bytes: 10 * 1024 * 1024,
                max_rows: 1000,
            },
        };

        let mut callbacks = 0usize;
        let mut error_stage = false;
        let err = ImportEngine::new()
            .run(
                &csv,
                ImportKind::Actions,
                &options,
                &CancellationToken::new(),
                |state| {
                    callbacks += 1;
                    error_stage = state.stage == ProcessingStage::Error;
                },
            )
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Too many rows"));
        // One error snapshot, no validation progress.
        assert_eq!(callbacks, 1);
        assert!(error_stage);
    }

    #[tokio::test]
    async fn test_empty_file_is_not_successful() {
        let outcome = run(
            "title,why,owner_role,engine,eta_days,status\n",
            ImportKind::Actions,
            &ImportOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        match outcome {
            ImportOutcome::Completed(result) => {
                assert!(!result.success);
                assert_eq!(result.total_rows, 0);
                assert!(result.errors.is_empty());
                assert!(result.data.is_none());
            }
            ImportOutcome::Cancelled => panic!("run was unexpectedly cancelled"),
        }
    }

    #[tokio::test]
    async fn test_goal_cross_field_error_leaves_other_rows_valid() {
        let csv = "\
level,title,department,metric,current,target,due_date,alignment_statement
north_star,Become the market leader,,,,,,
department,Grow monthly recurring revenue,Sales,MRR,120000,180000,2025-12-31,
department,Lift close rate,Sales,Close rate,0.18,0.25,,Feeds the revenue goal";

        let outcome = run(
            csv,
            ImportKind::Goals,
            &ImportOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        match outcome {
            ImportOutcome::Completed(result) => {
                assert_eq!(result.total_rows, 3);
                assert_eq!(result.valid_rows, 2);
                assert_eq!(result.errors.len(), 1);
                assert_eq!(result.errors[0].row, 2);
                assert_eq!(result.errors[0].field, "alignment_statement");
            }
            ImportOutcome::Cancelled => panic!("run was unexpectedly cancelled"),
        }
    }
}
