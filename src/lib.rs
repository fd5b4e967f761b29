mod application;
mod domain;
mod infrastructure;
mod interfaces;

pub mod app;

pub use application::{generate_template, ImportEngine, ImportOptions, ImportOutcome};
pub use domain::csv::ImportLimits;
pub use domain::error::{AppError, Result};
pub use domain::import::{
    ActionRecord, CancellationToken, GoalRecord, ImportKind, ImportResult, ImportedRecord,
    ProcessingStage, ProcessingState, ValidationError,
};
pub use infrastructure::db::{ImportStore, SqliteImportStore};
