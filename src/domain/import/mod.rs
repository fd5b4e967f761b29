// ============================================================
// IMPORT DOMAIN LAYER
// ============================================================
// Typed records, validation outcomes, and run state for CSV import

mod record;
mod state;
mod validation;

pub use record::{
    ActionRecord, ActionStatus, Department, Engine, GoalLevel, GoalRecord, ImportKind,
    ImportedRecord, OwnerRole,
};
pub use state::{CancellationToken, ProcessingStage, ProcessingState};
pub use validation::{ImportResult, ValidationError, MAX_SURFACED_ERRORS};
