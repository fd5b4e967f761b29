// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types and value objects for CSV import
// No I/O, no async, no external dependencies

mod import_limits;
mod raw_row;

pub use import_limits::{ImportLimits, DEFAULT_CHUNK_SIZE};
pub use raw_row::{ParsedCsv, RawRow};
