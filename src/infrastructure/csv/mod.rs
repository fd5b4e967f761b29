// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV parsing and cell sanitization

mod csv_parser;
mod sanitizer;

pub use csv_parser::CsvParser;
pub use sanitizer::sanitize_cell;
