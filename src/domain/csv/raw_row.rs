// ============================================================
// RAW ROW TYPES
// ============================================================
// Data structures representing parsed CSV content

use serde::{Deserialize, Serialize};

/// A single data row in a CSV file, after sanitization but before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRow {
    /// Row index in file order. Data rows start at 1; 0 is reserved for
    /// the header row in error reporting.
    pub index: usize,

    /// Cell values in header order, already sanitized.
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(index: usize, cells: Vec<String>) -> Self {
        Self { index, cells }
    }

    /// Get a cell by column position. Missing trailing cells read as None.
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(|s| s.as_str())
    }
}

/// Parsed CSV content: one header row plus zero or more data rows.
#[derive(Debug, Clone)]
pub struct ParsedCsv {
    /// Header cell values, trimmed, in file order.
    pub headers: Vec<String>,

    /// Data rows in file order, indexed from 1.
    pub rows: Vec<RawRow>,
}

impl ParsedCsv {
    /// An input with no header line at all.
    pub fn empty() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }
}
