// ============================================================
// CSV PARSER
// ============================================================
// Parse in-memory CSV text into header + sanitized data rows,
// enforcing size and row-count caps

use csv::ReaderBuilder;

use super::sanitize_cell;
use crate::domain::csv::{ImportLimits, ParsedCsv, RawRow};
use crate::domain::error::{AppError, Result};

/// CSV parser for import uploads
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse CSV content from an in-memory string.
    ///
    /// The byte cap is checked before any row is read. The first non-empty
    /// record becomes the header row; every following record becomes a data
    /// row with each cell passed through the sanitizer. Quoted fields may
    /// contain the delimiter and embedded newlines; doubled quotes inside a
    /// quoted field are unescaped by the reader. An input with no data rows
    /// is not an error here.
    pub fn parse(&self, content: &str, limits: &ImportLimits) -> Result<ParsedCsv> {
        if content.len() > limits.max_bytes {
            return Err(AppError::ParseError(format!(
                "File too large: {} bytes exceeds the {} byte limit",
                content.len(),
                limits.max_bytes
            )));
        }

        // Trimming happens in the sanitizer so it can keep the original
        // untrimmed value when prefixing; the reader must not trim.
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut headers: Option<Vec<String>> = None;
        let mut rows: Vec<RawRow> = Vec::new();

        for (record_number, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!(
                    "Failed to parse CSV record {}: {}",
                    record_number + 1,
                    e
                ))
            })?;

            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            match headers {
                None => {
                    headers = Some(record.iter().map(|cell| cell.trim().to_string()).collect());
                }
                Some(_) => {
                    if rows.len() == limits.max_rows {
                        return Err(AppError::ParseError(format!(
                            "Too many rows: limit is {} data rows",
                            limits.max_rows
                        )));
                    }
                    let cells = record.iter().map(sanitize_cell).collect();
                    rows.push(RawRow::new(rows.len() + 1, cells));
                }
            }
        }

        match headers {
            Some(headers) => Ok(ParsedCsv { headers, rows }),
            None => Ok(ParsedCsv::empty()),
        }
    }
}
