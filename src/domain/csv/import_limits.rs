// ============================================================
// IMPORT LIMITS
// ============================================================
// Hard caps applied before any row validation begins

use serde::{Deserialize, Serialize};

/// Rows validated per engine chunk before control is yielded back to the
/// host scheduler.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// File size limits for one import run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImportLimits {
    /// Maximum input size in bytes (default: 1MB)
    pub max_bytes: usize,

    /// Maximum number of data rows, header excluded (default: 1000)
    pub max_rows: usize,
}

impl Default for ImportLimits {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            max_rows: 1000,
        }
    }
}

impl ImportLimits {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_bytes == 0 {
            return Err("max_bytes must be > 0".to_string());
        }
        if self.max_rows == 0 {
            return Err("max_rows must be > 0".to_string());
        }
        Ok(())
    }
}
