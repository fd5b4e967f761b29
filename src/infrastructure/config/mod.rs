// ============================================================
// APP CONFIGURATION
// ============================================================
// Environment-backed settings with safe defaults

use crate::domain::csv::{ImportLimits, DEFAULT_CHUNK_SIZE};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,

    /// Hard caps applied to every upload
    pub limits: ImportLimits,

    /// Rows validated per engine chunk
    pub chunk_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            database_url: "sqlite://opsboard.db".to_string(),
            limits: ImportLimits::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset or unparseable. `.env` files are honored.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            host: env_or("HOST", defaults.host),
            port: env_parse("PORT", defaults.port),
            database_url: env_or("DATABASE_URL", defaults.database_url),
            limits: ImportLimits {
                max_bytes: env_parse("IMPORT_MAX_BYTES", defaults.limits.max_bytes),
                max_rows: env_parse("IMPORT_MAX_ROWS", defaults.limits.max_rows),
            },
            chunk_size: env_parse("IMPORT_CHUNK_SIZE", defaults.chunk_size),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("IMPORT_CHUNK_SIZE must be > 0".to_string());
        }
        self.limits.validate()
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
