use std::error::Error;
use std::sync::{Arc, Mutex};

use tracing::info;

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::SqliteImportStore;
use crate::interfaces::http::{add_log, start_server, LogEntry};

pub async fn run() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = AppConfig::from_env();
    config.validate()?;

    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

    let store = SqliteImportStore::init(&config.database_url).await?;

    let server = start_server(&config, Arc::new(store), logs.clone())?;

    info!(host = %config.host, port = config.port, "Import backend started");
    add_log(
        &logs,
        "INFO",
        "System",
        &format!(
            "Import backend listening on {}:{}",
            config.host, config.port
        ),
    );

    server.await?;

    Ok(())
}
