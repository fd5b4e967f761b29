//! CSV Import HTTP API
//!
//! This module provides the upload-facing surface for:
//! - Running an import (validate, then commit on success)
//! - Cancelling an in-flight import
//! - Downloading the canonical CSV template per import kind

use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::application::use_cases::import_engine::{ImportEngine, ImportOptions, ImportOutcome};
use crate::application::use_cases::template_generator::generate_template;
use crate::domain::error::AppError;
use crate::domain::import::{
    CancellationToken, ImportKind, ImportResult, ProcessingStage, ProcessingState,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::ImportStore;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub engine: ImportEngine,
    pub store: Arc<dyn ImportStore + Send + Sync>,
    pub options: ImportOptions,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
    /// Cancellation tokens for in-flight runs, keyed by import id
    pub active_imports: Mutex<HashMap<String, CancellationToken>>,
}

#[derive(Deserialize)]
pub struct ImportRequest {
    /// Raw CSV text, already read by the uploading client
    pub content: String,

    /// Client-chosen id used to address a cancel request at this run
    #[serde(default)]
    pub import_id: Option<String>,

    /// Validate only; skip the commit step even on success
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportResponse {
    Completed {
        import_id: String,
        /// Records committed to storage (0 on dry runs and failures)
        saved: usize,
        result: ImportResult,
    },
    /// Terminal state for a cancelled run; carries no result at all
    Cancelled { import_id: String },
}

#[post("/import/{kind}")]
async fn import_csv(
    data: web::Data<HttpState>,
    path: web::Path<String>,
    req: web::Json<ImportRequest>,
) -> impl Responder {
    let Some(kind) = ImportKind::parse(&path) else {
        return HttpResponse::BadRequest().body(format!("Unknown import kind: {}", path));
    };

    let import_id = req
        .import_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    add_log(
        &data.logs,
        "INFO",
        "Import",
        &format!(
            "Starting {} import {} ({} bytes{})",
            kind.as_str(),
            import_id,
            req.content.len(),
            if req.dry_run { ", dry run" } else { "" }
        ),
    );

    let token = CancellationToken::new();
    data.active_imports
        .lock()
        .unwrap()
        .insert(import_id.clone(), token.clone());

    let logs = data.logs.clone();
    let outcome = data
        .engine
        .run(
            &req.content,
            kind,
            &data.options,
            &token,
            |state: &ProcessingState| {
                if state.stage == ProcessingStage::Validating {
                    add_log(
                        &logs,
                        "INFO",
                        "Import",
                        &format!(
                            "Validated {}% ({}/{} rows)",
                            state.progress, state.current_row, state.total_rows
                        ),
                    );
                }
            },
        )
        .await;

    data.active_imports.lock().unwrap().remove(&import_id);

    let result = match outcome {
        Ok(ImportOutcome::Completed(result)) => result,
        Ok(ImportOutcome::Cancelled) => {
            add_log(
                &data.logs,
                "INFO",
                "Import",
                &format!("Import {} cancelled", import_id),
            );
            return HttpResponse::Ok().json(ImportResponse::Cancelled { import_id });
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Import",
                &format!("Import {} failed: {}", import_id, e),
            );
            return match e {
                AppError::ParseError(_) | AppError::ValidationError(_) => {
                    HttpResponse::BadRequest().body(e.to_string())
                }
                _ => HttpResponse::InternalServerError().body(e.to_string()),
            };
        }
    };

    let mut saved = 0usize;
    if result.success && !req.dry_run {
        if let Some(records) = &result.data {
            let mut state = ProcessingState::new(ProcessingStage::Importing, "Saving records");
            state.advance(result.valid_rows, result.total_rows, result.total_rows);
            add_log(
                &data.logs,
                "INFO",
                "Import",
                &format!("{}: saving {} records", state.message, records.len()),
            );

            match data.store.save(records).await {
                Ok(count) => saved = count,
                Err(e) => {
                    add_log(
                        &data.logs,
                        "ERROR",
                        "Import",
                        &format!("Failed to save records: {}", e),
                    );
                    return HttpResponse::InternalServerError().body(e.to_string());
                }
            }
        }
    }

    add_log(
        &data.logs,
        "INFO",
        "Import",
        &format!(
            "Import {} complete: {}/{} rows valid, {} saved",
            import_id, result.valid_rows, result.total_rows, saved
        ),
    );

    HttpResponse::Ok().json(ImportResponse::Completed {
        import_id,
        saved,
        result,
    })
}

#[post("/import/cancel/{import_id}")]
async fn cancel_import(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let import_id = path.into_inner();

    let cancelled = {
        let active = data.active_imports.lock().unwrap();
        active.get(&import_id).map(|token| token.cancel()).is_some()
    };

    if cancelled {
        add_log(
            &data.logs,
            "INFO",
            "Import",
            &format!("Cancellation requested for import {}", import_id),
        );
        HttpResponse::Ok().json(serde_json::json!({ "cancelled": true }))
    } else {
        HttpResponse::NotFound().body(format!("No active import with id: {}", import_id))
    }
}

#[get("/import/template/{kind}")]
async fn import_template(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let Some(kind) = ImportKind::parse(&path) else {
        return HttpResponse::BadRequest().body(format!("Unknown import kind: {}", path));
    };

    match generate_template(kind) {
        Ok(template) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}_template.csv\"", kind.as_str()),
            ))
            .body(template),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Import",
                &format!("Template generation failed: {}", e),
            );
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap();
    HttpResponse::Ok().json(&*logs)
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry.clone());
    if logs.len() > 100 {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn start_server(
    config: &AppConfig,
    store: Arc<dyn ImportStore + Send + Sync>,
    logs: Arc<Mutex<Vec<LogEntry>>>,
) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState {
        engine: ImportEngine::new(),
        store,
        options: ImportOptions {
            chunk_size: config.chunk_size,
            limits: config.limits,
        },
        logs,
        active_imports: Mutex::new(HashMap::new()),
    });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new().wrap(cors).app_data(state.clone()).service(
            web::scope("/api")
                .service(import_csv)
                .service(cancel_import)
                .service(import_template)
                .service(get_logs)
                .service(health),
        )
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
