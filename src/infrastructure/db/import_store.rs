use crate::domain::error::{AppError, Result};
use crate::domain::import::{ActionRecord, GoalRecord, ImportedRecord};
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool},
    Pool, Sqlite,
};
use std::str::FromStr;

/// Commit target for validated records. Invoked by the caller only after
/// inspecting a successful import result; the import engine itself never
/// touches it.
#[async_trait]
pub trait ImportStore {
    async fn save(&self, records: &[ImportedRecord]) -> Result<usize>;
}

pub struct SqliteImportStore {
    pool: Pool<Sqlite>,
}

impl SqliteImportStore {
    pub async fn init(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to parse connection string: {}", e))
            })?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {}", e)))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS actions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                why TEXT NOT NULL,
                owner_role TEXT NOT NULL,
                engine TEXT NOT NULL,
                eta_days INTEGER NOT NULL,
                status TEXT NOT NULL,
                due_date TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create actions table: {}", e)))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS goals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                level TEXT NOT NULL,
                title TEXT NOT NULL,
                department TEXT,
                metric TEXT,
                \"current\" REAL,
                target REAL,
                due_date TEXT,
                alignment_statement TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create goals table: {}", e)))?;

        Ok(Self { pool })
    }

    async fn insert_action(
        tx: &mut sqlx::Transaction<'_, Sqlite>,
        record: &ActionRecord,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO actions (title, why, owner_role, engine, eta_days, status, due_date)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.title)
        .bind(&record.why)
        .bind(record.owner_role.as_str())
        .bind(record.engine.as_str())
        .bind(record.eta_days)
        .bind(record.status.as_str())
        .bind(record.due_date.map(|d| d.to_string()))
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to save action: {}", e)))?;

        Ok(())
    }

    async fn insert_goal(
        tx: &mut sqlx::Transaction<'_, Sqlite>,
        record: &GoalRecord,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO goals (level, title, department, metric, \"current\", target, due_date, alignment_statement)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.level.as_str())
        .bind(&record.title)
        .bind(record.department.map(|d| d.as_str()))
        .bind(&record.metric)
        .bind(record.current)
        .bind(record.target)
        .bind(record.due_date.map(|d| d.to_string()))
        .bind(&record.alignment_statement)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to save goal: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl ImportStore for SqliteImportStore {
    /// Save a batch of validated records atomically. Either every record
    /// lands or none do.
    async fn save(&self, records: &[ImportedRecord]) -> Result<usize> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to open transaction: {}", e)))?;

        for record in records {
            match record {
                ImportedRecord::Action(action) => Self::insert_action(&mut tx, action).await?,
                ImportedRecord::Goal(goal) => Self::insert_goal(&mut tx, goal).await?,
            }
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit import: {}", e)))?;

        Ok(records.len())
    }
}
