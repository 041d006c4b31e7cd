//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) plus schema bootstrap.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "hr";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database under `dir` and apply the schema
    /// bootstrap: unique email index, unique task sequence index, and the
    /// task sequence counter.
    pub async fn new(dir: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(dir)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;
        repository::TaskRepository::ensure_seq_counter(&db)
            .await
            .map_err(|e| AppError::database(format!("Failed to seed task counter: {e}")))?;

        tracing::info!("Database opened at {}", dir.display());
        Ok(Self { db })
    }

    /// Idempotent schema bootstrap.
    ///
    /// The unique indexes are the storage-level backstop for invariants
    /// the domain also checks: case-normalized email uniqueness and
    /// never-reused task sequence numbers.
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query(
            r#"
            DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS employee_email ON employee FIELDS email UNIQUE;
            DEFINE TABLE IF NOT EXISTS task SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS task_seq ON task FIELDS seq UNIQUE;
            DEFINE INDEX IF NOT EXISTS task_employee ON task FIELDS employee;
            DEFINE TABLE IF NOT EXISTS counter SCHEMALESS;
            "#,
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        Ok(())
    }
}
