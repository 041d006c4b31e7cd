//! Repository Module
//!
//! Persistence surface for the employee aggregate and its task rows.
//! Whole-aggregate writes go through `EmployeeRepository` and are guarded
//! by the optimistic `version` field; task writes take the narrow
//! per-task path in `TaskRepository` so that task traffic never conflicts
//! with unrelated aggregate updates.

pub mod employee;
pub mod task;

// Re-exports
pub use employee::EmployeeRepository;
pub use task::TaskRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// A whole-aggregate write lost a race against another writer.
    /// Retryable by the caller; never retried here.
    #[error("Concurrency conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Common repository trait for basic CRUD
#[allow(async_fn_in_trait)]
pub trait Repository<T> {
    async fn find_all(&self) -> RepoResult<Vec<T>>;
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<T>>;
    async fn create(&self, entity: T) -> RepoResult<T>;
    async fn update(&self, entity: &T) -> RepoResult<T>;
    async fn delete(&self, id: &str) -> RepoResult<bool>;
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
