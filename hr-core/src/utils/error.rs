//! Unified error handling
//!
//! [`AppError`] is the error surface of the use-case layer. Every variant
//! is a recoverable, caller-facing condition; the transport layer maps
//! them onto its own status scheme via [`AppError::code`].
//!
//! # Error code convention
//!
//! | Code  | Meaning |
//! |-------|---------|
//! | E0002 | Validation failed |
//! | E0003 | Resource not found |
//! | E0004 | Conflict / duplicate |
//! | E0005 | Business rule violation |
//! | E0007 | Concurrency conflict (retryable) |
//! | E9001 | Internal error |
//! | E9002 | Database error |

use tracing::error;

use crate::db::models::DomainError;
use crate::db::repository::RepoError;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business logic errors ==========
    /// Employee, task, document or checklist code does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Duplicate email, already-started lifecycle transition
    #[error("Resource conflict: {0}")]
    Conflict(String),

    /// A whole-aggregate write lost a race; safe to reload and retry
    #[error("Concurrency conflict: {0}")]
    Concurrency(String),

    /// Malformed or out-of-range input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// State transition not allowed from the current state
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    // ========== System errors ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable error code for transport-layer mapping
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "E0002",
            AppError::NotFound(_) => "E0003",
            AppError::Conflict(_) => "E0004",
            AppError::BusinessRule(_) => "E0005",
            AppError::Concurrency(_) => "E0007",
            AppError::Internal(_) => "E9001",
            AppError::Database(_) => "E9002",
        }
    }

    /// Whether the caller may simply reload and retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Concurrency(_))
    }

    // ========== Helper constructors ==========

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn concurrency(msg: impl Into<String>) -> Self {
        Self::Concurrency(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Conflict(msg) => AppError::Concurrency(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                AppError::Database(msg)
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::AlreadyStarted(msg) => AppError::Conflict(msg),
            DomainError::InvalidTransition(msg) => AppError::BusinessRule(msg),
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}
