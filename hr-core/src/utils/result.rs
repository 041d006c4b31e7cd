//! Unified Result Types
//!
//! Provides type aliases for commonly used Result types across the crate

use crate::AppError;

/// Application-level Result type
///
/// Used in use-case handlers and application logic
pub type AppResult<T> = Result<T, AppError>;
