//! Utility Module
//!
//! Error types, logging setup, validation helpers and time utilities.

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::AppError;
pub use result::AppResult;
