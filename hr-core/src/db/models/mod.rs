//! Database Models

// Serde helpers
pub mod serde_helpers;

// HR domain
pub mod employee;
pub mod task;

// Re-exports
pub use employee::{DomainError, Employee, EmployeeId};
pub use task::{ProjectTask, TaskRecordId};
