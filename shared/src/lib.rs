//! Shared types for the HR service
//!
//! Data contracts exchanged between the core and its callers: request
//! payloads, response shapes, lifecycle enums and the assignee snapshot
//! value object.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Assignee, ChecklistItem, ChecklistState, DocumentType, EmployeeDocument, EmploymentStatus,
    TaskPriority,
};
