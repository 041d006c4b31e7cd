//! Contract Models

// HR domain
pub mod document;
pub mod employee;
pub mod task;

// Re-exports
pub use document::{
    DocumentAdd, DocumentArchive, DocumentReplace, DocumentType, EmployeeDocument,
};
pub use employee::{
    ChecklistItem, ChecklistState, EmployeeCreate, EmployeeResponse, EmployeeUpdate,
    EmploymentStatus, OffboardingRequest,
};
pub use task::{
    Assignee, SubtaskCreate, TaskCreate, TaskPriority, TaskResponse, TaskUpdate,
};
