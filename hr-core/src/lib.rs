//! HR Core - employee aggregate service
//!
//! Domain and persistence core for the HR subsystem: the Employee
//! aggregate (lifecycle checklists, versioned documents, task hierarchy),
//! the repository layer over the embedded database, and the thin use-case
//! handlers that orchestrate them. Transport concerns (HTTP routing,
//! authentication, rendering) live in external callers of this crate.
//!
//! # Module structure
//!
//! ```text
//! hr-core/src/
//! ├── core/          # Configuration and shared state
//! ├── db/            # Database layer: models and repositories
//! ├── handlers/      # Use-case functions over the aggregate
//! └── utils/         # Errors, logging, validation
//! ```

pub mod core;
pub mod db;
pub mod handlers;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, ServerState};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};
