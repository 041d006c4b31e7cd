use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Shared service state.
///
/// Holds the configuration and the embedded database handle. `Clone` is a
/// shallow copy; the database handle is internally reference-counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Service configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
}

impl ServerState {
    /// Initialize the service state.
    ///
    /// Prepares the work directory, opens the embedded database under
    /// `work_dir/database/` and applies the schema bootstrap.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_service = DbService::new(&config.database_dir()).await?;

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
        })
    }

    /// Database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
