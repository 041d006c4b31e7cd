//! Task Repository
//!
//! Narrow per-task write path. Creating, updating or deleting a task
//! touches only the `task` table, never the owning employee row, so
//! task traffic cannot produce spurious aggregate version conflicts.
//!
//! The numeric task id comes from the `counter:task_seq` record, bumped
//! with a single-statement atomic increment. Issued values are never
//! reused; the unique index on `task.seq` is the storage backstop.

use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{EmployeeId, ProjectTask, TaskRecordId};

/// Persistent sequence counter row
#[derive(Debug, Serialize, Deserialize)]
struct SeqCounter {
    value: i64,
}

#[derive(Clone)]
pub struct TaskRepository {
    base: BaseRepository,
}

impl TaskRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<TaskRecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    fn row_content(task: &ProjectTask) -> RepoResult<serde_json::Value> {
        let mut data = serde_json::to_value(task)
            .map_err(|e| RepoError::Database(format!("Failed to serialize task: {}", e)))?;
        if let Some(obj) = data.as_object_mut() {
            obj.remove("id");
        }
        Ok(data)
    }

    /// Seed the sequence counter on startup when absent, starting from
    /// the maximum seq already on disk so pre-existing data keeps the
    /// max-plus-one property.
    pub async fn ensure_seq_counter(db: &Surreal<Db>) -> RepoResult<()> {
        let existing: Option<SeqCounter> = db.select(("counter", "task_seq")).await?;
        if existing.is_none() {
            let mut result = db.query("SELECT VALUE seq FROM task").await?;
            let seqs: Vec<i64> = result.take(0)?;
            let max = seqs.into_iter().max().unwrap_or(0);
            db.query("CREATE counter:task_seq SET value = $value")
                .bind(("value", max))
                .await?;
            tracing::info!("Task sequence counter seeded at {}", max);
        }
        Ok(())
    }

    /// Allocate the next numeric task id (atomic single-statement bump).
    pub async fn next_seq(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("UPDATE counter:task_seq SET value += 1 RETURN AFTER")
            .await?;
        let counters: Vec<SeqCounter> = result.take(0)?;
        counters
            .into_iter()
            .next()
            .map(|c| c.value)
            .ok_or_else(|| RepoError::Database("Task sequence counter missing".to_string()))
    }

    /// Insert a task row directly (the narrow write path).
    pub async fn create(&self, task: ProjectTask) -> RepoResult<ProjectTask> {
        let data = Self::row_content(&task)?;
        let mut result = self
            .base
            .db()
            .query("CREATE task CONTENT $data RETURN AFTER")
            .bind(("data", data))
            .await?;
        let created: Vec<ProjectTask> = result.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create task".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ProjectTask>> {
        let thing = Self::parse_id(id)?;
        let task: Option<ProjectTask> = self.base.db().select(thing).await?;
        Ok(task)
    }

    /// Find by the externally visible numeric id
    pub async fn find_by_seq(&self, seq: i64) -> RepoResult<Option<ProjectTask>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM task WHERE seq = $seq LIMIT 1")
            .bind(("seq", seq))
            .await?;
        let tasks: Vec<ProjectTask> = result.take(0)?;
        Ok(tasks.into_iter().next())
    }

    pub async fn find_all(&self) -> RepoResult<Vec<ProjectTask>> {
        let tasks: Vec<ProjectTask> = self
            .base
            .db()
            .query("SELECT * FROM task ORDER BY seq")
            .await?
            .take(0)?;
        Ok(tasks)
    }

    /// All tasks owned by one employee (top-level and subtasks)
    pub async fn find_by_employee(&self, employee: &EmployeeId) -> RepoResult<Vec<ProjectTask>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM task WHERE employee = $owner ORDER BY seq")
            .bind(("owner", employee.to_string()))
            .await?;
        let tasks: Vec<ProjectTask> = result.take(0)?;
        Ok(tasks)
    }

    pub async fn find_subtasks(&self, parent: &TaskRecordId) -> RepoResult<Vec<ProjectTask>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM task WHERE parent = $parent ORDER BY seq")
            .bind(("parent", parent.to_string()))
            .await?;
        let tasks: Vec<ProjectTask> = result.take(0)?;
        Ok(tasks)
    }

    /// Replace a task row. Single-row last-write-wins; the aggregate
    /// version is deliberately not involved.
    pub async fn update(&self, task: &ProjectTask) -> RepoResult<ProjectTask> {
        let id = task
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Task has no ID".to_string()))?;
        let data = Self::row_content(task)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing CONTENT $data RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("data", data))
            .await?;
        let updated: Vec<ProjectTask> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))
    }

    /// Delete a task. A top-level task takes all of its subtasks with it;
    /// a subtask only removes itself. Returns the number of rows removed.
    pub async fn delete_with_subtasks(&self, task: &ProjectTask) -> RepoResult<u64> {
        let id = task
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Task has no ID".to_string()))?;

        let mut removed = 1u64;
        if task.is_top_level() {
            let subtasks = self.find_subtasks(&id).await?;
            removed += subtasks.len() as u64;
            self.base
                .db()
                .query("DELETE task WHERE parent = $parent")
                .bind(("parent", id.to_string()))
                .await?;
        }
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", id))
            .await?;
        Ok(removed)
    }
}
