//! Project Task Model
//!
//! A task or subtask owned by one employee. The hierarchy is a flat row
//! set with parent pointers; trees are reconstructed at read time by id
//! lookup (`handlers::convert`), never as a recursive object graph.
//!
//! Two identifiers: `id` is the internal record key used for relational
//! integrity and mutation calls; `seq` is the externally visible numeric
//! task id, allocated from the global atomic counter and never reused.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::{Assignee, TaskPriority};

use super::employee::{DomainError, EmployeeId};
use super::serde_helpers;
use crate::utils::time::now_millis;

/// Task record ID type
pub type TaskRecordId = RecordId;

/// Task row persisted in the `task` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTask {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<TaskRecordId>,
    /// Globally unique numeric task id (external)
    pub seq: i64,
    /// Owning employee
    #[serde(with = "serde_helpers::record_id")]
    pub employee: EmployeeId,
    /// None for top-level tasks, parent record id for subtasks
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub parent: Option<TaskRecordId>,
    pub name: String,
    pub description: String,
    /// Free-form due-date string, passed through to callers untouched
    pub due_date: String,
    #[serde(default)]
    pub priority: TaskPriority,
    pub progress: i32,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub completed: bool,
    /// Serialized assignee snapshot (JSON blob, tolerant decode)
    #[serde(default)]
    pub assignee_data: String,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl ProjectTask {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        seq: i64,
        employee: EmployeeId,
        parent: Option<TaskRecordId>,
        name: &str,
        description: &str,
        due_date: &str,
        priority: TaskPriority,
        progress: i32,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation("Task name is required".into()));
        }
        if !(0..=100).contains(&progress) {
            return Err(DomainError::Validation(
                "Progress must be between 0 and 100".into(),
            ));
        }
        Ok(Self {
            id: None,
            seq,
            employee,
            parent,
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            due_date: due_date.to_string(),
            priority,
            progress,
            completed: progress == 100,
            assignee_data: "[]".to_string(),
            created_at: now_millis(),
            updated_at: None,
        })
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    fn touch(&mut self) {
        self.updated_at = Some(now_millis());
    }

    /// Progress drives completion: 100 marks the task completed.
    pub fn update_progress(&mut self, progress: i32) -> Result<(), DomainError> {
        if !(0..=100).contains(&progress) {
            return Err(DomainError::Validation(
                "Progress must be between 0 and 100".into(),
            ));
        }
        self.progress = progress;
        self.completed = progress == 100;
        self.touch();
        Ok(())
    }

    /// Replace scalar fields when provided. An explicit `completed: true`
    /// forces progress to 100.
    pub fn apply_update(
        &mut self,
        name: Option<&str>,
        description: Option<&str>,
        due_date: Option<&str>,
        priority: Option<TaskPriority>,
        completed: Option<bool>,
    ) {
        if let Some(name) = name
            && !name.trim().is_empty()
        {
            self.name = name.trim().to_string();
        }
        if let Some(description) = description {
            self.description = description.trim().to_string();
        }
        if let Some(due_date) = due_date
            && !due_date.trim().is_empty()
        {
            self.due_date = due_date.to_string();
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(completed) = completed {
            self.completed = completed;
            if completed {
                self.progress = 100;
            }
        }
        self.touch();
    }

    /// Replace the snapshot wholesale; there is no merge.
    pub fn set_assignees(&mut self, assignees: &[Assignee]) {
        self.assignee_data = Assignee::encode_blob(assignees);
        self.touch();
    }

    /// Decode the snapshot, tolerating malformed blobs.
    pub fn assignees(&self) -> Vec<Assignee> {
        Assignee::decode_blob(&self.assignee_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee_id() -> EmployeeId {
        "employee:alice".parse().unwrap()
    }

    fn sample_task() -> ProjectTask {
        ProjectTask::new(1, employee_id(), None, "Ship release", "", "2026-09-01", TaskPriority::Normal, 0)
            .unwrap()
    }

    #[test]
    fn test_new_validates_name_and_progress() {
        assert!(ProjectTask::new(1, employee_id(), None, " ", "", "", TaskPriority::Low, 0).is_err());
        assert!(ProjectTask::new(1, employee_id(), None, "t", "", "", TaskPriority::Low, 101).is_err());
        assert!(ProjectTask::new(1, employee_id(), None, "t", "", "", TaskPriority::Low, -1).is_err());
    }

    #[test]
    fn test_progress_100_completes() {
        let mut t = sample_task();
        t.update_progress(100).unwrap();
        assert!(t.completed);
        t.update_progress(40).unwrap();
        assert!(!t.completed);
    }

    #[test]
    fn test_apply_update_completed_forces_progress() {
        let mut t = sample_task();
        t.apply_update(None, None, None, None, Some(true));
        assert_eq!(t.progress, 100);
        assert!(t.completed);
    }

    #[test]
    fn test_apply_update_keeps_absent_fields() {
        let mut t = sample_task();
        t.apply_update(Some("Renamed"), None, None, Some(TaskPriority::Urgent), None);
        assert_eq!(t.name, "Renamed");
        assert_eq!(t.description, "");
        assert_eq!(t.due_date, "2026-09-01");
        assert_eq!(t.priority, TaskPriority::Urgent);
    }

    #[test]
    fn test_assignee_snapshot_roundtrip_and_tolerance() {
        let mut t = sample_task();
        t.set_assignees(&[Assignee::build("employee:bob", "Bob Stone")]);
        let decoded = t.assignees();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].initials, "BS");

        t.assignee_data = "{broken".to_string();
        assert!(t.assignees().is_empty());
    }
}
