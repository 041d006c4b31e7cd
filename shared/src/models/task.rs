//! Task Contract Models
//!
//! Tasks surface two identifiers: the numeric `id` (globally unique
//! sequence, shown to external consumers) and the internal `guid_id`
//! record key used for mutation and deletion.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::str::FromStr;

/// Task priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Normal,
    Urgent,
}

/// Unknown priority text. Malformed input is rejected at the boundary
/// instead of silently falling back to `Normal`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown task priority: {0}")]
pub struct PriorityParseError(pub String);

impl FromStr for TaskPriority {
    type Err = PriorityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "normal" => Ok(TaskPriority::Normal),
            "urgent" => Ok(TaskPriority::Urgent),
            _ => Err(PriorityParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskPriority::Low => "Low",
            TaskPriority::Normal => "Normal",
            TaskPriority::Urgent => "Urgent",
        };
        f.write_str(s)
    }
}

/// Fixed avatar palette (CSS utility classes consumed by the UI)
pub const ASSIGNEE_PALETTE: [&str; 6] = [
    "bg-sky-500",
    "bg-purple-500",
    "bg-rose-500",
    "bg-emerald-500",
    "bg-indigo-500",
    "bg-yellow-500",
];

/// Denormalized display data for one assigned employee.
///
/// Rebuilt from the authoritative employee list on every task write; this
/// is a read optimization, not a source of truth, and goes stale if the
/// employee is renamed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Assignee {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub initials: String,
    #[serde(default)]
    pub color: String,
}

impl Assignee {
    /// Build the snapshot entry for one employee.
    pub fn build(id: &str, full_name: &str) -> Self {
        Self {
            id: id.to_string(),
            full_name: full_name.to_string(),
            initials: initials(full_name),
            color: color_for(id).to_string(),
        }
    }

    /// Serialize a snapshot to the persisted JSON blob.
    pub fn encode_blob(assignees: &[Assignee]) -> String {
        serde_json::to_string(assignees).unwrap_or_else(|_| "[]".to_string())
    }

    /// Deserialize the persisted blob, tolerating bad data.
    ///
    /// A malformed blob yields an empty list; entries missing fields come
    /// back with empty strings. A snapshot read never fails the task read.
    pub fn decode_blob(raw: &str) -> Vec<Assignee> {
        if raw.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<Vec<Assignee>>(raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Malformed assignee snapshot, substituting empty list: {}", e);
                Vec::new()
            }
        }
    }
}

/// Two-letter display initials from a full name.
///
/// One token: its first two characters (fewer if shorter), upper-cased.
/// Several tokens: first character of the first and of the last token.
pub fn initials(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    match parts.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(2).collect::<String>().to_uppercase(),
        [first, .., last] => {
            let mut out = String::new();
            out.extend(first.chars().take(1));
            out.extend(last.chars().take(1));
            out.to_uppercase()
        }
    }
}

/// Deterministic palette pick for an employee id.
///
/// The same employee always renders with the same color; different
/// employees may collide.
pub fn color_for(id: &str) -> &'static str {
    let digest = Sha256::digest(id.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    let index = (u64::from_be_bytes(bytes) % ASSIGNEE_PALETTE.len() as u64) as usize;
    ASSIGNEE_PALETTE[index]
}

/// Create top-level task payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreate {
    /// Owning employee ID
    pub employee_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub progress: i32,
    /// Employee IDs to snapshot as assignees; unresolvable IDs are dropped
    #[serde(default)]
    pub assignee_ids: Vec<String>,
}

/// Create subtask payload; the owner is inherited from the parent task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtaskCreate {
    /// Internal record ID of the parent task
    pub parent_task_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub progress: i32,
    #[serde(default)]
    pub assignee_ids: Vec<String>,
}

/// Update task payload; absent fields keep the stored value.
///
/// `assignee_ids`, when present, fully replaces the snapshot; previously
/// assigned people not in the new list disappear.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_ids: Option<Vec<String>>,
}

/// Task response shape; subtasks nest recursively in `children`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Externally visible numeric task id
    pub id: i64,
    /// Internal record key, used for mutation/deletion calls
    pub guid_id: String,
    pub employee_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<String>,
    pub name: String,
    pub description: String,
    pub due_date: String,
    pub priority: String,
    pub completed: bool,
    pub progress: i32,
    pub assignees: Vec<Assignee>,
    pub subtask_count: usize,
    pub children: Vec<TaskResponse>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}
