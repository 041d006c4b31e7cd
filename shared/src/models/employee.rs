//! Employee Contract Models

use serde::{Deserialize, Serialize};

use super::document::EmployeeDocument;
use super::task::TaskResponse;

/// Employment lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    #[default]
    Onboarding,
    Active,
    Suspended,
    Offboarding,
    Terminated,
}

impl std::fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EmploymentStatus::Onboarding => "Onboarding",
            EmploymentStatus::Active => "Active",
            EmploymentStatus::Suspended => "Suspended",
            EmploymentStatus::Offboarding => "Offboarding",
            EmploymentStatus::Terminated => "Terminated",
        };
        f.write_str(s)
    }
}

/// Per-checklist progress, derived from the lifecycle timestamps
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChecklistState {
    NotStarted,
    InProgress,
    Completed,
}

/// One onboarding/offboarding step.
///
/// `code` is the stable identifier and is unique within its checklist;
/// the onboarding and offboarding checklists are separate namespaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    pub code: String,
    pub title: String,
    /// Creation timestamp (Unix millis)
    pub created_at: i64,
    /// Completion timestamp (Unix millis); None while open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl ChecklistItem {
    pub fn new(code: &str, title: &str) -> Self {
        Self {
            code: code.trim().to_uppercase(),
            title: title.trim().to_string(),
            created_at: chrono::Utc::now().timestamp_millis(),
            completed_at: None,
        }
    }

    /// Mark the item completed. Completing twice is a no-op.
    pub fn mark_completed(&mut self) {
        if self.completed_at.is_none() {
            self.completed_at = Some(chrono::Utc::now().timestamp_millis());
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub department_id: Option<String>,
    pub department_name: Option<String>,
    /// Manager reference (employee ID string)
    pub manager_id: Option<String>,
    pub hire_date: Option<chrono::NaiveDate>,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

/// Update employee payload; absent fields keep the stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

/// Initiate offboarding payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffboardingRequest {
    pub reason: String,
}

/// Employee response shape, including the owned collections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_date: Option<chrono::NaiveDate>,
    pub onboarding_state: ChecklistState,
    pub offboarding_state: ChecklistState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offboarding_reason: Option<String>,
    pub onboarding_checklist: Vec<ChecklistItem>,
    pub offboarding_checklist: Vec<ChecklistItem>,
    pub documents: Vec<EmployeeDocument>,
    /// Top-level tasks with their subtasks nested
    pub tasks: Vec<TaskResponse>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}
