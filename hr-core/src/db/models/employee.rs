//! Employee Aggregate
//!
//! Aggregate root owning the onboarding/offboarding checklists and the
//! document collection. Tasks are owned logically but persisted in their
//! own table (see `db::models::task`), so they never appear on this row.
//!
//! All invariant-bearing mutations go through the methods here; callers
//! never edit the collections directly. Persistence is the caller's
//! responsibility; methods only change in-memory state.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use uuid::Uuid;

use shared::models::{
    ChecklistItem, ChecklistState, DocumentType, EmployeeDocument, EmploymentStatus,
};

use super::serde_helpers;
use crate::utils::time::now_millis;

/// Employee ID type
pub type EmployeeId = RecordId;

/// Business-rule violation raised by the aggregate.
///
/// Distinct from repository errors: a missing checklist code or document
/// is a different failure than a missing employee row, and callers map
/// them separately.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyStarted(String),

    #[error("{0}")]
    InvalidTransition(String),

    #[error("{0}")]
    Validation(String),
}

/// Employee aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    /// Normalized lowercase; unique across employees (storage index backstop)
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    /// Denormalized department name kept alongside the id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub manager: Option<EmployeeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: EmploymentStatus,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_date: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_started_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offboarding_started_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offboarding_completed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offboarding_reason: Option<String>,
    #[serde(default)]
    pub onboarding_checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub offboarding_checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub documents: Vec<EmployeeDocument>,
    /// Optimistic concurrency stamp for whole-aggregate writes
    #[serde(default)]
    pub version: i64,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Employee {
    /// Hire a new employee.
    ///
    /// The checklists start empty: onboarding is an explicit transition
    /// via [`Employee::start_onboarding`], not a side effect of hiring.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        job_title: &str,
        department_id: Option<String>,
        department_name: Option<String>,
        manager: Option<EmployeeId>,
        hire_date: Option<chrono::NaiveDate>,
        date_of_birth: Option<chrono::NaiveDate>,
    ) -> Result<Self, DomainError> {
        if first_name.trim().is_empty() {
            return Err(DomainError::Validation("First name is required".into()));
        }
        if last_name.trim().is_empty() {
            return Err(DomainError::Validation("Last name is required".into()));
        }
        if email.trim().is_empty() {
            return Err(DomainError::Validation("Email is required".into()));
        }
        if job_title.trim().is_empty() {
            return Err(DomainError::Validation("Job title is required".into()));
        }

        Ok(Self {
            id: None,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.trim().to_string(),
            date_of_birth,
            job_title: job_title.trim().to_string(),
            department_id,
            department_name,
            manager,
            image_url: None,
            status: EmploymentStatus::Onboarding,
            is_active: false,
            hire_date: Some(hire_date.unwrap_or_else(|| chrono::Utc::now().date_naive())),
            termination_date: None,
            onboarding_started_at: None,
            onboarding_completed_at: None,
            offboarding_started_at: None,
            offboarding_completed_at: None,
            offboarding_reason: None,
            onboarding_checklist: Vec::new(),
            offboarding_checklist: Vec::new(),
            documents: Vec::new(),
            version: 0,
            created_at: now_millis(),
            updated_at: None,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    fn touch(&mut self) {
        self.updated_at = Some(now_millis());
    }

    // ── Profile ─────────────────────────────────────────────────────────

    /// Replace personal fields. Blank strings keep the stored value;
    /// patch semantics across absent inputs belong to the handler layer.
    pub fn update_personal_info(
        &mut self,
        first_name: &str,
        last_name: &str,
        phone: &str,
        date_of_birth: Option<chrono::NaiveDate>,
    ) {
        if !first_name.trim().is_empty() {
            self.first_name = first_name.trim().to_string();
        }
        if !last_name.trim().is_empty() {
            self.last_name = last_name.trim().to_string();
        }
        if !phone.trim().is_empty() {
            self.phone = phone.trim().to_string();
        }
        if date_of_birth.is_some() {
            self.date_of_birth = date_of_birth;
        }
        self.touch();
    }

    pub fn update_job_details(
        &mut self,
        job_title: &str,
        department_id: Option<String>,
        department_name: Option<String>,
        manager: Option<EmployeeId>,
    ) {
        if !job_title.trim().is_empty() {
            self.job_title = job_title.trim().to_string();
        }
        self.department_id = department_id;
        self.department_name = department_name;
        self.manager = manager;
        self.touch();
    }

    pub fn update_email(&mut self, email: &str) -> Result<(), DomainError> {
        if email.trim().is_empty() {
            return Err(DomainError::Validation("Email is required".into()));
        }
        self.email = email.trim().to_lowercase();
        self.touch();
        Ok(())
    }

    pub fn update_image(&mut self, image_url: Option<String>) {
        self.image_url = image_url;
        self.touch();
    }

    // ── Employment status ───────────────────────────────────────────────

    pub fn activate(&mut self) -> Result<(), DomainError> {
        if self.status == EmploymentStatus::Terminated {
            return Err(DomainError::InvalidTransition(
                "Cannot activate a terminated employee".into(),
            ));
        }
        self.is_active = true;
        match self.status {
            EmploymentStatus::Onboarding if self.onboarding_state() == ChecklistState::InProgress
                && self.onboarding_checklist.iter().all(ChecklistItem::is_completed) =>
            {
                self.status = EmploymentStatus::Active;
                self.onboarding_completed_at.get_or_insert(now_millis());
            }
            EmploymentStatus::Suspended => {
                self.status = EmploymentStatus::Active;
            }
            _ => {}
        }
        self.touch();
        Ok(())
    }

    pub fn suspend(&mut self) -> Result<(), DomainError> {
        if self.status == EmploymentStatus::Terminated {
            return Err(DomainError::InvalidTransition(
                "Cannot suspend a terminated employee".into(),
            ));
        }
        self.status = EmploymentStatus::Suspended;
        self.is_active = false;
        self.touch();
        Ok(())
    }

    pub fn terminate(&mut self) -> Result<(), DomainError> {
        if self.status == EmploymentStatus::Terminated {
            return Err(DomainError::InvalidTransition(
                "Employee is already terminated".into(),
            ));
        }
        self.status = EmploymentStatus::Terminated;
        self.termination_date = Some(chrono::Utc::now().date_naive());
        self.is_active = false;
        self.touch();
        Ok(())
    }

    // ── Onboarding / offboarding state machine ──────────────────────────

    pub fn onboarding_state(&self) -> ChecklistState {
        if self.onboarding_completed_at.is_some() {
            ChecklistState::Completed
        } else if self.onboarding_started_at.is_some() {
            ChecklistState::InProgress
        } else {
            ChecklistState::NotStarted
        }
    }

    pub fn offboarding_state(&self) -> ChecklistState {
        if self.offboarding_completed_at.is_some() {
            ChecklistState::Completed
        } else if self.offboarding_started_at.is_some() {
            ChecklistState::InProgress
        } else {
            ChecklistState::NotStarted
        }
    }

    /// Start onboarding: seeds the fixed checklist and moves the employee
    /// into onboarding. Only valid from `NotStarted`.
    pub fn start_onboarding(&mut self) -> Result<(), DomainError> {
        if self.status == EmploymentStatus::Terminated {
            return Err(DomainError::InvalidTransition(
                "Cannot onboard a terminated employee".into(),
            ));
        }
        if self.onboarding_state() != ChecklistState::NotStarted {
            return Err(DomainError::AlreadyStarted(
                "Onboarding already started".into(),
            ));
        }
        self.onboarding_checklist = default_onboarding_checklist();
        self.onboarding_started_at = Some(now_millis());
        self.status = EmploymentStatus::Onboarding;
        self.is_active = false;
        self.touch();
        Ok(())
    }

    /// Complete one onboarding step by code (case-insensitive).
    ///
    /// Completing an already-completed item is a no-op. When the last
    /// item completes, onboarding finishes and the employee goes active.
    pub fn complete_onboarding_task(&mut self, code: &str) -> Result<(), DomainError> {
        let item = self
            .onboarding_checklist
            .iter_mut()
            .find(|i| i.code.eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| {
                DomainError::NotFound(format!("Onboarding task '{code}' not found"))
            })?;
        item.mark_completed();

        if self.onboarding_checklist.iter().all(ChecklistItem::is_completed) {
            self.onboarding_completed_at.get_or_insert(now_millis());
            self.status = EmploymentStatus::Active;
            self.is_active = true;
        }
        self.touch();
        Ok(())
    }

    /// Initiate offboarding with a reason. Independent of onboarding
    /// state, but rejected for terminated employees and when offboarding
    /// was already initiated.
    pub fn initiate_offboarding(&mut self, reason: &str) -> Result<(), DomainError> {
        if reason.trim().is_empty() {
            return Err(DomainError::Validation(
                "Offboarding reason is required".into(),
            ));
        }
        if self.status == EmploymentStatus::Terminated {
            return Err(DomainError::InvalidTransition(
                "Employee is already terminated".into(),
            ));
        }
        if self.offboarding_state() != ChecklistState::NotStarted {
            return Err(DomainError::AlreadyStarted(
                "Offboarding already initiated".into(),
            ));
        }
        self.offboarding_checklist = default_offboarding_checklist();
        self.offboarding_reason = Some(reason.trim().to_string());
        self.offboarding_started_at = Some(now_millis());
        self.status = EmploymentStatus::Offboarding;
        self.is_active = false;
        self.touch();
        Ok(())
    }

    /// Complete one offboarding step by code (case-insensitive).
    /// Completing the last step terminates the employee.
    pub fn complete_offboarding_task(&mut self, code: &str) -> Result<(), DomainError> {
        let item = self
            .offboarding_checklist
            .iter_mut()
            .find(|i| i.code.eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| {
                DomainError::NotFound(format!("Offboarding task '{code}' not found"))
            })?;
        item.mark_completed();

        if self.offboarding_checklist.iter().all(ChecklistItem::is_completed) {
            self.offboarding_completed_at.get_or_insert(now_millis());
            if self.status != EmploymentStatus::Terminated {
                self.terminate()?;
            }
        }
        self.touch();
        Ok(())
    }

    // ── Documents ───────────────────────────────────────────────────────

    /// Attach a document. The version counts uploads of the same type
    /// for this employee: max existing version of the type, plus one.
    #[allow(clippy::too_many_arguments)]
    pub fn add_document(
        &mut self,
        file_name: &str,
        doc_type: DocumentType,
        storage_path: &str,
        size_bytes: i64,
        content_type: &str,
        issued_at: Option<chrono::NaiveDate>,
        expires_at: Option<chrono::NaiveDate>,
    ) -> Result<EmployeeDocument, DomainError> {
        if file_name.trim().is_empty() {
            return Err(DomainError::Validation("File name is required".into()));
        }
        if storage_path.trim().is_empty() {
            return Err(DomainError::Validation("Storage path is required".into()));
        }
        if size_bytes <= 0 {
            return Err(DomainError::Validation(
                "Document size must be positive".into(),
            ));
        }

        let version = self
            .documents
            .iter()
            .filter(|d| d.doc_type == doc_type)
            .map(|d| d.version)
            .max()
            .unwrap_or(0)
            + 1;

        let document = EmployeeDocument {
            id: Uuid::new_v4(),
            file_name: file_name.trim().to_string(),
            doc_type,
            storage_path: storage_path.trim().to_string(),
            size_bytes,
            content_type: content_type.trim().to_string(),
            version,
            is_archived: false,
            archive_reason: None,
            created_at: now_millis(),
            archived_at: None,
            issued_at,
            expires_at,
        };
        self.documents.push(document.clone());
        self.touch();
        Ok(document)
    }

    /// Soft-remove a document, keeping it for audit. Requires a reason;
    /// archiving twice is a no-op.
    pub fn archive_document(&mut self, document_id: Uuid, reason: &str) -> Result<(), DomainError> {
        if reason.trim().is_empty() {
            return Err(DomainError::Validation("Archive reason is required".into()));
        }
        let doc = self
            .documents
            .iter_mut()
            .find(|d| d.id == document_id)
            .ok_or_else(|| DomainError::NotFound("Document not found".into()))?;

        if !doc.is_archived {
            doc.is_archived = true;
            doc.archive_reason = Some(reason.trim().to_string());
            doc.archived_at = Some(now_millis());
        }
        self.touch();
        Ok(())
    }

    /// Swap the stored file of an existing document and bump its version.
    /// Rejected for archived documents.
    pub fn replace_document(
        &mut self,
        document_id: Uuid,
        file_name: &str,
        storage_path: &str,
        size_bytes: i64,
        content_type: &str,
    ) -> Result<(), DomainError> {
        if file_name.trim().is_empty() {
            return Err(DomainError::Validation("File name is required".into()));
        }
        if storage_path.trim().is_empty() {
            return Err(DomainError::Validation("Storage path is required".into()));
        }
        if size_bytes <= 0 {
            return Err(DomainError::Validation(
                "Document size must be positive".into(),
            ));
        }
        let doc = self
            .documents
            .iter_mut()
            .find(|d| d.id == document_id)
            .ok_or_else(|| DomainError::NotFound("Document not found".into()))?;
        if doc.is_archived {
            return Err(DomainError::InvalidTransition(
                "Cannot replace an archived document".into(),
            ));
        }
        doc.file_name = file_name.trim().to_string();
        doc.storage_path = storage_path.trim().to_string();
        doc.size_bytes = size_bytes;
        doc.content_type = content_type.trim().to_string();
        doc.version += 1;
        self.touch();
        Ok(())
    }

    /// Hard-remove a document. Succeeds on archived documents too.
    pub fn delete_document(&mut self, document_id: Uuid) -> Result<(), DomainError> {
        let idx = self
            .documents
            .iter()
            .position(|d| d.id == document_id)
            .ok_or_else(|| DomainError::NotFound("Document not found".into()))?;
        self.documents.remove(idx);
        self.touch();
        Ok(())
    }

    /// Documents excluding archived entries
    pub fn active_documents(&self) -> impl Iterator<Item = &EmployeeDocument> {
        self.documents.iter().filter(|d| !d.is_archived)
    }
}

/// Fixed onboarding steps, known to the domain layer
fn default_onboarding_checklist() -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::new("ACCOUNTS", "Create system accounts"),
        ChecklistItem::new("DOCUMENTS", "Submit personal and ID documents"),
        ChecklistItem::new("CONTRACT", "Sign employment contract"),
        ChecklistItem::new("TRAINING", "Complete initial training"),
    ]
}

/// Fixed offboarding steps, known to the domain layer
fn default_offboarding_checklist() -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::new("DISABLE_ACCESS", "Disable system access"),
        ChecklistItem::new("RETURN_ASSETS", "Return company assets"),
        ChecklistItem::new("KNOWLEDGE_TRANSFER", "Complete knowledge transfer"),
        ChecklistItem::new("EXIT_INTERVIEW", "Conduct exit interview"),
    ]
}
