//! Employee Document Contract Models
//!
//! Documents are metadata only; binary content lives behind the opaque
//! `storage_path` reference.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document type classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    #[default]
    Unknown,
    Contract,
    Identification,
    Certification,
    Other,
}

/// Document metadata owned by an employee.
///
/// `version` counts uploads within the same document type for that
/// employee. Archived documents are kept for audit and excluded from
/// active views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeDocument {
    pub id: Uuid,
    pub file_name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub storage_path: String,
    pub size_bytes: i64,
    pub content_type: String,
    pub version: i32,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_reason: Option<String>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<chrono::NaiveDate>,
}

/// Add document payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAdd {
    pub file_name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub storage_path: String,
    pub size_bytes: i64,
    pub content_type: String,
    pub issued_at: Option<chrono::NaiveDate>,
    pub expires_at: Option<chrono::NaiveDate>,
}

/// Archive document payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentArchive {
    pub reason: String,
}

/// Replace document payload: swaps the stored file and bumps the version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReplace {
    pub file_name: String,
    pub storage_path: String,
    pub size_bytes: i64,
    pub content_type: String,
}
