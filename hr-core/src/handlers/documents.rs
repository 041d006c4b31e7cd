//! Document Use Cases

use shared::models::{DocumentAdd, DocumentArchive, DocumentReplace, EmployeeDocument};
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::models::Employee;
use crate::db::repository::{EmployeeRepository, Repository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

fn parse_document_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::validation(format!("Invalid document ID: {raw}")))
}

async fn load_employee(repo: &EmployeeRepository, id: &str) -> AppResult<Employee> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))
}

/// Attach a document to an employee; returns the stored metadata
/// (including the assigned per-type version).
pub async fn add(
    state: &ServerState,
    employee_id: &str,
    payload: DocumentAdd,
) -> AppResult<EmployeeDocument> {
    validate_required_text(&payload.file_name, "file_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.storage_path, "storage_path", MAX_URL_LEN)?;
    validate_required_text(&payload.content_type, "content_type", MAX_SHORT_TEXT_LEN)?;

    let repo = EmployeeRepository::new(state.db.clone());
    let mut employee = load_employee(&repo, employee_id).await?;
    let document = employee.add_document(
        &payload.file_name,
        payload.doc_type,
        &payload.storage_path,
        payload.size_bytes,
        &payload.content_type,
        payload.issued_at,
        payload.expires_at,
    )?;
    repo.update(&employee).await?;
    Ok(document)
}

/// Soft-remove a document with a reason; kept for audit
pub async fn archive(
    state: &ServerState,
    employee_id: &str,
    document_id: &str,
    payload: DocumentArchive,
) -> AppResult<bool> {
    validate_required_text(&payload.reason, "reason", MAX_NOTE_LEN)?;
    let document_id = parse_document_id(document_id)?;

    let repo = EmployeeRepository::new(state.db.clone());
    let mut employee = load_employee(&repo, employee_id).await?;
    employee.archive_document(document_id, &payload.reason)?;
    repo.update(&employee).await?;
    Ok(true)
}

/// Swap the stored file of a document, bumping its version
pub async fn replace(
    state: &ServerState,
    employee_id: &str,
    document_id: &str,
    payload: DocumentReplace,
) -> AppResult<EmployeeDocument> {
    validate_required_text(&payload.file_name, "file_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.storage_path, "storage_path", MAX_URL_LEN)?;
    validate_required_text(&payload.content_type, "content_type", MAX_SHORT_TEXT_LEN)?;
    let document_id = parse_document_id(document_id)?;

    let repo = EmployeeRepository::new(state.db.clone());
    let mut employee = load_employee(&repo, employee_id).await?;
    employee.replace_document(
        document_id,
        &payload.file_name,
        &payload.storage_path,
        payload.size_bytes,
        &payload.content_type,
    )?;
    let updated = repo.update(&employee).await?;
    updated
        .documents
        .into_iter()
        .find(|d| d.id == document_id)
        .ok_or_else(|| AppError::internal("Replaced document missing from aggregate"))
}

/// Hard-remove a document; works on archived documents too
pub async fn delete(state: &ServerState, employee_id: &str, document_id: &str) -> AppResult<bool> {
    let document_id = parse_document_id(document_id)?;
    let repo = EmployeeRepository::new(state.db.clone());
    let mut employee = load_employee(&repo, employee_id).await?;
    employee.delete_document(document_id)?;
    repo.update(&employee).await?;
    Ok(true)
}
