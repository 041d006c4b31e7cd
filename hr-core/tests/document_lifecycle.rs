//! Document lifecycle integration tests: per-type versioning, archive
//! rules, replace and hard delete.

use hr_core::core::{Config, ServerState};
use hr_core::handlers::{documents, employees};
use hr_core::utils::AppError;
use shared::models::{DocumentAdd, DocumentArchive, DocumentReplace, DocumentType, EmployeeCreate};
use tempfile::TempDir;

async fn test_state() -> (TempDir, ServerState) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_work_dir(tmp.path().to_string_lossy().to_string());
    let state = ServerState::initialize(&config).await.unwrap();
    (tmp, state)
}

async fn hire(state: &ServerState, email: &str) -> String {
    employees::create(
        state,
        EmployeeCreate {
            first_name: "Doc".to_string(),
            last_name: "Holder".to_string(),
            email: email.to_string(),
            phone: String::new(),
            job_title: "Clerk".to_string(),
            department_id: None,
            department_name: None,
            manager_id: None,
            hire_date: None,
            date_of_birth: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn contract(file_name: &str) -> DocumentAdd {
    DocumentAdd {
        file_name: file_name.to_string(),
        doc_type: DocumentType::Contract,
        storage_path: format!("blob://docs/{file_name}"),
        size_bytes: 2048,
        content_type: "application/pdf".to_string(),
        issued_at: None,
        expires_at: None,
    }
}

#[tokio::test]
async fn versions_count_per_document_type() {
    let (_tmp, state) = test_state().await;
    let id = hire(&state, "docs@x.com").await;

    let v1 = documents::add(&state, &id, contract("contract-2025.pdf")).await.unwrap();
    assert_eq!(v1.version, 1);

    let v2 = documents::add(&state, &id, contract("contract-2026.pdf")).await.unwrap();
    assert_eq!(v2.version, 2);

    let other = documents::add(
        &state,
        &id,
        DocumentAdd {
            doc_type: DocumentType::Identification,
            ..contract("passport.png")
        },
    )
    .await
    .unwrap();
    assert_eq!(other.version, 1);

    let fetched = employees::get_by_id(&state, &id).await.unwrap();
    assert_eq!(fetched.documents.len(), 3);
}

#[tokio::test]
async fn archive_requires_reason_and_is_idempotent() {
    let (_tmp, state) = test_state().await;
    let id = hire(&state, "archive@x.com").await;
    let doc = documents::add(&state, &id, contract("c.pdf")).await.unwrap();
    let doc_id = doc.id.to_string();

    let err = documents::archive(
        &state,
        &id,
        &doc_id,
        DocumentArchive { reason: " ".to_string() },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    documents::archive(
        &state,
        &id,
        &doc_id,
        DocumentArchive { reason: "superseded".to_string() },
    )
    .await
    .unwrap();

    // Second archive keeps the first reason and timestamp
    documents::archive(
        &state,
        &id,
        &doc_id,
        DocumentArchive { reason: "other".to_string() },
    )
    .await
    .unwrap();

    let fetched = employees::get_by_id(&state, &id).await.unwrap();
    let archived = &fetched.documents[0];
    assert!(archived.is_archived);
    assert_eq!(archived.archive_reason.as_deref(), Some("superseded"));
    assert!(archived.archived_at.is_some());
}

#[tokio::test]
async fn replace_bumps_version_and_rejects_archived() {
    let (_tmp, state) = test_state().await;
    let id = hire(&state, "replace@x.com").await;
    let doc = documents::add(&state, &id, contract("c.pdf")).await.unwrap();
    let doc_id = doc.id.to_string();

    let replaced = documents::replace(
        &state,
        &id,
        &doc_id,
        DocumentReplace {
            file_name: "c-signed.pdf".to_string(),
            storage_path: "blob://docs/c-signed.pdf".to_string(),
            size_bytes: 4096,
            content_type: "application/pdf".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(replaced.version, 2);
    assert_eq!(replaced.file_name, "c-signed.pdf");

    documents::archive(
        &state,
        &id,
        &doc_id,
        DocumentArchive { reason: "done".to_string() },
    )
    .await
    .unwrap();

    let err = documents::replace(
        &state,
        &id,
        &doc_id,
        DocumentReplace {
            file_name: "c3.pdf".to_string(),
            storage_path: "blob://docs/c3.pdf".to_string(),
            size_bytes: 1,
            content_type: "application/pdf".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn delete_removes_archived_documents_too() {
    let (_tmp, state) = test_state().await;
    let id = hire(&state, "del@x.com").await;
    let doc = documents::add(&state, &id, contract("c.pdf")).await.unwrap();
    let doc_id = doc.id.to_string();

    documents::archive(
        &state,
        &id,
        &doc_id,
        DocumentArchive { reason: "old".to_string() },
    )
    .await
    .unwrap();
    assert!(documents::delete(&state, &id, &doc_id).await.unwrap());

    let fetched = employees::get_by_id(&state, &id).await.unwrap();
    assert!(fetched.documents.is_empty());

    let err = documents::delete(&state, &id, &doc_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn document_operations_on_missing_employee_are_not_found() {
    let (_tmp, state) = test_state().await;
    let err = documents::add(&state, "employee:ghost", contract("c.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn invalid_document_id_is_a_validation_error() {
    let (_tmp, state) = test_state().await;
    let id = hire(&state, "badid@x.com").await;
    let err = documents::delete(&state, &id, "not-a-uuid").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
