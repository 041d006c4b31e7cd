//! Employee aggregate integration tests: CRUD, email uniqueness,
//! checklist state machine and optimistic concurrency, all against a
//! real embedded database.

use hr_core::core::{Config, ServerState};
use hr_core::db::repository::{EmployeeRepository, RepoError, Repository};
use hr_core::handlers::{employees, lifecycle};
use hr_core::utils::AppError;
use shared::models::{EmployeeCreate, EmployeeUpdate, OffboardingRequest};
use tempfile::TempDir;

async fn test_state() -> (TempDir, ServerState) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_work_dir(tmp.path().to_string_lossy().to_string());
    let state = ServerState::initialize(&config).await.unwrap();
    (tmp, state)
}

fn payload(first: &str, last: &str, email: &str) -> EmployeeCreate {
    EmployeeCreate {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone: "+1 555 0100".to_string(),
        job_title: "Engineer".to_string(),
        department_id: None,
        department_name: None,
        manager_id: None,
        hire_date: None,
        date_of_birth: None,
    }
}

#[tokio::test]
async fn create_normalizes_email_and_starts_in_onboarding() {
    let (_tmp, state) = test_state().await;
    let created = employees::create(&state, payload("John", "Smith", "John.Smith@Example.com"))
        .await
        .unwrap();
    assert_eq!(created.email, "john.smith@example.com");
    assert_eq!(created.status, "Onboarding");
    assert!(!created.is_active);
    assert!(created.id.starts_with("employee:"));

    let fetched = employees::get_by_id(&state, &created.id).await.unwrap();
    assert_eq!(fetched.full_name, "John Smith");
    assert!(fetched.onboarding_checklist.is_empty());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_case_insensitively() {
    let (_tmp, state) = test_state().await;
    employees::create(&state, payload("Ann", "Lee", "a@x.com")).await.unwrap();
    let err = employees::create(&state, payload("Bob", "Ray", "A@X.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn update_keeps_own_email_but_rejects_taken_one() {
    let (_tmp, state) = test_state().await;
    let a = employees::create(&state, payload("Ann", "Lee", "a@x.com")).await.unwrap();
    employees::create(&state, payload("Bob", "Ray", "b@x.com")).await.unwrap();

    // Same address on the own record is fine (self-exclusion)
    let updated = employees::update(
        &state,
        &a.id,
        EmployeeUpdate {
            email: Some("A@x.com".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.email, "a@x.com");

    let err = employees::update(
        &state,
        &a.id,
        EmployeeUpdate {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn partial_update_keeps_absent_fields() {
    let (_tmp, state) = test_state().await;
    let a = employees::create(&state, payload("Ann", "Lee", "ann@x.com")).await.unwrap();
    let updated = employees::update(
        &state,
        &a.id,
        EmployeeUpdate {
            phone: Some("+351 900 000 000".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.phone, "+351 900 000 000");
    assert_eq!(updated.first_name, "Ann");
    assert_eq!(updated.job_title, "Engineer");
}

#[tokio::test]
async fn update_job_details_replaces_department() {
    let (_tmp, state) = test_state().await;
    let a = employees::create(&state, payload("Ann", "Lee", "ann2@x.com")).await.unwrap();
    let updated = employees::update(
        &state,
        &a.id,
        EmployeeUpdate {
            job_title: Some("Staff Engineer".to_string()),
            department_id: Some("dep-7".to_string()),
            department_name: Some("Platform".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.job_title, "Staff Engineer");
    assert_eq!(updated.department_id.as_deref(), Some("dep-7"));
    assert_eq!(updated.department_name.as_deref(), Some("Platform"));
}

#[tokio::test]
async fn onboarding_full_walkthrough() {
    let (_tmp, state) = test_state().await;
    let a = employees::create(&state, payload("Ann", "Lee", "flow@x.com")).await.unwrap();

    let started = lifecycle::start_onboarding(&state, &a.id).await.unwrap();
    assert_eq!(started.onboarding_checklist.len(), 4);
    assert_eq!(started.status, "Onboarding");

    // Second start is a conflict
    let err = lifecycle::start_onboarding(&state, &a.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Unknown code is a not-found distinct from a missing employee
    let err = lifecycle::complete_onboarding_task(&state, &a.id, "IT_SETUP")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    for code in ["ACCOUNTS", "documents", "CONTRACT", "training"] {
        lifecycle::complete_onboarding_task(&state, &a.id, code).await.unwrap();
    }
    let done = employees::get_by_id(&state, &a.id).await.unwrap();
    assert_eq!(done.status, "Active");
    assert!(done.is_active);
    assert!(done.onboarding_checklist.iter().all(|i| i.completed_at.is_some()));
}

#[tokio::test]
async fn offboarding_terminates_after_last_step() {
    let (_tmp, state) = test_state().await;
    let a = employees::create(&state, payload("Ann", "Lee", "off@x.com")).await.unwrap();

    let err = lifecycle::initiate_offboarding(
        &state,
        &a.id,
        OffboardingRequest { reason: "  ".to_string() },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let started = lifecycle::initiate_offboarding(
        &state,
        &a.id,
        OffboardingRequest { reason: "resignation".to_string() },
    )
    .await
    .unwrap();
    assert_eq!(started.status, "Offboarding");
    assert_eq!(started.offboarding_reason.as_deref(), Some("resignation"));

    for code in ["DISABLE_ACCESS", "RETURN_ASSETS", "KNOWLEDGE_TRANSFER", "EXIT_INTERVIEW"] {
        lifecycle::complete_offboarding_task(&state, &a.id, code).await.unwrap();
    }
    let done = employees::get_by_id(&state, &a.id).await.unwrap();
    assert_eq!(done.status, "Terminated");
    assert!(done.termination_date.is_some());

    // Terminated employees cannot restart either workflow
    let err = lifecycle::start_onboarding(&state, &a.id).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn stale_aggregate_write_is_a_retryable_conflict() {
    let (_tmp, state) = test_state().await;
    let a = employees::create(&state, payload("Ann", "Lee", "race@x.com")).await.unwrap();

    let repo = EmployeeRepository::new(state.db.clone());
    let mut first = repo.find_by_id(&a.id).await.unwrap().unwrap();
    let mut second = repo.find_by_id(&a.id).await.unwrap().unwrap();

    first.update_personal_info("", "", "+1 111", None);
    repo.update(&first).await.unwrap();

    second.update_personal_info("", "", "+1 222", None);
    let err = repo.update(&second).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)), "got {err:?}");

    let app: AppError = err.into();
    assert!(app.is_retryable());
}

#[tokio::test]
async fn list_filters_by_search_department_and_active() {
    let (_tmp, state) = test_state().await;
    let mut p1 = payload("Maria", "Santos", "maria@x.com");
    p1.department_id = Some("dep-1".to_string());
    p1.department_name = Some("Finance".to_string());
    let m = employees::create(&state, p1).await.unwrap();
    let mut p2 = payload("Joao", "Pereira", "joao@x.com");
    p2.department_id = Some("dep-2".to_string());
    p2.department_name = Some("Engineering".to_string());
    employees::create(&state, p2).await.unwrap();

    let hits = employees::list(&state, false, None, Some("mar")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].first_name, "Maria");

    let by_email = employees::list(&state, false, None, Some("joao@x.com")).await.unwrap();
    assert_eq!(by_email.len(), 1);

    let dep = employees::list(&state, false, Some("dep-2"), None).await.unwrap();
    assert_eq!(dep.len(), 1);
    assert_eq!(dep[0].first_name, "Joao");

    // Nobody finished onboarding yet
    let active = employees::list(&state, true, None, None).await.unwrap();
    assert!(active.is_empty());

    // Activate Maria through the checklist and filter again
    lifecycle::start_onboarding(&state, &m.id).await.unwrap();
    for code in ["ACCOUNTS", "DOCUMENTS", "CONTRACT", "TRAINING"] {
        lifecycle::complete_onboarding_task(&state, &m.id, code).await.unwrap();
    }
    let active = employees::list(&state, true, None, None).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].first_name, "Maria");
}

#[tokio::test]
async fn update_image_and_delete() {
    let (_tmp, state) = test_state().await;
    let a = employees::create(&state, payload("Ann", "Lee", "img@x.com")).await.unwrap();

    let updated = employees::update_image(&state, &a.id, Some("/img/ann.png".to_string()))
        .await
        .unwrap();
    assert_eq!(updated.image_url.as_deref(), Some("/img/ann.png"));

    assert!(employees::delete(&state, &a.id).await.unwrap());
    let err = employees::get_by_id(&state, &a.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn missing_employee_is_not_found() {
    let (_tmp, state) = test_state().await;
    let err = employees::get_by_id(&state, "employee:doesnotexist").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = lifecycle::start_onboarding(&state, "employee:doesnotexist").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
