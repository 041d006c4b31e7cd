//! Onboarding / Offboarding Use Cases
//!
//! Each operation loads the aggregate, drives the state machine and
//! persists through the optimistic whole-aggregate path. A stale write
//! surfaces as a retryable concurrency error; nothing is retried here.

use shared::models::{EmployeeResponse, OffboardingRequest};

use crate::core::ServerState;
use crate::db::repository::{EmployeeRepository, Repository, TaskRepository};
use crate::handlers::convert;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

async fn persist(
    state: &ServerState,
    repo: &EmployeeRepository,
    employee: &crate::db::models::Employee,
) -> AppResult<EmployeeResponse> {
    let updated = repo.update(employee).await?;
    let tasks = match &updated.id {
        Some(id) => TaskRepository::new(state.db.clone()).find_by_employee(id).await?,
        None => Vec::new(),
    };
    Ok(convert::employee_response(&updated, &tasks))
}

/// Begin onboarding: seeds the fixed checklist. A second call while
/// onboarding is running or finished is a conflict.
pub async fn start_onboarding(state: &ServerState, id: &str) -> AppResult<EmployeeResponse> {
    let repo = EmployeeRepository::new(state.db.clone());
    let mut employee = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
    employee.start_onboarding()?;
    persist(state, &repo, &employee).await
}

/// Complete one onboarding step by its code
pub async fn complete_onboarding_task(
    state: &ServerState,
    id: &str,
    code: &str,
) -> AppResult<EmployeeResponse> {
    let repo = EmployeeRepository::new(state.db.clone());
    let mut employee = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
    employee.complete_onboarding_task(code)?;
    persist(state, &repo, &employee).await
}

/// Begin offboarding with a recorded reason
pub async fn initiate_offboarding(
    state: &ServerState,
    id: &str,
    payload: OffboardingRequest,
) -> AppResult<EmployeeResponse> {
    validate_required_text(&payload.reason, "reason", MAX_NOTE_LEN)?;
    let repo = EmployeeRepository::new(state.db.clone());
    let mut employee = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
    employee.initiate_offboarding(&payload.reason)?;
    persist(state, &repo, &employee).await
}

/// Complete one offboarding step; the final step terminates the employee
pub async fn complete_offboarding_task(
    state: &ServerState,
    id: &str,
    code: &str,
) -> AppResult<EmployeeResponse> {
    let repo = EmployeeRepository::new(state.db.clone());
    let mut employee = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
    employee.complete_offboarding_task(code)?;
    persist(state, &repo, &employee).await
}
