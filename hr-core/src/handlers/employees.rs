//! Employee Use Cases

use shared::models::{EmployeeCreate, EmployeeResponse, EmployeeUpdate};

use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeId, ProjectTask};
use crate::db::repository::{EmployeeRepository, Repository, TaskRepository};
use crate::handlers::convert;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

fn parse_manager(manager_id: &Option<String>) -> AppResult<Option<EmployeeId>> {
    match manager_id {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| AppError::validation(format!("Invalid manager ID: {raw}"))),
    }
}

async fn load_employee(repo: &EmployeeRepository, id: &str) -> AppResult<Employee> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))
}

async fn tasks_for(state: &ServerState, employee: &Employee) -> AppResult<Vec<ProjectTask>> {
    match &employee.id {
        Some(id) => Ok(TaskRepository::new(state.db.clone())
            .find_by_employee(id)
            .await?),
        None => Ok(Vec::new()),
    }
}

/// Hire a new employee. Fails with a conflict when the email is already
/// in use (case-insensitive).
pub async fn create(state: &ServerState, payload: EmployeeCreate) -> AppResult<EmployeeResponse> {
    validate_required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.job_title, "job_title", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    validate_optional_text(&payload.department_name, "department_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.department_id, "department_id", MAX_SHORT_TEXT_LEN)?;

    let manager = parse_manager(&payload.manager_id)?;
    let employee = Employee::new(
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        &payload.phone,
        &payload.job_title,
        payload.department_id.clone(),
        payload.department_name.clone(),
        manager,
        payload.hire_date,
        payload.date_of_birth,
    )?;

    let repo = EmployeeRepository::new(state.db.clone());
    let created = repo.create(employee).await?;
    Ok(convert::employee_response(&created, &[]))
}

/// Patch an existing employee: absent fields keep the stored value, an
/// employee may keep their own email address.
pub async fn update(
    state: &ServerState,
    id: &str,
    payload: EmployeeUpdate,
) -> AppResult<EmployeeResponse> {
    let repo = EmployeeRepository::new(state.db.clone());
    let mut employee = load_employee(&repo, id).await?;

    if let Some(email) = &payload.email {
        validate_email(email)?;
        let normalized = email.trim().to_lowercase();
        if normalized != employee.email {
            if repo.email_exists(&normalized, employee.id.as_ref()).await? {
                return Err(AppError::conflict(format!("Email '{normalized}' already in use")));
            }
            employee.update_email(email)?;
        }
    }

    employee.update_personal_info(
        payload.first_name.as_deref().unwrap_or(""),
        payload.last_name.as_deref().unwrap_or(""),
        payload.phone.as_deref().unwrap_or(""),
        payload.date_of_birth,
    );

    let touches_job = payload.job_title.is_some()
        || payload.department_id.is_some()
        || payload.department_name.is_some()
        || payload.manager_id.is_some();
    if touches_job {
        let manager = match parse_manager(&payload.manager_id)? {
            Some(m) => Some(m),
            None => employee.manager.clone(),
        };
        employee.update_job_details(
            payload.job_title.as_deref().unwrap_or(""),
            payload.department_id.clone().or_else(|| employee.department_id.clone()),
            payload
                .department_name
                .clone()
                .or_else(|| employee.department_name.clone()),
            manager,
        );
    }

    let updated = repo.update(&employee).await?;
    let tasks = tasks_for(state, &updated).await?;
    Ok(convert::employee_response(&updated, &tasks))
}

/// Replace the profile image reference
pub async fn update_image(
    state: &ServerState,
    id: &str,
    image_url: Option<String>,
) -> AppResult<EmployeeResponse> {
    validate_optional_text(&image_url, "image_url", MAX_URL_LEN)?;
    let repo = EmployeeRepository::new(state.db.clone());
    let mut employee = load_employee(&repo, id).await?;
    employee.update_image(image_url);
    let updated = repo.update(&employee).await?;
    let tasks = tasks_for(state, &updated).await?;
    Ok(convert::employee_response(&updated, &tasks))
}

/// Hard delete an employee together with their task rows
pub async fn delete(state: &ServerState, id: &str) -> AppResult<bool> {
    let repo = EmployeeRepository::new(state.db.clone());
    Ok(repo.delete(id).await?)
}

pub async fn get_by_id(state: &ServerState, id: &str) -> AppResult<EmployeeResponse> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = load_employee(&repo, id).await?;
    let tasks = tasks_for(state, &employee).await?;
    Ok(convert::employee_response(&employee, &tasks))
}

/// List employees, optionally filtered by department, search term and
/// active flag. A search term takes precedence over the department
/// filter.
pub async fn list(
    state: &ServerState,
    active_only: bool,
    department_id: Option<&str>,
    search: Option<&str>,
) -> AppResult<Vec<EmployeeResponse>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employees = match (search, department_id) {
        (Some(term), _) if !term.trim().is_empty() => repo.search(term).await?,
        (_, Some(dept)) => repo.find_by_department(dept).await?,
        _ => repo.find_all().await?,
    };

    let all_tasks = TaskRepository::new(state.db.clone()).find_all().await?;
    let mut by_owner: std::collections::HashMap<String, Vec<ProjectTask>> =
        std::collections::HashMap::new();
    for task in all_tasks {
        by_owner.entry(task.employee.to_string()).or_default().push(task);
    }

    Ok(employees
        .iter()
        .filter(|e| !active_only || e.is_active)
        .map(|e| {
            let key = e.id.as_ref().map(|i| i.to_string()).unwrap_or_default();
            let tasks = by_owner.get(&key).map(Vec::as_slice).unwrap_or(&[]);
            convert::employee_response(e, tasks)
        })
        .collect())
}
