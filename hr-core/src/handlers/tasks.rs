//! Task Use Cases
//!
//! Task writes take the narrow per-task path: they allocate the numeric
//! id from the atomic counter, rebuild the assignee snapshot from the
//! authoritative employee list, and persist the task row alone. The
//! owning aggregate row and its version are never touched.

use shared::models::{Assignee, SubtaskCreate, TaskCreate, TaskResponse, TaskUpdate};

use crate::core::ServerState;
use crate::db::models::{EmployeeId, ProjectTask};
use crate::db::repository::{EmployeeRepository, Repository, TaskRepository};
use crate::handlers::convert;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_progress,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Rebuild the assignee snapshot from the employee table. Ids that do not
/// resolve to an employee are silently dropped.
async fn resolve_assignees(
    repo: &EmployeeRepository,
    assignee_ids: &[String],
) -> AppResult<Vec<Assignee>> {
    let mut assignees = Vec::new();
    for raw in assignee_ids {
        let Ok(id) = raw.parse::<EmployeeId>() else {
            continue;
        };
        if let Some(employee) = repo.find_by_id(&id.to_string()).await? {
            assignees.push(Assignee::build(&id.to_string(), &employee.full_name()));
        }
    }
    Ok(assignees)
}

async fn response_with_children(
    tasks: &TaskRepository,
    task: &ProjectTask,
) -> AppResult<TaskResponse> {
    let children = match (&task.id, task.is_top_level()) {
        (Some(id), true) => tasks
            .find_subtasks(id)
            .await?
            .iter()
            .map(|s| convert::task_response(s, Vec::new()))
            .collect(),
        _ => Vec::new(),
    };
    Ok(convert::task_response(task, children))
}

/// Create a top-level task for an employee
pub async fn create(state: &ServerState, payload: TaskCreate) -> AppResult<TaskResponse> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&Some(payload.description.clone()), "description", MAX_NOTE_LEN)?;
    validate_optional_text(&Some(payload.due_date.clone()), "due_date", MAX_SHORT_TEXT_LEN)?;
    validate_progress(payload.progress)?;

    let employees = EmployeeRepository::new(state.db.clone());
    let owner = employees
        .find_by_id(&payload.employee_id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found"))?;
    let owner_id = owner
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Stored employee has no ID"))?;

    let tasks = TaskRepository::new(state.db.clone());
    let seq = tasks.next_seq().await?;

    let mut task = ProjectTask::new(
        seq,
        owner_id,
        None,
        &payload.name,
        &payload.description,
        &payload.due_date,
        payload.priority,
        payload.progress,
    )?;
    task.set_assignees(&resolve_assignees(&employees, &payload.assignee_ids).await?);

    let created = tasks.create(task).await?;
    Ok(convert::task_response(&created, Vec::new()))
}

/// Create a subtask under a top-level task. The subtask belongs to the
/// same employee as its parent; nesting deeper than one level is
/// rejected.
pub async fn create_subtask(
    state: &ServerState,
    payload: SubtaskCreate,
) -> AppResult<TaskResponse> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&Some(payload.description.clone()), "description", MAX_NOTE_LEN)?;
    validate_optional_text(&Some(payload.due_date.clone()), "due_date", MAX_SHORT_TEXT_LEN)?;
    validate_progress(payload.progress)?;

    let tasks = TaskRepository::new(state.db.clone());
    let parent = tasks
        .find_by_id(&payload.parent_task_id)
        .await?
        .ok_or_else(|| AppError::not_found("Parent task not found"))?;
    if !parent.is_top_level() {
        return Err(AppError::validation("Subtasks cannot be nested"));
    }
    let parent_id = parent
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Stored task has no ID"))?;

    let employees = EmployeeRepository::new(state.db.clone());
    let seq = tasks.next_seq().await?;

    let mut subtask = ProjectTask::new(
        seq,
        parent.employee.clone(),
        Some(parent_id),
        &payload.name,
        &payload.description,
        &payload.due_date,
        payload.priority,
        payload.progress,
    )?;
    subtask.set_assignees(&resolve_assignees(&employees, &payload.assignee_ids).await?);

    let created = tasks.create(subtask).await?;
    Ok(convert::task_response(&created, Vec::new()))
}

/// Update a task. A provided assignee id list fully replaces the
/// snapshot; people missing from the new list disappear from it.
pub async fn update(state: &ServerState, id: &str, payload: TaskUpdate) -> AppResult<TaskResponse> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.due_date, "due_date", MAX_SHORT_TEXT_LEN)?;

    let tasks = TaskRepository::new(state.db.clone());
    let mut task = tasks
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Task {id} not found")))?;

    task.apply_update(
        payload.name.as_deref(),
        payload.description.as_deref(),
        payload.due_date.as_deref(),
        payload.priority,
        payload.completed,
    );
    if let Some(progress) = payload.progress {
        task.update_progress(progress)?;
    }
    if let Some(assignee_ids) = &payload.assignee_ids {
        let employees = EmployeeRepository::new(state.db.clone());
        task.set_assignees(&resolve_assignees(&employees, assignee_ids).await?);
    }

    let updated = tasks.update(&task).await?;
    response_with_children(&tasks, &updated).await
}

/// Delete a task by its record id. Deleting a top-level task removes its
/// subtasks first. Returns false when no such task exists.
pub async fn delete(state: &ServerState, id: &str) -> AppResult<bool> {
    let tasks = TaskRepository::new(state.db.clone());
    let Some(task) = tasks.find_by_id(id).await? else {
        return Ok(false);
    };
    let removed = tasks.delete_with_subtasks(&task).await?;
    tracing::debug!("Deleted task {} ({} rows)", id, removed);
    Ok(true)
}

/// Delete a task addressed by its externally visible numeric id
pub async fn delete_by_task_id(state: &ServerState, seq: i64) -> AppResult<bool> {
    let tasks = TaskRepository::new(state.db.clone());
    let Some(task) = tasks.find_by_seq(seq).await? else {
        return Ok(false);
    };
    let removed = tasks.delete_with_subtasks(&task).await?;
    tracing::debug!("Deleted task seq={} ({} rows)", seq, removed);
    Ok(true)
}

/// Fetch a single task with its children
pub async fn get_by_id(state: &ServerState, id: &str) -> AppResult<TaskResponse> {
    let tasks = TaskRepository::new(state.db.clone());
    let task = tasks
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Task {id} not found")))?;
    response_with_children(&tasks, &task).await
}
