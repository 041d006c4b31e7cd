//! Model conversion
//!
//! Maps database models (`db::models`) onto response contracts
//! (`shared::models`). Task trees are rebuilt from the flat row set via
//! id-keyed lookups; rows never reference each other directly.

use std::collections::{HashMap, HashSet};

use shared::models::{EmployeeResponse, TaskResponse};

use crate::db::models::{Employee, ProjectTask};

/// Build the response shape for one task with its children attached.
pub fn task_response(task: &ProjectTask, children: Vec<TaskResponse>) -> TaskResponse {
    TaskResponse {
        id: task.seq,
        guid_id: task.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
        employee_id: task.employee.to_string(),
        parent_task_id: task.parent.as_ref().map(|p| p.to_string()),
        name: task.name.clone(),
        description: task.description.clone(),
        due_date: task.due_date.clone(),
        priority: task.priority.to_string(),
        completed: task.completed,
        progress: task.progress,
        assignees: task.assignees(),
        subtask_count: children.len(),
        children,
        created_at: task.created_at,
        updated_at: task.updated_at,
    }
}

/// Rebuild the task forest from a flat row set.
///
/// Subtasks attach under their parent; a subtask whose parent is absent
/// from the set surfaces at top level rather than disappearing.
pub fn task_tree(tasks: &[ProjectTask]) -> Vec<TaskResponse> {
    let ids: HashSet<String> = tasks
        .iter()
        .filter_map(|t| t.id.as_ref().map(|i| i.to_string()))
        .collect();

    let mut children_of: HashMap<String, Vec<&ProjectTask>> = HashMap::new();
    let mut roots: Vec<&ProjectTask> = Vec::new();
    for task in tasks {
        match &task.parent {
            Some(parent) if ids.contains(&parent.to_string()) => {
                children_of.entry(parent.to_string()).or_default().push(task);
            }
            _ => roots.push(task),
        }
    }

    roots
        .iter()
        .map(|task| {
            let children = task
                .id
                .as_ref()
                .and_then(|id| children_of.get(&id.to_string()))
                .map(|subtasks| {
                    subtasks
                        .iter()
                        .map(|s| task_response(s, Vec::new()))
                        .collect()
                })
                .unwrap_or_default();
            task_response(task, children)
        })
        .collect()
}

/// Build the employee response, attaching the task forest.
pub fn employee_response(employee: &Employee, tasks: &[ProjectTask]) -> EmployeeResponse {
    EmployeeResponse {
        id: employee.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
        first_name: employee.first_name.clone(),
        last_name: employee.last_name.clone(),
        full_name: employee.full_name(),
        email: employee.email.clone(),
        phone: employee.phone.clone(),
        date_of_birth: employee.date_of_birth,
        job_title: employee.job_title.clone(),
        department_id: employee.department_id.clone(),
        department_name: employee.department_name.clone(),
        manager_id: employee.manager.as_ref().map(|m| m.to_string()),
        image_url: employee.image_url.clone(),
        status: employee.status.to_string(),
        is_active: employee.is_active,
        hire_date: employee.hire_date,
        termination_date: employee.termination_date,
        onboarding_state: employee.onboarding_state(),
        offboarding_state: employee.offboarding_state(),
        offboarding_reason: employee.offboarding_reason.clone(),
        onboarding_checklist: employee.onboarding_checklist.clone(),
        offboarding_checklist: employee.offboarding_checklist.clone(),
        documents: employee.documents.clone(),
        tasks: task_tree(tasks),
        created_at: employee.created_at,
        updated_at: employee.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TaskPriority;

    fn task(id: &str, seq: i64, parent: Option<&str>) -> ProjectTask {
        let mut t = ProjectTask::new(
            seq,
            "employee:alice".parse().unwrap(),
            parent.map(|p| p.parse().unwrap()),
            &format!("task {seq}"),
            "",
            "",
            TaskPriority::Normal,
            0,
        )
        .unwrap();
        t.id = Some(id.parse().unwrap());
        t
    }

    #[test]
    fn test_tree_nests_subtasks_under_parent() {
        let rows = vec![
            task("task:a", 1, None),
            task("task:b", 2, Some("task:a")),
            task("task:c", 3, Some("task:a")),
            task("task:d", 4, None),
        ];
        let tree = task_tree(&rows);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, 1);
        assert_eq!(tree[0].subtask_count, 2);
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].id, 2);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_orphan_subtask_surfaces_at_top_level() {
        let rows = vec![task("task:x", 7, Some("task:gone"))];
        let tree = task_tree(&rows);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, 7);
    }

    #[test]
    fn test_task_response_exposes_both_ids() {
        let t = task("task:a", 42, None);
        let resp = task_response(&t, Vec::new());
        assert_eq!(resp.id, 42);
        assert_eq!(resp.guid_id, "task:a");
        assert_eq!(resp.priority, "Normal");
    }
}
