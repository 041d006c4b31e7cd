//! Employee Repository
//!
//! Whole-aggregate persistence. Every write replaces the full employee
//! row and is guarded by the optimistic `version` field; a stale write
//! surfaces as [`RepoError::Conflict`] and is left for the caller to
//! retry. The unique index on `email` backstops the duplicate pre-check.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, Repository};
use crate::db::models::{Employee, EmployeeId};

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<EmployeeId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// Serialize the aggregate for a whole-row write, dropping the id
    /// field (the record key is addressed separately).
    fn row_content(employee: &Employee) -> RepoResult<serde_json::Value> {
        let mut data = serde_json::to_value(employee)
            .map_err(|e| RepoError::Database(format!("Failed to serialize employee: {}", e)))?;
        if let Some(obj) = data.as_object_mut() {
            obj.remove("id");
        }
        Ok(data)
    }

    /// Find employee by email (normalized lowercase)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let normalized = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", normalized))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Whether the email is already taken by another employee.
    /// `exclude` allows an employee to keep their own address on update.
    pub async fn email_exists(
        &self,
        email: &str,
        exclude: Option<&EmployeeId>,
    ) -> RepoResult<bool> {
        let normalized = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE id FROM employee WHERE email = $email")
            .bind(("email", normalized))
            .await?;
        let ids: Vec<EmployeeId> = result.take(0)?;
        Ok(ids.iter().any(|id| Some(id) != exclude))
    }

    /// Case-insensitive contains search over name, email, job title and
    /// department name. A blank term returns everyone.
    pub async fn search(&self, term: &str) -> RepoResult<Vec<Employee>> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.find_all().await;
        }
        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT * FROM employee WHERE
                    string::lowercase(first_name) CONTAINS $term
                    OR string::lowercase(last_name) CONTAINS $term
                    OR string::lowercase(email) CONTAINS $term
                    OR string::lowercase(job_title) CONTAINS $term
                    OR string::lowercase(department_name ?? '') CONTAINS $term
                ORDER BY last_name, first_name"#,
            )
            .bind(("term", term))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees)
    }

    /// All employees of one department
    pub async fn find_by_department(&self, department_id: &str) -> RepoResult<Vec<Employee>> {
        let department_id = department_id.to_string();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM employee WHERE department_id = $department_id \
                 ORDER BY last_name, first_name",
            )
            .bind(("department_id", department_id))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees)
    }
}

impl Repository<Employee> for EmployeeRepository {
    async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY last_name, first_name")
            .await?
            .take(0)?;
        Ok(employees)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let thing = Self::parse_id(id)?;
        let employee: Option<Employee> = self.base.db().select(thing).await?;
        Ok(employee)
    }

    /// Insert a new aggregate. Duplicate email is checked up front; the
    /// unique index catches the remaining race at commit time.
    async fn create(&self, employee: Employee) -> RepoResult<Employee> {
        if self.email_exists(&employee.email, None).await? {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already in use",
                employee.email
            )));
        }

        let data = Self::row_content(&employee)?;
        let mut result = self
            .base
            .db()
            .query("CREATE employee CONTENT $data RETURN AFTER")
            .bind(("data", data))
            .await?;
        let created: Vec<Employee> = result.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Replace the aggregate row, checking the optimistic version. The
    /// stored version must equal the loaded one; the write stores
    /// `version + 1`.
    async fn update(&self, employee: &Employee) -> RepoResult<Employee> {
        let id = employee
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Employee has no ID".to_string()))?;
        let expected = employee.version;

        let mut data = Self::row_content(employee)?;
        data["version"] = serde_json::Value::from(expected + 1);

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE employee CONTENT $data \
                 WHERE id = $id AND version = $version RETURN AFTER",
            )
            .bind(("data", data))
            .bind(("id", id.clone()))
            .bind(("version", expected))
            .await?;
        let updated: Vec<Employee> = result.take(0)?;

        match updated.into_iter().next() {
            Some(e) => Ok(e),
            None => {
                let exists: Option<Employee> = self.base.db().select(id.clone()).await?;
                if exists.is_some() {
                    Err(RepoError::Conflict(format!(
                        "Employee {} was modified concurrently",
                        id
                    )))
                } else {
                    Err(RepoError::NotFound(format!("Employee {} not found", id)))
                }
            }
        }
    }

    /// Hard delete the employee and every task row it owns.
    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = Self::parse_id(id)?;
        let existing: Option<Employee> = self.base.db().select(thing.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Employee {} not found", id)));
        }

        // Task rows keep the owner reference in string form
        self.base
            .db()
            .query("DELETE task WHERE employee = $owner; DELETE $thing")
            .bind(("owner", thing.to_string()))
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
