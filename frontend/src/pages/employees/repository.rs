use super::query::DirectoryQuery;
use crate::api::{ApiClient, ApiError, DepartmentId, EmployeeId, EmployeeResponse};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRow {
    pub id: EmployeeId,
    pub emp_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

impl DirectoryRow {
    fn from_employee(
        employee: EmployeeResponse,
        departments: &HashMap<DepartmentId, String>,
    ) -> Self {
        let department = employee
            .department
            .and_then(|id| departments.get(&id).cloned())
            .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string());
        Self {
            id: employee.id,
            emp_id: employee.emp_id,
            full_name: employee.full_name,
            email: employee.email,
            department,
        }
    }
}

/// Employees matching `query`, in server order, with department names
/// resolved. A failed department lookup degrades names to "Unknown".
pub async fn fetch_directory(
    api: &ApiClient,
    query: &DirectoryQuery,
) -> Result<Vec<DirectoryRow>, ApiError> {
    let ordering = query.ordering();
    let employees = api.list_employees(&query.search, ordering.as_deref()).await?;
    let departments = match api.list_departments().await {
        Ok(list) => list.into_iter().map(|d| (d.id, d.name)).collect(),
        Err(err) => {
            warn!("Failed to load departments: {}", err);
            HashMap::new()
        }
    };
    Ok(employees
        .into_iter()
        .map(|employee| DirectoryRow::from_employee(employee, &departments))
        .collect())
}
