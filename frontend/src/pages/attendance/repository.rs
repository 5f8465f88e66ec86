use crate::api::{ApiClient, ApiError, DepartmentResponse, EmployeeId, EmployeeResponse};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub employee: EmployeeResponse,
    pub department: Option<DepartmentResponse>,
}

/// Loads the header data. A missing department does not fail the page.
pub async fn fetch_employee_profile(
    api: &ApiClient,
    employee: EmployeeId,
) -> Result<EmployeeProfile, ApiError> {
    let employee = api.get_employee(employee).await?;
    let department = match employee.department {
        Some(id) => match api.get_department(id).await {
            Ok(department) => Some(department),
            Err(err) => {
                warn!("Failed to load department {}: {}", id, err);
                None
            }
        },
        None => None,
    };
    Ok(EmployeeProfile {
        employee,
        department,
    })
}
