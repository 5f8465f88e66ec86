use super::{
    client::ApiClient,
    types::{
        ApiError, DepartmentId, DepartmentResponse, EmployeeId, EmployeeResponse, ListResponse,
    },
};

impl ApiClient {
    /// `GET /employees/`, narrowed by `search` and sorted by a DRF `ordering`
    /// expression such as `-full_name`. Empty values are not sent.
    pub async fn list_employees(
        &self,
        search: &str,
        ordering: Option<&str>,
    ) -> Result<Vec<EmployeeResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut params = Vec::new();
        if !search.trim().is_empty() {
            params.push(("search", search.trim()));
        }
        if let Some(ordering) = ordering {
            params.push(("ordering", ordering));
        }
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/employees/", base_url))
                    .query(&params),
            )
            .await?;
        let list: ListResponse<EmployeeResponse> = Self::handle_response(response).await?;
        Ok(list.into_items())
    }

    pub async fn list_departments(&self) -> Result<Vec<DepartmentResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(self.http_client().get(format!("{}/departments/", base_url)))
            .await?;
        let list: ListResponse<DepartmentResponse> = Self::handle_response(response).await?;
        Ok(list.into_items())
    }

    pub async fn get_employee(&self, id: EmployeeId) -> Result<EmployeeResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/employees/{}/", base_url, id)),
            )
            .await?;
        Self::handle_response(response).await
    }

    pub async fn get_department(&self, id: DepartmentId) -> Result<DepartmentResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/departments/{}/", base_url, id)),
            )
            .await?;
        Self::handle_response(response).await
    }
}
