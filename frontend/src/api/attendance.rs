use chrono::NaiveDate;

use super::{
    client::ApiClient,
    types::{
        ApiError, AttendanceId, AttendancePayload, AttendanceRecord, EmployeeId, ListResponse,
    },
};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl ApiClient {
    /// Lists the employee's records with `from <= date <= to`.
    pub async fn list_attendance(
        &self,
        employee: EmployeeId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let params = [
            ("employee", employee.to_string()),
            ("date_after", from.format(DATE_FORMAT).to_string()),
            ("date_before", to.format(DATE_FORMAT).to_string()),
        ];
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/attendances/", base_url))
                    .query(&params),
            )
            .await?;
        let list: ListResponse<AttendanceRecord> = Self::handle_response(response).await?;
        Ok(list.into_items())
    }

    pub async fn create_attendance(
        &self,
        payload: &AttendancePayload,
    ) -> Result<AttendanceRecord, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .post(format!("{}/attendances/", base_url))
                    .json(payload),
            )
            .await?;
        Self::handle_response(response).await
    }

    pub async fn update_attendance(
        &self,
        id: AttendanceId,
        payload: &AttendancePayload,
    ) -> Result<AttendanceRecord, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .put(format!("{}/attendances/{}/", base_url, id))
                    .json(payload),
            )
            .await?;
        Self::handle_response(response).await
    }

    pub async fn upsert_attendance(
        &self,
        existing: Option<AttendanceId>,
        payload: &AttendancePayload,
    ) -> Result<AttendanceRecord, ApiError> {
        match existing {
            Some(id) => self.update_attendance(id, payload).await,
            None => self.create_attendance(payload).await,
        }
    }
}
