use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    api::types::{parse_field_errors, ApiError},
    config,
};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(super) async fn resolved_base_url(&self) -> String {
        let base = if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        };
        base.trim_end_matches('/').to_string()
    }

    pub(super) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(super) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request
            .build()
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        #[cfg(all(test, not(target_arch = "wasm32")))]
        if let Some(responder) = mock_registry::lookup(request.url().as_str()) {
            return responder.respond(&request)?.into_response();
        }

        self.client
            .execute(request)
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))
    }

    /// Decodes a 2xx body, or maps the failure onto the error taxonomy:
    /// a 4xx carrying field errors is a validation error, anything else
    /// non-2xx is a server error.
    pub(super) async fn handle_response<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)));
        }

        let body: Option<Value> = response.json().await.ok();
        if status.is_client_error() {
            if let Some(fields) = body.as_ref().and_then(parse_field_errors) {
                return Err(ApiError::validation_fields(fields));
            }
        }

        let detail = body
            .as_ref()
            .and_then(|b| b.get("detail"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "API request failed: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                )
            });
        Err(ApiError::server(status.as_u16(), detail))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub trait TestResponder: Send + Sync {
    fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError>;
}

#[cfg(all(test, not(target_arch = "wasm32")))]
#[derive(Clone, Debug)]
pub struct MockResponse {
    status: u16,
    body: Value,
}

#[cfg(all(test, not(target_arch = "wasm32")))]
impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn into_response(self) -> Result<Response, ApiError> {
        http::Response::builder()
            .status(self.status)
            .header("content-type", "application/json")
            .body(self.body.to_string())
            .map(Response::from)
            .map_err(|e| ApiError::unknown(format!("Invalid mock response: {}", e)))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub fn register_mock(base_url: String, responder: std::sync::Arc<dyn TestResponder>) {
    mock_registry::register(base_url, responder);
}
