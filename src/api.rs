use crate::{
    constants::CSRF_HEADER,
    csrf::CsrfSource,
    errors::{ChatError, ChatResult},
    logging::log_api_call,
    models::{ApiCallLog, ChatRequest},
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::{Duration, Instant};

/// What came back from the backend, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers a chat request. `Err` means no response arrived at all; any
/// HTTP status, success or not, is an `Ok`.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> ChatResult<ApiResponse>;
}

/// Posts JSON to the configured chat endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    csrf: CsrfSource,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, csrf: CsrfSource, timeout: Duration) -> ChatResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::transport_error(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            csrf,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> ChatResult<ApiResponse> {
        let start_time = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(CSRF_HEADER, self.csrf.token())
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::transport_error(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::transport_error(format!("Failed to read response body: {}", e)))?;

        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: self.endpoint.clone(),
            request_summary: format!("session {}", request.session_id),
            response_status: status.as_u16(),
            response_time_ms: start_time.elapsed().as_millis(),
        });

        Ok(ApiResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
