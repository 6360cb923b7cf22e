//! Upstream employee API client with timeout and error handling.
//!
//! # Responsibilities
//! - Issue list/get/create/delete calls against the configured base URL
//! - Bound every call with connect and read timeouts
//! - Decode the JSON envelope on success, classify failures otherwise
//!
//! One attempt per call. Whether a failure is tolerated is the caller's decision.

use std::time::{Duration, Instant};

use crate::config::UpstreamConfig;
use crate::employees::model::{Employee, NewEmployee};
use crate::observability::metrics;
use crate::upstream::types::{Envelope, Operation, UpstreamError, UpstreamResult};

const LIST_PATH: &str = "/employees";
const GET_PATH: &str = "/employee/";
const CREATE_PATH: &str = "/create";
const DELETE_PATH: &str = "/delete/";

/// HTTP client for the upstream employee API.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    /// Build a client from configuration.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .user_agent(concat!("employee-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| UpstreamError::Transport {
                url: base_url.clone(),
                source,
            })?;

        tracing::info!(
            base_url = %base_url,
            connect_timeout_secs = config.connect_timeout_secs,
            read_timeout_secs = config.read_timeout_secs,
            "Upstream client initialized"
        );

        Ok(Self { http, base_url })
    }

    /// `GET /employees`, decoded into employees.
    pub async fn list_employees(&self) -> UpstreamResult<Vec<Employee>> {
        let url = format!("{}{}", self.base_url, LIST_PATH);
        let request = self.http.get(&url);
        self.send(Operation::List, url, request, Envelope::into_employee_list).await
    }

    /// `GET /employee/{id}`, decoded into employees (zero or one in practice).
    pub async fn get_employee(&self, id: u64) -> UpstreamResult<Vec<Employee>> {
        let url = format!("{}{}{}", self.base_url, GET_PATH, id);
        let request = self.http.get(&url);
        self.send(Operation::Get, url, request, Envelope::into_employees).await
    }

    /// `POST /create` with `{name, salary, age}`.
    pub async fn create_employee(&self, employee: &NewEmployee) -> UpstreamResult<Envelope> {
        let url = format!("{}{}", self.base_url, CREATE_PATH);
        let request = self.http.post(&url).json(employee);
        self.send(Operation::Create, url, request, Ok).await
    }

    /// `DELETE /delete/{id}`
    pub async fn delete_employee(&self, id: u64) -> UpstreamResult<Envelope> {
        let url = format!("{}{}{}", self.base_url, DELETE_PATH, id);
        let request = self.http.delete(&url);
        self.send(Operation::Delete, url, request, Ok).await
    }

    /// Get the base URL calls are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<T>(
        &self,
        operation: Operation,
        url: String,
        request: reqwest::RequestBuilder,
        decode: impl FnOnce(Envelope) -> Result<T, serde_json::Error>,
    ) -> UpstreamResult<T> {
        let start = Instant::now();
        let result = Self::execute(url, request, decode).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) if e.is_timeout() => "timeout",
            Err(UpstreamError::Transport { .. }) => "transport_error",
            Err(UpstreamError::Status { .. }) => "bad_status",
            Err(UpstreamError::Decode { .. }) => "malformed",
        };
        metrics::record_upstream_call(operation.as_str(), outcome, start);

        match &result {
            Ok(_) => tracing::debug!(
                operation = operation.as_str(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Upstream call succeeded"
            ),
            Err(e) => tracing::warn!(operation = operation.as_str(), error = %e, "Upstream call failed"),
        }

        result
    }

    async fn execute<T>(
        url: String,
        request: reqwest::RequestBuilder,
        decode: impl FnOnce(Envelope) -> Result<T, serde_json::Error>,
    ) -> UpstreamResult<T> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => return Err(UpstreamError::Transport { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { url, status });
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => return Err(UpstreamError::Transport { url, source }),
        };

        serde_json::from_slice::<Envelope>(&body)
            .and_then(decode)
            .map_err(|source| UpstreamError::Decode { url, source })
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
