//! HTTP implementation of [`AnalysisBackend`]
//!
//! Talks to the analysis server over JSON. Every call is a single attempt:
//! there is no retry, and failures are mapped to user-facing
//! [`TextflowError`] variants.

use super::types::{
    AnalysisResponse, AnalyzeRequest, ExportRequest, LoginRequest, MessageResponse,
    OperationResult, SearchHit, SignupRequest,
};
use super::AnalysisBackend;
use crate::config::ServerConfig;
use crate::error::{Result, TextflowError};

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Shown when a login response body is not JSON
pub const INVALID_RESPONSE_MESSAGE: &str = "The server did not return a valid response.";

/// Shown when a rejected login carries no message
pub const DEFAULT_LOGIN_FAILURE: &str = "Invalid email or password.";

const DEFAULT_SIGNUP_FAILURE: &str = "Signup failed.";

/// Client for the analysis server's HTTP API
///
/// # Examples
///
/// ```
/// use textflow::api::ApiClient;
/// use textflow::config::ServerConfig;
///
/// let client = ApiClient::new(&ServerConfig::default()).unwrap();
/// assert_eq!(client.base_url(), "http://127.0.0.1:5001");
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("textflow/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TextflowError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        tracing::debug!("Initialized API client: base_url={}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn connection_error(&self, e: reqwest::Error) -> TextflowError {
        tracing::error!("Network/connection error: {}", e);
        TextflowError::Connection {
            url: self.base_url.clone(),
            message: e.to_string(),
        }
    }

    /// Read a `{message}` body, substituting fixed text when it is missing or not JSON
    async fn message_from(response: Response, fallback: &str) -> String {
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<MessageResponse>(&body) {
            Ok(parsed) => parsed
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()),
            Err(_) => INVALID_RESPONSE_MESSAGE.to_string(),
        }
    }

    /// Turn a non-success analysis or search response into a `Backend` error
    async fn backend_failure(status: StatusCode, response: Response) -> TextflowError {
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .or_else(|| v.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body);
        tracing::error!("Server returned error {}: {}", status, detail);
        TextflowError::Backend(format!("server returned {}: {}", status, detail))
    }

    /// Turn a failure to read or decode a success body into a `Backend` error
    fn unreadable_body(what: &str, e: reqwest::Error) -> TextflowError {
        tracing::error!("Failed to read {} response: {}", what, e);
        TextflowError::Backend(format!("failed to read {} response: {}", what, e))
    }
}

#[async_trait]
impl AnalysisBackend for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<()> {
        let url = self.endpoint("/api/login");
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Login responded with {}", status);
            tracing::info!("Login succeeded for {}", email);
            return Ok(());
        }

        let message = Self::message_from(response, DEFAULT_LOGIN_FAILURE).await;
        tracing::warn!("Login rejected ({}): {}", status, message);
        Err(TextflowError::LoginRejected(message).into())
    }

    async fn signup(&self, full_name: &str, email: &str, password: &str) -> Result<String> {
        let url = self.endpoint("/api/signup");
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&SignupRequest {
                email,
                password,
                full_name,
            })
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Signup responded with {}", status);
            let message = Self::message_from(response, "Account created").await;
            tracing::info!("Signup succeeded for {}", email);
            return Ok(message);
        }

        let message = Self::message_from(response, DEFAULT_SIGNUP_FAILURE).await;
        tracing::warn!("Signup rejected ({}): {}", status, message);
        Err(TextflowError::LoginRejected(message).into())
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResponse> {
        let url = self.endpoint("/api/analyze");
        tracing::debug!(
            operations = ?request.operations,
            bytes = request.text.len(),
            "POST {}",
            url
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Analyze request failed: {}", e);
                TextflowError::Backend(format!("could not reach {}: {}", self.base_url, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::backend_failure(status, response).await.into());
        }

        tracing::debug!("Analyze responded with {}", status);
        let analysis: AnalysisResponse = response
            .json()
            .await
            .map_err(|e| Self::unreadable_body("analysis", e))?;

        tracing::info!("Received {} operation results", analysis.results.len());
        Ok(analysis)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = self.endpoint("/api/search");
        tracing::debug!("GET {} q={}", url, query);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Search request failed: {}", e);
                TextflowError::Backend(format!("could not reach {}: {}", self.base_url, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::backend_failure(status, response).await.into());
        }

        tracing::debug!("Search responded with {}", status);
        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| Self::unreadable_body("search", e))?;

        tracing::debug!("Search returned {} hits", hits.len());
        Ok(hits)
    }

    async fn export(&self, results: &[OperationResult]) -> Result<String> {
        let url = self.endpoint("/api/export");
        tracing::debug!("POST {} ({} results)", url, results.len());

        let response = self
            .client
            .post(&url)
            .json(&ExportRequest { results })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Export request failed: {}", e);
                TextflowError::Backend(format!("could not reach {}: {}", self.base_url, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::backend_failure(status, response).await.into());
        }

        tracing::debug!("Export responded with {}", status);
        response
            .text()
            .await
            .map_err(|e| Self::unreadable_body("export", e).into())
    }
}
