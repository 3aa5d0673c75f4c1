//! In-process fake backend for tests
//!
//! [`FakeBackend`] records every call it receives and answers with canned
//! responses, so dashboard and login flows can be exercised without a
//! server.
//!
//! # Example
//!
//! ```
//! use textflow::api::fake::FakeBackend;
//! use textflow::api::AnalysisBackend;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let backend = FakeBackend::new();
//! backend.login("ana@example.com", "pw").await.unwrap();
//! assert_eq!(backend.login_calls(), vec!["ana@example.com".to_string()]);
//! # }
//! ```

use super::types::{AnalysisResponse, AnalyzeRequest, OperationResult, SearchHit};
use super::AnalysisBackend;
use crate::error::{Result, TextflowError};

use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Recorded {
    logins: Vec<String>,
    signups: Vec<String>,
    analyze: Vec<AnalyzeRequest>,
    searches: Vec<String>,
    exports: Vec<Vec<OperationResult>>,
}

/// Scriptable [`AnalysisBackend`] that never touches the network
#[derive(Debug, Default)]
pub struct FakeBackend {
    reject_login: Option<String>,
    analysis: AnalysisResponse,
    hits: Vec<SearchHit>,
    report: String,
    recorded: Mutex<Recorded>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every login with `message`
    pub fn rejecting_login(mut self, message: impl Into<String>) -> Self {
        self.reject_login = Some(message.into());
        self
    }

    pub fn with_analysis(mut self, analysis: AnalysisResponse) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn with_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_report(mut self, report: impl Into<String>) -> Self {
        self.report = report.into();
        self
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        // A poisoned lock only means a test already panicked
        self.recorded.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Emails of every login attempt
    pub fn login_calls(&self) -> Vec<String> {
        self.recorded().logins.clone()
    }

    /// Emails of every signup attempt
    pub fn signup_calls(&self) -> Vec<String> {
        self.recorded().signups.clone()
    }

    pub fn analyze_calls(&self) -> Vec<AnalyzeRequest> {
        self.recorded().analyze.clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.recorded().searches.clone()
    }

    pub fn export_calls(&self) -> Vec<Vec<OperationResult>> {
        self.recorded().exports.clone()
    }
}

#[async_trait]
impl AnalysisBackend for FakeBackend {
    async fn login(&self, email: &str, _password: &str) -> Result<()> {
        self.recorded().logins.push(email.to_string());
        match &self.reject_login {
            Some(message) => Err(TextflowError::LoginRejected(message.clone()).into()),
            None => Ok(()),
        }
    }

    async fn signup(&self, _full_name: &str, email: &str, _password: &str) -> Result<String> {
        self.recorded().signups.push(email.to_string());
        Ok("Account created".to_string())
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResponse> {
        self.recorded().analyze.push(request.clone());
        Ok(self.analysis.clone())
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.recorded().searches.push(query.to_string());
        Ok(self.hits.clone())
    }

    async fn export(&self, results: &[OperationResult]) -> Result<String> {
        self.recorded().exports.push(results.to_vec());
        Ok(self.report.clone())
    }
}
