//! Analysis server API
//!
//! [`AnalysisBackend`] is the seam between the client flows (login,
//! dashboard) and the remote service. [`ApiClient`] is the HTTP
//! implementation; [`fake::FakeBackend`] is an in-process stand-in for
//! tests.

pub mod client;
pub mod fake;
pub mod types;

pub use client::ApiClient;
pub use types::{
    AnalysisResponse, AnalysisStats, AnalyzeRequest, OperationResult, SearchHit,
};

use crate::error::Result;
use async_trait::async_trait;

/// Operations exposed by the analysis server
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Check credentials; `Ok(())` on any success response
    async fn login(&self, email: &str, password: &str) -> Result<()>;

    /// Create an account and return the server's confirmation message
    async fn signup(&self, full_name: &str, email: &str, password: &str) -> Result<String>;

    /// Submit one batch of text for the selected operations
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResponse>;

    /// Query records indexed by the server
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;

    /// Render results as a CSV report
    async fn export(&self, results: &[OperationResult]) -> Result<String>;
}
