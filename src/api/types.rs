//! Request and response bodies exchanged with the analysis server
//!
//! Response shapes are owned by the server, so every field is defaulted
//! and unknown fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /api/signup`
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
}

/// `{message}` body returned by login and signup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Merged CSV text
    pub text: String,
    /// Operation wire ids
    pub operations: Vec<String>,
    /// Session email, or `Guest`
    pub email: String,
    /// Name reported for the uploaded data
    pub filename: Option<String>,
}

/// Output of a single operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    #[serde(default)]
    pub title: String,
    /// Usually a string; some operations return structured values
    #[serde(default)]
    pub output: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl OperationResult {
    /// Output as display text; strings are shown without quotes
    pub fn output_text(&self) -> String {
        match &self.output {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Run statistics reported by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Number of data segments the server processed
    #[serde(default)]
    pub total_chunks: u64,
    /// Wall time in seconds
    #[serde(default)]
    pub processing_time: f64,
    /// Server flagged something needing attention
    #[serde(default)]
    pub alert: bool,
}

/// Body returned by `POST /api/analyze`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub results: Vec<OperationResult>,
    #[serde(default)]
    pub stats: Option<AnalysisStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One record returned by `GET /api/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Record identifier; numeric or string depending on the server
    pub id: Value,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub content: Option<String>,
}

impl SearchHit {
    pub fn id_text(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Body of `POST /api/export`
#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest<'a> {
    pub results: &'a [OperationResult],
}
