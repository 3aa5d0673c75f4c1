//! TextFlow - text analytics client library
//!
//! This library provides the client side of the TextFlow analysis service:
//! login, CSV merging, operation selection, analysis submission, and
//! record search. All text processing happens on the server.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Server API trait, HTTP client, and request/response types
//! - `login`: Login and signup flows
//! - `session`: Persisted login email
//! - `upload`: CSV file selection and header-deduplicating merge
//! - `operations`: Operation catalog and toggle selection
//! - `dashboard`: Dashboard state and actions
//! - `render`: Terminal output
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use textflow::api::ApiClient;
//! use textflow::dashboard::Dashboard;
//! use textflow::operations::Operation;
//! use textflow::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let client = ApiClient::new(&config.server)?;
//!     let mut dashboard = Dashboard::new("Guest");
//!     dashboard.select_files(["reviews.csv"]).await?;
//!     dashboard.toggle_operation(Operation::Summarization);
//!     dashboard.run_all(&client).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod login;
pub mod operations;
pub mod render;
pub mod session;
pub mod upload;

// Re-export commonly used types
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{Result, TextflowError};
pub use operations::{Operation, OperationSelection};
pub use session::{Session, SessionStore};
