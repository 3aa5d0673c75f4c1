//! Command-line interface definition for TextFlow
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for login, analysis, search, and the interactive
//! dashboard.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TextFlow - text analytics client
///
/// Upload CSV files, pick text-processing operations, and run them against
/// a TextFlow analysis server.
#[derive(Parser, Debug, Clone)]
#[command(name = "textflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the analysis server base URL
    #[arg(long)]
    pub server: Option<String>,

    /// Override the session file location
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for TextFlow
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sign in and remember the account email
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(short, long, env = "TEXTFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Open the interactive dashboard after a successful login
        #[arg(long)]
        dashboard: bool,
    },

    /// Create a new account
    Signup {
        /// Full name for the account
        #[arg(short, long)]
        name: String,

        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(short, long, env = "TEXTFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the remembered account email
    Logout,

    /// Show the remembered account email
    Whoami,

    /// List the available text-processing operations
    Operations {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Merge CSV files and run the selected operations on the server
    Analyze {
        /// CSV file to include (repeatable)
        #[arg(short, long = "file", required_unless_present = "folder")]
        files: Vec<PathBuf>,

        /// Include every CSV file under this folder
        #[arg(long, conflicts_with = "files")]
        folder: Option<PathBuf>,

        /// Operation to run, e.g. "Summarization" or "keyword-extraction" (repeatable)
        #[arg(short, long = "op", required = true)]
        operations: Vec<String>,

        /// Emit the raw response as JSON
        #[arg(long)]
        json: bool,

        /// Also export the results as a CSV report to this path
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Search records indexed by the server
    Search {
        /// Search query
        query: String,

        /// Emit JSON instead of formatted hits
        #[arg(long)]
        json: bool,
    },

    /// Start the interactive dashboard
    Dashboard,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            server: None,
            session_file: None,
            command: Commands::Whoami,
        }
    }
}
