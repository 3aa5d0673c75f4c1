//! Persisted login identity
//!
//! After a successful login the account email is written to a small JSON
//! file in the user's data directory, so later commands can attach it to
//! analysis requests. There is no token, expiry, or validation here; the
//! server owns authentication.

use crate::error::{Result, TextflowError};
use anyhow::Context;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Email sent to the server when nobody is logged in
pub const GUEST_EMAIL: &str = "Guest";

/// The remembered login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Account email as entered at login (trimmed)
    pub email: String,
    /// When the login succeeded
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            logged_in_at: Utc::now(),
        }
    }
}

/// File-backed store for the current [`Session`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Open the store at the default location in the user's data directory
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "textflow", "textflow")
            .ok_or_else(|| TextflowError::Session("Could not determine data directory".into()))?;

        Ok(Self {
            path: proj_dirs.data_dir().join("session.json"),
        })
    }

    /// Open the store at an explicit path
    ///
    /// # Examples
    ///
    /// ```
    /// use textflow::session::SessionStore;
    ///
    /// let store = SessionStore::new_with_path("/tmp/textflow-doc-session.json");
    /// assert!(store.path().ends_with("textflow-doc-session.json"));
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Open the store at `path` when given, otherwise at the default location
    pub fn from_override(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Ok(Self::new_with_path(p)),
            None => Self::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the remembered session, if any
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .context("Failed to read session file")
            .map_err(|e| TextflowError::Session(e.to_string()))?;

        let session = serde_json::from_str(&contents)
            .context("Failed to parse session file")
            .map_err(|e| TextflowError::Session(e.to_string()))?;

        Ok(Some(session))
    }

    /// Persist `session`, replacing any previous one
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create session directory")
                .map_err(|e| TextflowError::Session(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)
            .context("Failed to write session file")
            .map_err(|e| TextflowError::Session(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }

    /// Forget the remembered session; returns whether one existed
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)
            .context("Failed to remove session file")
            .map_err(|e| TextflowError::Session(e.to_string()))?;
        Ok(true)
    }

    /// Email to send with requests, falling back to [`GUEST_EMAIL`]
    ///
    /// An unreadable session file is logged and treated as logged out.
    pub fn current_email(&self) -> String {
        match self.load() {
            Ok(Some(session)) => session.email,
            Ok(None) => GUEST_EMAIL.to_string(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session: {}", e);
                GUEST_EMAIL.to_string()
            }
        }
    }
}
