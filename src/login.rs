//! Login and signup flows
//!
//! Credentials are checked for presence locally, then sent to the server.
//! Only a successful login touches the [`SessionStore`].

use crate::api::AnalysisBackend;
use crate::error::{Result, TextflowError};
use crate::session::{Session, SessionStore};

/// Shown when email or password is blank
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Please enter both email and password.";

/// Log in and remember the email on success
///
/// The email is trimmed before it is sent and stored; the password is sent
/// as entered.
///
/// # Errors
///
/// * `TextflowError::MissingCredentials` when either field is blank; no
///   request is made
/// * `TextflowError::LoginRejected` with the server's message
/// * `TextflowError::Connection` when the server cannot be reached
pub async fn login(
    backend: &dyn AnalysisBackend,
    store: &SessionStore,
    email: &str,
    password: &str,
) -> Result<Session> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(TextflowError::MissingCredentials(MISSING_CREDENTIALS_MESSAGE.into()).into());
    }

    backend.login(email, password).await?;

    let session = Session::new(email);
    store.save(&session)?;
    tracing::info!("Logged in as {}", email);
    Ok(session)
}

/// Create an account; does not log in
pub async fn signup(
    backend: &dyn AnalysisBackend,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<String> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(TextflowError::MissingCredentials(MISSING_CREDENTIALS_MESSAGE.into()).into());
    }

    backend.signup(full_name.trim(), email, password).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use tempfile::TempDir;

    fn temp_store() -> (SessionStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new_with_path(dir.path().join("session.json"));
        (store, dir)
    }

    #[tokio::test]
    async fn test_login_persists_trimmed_email() {
        let backend = FakeBackend::new();
        let (store, _dir) = temp_store();

        let session = login(&backend, &store, "  ana@example.com ", "pw")
            .await
            .unwrap();

        assert_eq!(session.email, "ana@example.com");
        assert_eq!(backend.login_calls(), vec!["ana@example.com"]);
        assert_eq!(store.current_email(), "ana@example.com");
    }

    #[tokio::test]
    async fn test_login_missing_credentials_makes_no_request() {
        let backend = FakeBackend::new();
        let (store, _dir) = temp_store();

        for (email, password) in [("", "pw"), ("   ", "pw"), ("ana@example.com", "")] {
            let err = login(&backend, &store, email, password).await.unwrap_err();
            assert_eq!(err.to_string(), MISSING_CREDENTIALS_MESSAGE);
        }

        assert!(backend.login_calls().is_empty());
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejected_login_surfaces_message_and_keeps_session() {
        let backend = FakeBackend::new().rejecting_login("Invalid credentials");
        let (store, _dir) = temp_store();
        store.save(&Session::new("previous@example.com")).unwrap();

        let err = login(&backend, &store, "ana@example.com", "wrong")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(store.current_email(), "previous@example.com");
    }

    #[tokio::test]
    async fn test_signup_requires_credentials() {
        let backend = FakeBackend::new();
        assert!(signup(&backend, "Ana", "", "pw").await.is_err());
        let message = signup(&backend, "Ana", "ana@example.com", "pw")
            .await
            .unwrap();
        assert_eq!(message, "Account created");
    }

    #[tokio::test]
    async fn test_signup_is_not_recorded_as_login() {
        let backend = FakeBackend::new();
        signup(&backend, " Ana Lima ", " ana@example.com ", "pw")
            .await
            .unwrap();

        assert_eq!(backend.signup_calls(), vec!["ana@example.com"]);
        assert!(backend.login_calls().is_empty());
    }
}
