//! HTTP client integration tests
//!
//! Exercises `ApiClient` and the login/dashboard flows against a `wiremock`
//! mock server standing in for the analysis service.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use textflow::api::client::{DEFAULT_LOGIN_FAILURE, INVALID_RESPONSE_MESSAGE};
use textflow::api::{AnalysisBackend, ApiClient};
use textflow::dashboard::Dashboard;
use textflow::login;
use textflow::operations::Operation;
use textflow::TextflowError;

use common::{server_config, temp_session_store, write_csv};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server_config(&server.uri())).expect("client builds")
}

#[tokio::test]
async fn test_login_success_persists_email() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"email": "ana@example.com", "password": "s3cret"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Login successful", "user": "ana@example.com"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (store, _tmp) = temp_session_store();

    let session = login::login(&client, &store, " ana@example.com ", "s3cret")
        .await
        .expect("login succeeds");

    assert_eq!(session.email, "ana@example.com");
    assert_eq!(store.current_email(), "ana@example.com");
}

#[tokio::test]
async fn test_login_failure_shows_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (store, _tmp) = temp_session_store();

    let err = login::login(&client, &store, "ana@example.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_login_failure_without_message_uses_default() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login("ana@example.com", "pw")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), DEFAULT_LOGIN_FAILURE);
}

#[tokio::test]
async fn test_login_failure_with_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login("ana@example.com", "pw")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), INVALID_RESPONSE_MESSAGE);
}

#[tokio::test]
async fn test_signup_conflict_surfaces_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .and(body_json(json!({
            "email": "ana@example.com",
            "password": "pw",
            "full_name": "Ana Lima"
        })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "User already exists"})),
        )
        .mount(&server)
        .await;

    let err = login::signup(&client_for(&server), "Ana Lima", "ana@example.com", "pw")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User already exists");
}

#[tokio::test]
async fn test_run_all_posts_merged_batch() {
    let server = MockServer::start().await;
    let tmp = tempfile::TempDir::new().unwrap();
    let a = write_csv(&tmp, "a.csv", "id,answer\n1,The parcel was late\n");
    let b = write_csv(&tmp, "b.csv", "id,answer\r\n2,Great support\r\n");

    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .and(body_json(json!({
            "text": "id,answer\n1,The parcel was late\n2,Great support",
            "operations": ["Sentiment Analysis", "Summarization"],
            "email": "ana@example.com",
            "filename": "Bulk_2_files.csv"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"title": "Sentiment Analysis", "output": "Neutral", "success": true},
                {"title": "Summarization", "output": "Late parcel, good support", "success": true}
            ],
            "stats": {"total_chunks": 2, "processing_time": 0.0123, "alert": false}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut dashboard = Dashboard::new("ana@example.com");
    dashboard.select_files([a, b]).await.unwrap();
    dashboard.toggle_operation(Operation::SentimentAnalysis);
    dashboard.toggle_operation(Operation::Summarization);

    dashboard.run_all(&client).await.expect("analysis succeeds");

    assert_eq!(dashboard.results().len(), 2);
    assert_eq!(dashboard.results()[0].output_text(), "Neutral");
    let stats = dashboard.stats().expect("stats present");
    assert_eq!(stats.total_chunks, 2);
    assert!(!stats.alert);
}

#[tokio::test]
async fn test_analyze_server_error_is_backend_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "No columns to parse"})),
        )
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().unwrap();
    let a = write_csv(&tmp, "a.csv", "id,text\n1,x");
    let mut dashboard = Dashboard::new("Guest");
    dashboard.select_files([a]).await.unwrap();
    dashboard.toggle_operation(Operation::Translation);

    let err = dashboard.run_all(&client_for(&server)).await.unwrap_err();
    let err = err.downcast::<TextflowError>().unwrap();
    assert!(matches!(err, TextflowError::Backend(_)));
    assert!(err.to_string().contains("No columns to parse"));
}

#[tokio::test]
async fn test_analyze_unparseable_body_is_backend_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().unwrap();
    let a = write_csv(&tmp, "a.csv", "id,text\n1,x");
    let mut dashboard = Dashboard::new("Guest");
    dashboard.select_files([a]).await.unwrap();
    dashboard.toggle_operation(Operation::Translation);

    let err = dashboard.run_all(&client_for(&server)).await.unwrap_err();
    assert!(err.to_string().starts_with("Backend Error"));
}

#[tokio::test]
async fn test_search_encodes_query_and_keeps_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "late & lost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 42, "score": -1.5, "content": "{'answer': 'lost parcel'}"},
            {"id": 7, "score": 2, "content": "late again"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut dashboard = Dashboard::new("Guest");
    let count = dashboard.search(&client, "late & lost").await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(dashboard.search_hits()[0].id_text(), "42");
    assert_eq!(dashboard.search_hits()[1].id_text(), "7");
}

#[tokio::test]
async fn test_blank_search_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut dashboard = Dashboard::new("Guest");
    let count = dashboard.search(&client_for(&server), "  ").await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_export_returns_csv_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/export"))
        .and(body_json(json!({
            "results": [{"title": "Convert Case", "output": "HELLO", "success": true}]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"Operation,Output\r\nConvert Case,HELLO\r\n".to_vec(), "text/csv"),
        )
        .mount(&server)
        .await;

    let results = vec![textflow::api::OperationResult {
        title: "Convert Case".to_string(),
        output: json!("HELLO"),
        success: Some(true),
    }];

    let report = client_for(&server).export(&results).await.unwrap();
    assert!(report.starts_with("Operation,Output"));
    assert!(report.contains("Convert Case,HELLO"));
}

#[derive(Clone, Default)]
struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[tokio::test]
async fn test_successful_responses_log_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let client = client_for(&server);
    client.search("parcel").await.unwrap();
    client.login("ana@example.com", "s3cret").await.unwrap();

    let output = logs.text();
    assert!(output.contains("Search responded with 200 OK"), "{output}");
    assert!(output.contains("Login responded with 200 OK"), "{output}");
    assert!(!output.contains("s3cret"));
}
