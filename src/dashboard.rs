//! Dashboard state and actions
//!
//! [`Dashboard`] holds what the user has queued (files, operations) and the
//! last answers from the server (results, stats, search hits). The
//! interactive session and the one-shot `analyze`/`search` commands both
//! drive it.

use crate::api::{AnalysisBackend, AnalysisStats, AnalyzeRequest, OperationResult, SearchHit};
use crate::error::{Result, TextflowError};
use crate::operations::{Operation, OperationSelection};
use crate::upload::FileSet;
use std::path::{Path, PathBuf};

/// Shown when a run is attempted without data or operations
pub const NOTHING_TO_RUN_MESSAGE: &str = "Select operations and upload data.";

/// Dashboard state for one user session
#[derive(Debug, Default)]
pub struct Dashboard {
    email: String,
    files: FileSet,
    input_text: String,
    total_rows: usize,
    selection: OperationSelection,
    results: Vec<OperationResult>,
    stats: Option<AnalysisStats>,
    search_hits: Vec<SearchHit>,
}

impl Dashboard {
    /// Create an empty dashboard for `email` (the session email or `Guest`)
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn selection(&self) -> &OperationSelection {
        &self.selection
    }

    pub fn results(&self) -> &[OperationResult] {
        &self.results
    }

    pub fn stats(&self) -> Option<&AnalysisStats> {
        self.stats.as_ref()
    }

    pub fn search_hits(&self) -> &[SearchHit] {
        &self.search_hits
    }

    /// Replace the queued files with the CSV files among `paths`
    ///
    /// If none of the paths is a CSV file the current queue is kept and
    /// `Ok(false)` is returned.
    pub async fn select_files<I, P>(&mut self, paths: I) -> Result<bool>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.load(FileSet::from_paths(paths)).await
    }

    /// Replace the queued files with every CSV file under `dir`
    pub async fn select_folder(&mut self, dir: impl AsRef<Path>) -> Result<bool> {
        self.load(FileSet::from_folder(dir)?).await
    }

    async fn load(&mut self, files: FileSet) -> Result<bool> {
        if files.is_empty() {
            tracing::debug!("No CSV files in selection; keeping current queue");
            return Ok(false);
        }

        let merged = files.merge().await?;
        self.files = files;
        self.input_text = merged.text;
        self.total_rows = merged.total_rows;
        Ok(true)
    }

    /// Drop the queued files and merged text
    pub fn clear_files(&mut self) {
        self.files = FileSet::default();
        self.input_text.clear();
        self.total_rows = 0;
    }

    /// Toggle an operation; returns whether it is now selected
    pub fn toggle_operation(&mut self, op: Operation) -> bool {
        self.selection.toggle(op)
    }

    /// Whether the run action is available
    pub fn can_run(&self) -> bool {
        !self.files.is_empty()
    }

    /// Build the request for the current state
    pub fn build_request(&self) -> Result<AnalyzeRequest> {
        if !self.can_run() || self.input_text.is_empty() || self.selection.is_empty() {
            return Err(TextflowError::NothingToRun(NOTHING_TO_RUN_MESSAGE.into()).into());
        }

        Ok(AnalyzeRequest {
            text: self.input_text.clone(),
            operations: self.selection.ids(),
            email: self.email.clone(),
            filename: self.files.display_name(),
        })
    }

    /// Submit the merged text for every selected operation
    ///
    /// On success the stored results and stats are replaced by the
    /// server's answer.
    pub async fn run_all(&mut self, backend: &dyn AnalysisBackend) -> Result<()> {
        let request = self.build_request()?;
        tracing::info!(
            files = self.files.len(),
            operations = self.selection.len(),
            "Running analysis"
        );

        let response = backend.analyze(&request).await?;
        if let Some(error) = response.error {
            return Err(TextflowError::Backend(error).into());
        }

        self.results = response.results;
        self.stats = response.stats;
        Ok(())
    }

    /// Search the server's records; a blank query is a no-op
    pub async fn search(&mut self, backend: &dyn AnalysisBackend, query: &str) -> Result<usize> {
        if query.trim().is_empty() {
            return Ok(0);
        }

        self.search_hits = backend.search(query).await?;
        Ok(self.search_hits.len())
    }

    /// Export the last results as a CSV report at `path`
    pub async fn export(&self, backend: &dyn AnalysisBackend, path: &Path) -> Result<()> {
        if self.results.is_empty() {
            return Err(TextflowError::NothingToRun(
                "No results to export. Run an analysis first.".into(),
            )
            .into());
        }

        let report = backend.export(&self.results).await?;
        tokio::fs::write(path, report).await.map_err(|e| {
            TextflowError::FileLoad(format!("Failed to write {}: {}", path.display(), e))
        })?;
        tracing::info!("Exported report to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::api::AnalysisResponse;
    use crate::session::GUEST_EMAIL;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn canned_analysis() -> AnalysisResponse {
        serde_json::from_value(json!({
            "results": [{"title": "Convert Case", "output": "ID,TEXT", "success": true}],
            "stats": {"total_chunks": 3, "processing_time": 0.5, "alert": false}
        }))
        .unwrap()
    }

    #[test]
    fn test_cannot_run_without_files() {
        let mut dashboard = Dashboard::new(GUEST_EMAIL);
        dashboard.toggle_operation(Operation::Summarization);
        assert!(!dashboard.can_run());
    }

    #[tokio::test]
    async fn test_run_without_files_makes_no_request() {
        let backend = FakeBackend::new();
        let mut dashboard = Dashboard::new(GUEST_EMAIL);
        dashboard.toggle_operation(Operation::Summarization);

        let err = dashboard.run_all(&backend).await.unwrap_err();
        assert_eq!(err.to_string(), NOTHING_TO_RUN_MESSAGE);
        assert!(backend.analyze_calls().is_empty());
    }

    #[tokio::test]
    async fn test_run_without_operations_makes_no_request() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "a.csv", "id,text\n1,a");
        let backend = FakeBackend::new();
        let mut dashboard = Dashboard::new(GUEST_EMAIL);
        dashboard.select_files([a]).await.unwrap();

        assert!(dashboard.can_run());
        assert!(dashboard.run_all(&backend).await.is_err());
        assert!(backend.analyze_calls().is_empty());
    }

    #[tokio::test]
    async fn test_select_files_merges_and_counts_rows() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "a.csv", "id,text\n1,a\n2,b\n");
        let b = write_csv(&dir, "b.csv", "id,text\n3,c\n");
        let notes = write_csv(&dir, "notes.txt", "ignored");

        let mut dashboard = Dashboard::new(GUEST_EMAIL);
        assert!(dashboard.select_files([a, notes, b]).await.unwrap());

        assert_eq!(dashboard.files().len(), 2);
        assert_eq!(dashboard.input_text(), "id,text\n1,a\n2,b\n3,c");
        assert_eq!(dashboard.total_rows(), 3);
    }

    #[tokio::test]
    async fn test_selecting_only_non_csv_keeps_queue() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "a.csv", "id,text\n1,a");
        let txt = write_csv(&dir, "b.txt", "x");

        let mut dashboard = Dashboard::new(GUEST_EMAIL);
        dashboard.select_files([a]).await.unwrap();
        assert!(!dashboard.select_files([txt]).await.unwrap());
        assert_eq!(dashboard.files().len(), 1);
    }

    #[tokio::test]
    async fn test_folder_without_csv_keeps_queue() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "a.csv", "id,text\n1,a\n2,b");
        let empty = TempDir::new().unwrap();
        write_csv(&empty, "readme.md", "no data here");

        let mut dashboard = Dashboard::new(GUEST_EMAIL);
        dashboard.select_files([a]).await.unwrap();
        assert!(!dashboard.select_folder(empty.path()).await.unwrap());

        assert_eq!(dashboard.files().len(), 1);
        assert_eq!(dashboard.input_text(), "id,text\n1,a\n2,b");
        assert_eq!(dashboard.total_rows(), 2);
    }

    #[tokio::test]
    async fn test_select_folder_queues_nested_csv_files() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("more")).unwrap();
        write_csv(&dir, "a.csv", "id,text\n1,a");
        write_csv(&dir, "more/b.csv", "id,text\n2,b");

        let mut dashboard = Dashboard::new(GUEST_EMAIL);
        assert!(dashboard.select_folder(dir.path()).await.unwrap());
        assert_eq!(dashboard.files().len(), 2);
        assert_eq!(dashboard.input_text(), "id,text\n1,a\n2,b");
    }

    #[tokio::test]
    async fn test_clear_files() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "a.csv", "id,text\n1,a");
        let mut dashboard = Dashboard::new(GUEST_EMAIL);
        dashboard.select_files([a]).await.unwrap();

        dashboard.clear_files();
        assert!(!dashboard.can_run());
        assert_eq!(dashboard.input_text(), "");
        assert_eq!(dashboard.total_rows(), 0);
    }

    #[tokio::test]
    async fn test_run_all_sends_bulk_filename_and_stores_results() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "a.csv", "id,text\n1,a");
        let b = write_csv(&dir, "b.csv", "id,text\n2,b");
        let backend = FakeBackend::new().with_analysis(canned_analysis());

        let mut dashboard = Dashboard::new(GUEST_EMAIL);
        dashboard.select_files([a, b]).await.unwrap();
        dashboard.toggle_operation(Operation::ConvertCase);
        dashboard.toggle_operation(Operation::Summarization);
        dashboard.run_all(&backend).await.unwrap();

        let calls = backend.analyze_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].email, "Guest");
        assert_eq!(calls[0].filename.as_deref(), Some("Bulk_2_files.csv"));
        assert_eq!(calls[0].operations, vec!["Convert Case", "Summarization"]);
        assert_eq!(calls[0].text, "id,text\n1,a\n2,b");

        assert_eq!(dashboard.results().len(), 1);
        assert_eq!(dashboard.stats().unwrap().total_chunks, 3);
    }

    #[tokio::test]
    async fn test_run_all_single_file_uses_its_name() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "reviews.csv", "id,text\n1,a");
        let backend = FakeBackend::new().with_analysis(canned_analysis());

        let mut dashboard = Dashboard::new("ana@example.com");
        dashboard.select_files([a]).await.unwrap();
        dashboard.toggle_operation(Operation::Translation);
        dashboard.run_all(&backend).await.unwrap();

        let calls = backend.analyze_calls();
        assert_eq!(calls[0].filename.as_deref(), Some("reviews.csv"));
        assert_eq!(calls[0].email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_run_all_surfaces_backend_error_field() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "a.csv", "id,text\n1,a");
        let backend = FakeBackend::new().with_analysis(AnalysisResponse {
            error: Some("pandas exploded".to_string()),
            ..AnalysisResponse::default()
        });

        let mut dashboard = Dashboard::new(GUEST_EMAIL);
        dashboard.select_files([a]).await.unwrap();
        dashboard.toggle_operation(Operation::Translation);
        let err = dashboard.run_all(&backend).await.unwrap_err();
        assert_eq!(err.to_string(), "Backend Error: pandas exploded");
        assert!(dashboard.results().is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_is_noop() {
        let backend = FakeBackend::new();
        let mut dashboard = Dashboard::new(GUEST_EMAIL);
        assert_eq!(dashboard.search(&backend, "   ").await.unwrap(), 0);
        assert!(backend.search_calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_stores_hits() {
        let hits: Vec<SearchHit> =
            serde_json::from_value(json!([{"id": 1, "score": 0.9, "content": "x"}])).unwrap();
        let backend = FakeBackend::new().with_hits(hits);
        let mut dashboard = Dashboard::new(GUEST_EMAIL);

        assert_eq!(dashboard.search(&backend, "refund").await.unwrap(), 1);
        assert_eq!(backend.search_calls(), vec!["refund"]);
        assert_eq!(dashboard.search_hits().len(), 1);
    }

    #[tokio::test]
    async fn test_export_requires_results() {
        let dir = TempDir::new().unwrap();
        let backend = FakeBackend::new();
        let dashboard = Dashboard::new(GUEST_EMAIL);
        let out = dir.path().join("report.csv");
        assert!(dashboard.export(&backend, &out).await.is_err());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_export_writes_report() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(&dir, "a.csv", "id,text\n1,a");
        let backend = FakeBackend::new()
            .with_analysis(canned_analysis())
            .with_report("Operation,Output\nConvert Case,\"ID,TEXT\"\n");

        let mut dashboard = Dashboard::new(GUEST_EMAIL);
        dashboard.select_files([a]).await.unwrap();
        dashboard.toggle_operation(Operation::ConvertCase);
        dashboard.run_all(&backend).await.unwrap();

        let out = dir.path().join("report.csv");
        dashboard.export(&backend, &out).await.unwrap();
        assert!(std::fs::read_to_string(&out)
            .unwrap()
            .starts_with("Operation,Output"));
        assert_eq!(backend.export_calls()[0].len(), 1);
    }
}
