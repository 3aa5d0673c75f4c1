//! CSV file selection and merging
//!
//! A run submits one block of text built from every selected CSV file.
//! The first file contributes its header row; every later file has its
//! header row dropped before concatenation. Headers are not compared, so
//! files are assumed to share a schema.

use crate::error::{Result, TextflowError};
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Ordered set of CSV files queued for analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<PathBuf>,
}

/// Result of merging a [`FileSet`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedText {
    /// Combined CSV text with a single header line
    pub text: String,
    /// Estimated number of data rows across all files
    pub total_rows: usize,
}

fn is_csv(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(".csv"))
        .unwrap_or(false)
}

impl FileSet {
    /// Build a file set from explicit paths, keeping only `.csv` files
    ///
    /// # Examples
    ///
    /// ```
    /// use textflow::upload::FileSet;
    ///
    /// let set = FileSet::from_paths(["a.csv", "notes.txt", "b.csv"]);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let files = paths
            .into_iter()
            .map(Into::into)
            .filter(|p: &PathBuf| {
                let keep = is_csv(p);
                if !keep {
                    tracing::debug!("Skipping non-CSV file: {}", p.display());
                }
                keep
            })
            .collect();
        Self { files }
    }

    /// Build a file set from every `.csv` file under `dir`, sorted by path
    pub fn from_folder(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(
                TextflowError::FileLoad(format!("Not a directory: {}", dir.display())).into(),
            );
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| TextflowError::FileLoad(e.to_string()))?;
            if entry.file_type().is_file() && is_csv(entry.path()) {
                files.push(entry.into_path());
            }
        }

        tracing::debug!("Found {} CSV files under {}", files.len(), dir.display());
        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }

    /// Filename reported to the server for this set
    ///
    /// More than one file is reported as `Bulk_<n>_files.csv`; a single file
    /// by its own name.
    pub fn display_name(&self) -> Option<String> {
        match self.files.len() {
            0 => None,
            1 => self.files[0]
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
            n => Some(format!("Bulk_{}_files.csv", n)),
        }
    }

    /// Read every file concurrently and merge the contents
    ///
    /// All reads complete before the combined text is assembled. Files are
    /// decoded as UTF-8, with invalid sequences replaced.
    pub async fn merge(&self) -> Result<MergedText> {
        let reads = self.files.iter().map(|path| async move {
            let bytes = tokio::fs::read(path).await.map_err(|e| {
                TextflowError::FileLoad(format!("Failed to read {}: {}", path.display(), e))
            })?;
            Ok::<String, TextflowError>(String::from_utf8_lossy(&bytes).into_owned())
        });

        let contents = try_join_all(reads).await?;
        let merged = merge_contents(&contents);

        tracing::info!(
            files = self.files.len(),
            rows = merged.total_rows,
            "Merged CSV files"
        );
        Ok(merged)
    }
}

/// Merge already-read CSV contents in order
///
/// Each file is trimmed and split on `\n` or `\r\n`. Every file adds its
/// line count minus one to the row estimate. The first file keeps its
/// header; later files lose their first line.
///
/// # Examples
///
/// ```
/// use textflow::upload::merge_contents;
///
/// let merged = merge_contents(&[
///     "id,text\n1,hello\n".to_string(),
///     "id,text\r\n2,world".to_string(),
/// ]);
/// assert_eq!(merged.text, "id,text\n1,hello\n2,world");
/// assert_eq!(merged.total_rows, 2);
/// ```
pub fn merge_contents<S: AsRef<str>>(contents: &[S]) -> MergedText {
    let mut total_rows = 0;
    let mut pieces = Vec::with_capacity(contents.len());

    for (index, content) in contents.iter().enumerate() {
        let trimmed = content.as_ref().trim_start_matches('\u{feff}').trim();
        let lines: Vec<&str> = trimmed
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        total_rows += lines.len() - 1;

        let kept = if index == 0 { &lines[..] } else { &lines[1..] };
        let piece = kept.join("\n");
        if !piece.is_empty() {
            pieces.push(piece);
        }
    }

    MergedText {
        text: pieces.join("\n"),
        total_rows,
    }
}
