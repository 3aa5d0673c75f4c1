//! Operation catalog and selection
//!
//! The analysis server understands a fixed set of text-processing
//! operations, identified on the wire by their display name
//! (e.g. `"Keyword Extraction"`). [`OperationSelection`] is the toggle set
//! the dashboard builds before submitting a run.

use crate::error::{Result, TextflowError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A text-processing task offered by the analysis server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "Summarization")]
    Summarization,
    #[serde(rename = "Translation")]
    Translation,
    #[serde(rename = "Keyword Extraction")]
    KeywordExtraction,
    #[serde(rename = "Sentiment Analysis")]
    SentimentAnalysis,
    #[serde(rename = "Grammar Correction")]
    GrammarCorrection,
    #[serde(rename = "Spell Check")]
    SpellCheck,
    #[serde(rename = "Remove Stop Words")]
    RemoveStopWords,
    #[serde(rename = "Convert Case")]
    ConvertCase,
}

impl Operation {
    /// Every operation, in catalog display order
    pub const ALL: [Operation; 8] = [
        Operation::Summarization,
        Operation::Translation,
        Operation::KeywordExtraction,
        Operation::SentimentAnalysis,
        Operation::GrammarCorrection,
        Operation::SpellCheck,
        Operation::RemoveStopWords,
        Operation::ConvertCase,
    ];

    /// Identifier sent to the server
    pub fn id(&self) -> &'static str {
        match self {
            Operation::Summarization => "Summarization",
            Operation::Translation => "Translation",
            Operation::KeywordExtraction => "Keyword Extraction",
            Operation::SentimentAnalysis => "Sentiment Analysis",
            Operation::GrammarCorrection => "Grammar Correction",
            Operation::SpellCheck => "Spell Check",
            Operation::RemoveStopWords => "Remove Stop Words",
            Operation::ConvertCase => "Convert Case",
        }
    }

    /// Human-readable label; identical to the id for every current operation
    pub fn label(&self) -> &'static str {
        self.id()
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Operation::Summarization => "📄",
            Operation::Translation => "🌐",
            Operation::KeywordExtraction => "🔑",
            Operation::SentimentAnalysis => "❤️",
            Operation::GrammarCorrection => "✅",
            Operation::SpellCheck => "A",
            Operation::RemoveStopWords => "⏳",
            Operation::ConvertCase => "T",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Lowercase and collapse `-`, `_` and whitespace runs into single spaces
fn normalize(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    /// Parse an operation from its wire id, case-insensitively, treating
    /// hyphens and underscores as spaces
    ///
    /// # Examples
    ///
    /// ```
    /// use textflow::operations::Operation;
    ///
    /// let op: Operation = "keyword-extraction".parse().unwrap();
    /// assert_eq!(op, Operation::KeywordExtraction);
    /// assert!("poetry".parse::<Operation>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        Operation::ALL
            .iter()
            .copied()
            .find(|op| normalize(op.id()) == wanted)
            .ok_or_else(|| TextflowError::UnknownOperation(s.trim().to_string()).into())
    }
}

/// Set of operations chosen for the next run
///
/// Membership is what matters; the wire list keeps the order in which
/// operations were first selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationSelection {
    selected: Vec<Operation>,
}

impl OperationSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the operation if absent, remove it if present
    ///
    /// Returns `true` when the operation is selected after the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use textflow::operations::{Operation, OperationSelection};
    ///
    /// let mut selection = OperationSelection::new();
    /// assert!(selection.toggle(Operation::Translation));
    /// assert!(!selection.toggle(Operation::Translation));
    /// assert!(selection.is_empty());
    /// ```
    pub fn toggle(&mut self, op: Operation) -> bool {
        if let Some(pos) = self.selected.iter().position(|o| *o == op) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(op);
            true
        }
    }

    pub fn contains(&self, op: Operation) -> bool {
        self.selected.contains(&op)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.selected.iter()
    }

    /// Wire identifiers in selection order
    pub fn ids(&self) -> Vec<String> {
        self.selected.iter().map(|op| op.id().to_string()).collect()
    }

    /// Build a selection from names, ignoring duplicates
    ///
    /// # Errors
    ///
    /// Returns `TextflowError::UnknownOperation` for the first name that is
    /// not in the catalog
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for name in names {
            let op: Operation = name.as_ref().parse()?;
            if !selection.contains(op) {
                selection.selected.push(op);
            }
        }
        Ok(selection)
    }
}
