//! Command parser for the interactive dashboard
//!
//! Dashboard input is a `/`-prefixed command with whitespace-separated
//! arguments; single or double quotes group an argument containing spaces.
//! Command names are case-insensitive. Anything that does not start with
//! `/` is treated as a search query.

use crate::operations::Operation;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing dashboard commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },

    /// Operation argument is not in the catalog
    #[error("Unknown operation: {0}\n\nType '/ops' to list operations")]
    UnknownOperation(String),
}

/// Commands available inside the dashboard session
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    /// Queue these CSV files, replacing the current queue
    Files(Vec<PathBuf>),
    /// Queue every CSV file under a folder
    Folder(PathBuf),
    /// Drop queued files
    Clear,
    /// Toggle an operation
    ToggleOperation(Operation),
    /// List operations and which are selected
    ListOperations,
    /// Run the selected operations on the queued files
    Run,
    /// Search indexed records
    Search(String),
    /// Show the last run's stats and results
    ShowStats,
    /// Export the last results as CSV
    Export(PathBuf),
    /// Show queue and selection status
    Status,
    Help,
    Exit,
    /// Blank input
    None,
}

fn require_arg(command: &str, rest: &str, usage: &str) -> Result<String, CommandError> {
    let rest = rest.trim();
    if rest.is_empty() {
        Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        })
    } else {
        Ok(rest.to_string())
    }
}

/// Split arguments on whitespace, keeping quoted text together
///
/// An unterminated quote runs to the end of the input.
fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_arg = true;
            }
            None if ch.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            None => {
                current.push(ch);
                in_arg = true;
            }
        }
    }
    if in_arg {
        args.push(current);
    }
    args
}

/// A single path argument, with one pair of surrounding quotes removed
fn path_arg(arg: &str) -> PathBuf {
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| arg.strip_prefix(*q).and_then(|a| a.strip_suffix(*q)))
        .unwrap_or(arg);
    PathBuf::from(unquoted)
}

/// Parse one line of dashboard input
///
/// # Examples
///
/// ```
/// use textflow::commands::dashboard_commands::{parse_dashboard_command, DashboardCommand};
/// use textflow::operations::Operation;
///
/// assert_eq!(parse_dashboard_command("/run").unwrap(), DashboardCommand::Run);
/// assert_eq!(
///     parse_dashboard_command("/op spell check").unwrap(),
///     DashboardCommand::ToggleOperation(Operation::SpellCheck)
/// );
/// assert_eq!(
///     parse_dashboard_command("refund policy").unwrap(),
///     DashboardCommand::Search("refund policy".to_string())
/// );
/// ```
pub fn parse_dashboard_command(input: &str) -> Result<DashboardCommand, CommandError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(DashboardCommand::None);
    }

    if matches!(trimmed.to_lowercase().as_str(), "exit" | "quit") {
        return Ok(DashboardCommand::Exit);
    }

    let Some(body) = trimmed.strip_prefix('/') else {
        return Ok(DashboardCommand::Search(trimmed.to_string()));
    };

    let (name, rest) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest),
        None => (body, ""),
    };

    match name.to_lowercase().as_str() {
        "files" | "file" => {
            let args = require_arg("/files", rest, "/files <path.csv> [path.csv ...]")?;
            Ok(DashboardCommand::Files(
                split_args(&args).into_iter().map(PathBuf::from).collect(),
            ))
        }
        "folder" | "dir" => {
            let arg = require_arg("/folder", rest, "/folder <directory>")?;
            Ok(DashboardCommand::Folder(path_arg(&arg)))
        }
        "clear" => Ok(DashboardCommand::Clear),
        "op" | "toggle" => {
            let arg = require_arg("/op", rest, "/op <operation>")?;
            arg.parse::<Operation>()
                .map(DashboardCommand::ToggleOperation)
                .map_err(|_| CommandError::UnknownOperation(arg))
        }
        "ops" | "operations" => Ok(DashboardCommand::ListOperations),
        "run" => Ok(DashboardCommand::Run),
        "search" | "s" => {
            let arg = require_arg("/search", rest, "/search <query>")?;
            Ok(DashboardCommand::Search(arg))
        }
        "stats" | "results" => Ok(DashboardCommand::ShowStats),
        "export" => {
            let arg = require_arg("/export", rest, "/export <report.csv>")?;
            Ok(DashboardCommand::Export(path_arg(&arg)))
        }
        "status" => Ok(DashboardCommand::Status),
        "help" | "h" | "?" => Ok(DashboardCommand::Help),
        "exit" | "quit" | "q" => Ok(DashboardCommand::Exit),
        _ => Err(CommandError::UnknownCommand(format!("/{}", name))),
    }
}

/// Print the dashboard command reference
pub fn print_help() {
    println!(
        r#"
Dashboard commands:

  /files <a.csv> [b.csv ...]   Queue CSV files (replaces the queue)
  /folder <dir>                Queue every CSV file under a folder
  /clear                       Drop queued files
  /op <operation>              Toggle an operation (e.g. /op summarization)
  /ops                         List operations and the current selection
  /run                         Run selected operations on the queued files
  /search <query>              Search indexed records (or just type the query)
  /stats                       Show the last run's stats and results
  /export <report.csv>         Save the last results as a CSV report
  /status                      Show queue and selection
  /help                        Show this help
  /exit                        Leave the dashboard
"#
    );
}
