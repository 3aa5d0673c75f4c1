//! Terminal rendering for dashboard output
//!
//! The formatting helpers return plain `String`s so they can be tested;
//! the `print_*` functions add color and tables.

use crate::api::{AnalysisStats, OperationResult, SearchHit};
use crate::operations::{Operation, OperationSelection};
use colored::Colorize;
use prettytable::{format, row, Table};
use regex::Regex;
use std::sync::OnceLock;

/// Format the run time the way the stats panel shows it
///
/// # Examples
///
/// ```
/// use textflow::render::format_processing_time;
///
/// assert_eq!(format_processing_time(0.123456), "0.1235s");
/// ```
pub fn format_processing_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}

/// Group digits by thousands with `,`
///
/// # Examples
///
/// ```
/// use textflow::render::format_count;
///
/// assert_eq!(format_count(1234567), "1,234,567");
/// assert_eq!(format_count(999), "999");
/// ```
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

pub fn status_label(stats: &AnalysisStats) -> &'static str {
    if stats.alert {
        "ATTENTION"
    } else {
        "STABLE"
    }
}

fn content_noise() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    NOISE.get_or_init(|| Regex::new(r"[{}']").expect("static regex is valid"))
}

/// Clean and shorten search hit content for display
///
/// Braces and single quotes are removed, the text is cut to `max_chars`
/// characters, and `...` is appended.
///
/// # Examples
///
/// ```
/// use textflow::render::preview_content;
///
/// assert_eq!(preview_content("{'text': 'hi'}", 300), "text: hi...");
/// assert_eq!(preview_content("abcdef", 3), "abc...");
/// ```
pub fn preview_content(content: &str, max_chars: usize) -> String {
    let cleaned = content_noise().replace_all(content, "");
    let mut preview: String = cleaned.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}

/// Print the stats panel
pub fn print_stats(stats: &AnalysisStats) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(row![
        "Data Segments".bold(),
        "Execution Velocity".bold(),
        "System Status".bold()
    ]);

    let status = if stats.alert {
        status_label(stats).red().bold()
    } else {
        status_label(stats).green().bold()
    };
    table.add_row(row![
        stats.total_chunks.to_string().blue(),
        format_processing_time(stats.processing_time).green(),
        status
    ]);

    table.printstd();
}

/// Print the queued file count and estimated record total
pub fn print_file_queue(file_count: usize, total_rows: usize) {
    println!(
        "{} {}   {} ~ {}",
        "Queued Files:".bold(),
        file_count.to_string().cyan(),
        "Total Records:".bold(),
        format_count(total_rows).cyan()
    );
}

/// Print one block per operation result
pub fn print_results(results: &[OperationResult]) {
    if results.is_empty() {
        println!("{}", "No results returned.".yellow());
        return;
    }

    for result in results {
        let marker = match result.success {
            Some(false) => "✗".red(),
            _ => "✓".green(),
        };
        println!("\n{} {}", marker, result.title.bold());
        println!("{}", result.output_text());
    }
    println!();
}

/// Print search hits in the order the server returned them
pub fn print_search_hits(hits: &[SearchHit], preview_chars: usize) {
    if hits.is_empty() {
        println!("{}", "No matching records.".yellow());
        return;
    }

    for hit in hits {
        let score = format!("Score: {}", hit.score);
        let score = if hit.score > 0.0 {
            score.green()
        } else if hit.score < 0.0 {
            score.red()
        } else {
            score.dimmed()
        };
        println!(
            "{}  {}",
            format!("RECORD ID: {}", hit.id_text()).blue().bold(),
            score
        );
        let content = hit.content.as_deref().unwrap_or("");
        println!("  \"{}\"\n", preview_content(content, preview_chars).italic());
    }
}

/// Print the operation catalog, marking selected entries
pub fn print_operations(selection: Option<&OperationSelection>) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row!["".bold(), "Operation".bold(), "Selected".bold()]);

    for op in Operation::ALL {
        let selected = selection.map(|s| s.contains(op)).unwrap_or(false);
        let mark = if selected { "●".green() } else { "○".dimmed() };
        table.add_row(row![op.icon(), op.label(), mark]);
    }

    table.printstd();
}
