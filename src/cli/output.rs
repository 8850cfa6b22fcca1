//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use serde::Serialize;

use crate::application::services::{LeafEntry, PlanReport, PlanVersion};
use crate::cli::{CliError, CliResult};

/// Disable colors regardless of terminal detection.
pub fn disable_colors() {
    colored::control::set_override(false);
}

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// One-line progress summary, e.g. `PLAN.md: 3/5 tasks completed (60%), 2 outstanding`
pub fn report_line(report: &PlanReport) -> String {
    let done = format!("{}/{}", report.completed, report.total);
    let done = if report.total > 0 && report.completed == report.total {
        done.green().bold()
    } else {
        done.normal()
    };
    format!(
        "{}: {} tasks completed ({:.0}%), {} outstanding",
        report.source.cyan(),
        done,
        report.percent_complete(),
        report.outstanding
    )
}

/// Checkbox-style leaf line, e.g. `  [x] write docs  (line 4)`
pub fn leaf_line(entry: &LeafEntry) -> String {
    let mark = if entry.completed {
        "[x]".green()
    } else {
        "[ ]".normal()
    };
    let text = entry.description.as_str();
    // only a marker that is really a checkbox is replaced by `mark`
    let checkbox = if entry.completed { "[x]" } else { "[ ]" };
    let description = text
        .strip_prefix(checkbox)
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .unwrap_or(text)
        .trim();
    format!(
        "  {} {}  {}",
        mark,
        description,
        format!("(line {})", entry.line_number).dimmed()
    )
}

/// One committed version, e.g. `2024-05-01T09:00:00+02:00  3/5 tasks completed  (0123abc)`
pub fn version_line(version: &PlanVersion) -> String {
    let short = version.commit.get(..7).unwrap_or(&version.commit);
    format!(
        "{}  {}/{} tasks completed  {}",
        version.date.to_rfc3339(),
        version.tasks.completed,
        version.tasks.total,
        format!("({short})").dimmed()
    )
}

/// Pretty JSON for any serializable value.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))
}
