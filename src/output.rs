//! # Output Module
//!
//! This module centralizes all user-facing output for the hdrpatch tool.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! ## Design Goals
//!
//! - **Informative**: Show actionable information without requiring flags
//! - **Scannable**: Use formatting to make output easy to parse visually
//! - **Progressive**: More detail with `-v`, silence with `-q`
//! - **Scriptable**: Keep stdout predictable for piping/automation

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileOutcome, FileReport, RunReport};

/// Symbols used in output
pub mod symbols {
  /// Success/header present
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing header/failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Patched/rewritten
  pub const PATCHED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Checking <root>..." or "Patching <root>..." message.
pub fn print_start_message(root: &Path, check_only: bool) {
  if is_quiet() {
    return;
  }

  let verb = if check_only { "Checking" } else { "Patching" };
  println!("{} {}...", verb, root.display());
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the "all good" line for a run with nothing to do.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files carry the canonical header.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the list of files that were (or, in check mode, would be) rewritten.
///
/// Shows up to [`DEFAULT_FILE_LIST_LIMIT`] files; verbose mode shows all,
/// quiet mode prints bare paths for scripting. Reports arrive in sorted path
/// order from the patcher.
pub fn print_patched_files(run: &RunReport, root: Option<&Path>, check_only: bool) {
  let patched: Vec<&FileReport> = run
    .reports()
    .iter()
    .filter(|r| r.outcome == FileOutcome::Patched)
    .collect();
  if patched.is_empty() {
    return;
  }

  if is_quiet() {
    for file in &patched {
      println!("{}", make_relative_path(&file.path, root));
    }
    return;
  }

  let count = patched.len();
  let header = if check_only {
    format!(
      "{} {} {} missing the canonical header:",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      count,
      plural(count)
    )
  } else {
    format!(
      "{} Patched {} {}:",
      symbols::PATCHED.if_supports_color(Stream::Stdout, |s| s.yellow()),
      count,
      plural(count)
    )
  };
  println!("{}", header);

  print_file_list(&patched, root);
}

/// Print the list of files that failed to process.
pub fn print_failed_files(run: &RunReport, root: Option<&Path>) {
  let failed: Vec<&FileReport> = run
    .reports()
    .iter()
    .filter(|r| r.outcome == FileOutcome::Failed)
    .collect();
  if failed.is_empty() || is_quiet() {
    return;
  }

  let count = failed.len();
  println!(
    "{} {} {} failed:",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    count,
    plural(count)
  );

  for file in &failed {
    let display_path = make_relative_path(&file.path, root);
    match &file.detail {
      Some(detail) => println!("  {} ({})", display_path, detail),
      None => println!("  {}", display_path),
    }
  }
}

/// Print the closing summary line.
pub fn print_summary(run: &RunReport, check_only: bool) {
  if is_quiet() {
    return;
  }

  let summary = run.summary();
  let verb = if check_only { "Checked" } else { "Processed" };
  println!(
    "{} {} {} in {}ms ({} patched, {} unchanged, {} failed)",
    verb,
    summary.total(),
    plural(summary.total()),
    run.elapsed().as_millis(),
    summary.patched,
    summary.unchanged,
    summary.failed
  );
}

/// Print a hint line (dimmed when colors are on).
pub fn print_hint(hint: &str) {
  if !is_quiet() {
    println!("{}", hint.if_supports_color(Stream::Stdout, |s| s.dimmed()));
  }
}

fn print_file_list(files: &[&FileReport], root: Option<&Path>) {
  let count = files.len();
  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in files.iter().take(limit) {
    println!("  {}", make_relative_path(&file.path, root));
  }

  if !show_all && count > limit {
    println!("  ... and {} more (use -v to see all)", count - limit);
  }
}

const fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Render a path relative to the run root where possible.
fn make_relative_path(path: &Path, root: Option<&Path>) -> String {
  if let Some(root) = root {
    if let Ok(stripped) = path.strip_prefix(root) {
      return stripped.display().to_string();
    }
    if let Some(diffed) = pathdiff::diff_paths(path, root) {
      return diffed.display().to_string();
    }
  }
  path.display().to_string()
}
