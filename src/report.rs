//! # Report Module
//!
//! This module defines the per-file outcome of a run and its aggregation.
//!
//! Every file the patcher touches ends up as exactly one [`FileReport`];
//! the CLI renders these through the output module and can also serialize
//! the whole run as JSON for machine consumption.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Outcome of processing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutcome {
  /// The file was rewritten (or, in check mode, would be rewritten)
  Patched,
  /// The file already carries the canonical header
  Unchanged,
  /// The file could not be read or written
  Failed,
}

/// Record of one processed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// What happened to the file
  pub outcome: FileOutcome,
  /// Failure message, for [`FileOutcome::Failed`] entries
  #[serde(skip_serializing_if = "Option::is_none")]
  pub detail: Option<String>,
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Aggregate counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
  pub patched: usize,
  pub unchanged: usize,
  pub failed: usize,
}

impl RunSummary {
  /// Tallies outcomes from a slice of file reports.
  pub fn from_reports(reports: &[FileReport]) -> Self {
    let mut summary = Self::default();
    for report in reports {
      match report.outcome {
        FileOutcome::Patched => summary.patched += 1,
        FileOutcome::Unchanged => summary.unchanged += 1,
        FileOutcome::Failed => summary.failed += 1,
      }
    }
    summary
  }

  /// Total number of files that were considered.
  pub const fn total(&self) -> usize {
    self.patched + self.unchanged + self.failed
  }
}

/// The result of one patcher run over a tree.
#[derive(Debug, Default)]
pub struct RunReport {
  reports: Vec<FileReport>,
  elapsed: Duration,
}

impl RunReport {
  pub fn new(reports: Vec<FileReport>, elapsed: Duration) -> Self {
    Self { reports, elapsed }
  }

  pub fn reports(&self) -> &[FileReport] {
    &self.reports
  }

  pub fn summary(&self) -> RunSummary {
    RunSummary::from_reports(&self.reports)
  }

  pub const fn elapsed(&self) -> Duration {
    self.elapsed
  }

  /// Whether anything is pending or broken: used for check-mode exit codes.
  pub fn has_issues(&self) -> bool {
    self
      .reports
      .iter()
      .any(|r| matches!(r.outcome, FileOutcome::Patched | FileOutcome::Failed))
  }
}

/// Serialized shape of the JSON report.
#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  elapsed_ms: u128,
  summary: RunSummary,
  files: &'a [FileReport],
}

/// Writes the run as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_json_report(output_path: &Path, run: &RunReport) -> Result<()> {
  let document = JsonReport {
    generated_at: Local::now().to_rfc3339(),
    elapsed_ms: run.elapsed().as_millis(),
    summary: run.summary(),
    files: run.reports(),
  };

  let json = serde_json::to_string_pretty(&document).with_context(|| "Failed to serialize JSON report")?;

  fs::write(output_path, json).with_context(|| format!("Failed to write report to {}", output_path.display()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_reports() -> Vec<FileReport> {
    vec![
      FileReport {
        path: PathBuf::from("src/a.cpp"),
        outcome: FileOutcome::Patched,
        detail: None,
      },
      FileReport {
        path: PathBuf::from("src/b.h"),
        outcome: FileOutcome::Unchanged,
        detail: None,
      },
      FileReport {
        path: PathBuf::from("src/bad.hpp"),
        outcome: FileOutcome::Failed,
        detail: Some("invalid utf-8".to_string()),
      },
    ]
  }

  #[test]
  fn summary_counts_outcomes() {
    let summary = RunSummary::from_reports(&sample_reports());
    assert_eq!(summary.patched, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total(), 3);
  }

  #[test]
  fn has_issues_reflects_pending_and_failed() {
    let run = RunReport::new(sample_reports(), Duration::from_millis(5));
    assert!(run.has_issues());

    let clean = RunReport::new(
      vec![FileReport {
        path: PathBuf::from("src/b.h"),
        outcome: FileOutcome::Unchanged,
        detail: None,
      }],
      Duration::ZERO,
    );
    assert!(!clean.has_issues());
  }

  #[test]
  fn json_report_round_trips_outcomes() {
    let json = serde_json::to_string(&sample_reports()).unwrap();
    let parsed: Vec<FileReport> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[0].outcome, FileOutcome::Patched);
    assert_eq!(parsed[2].detail.as_deref(), Some("invalid utf-8"));
  }
}
