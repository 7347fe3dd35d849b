//! # Patcher Module
//!
//! This module contains the core loop: enumerate files under a root, filter
//! them down to target files, run the header match test, and rewrite the files
//! that fail it.
//!
//! The module is organized into submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`collector`] - Directory traversal
//!
//! The [`Patcher`] struct is the entry point, orchestrating the submodules and
//! the detection predicate into a single sequential pass.

mod collector;
mod file_io;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
pub use collector::collect_files;
pub use file_io::{FileIo, HEADER_READ_LIMIT};
use tracing::trace;

use crate::detection::{self, HeaderDetector, StrictDetector};
use crate::diff::DiffManager;
use crate::file_filter::{CompositeFilter, FileFilter, create_default_filter};
use crate::header::Header;
use crate::info_log;
use crate::report::{FileOutcome, FileReport, RunReport};

/// Configuration for creating a Patcher instance.
pub struct PatcherConfig {
  pub header: Header,

  // Behavior flags
  pub check_only: bool,

  // Filtering
  pub ignore_patterns: Vec<String>,
  pub extra_extensions: Vec<String>,

  // Optional components
  pub diff_manager: Option<DiffManager>,
  pub detector: Option<Box<dyn HeaderDetector + Send + Sync>>,
}

impl PatcherConfig {
  /// Creates a new PatcherConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// PatcherConfig {
  ///     check_only: true,
  ///     ..PatcherConfig::new(header)
  /// }
  /// ```
  pub fn new(header: Header) -> Self {
    Self {
      header,
      check_only: false,
      ignore_patterns: vec![],
      extra_extensions: vec![],
      diff_manager: None,
      detector: None,
    }
  }
}

/// Patcher for enforcing the canonical header on files under a root.
///
/// The `Patcher` is responsible for:
/// - Scanning a directory recursively
/// - Identifying target files by extension and ignore patterns
/// - Rewriting files whose leading block is not the canonical header
/// - Isolating per-file failures so one bad file never aborts the run
/// - Showing diffs of pending rewrites in check mode
pub struct Patcher {
  /// The canonical header to enforce
  header: Header,

  /// Detector deciding whether a file already carries the header
  detector: Box<dyn HeaderDetector + Send + Sync>,

  /// File filter for determining which files are targets
  file_filter: CompositeFilter,

  /// Whether to only report pending rewrites without modifying files
  check_only: bool,

  /// Manager for rendering diffs of pending rewrites
  diff_manager: DiffManager,
}

impl Patcher {
  /// Creates a new patcher with the specified configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the ignore patterns are invalid.
  pub fn new(config: PatcherConfig) -> Result<Self> {
    let file_filter = create_default_filter(&config.ignore_patterns, &config.extra_extensions)?;

    let diff_manager = config.diff_manager.unwrap_or_else(|| DiffManager::new(false, None));

    let detector = config
      .detector
      .unwrap_or_else(|| Box::new(StrictDetector::new(config.header.clone())));

    Ok(Self {
      header: config.header,
      detector,
      file_filter,
      check_only: config.check_only,
      diff_manager,
    })
  }

  /// Runs the patcher over every target file under `root`.
  ///
  /// Files are visited strictly sequentially in sorted path order. Each file
  /// yields exactly one [`FileReport`]; per-file failures are logged with a
  /// `Failed <path>: <message>` line and the traversal continues.
  ///
  /// # Errors
  ///
  /// Returns an error only when the root itself cannot be listed.
  pub fn run(&self, root: &Path) -> Result<RunReport> {
    let start_time = Instant::now();

    let mut files = collect_files(root)?;
    files.sort();

    let mut reports = Vec::with_capacity(files.len());

    for path in files {
      // Filters see workspace-relative paths so ignore globs behave the same
      // wherever the tool is invoked from.
      let relative = path.strip_prefix(root).unwrap_or(&path);
      match self.file_filter.should_process(relative) {
        Ok(result) if !result.should_process => {
          trace!(
            "Skipping: {} ({})",
            path.display(),
            result.reason.as_deref().unwrap_or("filtered")
          );
          continue;
        }
        Ok(_) => {}
        Err(e) => {
          eprintln!("Failed {}: {:#}", path.display(), e);
          reports.push(FileReport {
            path,
            outcome: FileOutcome::Failed,
            detail: Some(format!("{:#}", e)),
          });
          continue;
        }
      }

      match self.process_file(&path) {
        Ok(outcome) => {
          reports.push(FileReport {
            path,
            outcome,
            detail: None,
          });
        }
        Err(e) => {
          eprintln!("Failed {}: {:#}", path.display(), e);
          reports.push(FileReport {
            path,
            outcome: FileOutcome::Failed,
            detail: Some(format!("{:#}", e)),
          });
        }
      }
    }

    Ok(RunReport::new(reports, start_time.elapsed()))
  }

  /// Processes a single file: match test, then conditional rewrite.
  fn process_file(&self, path: &Path) -> Result<FileOutcome> {
    let (prefix, file_len) = FileIo::read_match_prefix(path)?;

    if self.detector.matches(&prefix) {
      trace!("Unchanged: {}", path.display());
      return Ok(FileOutcome::Unchanged);
    }

    // Only read the rest when the prefix did not already cover the whole file.
    let content = if prefix.len() as u64 >= file_len {
      prefix
    } else {
      FileIo::read_full_content(path)?
    };

    let new_content = detection::patch_content(&content, &self.header);

    // Never touch a file the rewrite would leave byte-identical.
    if new_content == content {
      trace!("Unchanged: {}", path.display());
      return Ok(FileOutcome::Unchanged);
    }

    if self.diff_manager.is_active()
      && let Err(e) = self.diff_manager.display_diff(path, &content, &new_content)
    {
      eprintln!("Warning: Failed to display diff for {}: {}", path.display(), e);
    }

    if self.check_only {
      trace!("Would patch: {}", path.display());
      return Ok(FileOutcome::Patched);
    }

    FileIo::write_file(path, &new_content)?;
    info_log!("Patching: {}", path.display());

    Ok(FileOutcome::Patched)
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  fn patcher(check_only: bool) -> Patcher {
    Patcher::new(PatcherConfig {
      check_only,
      ..PatcherConfig::new(Header::builtin())
    })
    .unwrap()
  }

  #[test]
  fn run_patches_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.cpp"), "int main() {}\n").unwrap();
    fs::write(dir.path().join("skip.txt"), "not a target\n").unwrap();

    let report = patcher(false).run(dir.path()).unwrap();
    let summary = report.summary();
    assert_eq!(summary.patched, 1);
    assert_eq!(summary.total(), 1);

    let patched = fs::read_to_string(dir.path().join("a.cpp")).unwrap();
    assert!(patched.starts_with(Header::builtin().text()));

    // Non-target untouched
    assert_eq!(fs::read_to_string(dir.path().join("skip.txt")).unwrap(), "not a target\n");
  }

  #[test]
  fn check_mode_does_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.h");
    fs::write(&file, "#pragma once\n").unwrap();

    let report = patcher(true).run(dir.path()).unwrap();
    assert_eq!(report.summary().patched, 1);
    assert!(report.has_issues());
    assert_eq!(fs::read_to_string(&file).unwrap(), "#pragma once\n");
  }

  #[test]
  fn second_run_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.cpp"), "/* old */\n#include <x.h>\n").unwrap();
    fs::write(dir.path().join("b.hpp"), "").unwrap();

    let p = patcher(false);
    let first = p.run(dir.path()).unwrap();
    assert_eq!(first.summary().patched, 2);

    let second = p.run(dir.path()).unwrap();
    assert_eq!(second.summary().patched, 0);
    assert_eq!(second.summary().unchanged, 2);
  }

  #[test]
  fn invalid_utf8_is_isolated() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ok.cpp"), "int main() {}\n").unwrap();
    fs::write(dir.path().join("bad.cpp"), [0x2f, 0x2a, 0xff, 0xfe, 0x2a, 0x2f]).unwrap();

    let report = patcher(false).run(dir.path()).unwrap();
    let summary = report.summary();
    assert_eq!(summary.patched, 1);
    assert_eq!(summary.failed, 1);

    let failed = report
      .reports()
      .iter()
      .find(|r| r.outcome == FileOutcome::Failed)
      .unwrap();
    assert!(failed.path.ends_with("bad.cpp"));
    assert!(failed.detail.is_some());
  }

  #[test]
  fn ignore_patterns_exclude_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("vendor")).unwrap();
    fs::write(dir.path().join("vendor/ext.cpp"), "int x;\n").unwrap();
    fs::write(dir.path().join("mine.cpp"), "int y;\n").unwrap();

    let p = Patcher::new(PatcherConfig {
      ignore_patterns: vec!["vendor/**".to_string()],
      ..PatcherConfig::new(Header::builtin())
    })
    .unwrap();

    let report = p.run(dir.path()).unwrap();
    assert_eq!(report.summary().total(), 1);
    assert_eq!(
      fs::read_to_string(dir.path().join("vendor/ext.cpp")).unwrap(),
      "int x;\n"
    );
  }
}
