//! # Collector Module
//!
//! Recursive file enumeration for the patcher.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Traverses a directory tree breadth-first and collects all regular files.
///
/// An unreadable root is a terminal error. Deeper directories that cannot be
/// listed are reported to stderr and skipped, so one bad subtree does not
/// abort the run. Entries that are neither regular files nor directories
/// (symlinks included) are not collected or descended into.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
  let mut all_files = Vec::with_capacity(256);

  let mut dirs_to_process = VecDeque::with_capacity(64);
  dirs_to_process.push_back(root.to_path_buf());

  debug!("Scanning directory: {}", root.display());
  let start_time = std::time::Instant::now();

  let mut is_root = true;
  while let Some(current_dir) = dirs_to_process.pop_front() {
    let entries = match std::fs::read_dir(&current_dir) {
      Ok(entries) => entries,
      Err(e) if is_root => {
        return Err(e).with_context(|| format!("Failed to read directory: {}", current_dir.display()));
      }
      Err(e) => {
        eprintln!("Error reading directory {}: {}", current_dir.display(), e);
        continue;
      }
    };
    is_root = false;

    for entry in entries {
      let Ok(entry) = entry else {
        continue;
      };
      let path = entry.path();

      // Prefer cached dirent file type to avoid extra syscalls where possible.
      if let Ok(file_type) = entry.file_type() {
        if file_type.is_dir() {
          dirs_to_process.push_back(path);
        } else if file_type.is_file() {
          all_files.push(path);
        }
      }
    }
  }

  debug!(
    "Found {} files in {}ms",
    all_files.len(),
    start_time.elapsed().as_millis()
  );

  Ok(all_files)
}
