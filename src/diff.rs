//! # Diff Module
//!
//! This module renders diffs between a file's current content and the content
//! the patcher would write, for `--show-diff` and `--save-diff`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for pending header rewrites.
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// Path to append diffs to, if any
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  /// Creates a new DiffManager with the specified configuration.
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_active(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Removes a stale diff file from a previous run.
  ///
  /// Diffs for individual files are appended, so without this a re-run would
  /// mix old and new output.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path
      && path.exists()
    {
      std::fs::remove_file(path).with_context(|| format!("Failed to remove stale diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Displays and/or saves a line diff between the original and new content.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file being processed
  /// * `original` - Current file content
  /// * `new` - Content the patcher would write
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    let rendered = render_diff(path, original, new);

    if self.show_diff {
      eprint!("{}", rendered);
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;

      file
        .write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

/// Renders a `-`/`+` line diff with a per-file heading.
fn render_diff(path: &Path, original: &str, new: &str) -> String {
  let diff = TextDiff::from_lines(original, new);

  let mut rendered = format!("Diff for {}:\n", path.display());
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    rendered.push_str(sign);
    rendered.push_str(change.value());
    if change.missing_newline() {
      rendered.push('\n');
    }
  }
  rendered.push('\n');

  rendered
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn render_marks_inserted_lines() {
    let rendered = render_diff(Path::new("a.cpp"), "int main() {}\n", "/* hdr */\nint main() {}\n");
    assert!(rendered.starts_with("Diff for a.cpp:\n"));
    assert!(rendered.contains("+/* hdr */\n"));
    assert!(rendered.contains(" int main() {}\n"));
  }

  #[test]
  fn render_handles_missing_trailing_newline() {
    let rendered = render_diff(Path::new("a.h"), "old", "new");
    assert!(rendered.contains("-old\n"));
    assert!(rendered.contains("+new\n"));
  }
}
