//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the patcher.
//! It encapsulates synchronous file operations.

use std::io::Read as _;
use std::path::Path;

use anyhow::{Context, Result};

/// Maximum number of bytes to read when running the header match test.
/// 8KB is far more than the canonical header plus sentinel needs.
pub const HEADER_READ_LIMIT: usize = 8 * 1024;

/// File I/O operations for the patcher.
///
/// This struct provides static methods for reading and writing files.
pub struct FileIo;

impl FileIo {
  /// Reads the initial portion of a file for the header match test.
  ///
  /// Reads up to [`HEADER_READ_LIMIT`] bytes from the start of the file.
  /// Returns the prefix as UTF-8 text along with the total file length, so the
  /// caller can tell whether the prefix already covers the whole file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be opened or read, or if the prefix
  /// contains an invalid UTF-8 sequence. A multi-byte character cut in half by
  /// the read limit is not an error; the prefix is truncated at the last
  /// complete character instead.
  pub fn read_match_prefix(path: &Path) -> Result<(String, u64)> {
    let mut file = std::fs::File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    // If metadata is unavailable, claim the file is huge so callers fall back
    // to a full read instead of mistaking the prefix for the whole content.
    let file_len = file.metadata().map(|m| m.len()).unwrap_or(u64::MAX);

    let mut buf = vec![0u8; HEADER_READ_LIMIT];
    let read_len = file
      .read(&mut buf)
      .with_context(|| format!("Failed to read file: {}", path.display()))?;
    buf.truncate(read_len);

    let prefix = match std::str::from_utf8(&buf) {
      Ok(prefix) => prefix.to_string(),
      // error_len() == None means the buffer ends mid-character, which only
      // happens when the read limit cut the file short.
      Err(e) if e.error_len().is_none() && read_len == HEADER_READ_LIMIT => {
        String::from_utf8_lossy(&buf[..e.valid_up_to()]).to_string()
      }
      Err(e) => {
        return Err(anyhow::anyhow!("File is not valid UTF-8: {} ({})", path.display(), e));
      }
    };

    Ok((prefix, file_len))
  }

  /// Read full file content.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or is not valid UTF-8.
  pub fn read_full_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Write file content.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to write
  /// * `content` - Content to write to the file
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
