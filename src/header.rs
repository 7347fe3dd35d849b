//! # Header Module
//!
//! This module owns the canonical license header: the built-in constant,
//! loading a replacement from a file, and validation of candidate header text.
//!
//! The header is treated as opaque configuration. The only structural demand is
//! that it forms a single `/* ... */` block whose first `*/` is the final one,
//! because the match predicate compares file prefixes up to the first `*/` and
//! a header violating that shape could never match any file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::verbose_log;

/// The canonical license header inserted at the top of every target file.
pub const BUILTIN_HEADER: &str = "/*
** The author disclaims copyright to this source code.  In place of
** a legal notice, here is a blessing:
**
**    May you do good and not evil.
**    May you find forgiveness for yourself and forgive others.
**    May you share freely, never taking more than you give.
*/";

/// Marker byte expected right after the header's trailing newline.
///
/// Target files open with a preprocessor line (`#include`, `#pragma`), so a
/// patched file reads `*/` + `\n` + `#`. The sentinel lets a later run tell a
/// patched file from one that merely starts with the same comment text.
pub const SENTINEL: u8 = b'#';

/// Errors produced when validating candidate header text.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  #[error("header is empty")]
  Empty,

  #[error("header must start with \"/*\"")]
  MissingStart,

  #[error("header must end with \"*/\"")]
  Unterminated,

  #[error("header contains \"*/\" before its end; no file could ever match it")]
  EarlyTerminator,
}

/// A validated canonical header.
///
/// The wrapped text never carries trailing whitespace and always ends with the
/// block terminator `*/`, which is also its first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
  text: String,
}

impl Header {
  /// Returns the built-in canonical header.
  pub fn builtin() -> Self {
    Self {
      text: BUILTIN_HEADER.to_string(),
    }
  }

  /// Validates candidate header text and wraps it.
  ///
  /// Trailing whitespace (including the newline most editors append to a
  /// header file) is trimmed before validation.
  ///
  /// # Errors
  ///
  /// Returns a [`HeaderError`] if the text is empty, does not form a
  /// `/* ... */` block, or contains `*/` before its end.
  pub fn from_text(text: &str) -> Result<Self, HeaderError> {
    let trimmed = text.trim_end();

    if trimmed.is_empty() {
      return Err(HeaderError::Empty);
    }
    if !trimmed.starts_with("/*") {
      return Err(HeaderError::MissingStart);
    }
    if !trimmed.ends_with("*/") {
      return Err(HeaderError::Unterminated);
    }
    // The match predicate cuts at the first `*/`; it must be the final one.
    if trimmed.find("*/") != Some(trimmed.len() - 2) {
      return Err(HeaderError::EarlyTerminator);
    }

    Ok(Self {
      text: trimmed.to_string(),
    })
  }

  /// Loads and validates a custom header from a file.
  pub fn load(path: &Path) -> Result<Self> {
    verbose_log!("Loading header from: {}", path.display());

    let text =
      fs::read_to_string(path).with_context(|| format!("Failed to read header file: {}", path.display()))?;

    Self::from_text(&text).with_context(|| format!("Invalid header in {}", path.display()))
  }

  /// The header text, without trailing whitespace.
  pub fn text(&self) -> &str {
    &self.text
  }

  /// Length of the header text in bytes.
  pub fn len(&self) -> usize {
    self.text.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }
}
