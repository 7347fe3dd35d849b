//! # Detection Module
//!
//! This module contains the interfaces and implementation of the header match test,
//! and the construction of patched file content. It allows for replacing the match
//! algorithm without modifying the patcher.

use crate::header::{Header, SENTINEL};

/// Trait for header detectors.
///
/// Implementations of this trait decide whether a file's content already
/// carries the canonical header and needs no rewrite.
pub trait HeaderDetector: Send + Sync {
  /// Checks if the content already carries the canonical header.
  ///
  /// # Parameters
  ///
  /// * `content` - The file content to check (a prefix long enough to cover
  ///   the header is sufficient)
  ///
  /// # Returns
  ///
  /// `true` if the file needs no rewrite, `false` otherwise.
  fn matches(&self, content: &str) -> bool;
}

/// Default detector: exact header prefix plus the sentinel byte.
///
/// A file matches iff its prefix up to and including the first `*/` is
/// byte-for-byte the canonical header, and the byte one past the header's
/// trailing newline is the sentinel `#`. The sentinel requirement is what makes
/// patching idempotent: every rewrite produced by [`patch_content`] satisfies
/// this test, so a second run leaves the file alone.
pub struct StrictDetector {
  header: Header,
}

impl StrictDetector {
  /// Creates a new detector for the given canonical header.
  pub const fn new(header: Header) -> Self {
    Self { header }
  }
}

impl HeaderDetector for StrictDetector {
  fn matches(&self, content: &str) -> bool {
    header_matches(content, &self.header)
  }
}

/// The match predicate: does `content` already start with `header` plus the sentinel?
///
/// Offsets mirror the rewrite layout `*/` + `\n` + `#`: with `stop` the index of
/// the first `*/`, the prefix `content[..stop + 2]` must equal the header text
/// and the byte at `stop + 3` must be the sentinel. A file too short to have a
/// byte at that offset counts as having no sentinel.
pub fn header_matches(content: &str, header: &Header) -> bool {
  let Some(stop) = content.find("*/") else {
    // No closing token anywhere: no existing header.
    return false;
  };

  if &content[..stop + 2] != header.text() {
    return false;
  }

  content.as_bytes().get(stop + 3) == Some(&SENTINEL)
}

/// Builds the rewritten content for a file that failed the match test.
///
/// The existing leading block up to and including the first `*/` is discarded
/// (the entire content is kept when there is no `*/`), leading whitespace of
/// the remainder is trimmed, and the canonical header plus a newline is
/// prepended. When the remainder does not already begin with the sentinel, one
/// is inserted so the result always satisfies [`header_matches`].
pub fn patch_content(content: &str, header: &Header) -> String {
  let remainder = match content.find("*/") {
    Some(stop) => &content[stop + 2..],
    None => content,
  };
  let remainder = remainder.trim_start();

  let mut patched = String::with_capacity(header.len() + remainder.len() + 2);
  patched.push_str(header.text());
  patched.push('\n');
  if remainder.as_bytes().first() != Some(&SENTINEL) {
    patched.push(SENTINEL as char);
  }
  patched.push_str(remainder);
  patched
}

#[cfg(test)]
mod tests {
  use super::*;

  fn header() -> Header {
    Header::builtin()
  }

  #[test]
  fn matches_patched_layout() {
    let h = header();
    let content = format!("{}\n#include <stdio.h>\n", h.text());
    assert!(header_matches(&content, &h));
  }

  #[test]
  fn rejects_missing_sentinel() {
    let h = header();
    // Correct header but the next line is not a preprocessor line.
    let content = format!("{}\n\nint main() {{}}\n", h.text());
    assert!(!header_matches(&content, &h));
  }

  #[test]
  fn rejects_no_closing_token() {
    let h = header();
    assert!(!header_matches("// old header\nint main(){}\n", &h));
    assert!(!header_matches("", &h));
  }

  #[test]
  fn rejects_foreign_leading_block() {
    let h = header();
    let content = "/* some other license */\n#include <x.h>\n";
    assert!(!header_matches(content, &h));
  }

  #[test]
  fn header_at_end_of_file_counts_as_unsentineled() {
    let h = header();
    // File ends exactly at the closing token; the sentinel offset is past the
    // end and must read as "no sentinel present", not as an error.
    assert!(!header_matches(h.text(), &h));
    let with_newline = format!("{}\n", h.text());
    assert!(!header_matches(&with_newline, &h));
  }

  #[test]
  fn patch_inserts_header_when_none_present() {
    let h = header();
    let patched = patch_content("// old header\nint main(){}\n", &h);
    assert_eq!(patched, format!("{}\n#// old header\nint main(){{}}\n", h.text()));
  }

  #[test]
  fn patch_replaces_foreign_block() {
    let h = header();
    let patched = patch_content("/* other */\n#include <x.h>\n", &h);
    assert_eq!(patched, format!("{}\n#include <x.h>\n", h.text()));
  }

  #[test]
  fn patch_trims_leading_whitespace_of_remainder() {
    let h = header();
    let patched = patch_content("/* other */\n\n\n   #pragma once\n", &h);
    assert_eq!(patched, format!("{}\n#pragma once\n", h.text()));
  }

  #[test]
  fn patch_of_empty_file_is_header_plus_sentinel() {
    let h = header();
    assert_eq!(patch_content("", &h), format!("{}\n#", h.text()));
  }

  #[test]
  fn patching_is_idempotent() {
    let h = header();
    let inputs = [
      "",
      "int main() {}\n",
      "#include <stdio.h>\n",
      "// line comment header\n#include <a.h>\n",
      "/* foreign block */\n#include <a.h>\n",
      "/* foreign block */ code();\n",
      "\n\n  \n#pragma once\n",
      h.text(),
    ];

    for input in inputs {
      let once = patch_content(input, &h);
      assert!(
        header_matches(&once, &h),
        "patched output must satisfy the match test for input {:?}",
        input
      );
      assert_eq!(patch_content(&once, &h), once, "second patch must be a no-op");
    }
  }

  #[test]
  fn strict_detector_delegates_to_predicate() {
    let h = header();
    let detector = StrictDetector::new(h.clone());
    assert!(detector.matches(&format!("{}\n#include <x.h>\n", h.text())));
    assert!(!detector.matches("int main() {}\n"));
  }
}
