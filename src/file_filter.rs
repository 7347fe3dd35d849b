//! # File Filter Module
//!
//! This module contains components for filtering files based on various
//! criteria such as recognized extensions and ignore patterns.
//!
//! Filters receive paths relative to the walk root, so ignore globs like
//! `vendor/**` behave the same regardless of where the tool is invoked from.

use std::path::Path;

use anyhow::{Context, Result};

/// File extensions recognized as target files by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["cpp", "h", "hpp"];

/// Result of a file filtering operation.
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether a file should be processed.
  ///
  /// # Parameters
  ///
  /// * `path` - The path to the file, relative to the walk root
  ///
  /// # Returns
  ///
  /// A `FilterResult` indicating whether the file should be processed and why
  /// not if applicable.
  fn should_process(&self, path: &Path) -> Result<FilterResult>;
}

/// Filter that only passes files with a recognized extension.
///
/// Eligibility is an exact (case-sensitive) match on the file name suffix, so
/// `foo.cpp` is a target and `foo.CPP` or `foo.cpp.bak` are not.
pub struct ExtensionFilter {
  extensions: Vec<String>,
}

impl ExtensionFilter {
  /// Creates a filter for the default extension set plus any extras.
  ///
  /// Extras may be given with or without a leading dot.
  pub fn with_extras(extras: &[String]) -> Self {
    let mut extensions: Vec<String> = DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect();
    for extra in extras {
      let ext = extra.trim_start_matches('.').to_string();
      if !ext.is_empty() && !extensions.contains(&ext) {
        extensions.push(ext);
      }
    }
    Self { extensions }
  }
}

impl FileFilter for ExtensionFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    let recognized = path
      .extension()
      .and_then(|e| e.to_str())
      .is_some_and(|ext| self.extensions.iter().any(|e| e == ext));

    if recognized {
      Ok(FilterResult::process())
    } else {
      Ok(FilterResult::skip("Unrecognized extension"))
    }
  }
}

/// Filter that excludes files matching ignore patterns.
pub struct IgnoreFilter {
  patterns: Vec<glob::Pattern>,
}

impl IgnoreFilter {
  /// Creates a new IgnoreFilter from a list of glob patterns.
  ///
  /// Each pattern is also compiled with a `**/` prefix so a bare pattern like
  /// `*.generated.h` matches at any depth.
  ///
  /// # Errors
  ///
  /// Returns an error if any pattern is not a valid glob.
  pub fn from_patterns(patterns: &[String]) -> Result<Self> {
    let mut compiled = Vec::with_capacity(patterns.len() * 2);

    for pattern in patterns {
      let pattern = pattern.replace('\\', "/");
      compiled.push(glob::Pattern::new(&pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?);

      if !pattern.starts_with("**/") {
        let anywhere = format!("**/{}", pattern);
        compiled.push(glob::Pattern::new(&anywhere).with_context(|| format!("Invalid glob pattern: {}", anywhere))?);
      }
    }

    Ok(Self { patterns: compiled })
  }
}

impl FileFilter for IgnoreFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    if self.patterns.iter().any(|p| p.matches_path(path)) {
      Ok(FilterResult::skip("Matches ignore pattern"))
    } else {
      Ok(FilterResult::process())
    }
  }
}

/// Filter that combines multiple filters.
pub struct CompositeFilter {
  filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
  /// Creates a new CompositeFilter with the given filters.
  pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
    Self { filters }
  }

  /// Adds a filter to this CompositeFilter.
  #[allow(dead_code)]
  pub fn add_filter(&mut self, filter: Box<dyn FileFilter>) {
    self.filters.push(filter);
  }
}

impl FileFilter for CompositeFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    for filter in &self.filters {
      let result = filter.should_process(path)?;
      if !result.should_process {
        return Ok(result);
      }
    }
    Ok(FilterResult::process())
  }
}

/// Constructs the default filter chain: ignore patterns first, then the
/// extension check.
///
/// # Parameters
///
/// * `ignore_patterns` - Glob patterns for files to ignore
/// * `extra_extensions` - Extensions recognized in addition to the defaults
pub fn create_default_filter(ignore_patterns: &[String], extra_extensions: &[String]) -> Result<CompositeFilter> {
  let filters: Vec<Box<dyn FileFilter>> = vec![
    Box::new(IgnoreFilter::from_patterns(ignore_patterns)?),
    Box::new(ExtensionFilter::with_extras(extra_extensions)),
  ];
  Ok(CompositeFilter::new(filters))
}
