//! # hdrpatch
//!
//! A tool that ensures source files begin with a canonical license header comment.
//!
//! `hdrpatch` walks a directory tree, inspects the leading comment block of every
//! eligible file, and rewrites the file in place when that block is not the canonical
//! header. Files that already carry the header are left byte-for-byte untouched, so
//! repeated runs over the same tree are no-ops.
//!
//! ## Features
//!
//! * Recursively scan a directory and patch `.cpp`, `.h`, and `.hpp` files
//! * Replace a foreign leading `/* ... */` block with the canonical header
//! * Check-only mode to report pending rewrites without modifying files
//! * Ignore patterns to exclude specific files or directories
//! * Per-file error isolation: one unreadable file never aborts the run
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use hdrpatch::header::Header;
//! use hdrpatch::patcher::{Patcher, PatcherConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let header = Header::builtin();
//!
//!     let patcher = Patcher::new(PatcherConfig::new(header))?;
//!     let report = patcher.run(Path::new("src"))?;
//!
//!     println!("{} files patched", report.summary().patched);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`patcher`] - Core traversal and rewrite loop
//! * [`detection`] - The header match predicate and patch construction
//! * [`header`] - The canonical header constant and validation
//!
//! [`patcher`]: crate::patcher
//! [`detection`]: crate::detection
//! [`header`]: crate::header

// Re-export modules for public API
pub mod detection;
pub mod diff;
pub mod file_filter;
pub mod header;
pub mod logging;
pub mod patcher;
pub mod report;
