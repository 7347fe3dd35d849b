//! # Patch Command
//!
//! This module implements the patch/check command for canonical headers.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::diff::DiffManager;
use crate::header::Header;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  print_all_files_ok, print_blank_line, print_failed_files, print_hint, print_patched_files, print_start_message,
  print_summary,
};
use crate::patcher::{Patcher, PatcherConfig};
use crate::report::write_json_report;
use crate::{info_log, verbose_log};

/// Arguments for the patch command
#[derive(Args, Debug, Default)]
pub struct PatchArgs {
  /// Root directory to scan recursively
  #[arg(value_name = "ROOT", default_value = ".")]
  pub root: PathBuf,

  /// Check mode: report files whose header is missing or outdated without
  /// modifying them
  #[arg(long)]
  pub check: bool,

  /// Show diff of pending rewrites
  #[arg(long)]
  pub show_diff: bool,

  /// Save diff of pending rewrites to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Custom canonical header file (default: the built-in header)
  #[arg(long, short = 'f', value_name = "FILE")]
  pub header_file: Option<PathBuf>,

  /// File patterns to ignore (supports glob patterns)
  #[arg(long, short = 'i', value_name = "GLOB")]
  pub ignore: Vec<String>,

  /// Additional file extensions to treat as targets (repeatable)
  #[arg(long, value_name = "EXT")]
  pub ext: Vec<String>,

  /// Generate a JSON report of the run and save to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the patch command with the given arguments
pub fn run_patch(args: PatchArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set output mode for the info_log!/verbose_log! macros
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  if !args.root.is_dir() {
    eprintln!("ERROR: {} is not a directory", args.root.display());
    process::exit(1);
  }

  let header = match args.header_file {
    Some(ref path) => Header::load(path)?,
    None => Header::builtin(),
  };
  verbose_log!("Canonical header is {} bytes", header.len());

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff);
  diff_manager.init()?;

  let patcher = Patcher::new(PatcherConfig {
    check_only: args.check,
    ignore_patterns: args.ignore,
    extra_extensions: args.ext,
    diff_manager: Some(diff_manager),
    ..PatcherConfig::new(header)
  })?;

  print_start_message(&args.root, args.check);

  let run = patcher
    .run(&args.root)
    .with_context(|| format!("Failed to process {}", args.root.display()))?;

  debug!(
    "Processed {} files in {}ms",
    run.summary().total(),
    run.elapsed().as_millis()
  );

  print_blank_line();
  if run.has_issues() {
    print_patched_files(&run, Some(&args.root), args.check);
    print_failed_files(&run, Some(&args.root));
  } else {
    print_all_files_ok();
  }

  print_blank_line();
  print_summary(&run, args.check);

  if args.check && run.has_issues() {
    print_blank_line();
    print_hint("Run again without --check to patch.");
  }

  // Generate JSON report if requested
  if let Some(ref output_path) = args.report_json {
    if let Err(e) = write_json_report(output_path, &run) {
      eprintln!("Error generating JSON report: {}", e);
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  // Exit with non-zero code if in check mode and there are issues
  if args.check && run.has_issues() {
    process::exit(1);
  }

  Ok(())
}
