//! # hdrpatch
//!
//! A tool that ensures source files carry the canonical license header.

mod cli;
mod detection;
mod diff;
mod file_filter;
mod header;
mod logging;
mod output;
mod patcher;
mod report;

use anyhow::Result;

use crate::cli::Cli;

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  cli::run_patch(cli.patch_args)
}
