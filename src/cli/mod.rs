//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod patch;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use patch::{PatchArgs, run_patch};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  version,
  about = "Ensures source files begin with the canonical license header",
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Patch all .cpp/.h/.hpp files under the current directory
  hdrpatch

  # Patch a specific tree
  hdrpatch src/

  # Report pending rewrites without modifying anything
  hdrpatch --check src/

  # Show a diff of what would change
  hdrpatch --check --show-diff src/

  # Use a custom canonical header
  hdrpatch --header-file HEADER.txt src/

  # Skip vendored code and recognize an extra extension
  hdrpatch --ignore \"vendor/**\" --ext cc src/
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub patch_args: PatchArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
