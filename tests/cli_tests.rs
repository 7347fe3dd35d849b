use std::fs;
use std::path::Path;

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn hdrpatch() -> Command {
  Command::cargo_bin("hdrpatch").expect("binary under test")
}

/// A line from the built-in header, used to recognize patched files.
const BLESSING_LINE: &str = "May you share freely, never taking more than you give.";

fn write_sources(root: &Path) -> Result<()> {
  fs::create_dir_all(root.join("src"))?;
  fs::write(root.join("src/main.cpp"), "#include <cstdio>\n\nint main() { return 0; }\n")?;
  fs::write(root.join("src/util.h"), "#pragma once\n")?;
  fs::write(root.join("README.md"), "# readme\n")?;
  Ok(())
}

#[test]
fn default_run_patches_target_files() -> Result<()> {
  let dir = tempdir()?;
  write_sources(dir.path())?;

  hdrpatch()
    .arg(dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Patching:"))
    .stdout(predicate::str::contains("2 files"));

  let main_content = fs::read_to_string(dir.path().join("src/main.cpp"))?;
  assert!(main_content.starts_with("/*"));
  assert!(main_content.contains(BLESSING_LINE));

  // Non-target file untouched
  assert_eq!(fs::read_to_string(dir.path().join("README.md"))?, "# readme\n");
  Ok(())
}

#[test]
fn check_mode_exits_nonzero_without_modifying() -> Result<()> {
  let dir = tempdir()?;
  write_sources(dir.path())?;

  hdrpatch()
    .arg("--check")
    .arg(dir.path())
    .assert()
    .failure()
    .code(1)
    .stdout(predicate::str::contains("missing the canonical header"));

  // Nothing was rewritten
  let main_content = fs::read_to_string(dir.path().join("src/main.cpp"))?;
  assert!(!main_content.contains(BLESSING_LINE));

  // Patch, then the same check passes
  hdrpatch().arg(dir.path()).assert().success();

  hdrpatch()
    .arg("--check")
    .arg(dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("All files carry the canonical header"));
  Ok(())
}

#[test]
fn repeated_runs_report_nothing_to_patch() -> Result<()> {
  let dir = tempdir()?;
  write_sources(dir.path())?;

  hdrpatch().arg(dir.path()).assert().success();

  hdrpatch()
    .arg(dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Patching:").not())
    .stdout(predicate::str::contains("All files carry the canonical header"));
  Ok(())
}

#[test]
fn quiet_check_prints_bare_paths() -> Result<()> {
  let dir = tempdir()?;
  write_sources(dir.path())?;

  hdrpatch()
    .arg("--check")
    .arg("--quiet")
    .arg(dir.path())
    .assert()
    .failure()
    .stdout(predicate::str::contains("src/main.cpp"))
    .stdout(predicate::str::contains("Checking").not());
  Ok(())
}

#[test]
fn ignore_patterns_exclude_trees() -> Result<()> {
  let dir = tempdir()?;
  fs::create_dir_all(dir.path().join("vendor"))?;
  fs::write(dir.path().join("vendor/ext.cpp"), "int ext;\n")?;
  fs::write(dir.path().join("app.cpp"), "int app;\n")?;

  hdrpatch()
    .arg("--ignore")
    .arg("vendor/**")
    .arg(dir.path())
    .assert()
    .success();

  assert_eq!(fs::read_to_string(dir.path().join("vendor/ext.cpp"))?, "int ext;\n");
  assert!(fs::read_to_string(dir.path().join("app.cpp"))?.contains(BLESSING_LINE));
  Ok(())
}

#[test]
fn extra_extensions_are_recognized() -> Result<()> {
  let dir = tempdir()?;
  fs::write(dir.path().join("a.cc"), "int a;\n")?;

  hdrpatch().arg("--ext").arg("cc").arg(dir.path()).assert().success();

  assert!(fs::read_to_string(dir.path().join("a.cc"))?.contains(BLESSING_LINE));
  Ok(())
}

#[test]
fn missing_root_is_an_error() {
  hdrpatch()
    .arg("/definitely/not/a/real/path")
    .assert()
    .failure()
    .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn invalid_custom_header_is_rejected() -> Result<()> {
  let dir = tempdir()?;
  fs::write(dir.path().join("HEADER.txt"), "/* never closed")?;
  fs::write(dir.path().join("a.cpp"), "int a;\n")?;

  hdrpatch()
    .arg("--header-file")
    .arg(dir.path().join("HEADER.txt"))
    .arg(dir.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid header"));

  // Nothing was rewritten
  assert_eq!(fs::read_to_string(dir.path().join("a.cpp"))?, "int a;\n");
  Ok(())
}

#[test]
fn json_report_is_written() -> Result<()> {
  let dir = tempdir()?;
  write_sources(dir.path())?;
  let report = dir.path().join("report.json");

  hdrpatch()
    .arg("--report-json")
    .arg(&report)
    .arg(dir.path())
    .assert()
    .success();

  let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report)?)?;
  assert_eq!(parsed["summary"]["patched"], 2);
  Ok(())
}

#[test]
fn save_diff_collects_pending_rewrites() -> Result<()> {
  let dir = tempdir()?;
  write_sources(dir.path())?;
  let diff_path = dir.path().join("pending.diff");

  hdrpatch()
    .arg("--check")
    .arg("--save-diff")
    .arg(&diff_path)
    .arg(dir.path())
    .assert()
    .failure();

  let diff = fs::read_to_string(&diff_path)?;
  assert!(diff.contains("Diff for"));
  assert!(diff.contains(BLESSING_LINE));
  Ok(())
}
