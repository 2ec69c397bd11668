//! # Output Module
//!
//! This module centralizes all user-facing output for pycopyright.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! ## Design Goals
//!
//! - **Informative**: Show one result line per file as it completes
//! - **Progressive**: More detail with `-v`, silence with `-q`
//! - **Scriptable**: Keep stdout predictable for piping/automation

use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Success/has notice
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing notice/failure
  pub const FAILURE: &str = " ";
}

/// Print the initial "Checking N files..." or "Processing N files..." message.
pub fn print_start_message(file_count: usize, modify_mode: bool) {
  if is_quiet() {
    return;
  }

  let verb = if modify_mode { "Processing" } else { "Checking" };
  let files_word = if file_count == 1 { "file" } else { "files" };

  println!("{} {} {}...", verb, file_count, files_word);
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Formats the result line for one file.
///
/// - `[✓] name in dir` when the file carries the notice
/// - `[ ] name in dir` when it does not
/// - `[ ] name in dir raised error <msg>` when processing failed
///
/// `dir` is shown relative to `base` when one is given.
pub fn format_file_line(report: &FileReport, base: Option<&Path>) -> String {
  let name = report
    .path
    .file_name()
    .map_or_else(|| report.path.to_string_lossy().to_string(), |n| n.to_string_lossy().to_string());
  let dir = report.path.parent().map_or_else(|| ".".to_string(), |d| make_relative_path(d, base));

  let mark = if report.is_success() {
    symbols::SUCCESS
      .if_supports_color(Stream::Stdout, |s| s.green())
      .to_string()
  } else {
    symbols::FAILURE.to_string()
  };

  let mut line = format!("[{}] {} in {}", mark, name, dir);
  if let Some(ref error) = report.error {
    line.push_str(&format!(
      " raised error {}",
      error.if_supports_color(Stream::Stdout, |e| e.red())
    ));
  }
  line
}

/// Print the result line for one file.
///
/// In quiet mode only files that do not carry the notice are printed, as bare
/// paths.
pub fn print_file_line(report: &FileReport, base: Option<&Path>) {
  if is_quiet() {
    if !report.is_success() {
      println!("{}", report.path.display());
    }
    return;
  }

  println!("{}", format_file_line(report, base));

  if is_verbose() {
    for issue in &report.issues {
      println!(
        "      {}",
        issue.if_supports_color(Stream::Stdout, |s| s.dimmed())
      );
    }
  }
}

/// Formats the summary line, without colors.
///
/// Format: "Summary: N added, M already present, K failed". Check mode adds
/// the missing count.
pub fn format_summary(summary: &ProcessingSummary, check_only: bool) -> String {
  let mut line = format!(
    "Summary: {} added, {} already present, {} failed",
    summary.added,
    summary.already_present,
    summary.failures()
  );
  if check_only {
    line.push_str(&format!(", {} missing", summary.missing));
  }
  line
}

/// Print the processing summary.
///
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary, check_only: bool) {
  if is_quiet() {
    return;
  }

  let mut summary_line = format_summary(summary, check_only);
  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  let problems = summary.failures() + if check_only { summary.missing } else { 0 };
  if problems > 0 {
    println!("{}", summary_line.if_supports_color(Stream::Stdout, |s| s.red()));
  } else {
    println!("{}", summary_line.if_supports_color(Stream::Stdout, |s| s.cyan()));
  }
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Make a path relative to `base` for display.
///
/// Falls back to the path as given when no relative form exists, and shows
/// `base` itself as `.`.
pub fn make_relative_path(path: &Path, base: Option<&Path>) -> String {
  let relative: PathBuf = match base {
    Some(base) => pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf()),
    None => path.to_path_buf(),
  };

  if relative.as_os_str().is_empty() {
    ".".to_string()
  } else {
    relative.to_string_lossy().to_string()
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;
  use crate::report::FileAction;

  fn plain<F: FnOnce() -> String>(f: F) -> String {
    owo_colors::set_override(false);
    f()
  }

  #[test]
  fn test_file_line_success() {
    let report = FileReport::new("/work/pkg/mod.py", FileAction::Added);
    let line = plain(|| format_file_line(&report, Some(Path::new("/work"))));
    assert_eq!(line, "[\u{2713}] mod.py in pkg");
  }

  #[test]
  fn test_file_line_missing() {
    let report = FileReport::new("/work/mod.py", FileAction::Missing);
    let line = plain(|| format_file_line(&report, Some(Path::new("/work"))));
    assert_eq!(line, "[ ] mod.py in .");
  }

  #[test]
  fn test_file_line_error() {
    let report = FileReport::failed("/work/pkg/mod.py", "boom");
    let line = plain(|| format_file_line(&report, Some(Path::new("/work"))));
    assert_eq!(line, "[ ] mod.py in pkg raised error boom");
  }

  #[test]
  fn test_summary_line() {
    let reports = vec![
      FileReport::new("a.py", FileAction::Added),
      FileReport::new("b.py", FileAction::AlreadyPresent),
      FileReport::failed("c.py", "boom"),
      FileReport::new("d.py", FileAction::Missing),
    ];
    let summary = ProcessingSummary::from_reports(&reports, Duration::ZERO);

    assert_eq!(format_summary(&summary, false), "Summary: 1 added, 1 already present, 1 failed");
    assert_eq!(
      format_summary(&summary, true),
      "Summary: 1 added, 1 already present, 1 failed, 1 missing"
    );
  }

  #[test]
  fn test_make_relative_path_with_root() {
    let path = PathBuf::from("/workspace/project/src/main.py");
    let root = PathBuf::from("/workspace/project");

    assert_eq!(make_relative_path(&path, Some(root.as_path())), "src/main.py");
    assert_eq!(make_relative_path(&root, Some(root.as_path())), ".");
  }

  #[test]
  fn test_make_relative_path_without_root() {
    let path = PathBuf::from("/workspace/project/src/main.py");
    assert_eq!(make_relative_path(&path, None), "/workspace/project/src/main.py");
  }
}
