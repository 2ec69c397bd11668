//! # Report Module
//!
//! This module records what happened to each processed file and can write the
//! results out as a JSON report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::validator::SyntaxIssue;

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// What happened to the file
  pub action: FileAction,
  /// Syntax errors that caused a rollback
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub issues: Vec<SyntaxIssue>,
  /// Error message for files that could not be processed
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

/// Possible outcomes for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
  /// The notice was inserted and the file still parses
  Added,
  /// The file already carried the notice
  AlreadyPresent,
  /// The notice is missing (check mode, nothing written)
  Missing,
  /// Inserting the notice broke the file, so the original was restored
  RolledBack,
  /// The file could not be processed
  Failed,
}

impl FileReport {
  pub fn new(path: impl Into<PathBuf>, action: FileAction) -> Self {
    Self {
      path: path.into(),
      action,
      issues: Vec::new(),
      error: None,
    }
  }

  pub fn rolled_back(path: impl Into<PathBuf>, issues: Vec<SyntaxIssue>) -> Self {
    Self {
      issues,
      ..Self::new(path, FileAction::RolledBack)
    }
  }

  pub fn failed(path: impl Into<PathBuf>, error: impl Into<String>) -> Self {
    Self {
      error: Some(error.into()),
      ..Self::new(path, FileAction::Failed)
    }
  }

  /// Whether the file ends up carrying the notice.
  pub const fn is_success(&self) -> bool {
    matches!(self.action, FileAction::Added | FileAction::AlreadyPresent)
  }
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Summary of the processing results
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingSummary {
  /// Total number of files processed
  pub total_files: usize,
  /// Number of notices added
  pub added: usize,
  /// Number of files that already had the notice
  pub already_present: usize,
  /// Number of files missing the notice (check mode)
  pub missing: usize,
  /// Number of files restored after a syntax regression
  pub rolled_back: usize,
  /// Number of files that raised an error
  pub failed: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
}

impl ProcessingSummary {
  /// Create a new ProcessingSummary initialized to zero
  pub fn new(processing_time: Duration) -> Self {
    Self {
      total_files: 0,
      added: 0,
      already_present: 0,
      missing: 0,
      rolled_back: 0,
      failed: 0,
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
    }
  }

  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self::new(processing_time);
    summary.total_files = files.len();

    for file in files {
      match file.action {
        FileAction::Added => summary.added += 1,
        FileAction::AlreadyPresent => summary.already_present += 1,
        FileAction::Missing => summary.missing += 1,
        FileAction::RolledBack => summary.rolled_back += 1,
        FileAction::Failed => summary.failed += 1,
      }
    }

    summary
  }

  /// Files that did not end up with the notice because something went wrong.
  pub const fn failures(&self) -> usize {
    self.rolled_back + self.failed
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Report Generator for writing JSON reports
pub struct ReportGenerator<'a> {
  /// Path where the report will be saved
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(output_path: &'a Path) -> Self {
    Self { output_path }
  }

  /// Generate a report from a collection of file reports
  ///
  /// # Returns
  ///
  /// `Ok(())` if the report was generated successfully, or an error if the
  /// report couldn't be serialized or written to disk.
  pub fn generate(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
    let content = Self::render(files, summary)?;
    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }

  fn render(files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    let report = JsonReport {
      generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
      summary,
      files,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")
  }
}
