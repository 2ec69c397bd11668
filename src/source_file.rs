//! # Source File Module
//!
//! In-memory view of a file as an ordered sequence of lines, together with a
//! snapshot of the content it had when it was loaded.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::header::HeaderKind;
use crate::inserter::{InsertionPlan, splice};
use crate::processor::FileIO;

/// A source file loaded for editing.
///
/// Lines keep their terminators (`"import os\n"`); only the last line of a
/// file may lack one. The snapshot taken at load time is never modified and is
/// what a rollback restores.
#[derive(Debug, Clone)]
pub struct SourceFile {
  path: PathBuf,
  lines: Vec<String>,
  original: Box<[String]>,
  header_kind: HeaderKind,
}

impl SourceFile {
  /// Reads a file from disk.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or is not valid UTF-8.
  pub fn load(path: &Path) -> Result<Self> {
    let content = FileIO::read_full_content(path)?;
    Ok(Self::from_content(path, &content))
  }

  /// Builds a source file from content that is already in memory.
  pub fn from_content(path: impl Into<PathBuf>, content: &str) -> Self {
    let lines: Vec<String> = content.split_inclusive('\n').map(str::to_owned).collect();
    let header_kind = HeaderKind::classify_lines(&lines);

    Self {
      path: path.into(),
      original: lines.clone().into_boxed_slice(),
      lines,
      header_kind,
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Current lines, including any edits applied so far.
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  /// Lines as they were at load time.
  pub fn original_lines(&self) -> &[String] {
    &self.original
  }

  /// Header kind, decided once at load time.
  pub const fn header_kind(&self) -> HeaderKind {
    self.header_kind
  }

  /// Splices an insertion plan into the current lines.
  pub fn apply(&mut self, plan: &InsertionPlan) {
    self.lines = splice(&self.lines, plan);
  }

  /// Whether the current lines differ from the snapshot.
  pub fn is_modified(&self) -> bool {
    self.lines[..] != self.original[..]
  }

  /// Current content joined back into a single string.
  pub fn content(&self) -> String {
    self.lines.concat()
  }

  /// Snapshot content joined back into a single string.
  pub fn original_content(&self) -> String {
    self.original.concat()
  }
}
