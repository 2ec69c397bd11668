//! # Writer Module
//!
//! Persists an edited [`SourceFile`] and guarantees the edit never leaves the
//! file in a state that no longer parses.

use anyhow::Result;
use tracing::{debug, warn};

use crate::processor::FileIO;
use crate::source_file::SourceFile;
use crate::validator::{PythonSyntaxValidator, SyntaxIssue, SyntaxValidator};

/// Result of a guarded write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
  /// The edit is on disk and the file still parses.
  Committed,
  /// The edit broke the file's syntax; the original content was restored.
  RolledBack {
    /// Syntax errors the edit introduced.
    issues: Vec<SyntaxIssue>,
  },
}

impl WriteOutcome {
  pub const fn is_committed(&self) -> bool {
    matches!(self, Self::Committed)
  }
}

/// Writes files and rolls them back when validation fails.
pub struct SafeWriter {
  validator: Box<dyn SyntaxValidator>,
}

impl SafeWriter {
  pub fn new(validator: Box<dyn SyntaxValidator>) -> Self {
    Self { validator }
  }

  /// Writes the current lines of `file`, re-reads the file and validates what
  /// actually landed on disk.
  ///
  /// Syntax errors restore the snapshot taken when `file` was loaded. A
  /// failure of the validator itself keeps the write.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be written, read back, or restored.
  pub fn commit(&self, file: &SourceFile) -> Result<WriteOutcome> {
    let path = file.path();
    FileIO::write_file(path, &file.content())?;
    let written = FileIO::read_full_content(path)?;

    match self.validator.validate(path, &written) {
      Ok(issues) if issues.is_empty() => {
        debug!("Committed notice to {}", path.display());
        Ok(WriteOutcome::Committed)
      }
      Ok(issues) => {
        warn!(
          "Unable to add notice to {}: {} syntax issue(s), first at {}. Reverting file.",
          path.display(),
          issues.len(),
          issues[0]
        );
        FileIO::write_file(path, &file.original_content())?;
        Ok(WriteOutcome::RolledBack { issues })
      }
      Err(e) => {
        warn!("Could not validate {}, keeping changes: {}", path.display(), e);
        Ok(WriteOutcome::Committed)
      }
    }
  }
}

impl Default for SafeWriter {
  fn default() -> Self {
    Self::new(Box::new(PythonSyntaxValidator::new()))
  }
}

#[cfg(test)]
mod tests {
  use std::fs;
  use std::path::Path;

  use tempfile::tempdir;

  use super::*;
  use crate::inserter::InsertionPlan;
  use crate::validator::ValidatorError;

  struct RejectingValidator;

  impl SyntaxValidator for RejectingValidator {
    fn validate(&self, _path: &Path, _source: &str) -> Result<Vec<SyntaxIssue>, ValidatorError> {
      Ok(vec![SyntaxIssue {
        line: 1,
        column: 1,
        message: "rejected".to_string(),
      }])
    }
  }

  struct BrokenValidator;

  impl SyntaxValidator for BrokenValidator {
    fn validate(&self, _path: &Path, _source: &str) -> Result<Vec<SyntaxIssue>, ValidatorError> {
      Err(ValidatorError::ParserInit("grammar unavailable".to_string()))
    }
  }

  fn edited_file(dir: &Path, content: &str) -> SourceFile {
    let path = dir.join("module.py");
    fs::write(&path, content).expect("write fixture");
    let mut file = SourceFile::load(&path).expect("load fixture");
    file.apply(&InsertionPlan::new(0, ["# added"], false));
    file
  }

  #[test]
  fn test_commit_keeps_valid_edit() {
    let dir = tempdir().expect("temp dir");
    let file = edited_file(dir.path(), "import os\n");

    let outcome = SafeWriter::default().commit(&file).expect("commit");

    assert_eq!(outcome, WriteOutcome::Committed);
    assert_eq!(fs::read_to_string(file.path()).expect("read"), "# added\nimport os\n");
  }

  #[test]
  fn test_commit_rolls_back_rejected_edit() {
    let dir = tempdir().expect("temp dir");
    let file = edited_file(dir.path(), "import os\n");

    let outcome = SafeWriter::new(Box::new(RejectingValidator)).commit(&file).expect("commit");

    assert!(!outcome.is_committed());
    assert_eq!(fs::read_to_string(file.path()).expect("read"), "import os\n");
  }

  #[test]
  fn test_commit_keeps_edit_when_validator_fails() {
    let dir = tempdir().expect("temp dir");
    let file = edited_file(dir.path(), "import os\n");

    let outcome = SafeWriter::new(Box::new(BrokenValidator)).commit(&file).expect("commit");

    assert!(outcome.is_committed());
    assert_eq!(fs::read_to_string(file.path()).expect("read"), "# added\nimport os\n");
  }

  #[test]
  fn test_commit_rolls_back_real_syntax_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("module.py");
    fs::write(&path, "x = 1\n").expect("write fixture");

    let mut file = SourceFile::load(&path).expect("load");
    file.apply(&InsertionPlan::new(1, ["def broken("], false));

    let outcome = SafeWriter::default().commit(&file).expect("commit");

    match outcome {
      WriteOutcome::RolledBack { issues } => assert!(!issues.is_empty()),
      WriteOutcome::Committed => panic!("syntax error should roll back"),
    }
    assert_eq!(fs::read_to_string(&path).expect("read"), "x = 1\n");
  }
}
