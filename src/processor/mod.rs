//! # Processor Module
//!
//! This module contains the per-file pipeline that puts the copyright notice
//! into every Python file under a directory.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`file_collector`] - Directory traversal
//!
//! The [`Processor`] struct is the main entry point. It walks the scan root,
//! runs each file through load, plan, apply and a guarded write, and turns
//! every per-file error into a failed [`FileReport`] so one bad file never
//! stops the run.

mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
pub use file_collector::{FileCollector, absolutize_path};
pub use file_io::FileIO;
use tracing::{debug, trace, warn};

use crate::diff::DiffManager;
use crate::file_filter::{CompositeFilter, DEFAULT_EXTENSIONS, IgnoreFilter, create_default_filter};
use crate::inserter::NoticeInserter;
use crate::notice::NoticeText;
use crate::report::{FileAction, FileReport};
use crate::source_file::SourceFile;
use crate::validator::{PythonSyntaxValidator, SyntaxValidator};
use crate::verbose_log;
use crate::writer::{SafeWriter, WriteOutcome};

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub notice: NoticeText,
  pub root: PathBuf,

  /// Extensions to process, case-insensitive
  pub extensions: Vec<String>,
  pub ignore_patterns: Vec<String>,

  /// Report missing notices without writing anything
  pub check_only: bool,

  // Optional components
  pub diff_manager: Option<DiffManager>,
  pub validator: Option<Box<dyn SyntaxValidator>>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(notice, root)
  /// }
  /// ```
  pub fn new(notice: NoticeText, root: PathBuf) -> Self {
    Self {
      notice,
      root,
      extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
      ignore_patterns: vec![],
      check_only: false,
      diff_manager: None,
      validator: None,
    }
  }
}

/// Processor for adding copyright notices to files.
///
/// Files are handled one at a time, each to completion before the next. The
/// only state shared between files is the notice itself.
pub struct Processor {
  /// Directory traversal rooted at the scan root
  file_collector: FileCollector,

  /// Ignore patterns plus the extension allow-list
  file_filter: CompositeFilter,

  /// Ignore patterns again, for pruning whole directories during the walk
  ignore_filter: IgnoreFilter,

  inserter: NoticeInserter,
  writer: SafeWriter,

  /// Whether to only check for notices without modifying files
  check_only: bool,

  /// Manager for rendering diffs in check mode
  diff_manager: DiffManager,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the ignore patterns are invalid.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let file_filter = create_default_filter(&config.root, &config.extensions, &config.ignore_patterns)?;
    let ignore_filter = IgnoreFilter::from_patterns(&config.root, &config.ignore_patterns)?;

    let validator = config
      .validator
      .unwrap_or_else(|| Box::new(PythonSyntaxValidator::new()));

    Ok(Self {
      file_collector: FileCollector::new(config.root),
      file_filter,
      ignore_filter,
      inserter: NoticeInserter::new(config.notice),
      writer: SafeWriter::new(validator),
      check_only: config.check_only,
      diff_manager: config.diff_manager.unwrap_or_default(),
    })
  }

  pub fn root(&self) -> &Path {
    self.file_collector.root()
  }

  /// Collects every file under the root that passes the filters, in sorted
  /// order.
  ///
  /// # Errors
  ///
  /// Returns an error if the root is not a readable directory.
  pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
    self
      .file_collector
      .collect(&self.file_filter, |dir| self.ignore_filter.is_ignored(dir))
  }

  /// Processes every collected file, calling `on_report` as each one
  /// completes.
  ///
  /// # Errors
  ///
  /// Only collection errors are returned. Errors for individual files end up
  /// in their reports.
  pub fn process_with(&self, mut on_report: impl FnMut(&FileReport)) -> Result<Vec<FileReport>> {
    let files = self.collect_files()?;
    debug!("Processing {} files", files.len());

    let mut reports = Vec::with_capacity(files.len());
    for path in files {
      let report = self.process_file(&path);
      on_report(&report);
      reports.push(report);
    }
    Ok(reports)
  }

  /// Processes every collected file.
  pub fn process(&self) -> Result<Vec<FileReport>> {
    self.process_with(|_| {})
  }

  /// Runs [`add_copyright`](Self::add_copyright) and converts any error into
  /// a failed report.
  pub fn process_file(&self, path: &Path) -> FileReport {
    match self.add_copyright(path) {
      Ok(report) => report,
      Err(e) => {
        let message = format!("{e:#}");
        warn!("Failed to process {}: {}", path.display(), message);
        FileReport::failed(path, message)
      }
    }
  }

  /// Makes sure the file at `path` carries the notice.
  ///
  /// Files that already contain the notice are left untouched. In check mode
  /// nothing is written and a missing notice is reported as
  /// [`FileAction::Missing`].
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or written, or if its header
  /// has no place for the notice.
  pub fn add_copyright(&self, path: &Path) -> Result<FileReport> {
    let mut file = SourceFile::load(path)?;
    trace!("{}: {:?} header", path.display(), file.header_kind());

    let plan = self
      .inserter
      .plan(file.lines(), file.header_kind())
      .with_context(|| format!("Cannot place notice in {}", path.display()))?;

    let Some(plan) = plan else {
      verbose_log!("Notice already present: {}", path.display());
      return Ok(FileReport::new(path, FileAction::AlreadyPresent));
    };

    file.apply(&plan);

    if self.check_only {
      self
        .diff_manager
        .display_diff(path, &file.original_content(), &file.content());
      return Ok(FileReport::new(path, FileAction::Missing));
    }

    match self.writer.commit(&file)? {
      WriteOutcome::Committed => {
        verbose_log!("Added notice to: {}", path.display());
        Ok(FileReport::new(path, FileAction::Added))
      }
      WriteOutcome::RolledBack { issues } => Ok(FileReport::rolled_back(path, issues)),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;
  use crate::notice::DEFAULT_NOTICE;

  fn processor(root: &Path) -> Processor {
    Processor::new(ProcessorConfig::new(NoticeText::default(), root.to_path_buf())).unwrap()
  }

  #[test]
  fn test_add_copyright_no_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mod.py");
    fs::write(&path, "import os\n").unwrap();

    let report = processor(dir.path()).add_copyright(&path).unwrap();

    assert_eq!(report.action, FileAction::Added);
    assert_eq!(
      fs::read_to_string(&path).unwrap(),
      format!("\"\"\"\n{DEFAULT_NOTICE}\n\"\"\"\n\nimport os\n")
    );
  }

  #[test]
  fn test_add_copyright_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mod.py");
    fs::write(&path, "\"\"\"\nDocs.\n\"\"\"\nimport os\n").unwrap();
    let processor = processor(dir.path());

    assert_eq!(processor.add_copyright(&path).unwrap().action, FileAction::Added);
    let once = fs::read_to_string(&path).unwrap();

    assert_eq!(processor.add_copyright(&path).unwrap().action, FileAction::AlreadyPresent);
    assert_eq!(fs::read_to_string(&path).unwrap(), once);
  }

  #[test]
  fn test_check_only_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mod.py");
    fs::write(&path, "import os\n").unwrap();

    let processor = Processor::new(ProcessorConfig {
      check_only: true,
      ..ProcessorConfig::new(NoticeText::default(), dir.path().to_path_buf())
    })
    .unwrap();

    assert_eq!(processor.add_copyright(&path).unwrap().action, FileAction::Missing);
    assert_eq!(fs::read_to_string(&path).unwrap(), "import os\n");
  }

  #[test]
  fn test_process_file_reports_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("open.py");
    fs::write(&path, "\"\"\"\nnever closed\n").unwrap();

    let report = processor(dir.path()).process_file(&path);

    assert_eq!(report.action, FileAction::Failed);
    let error = report.error.unwrap();
    assert!(error.contains("Cannot place notice"));
    assert!(error.contains("no closing delimiter"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "\"\"\"\nnever closed\n");
  }

  #[test]
  fn test_process_continues_after_failure() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a_bad.py"), "'''\nunterminated\n").unwrap();
    fs::write(dir.path().join("b_good.py"), "x = 1\n").unwrap();

    let mut seen = Vec::new();
    let reports = processor(dir.path())
      .process_with(|report| seen.push(report.action))
      .unwrap();

    assert_eq!(seen, [FileAction::Failed, FileAction::Added]);
    assert_eq!(reports.len(), 2);
  }

  #[test]
  fn test_ignore_patterns_prune_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("venv/lib")).unwrap();
    fs::write(dir.path().join("venv/lib/site.py"), "x = 1\n").unwrap();
    fs::write(dir.path().join("main.py"), "x = 1\n").unwrap();

    let processor = Processor::new(ProcessorConfig {
      ignore_patterns: vec!["venv".to_string()],
      ..ProcessorConfig::new(NoticeText::default(), dir.path().to_path_buf())
    })
    .unwrap();

    assert_eq!(processor.collect_files().unwrap(), [dir.path().join("main.py")]);
  }
}
