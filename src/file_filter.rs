//! # File Filter Module
//!
//! This module contains components for deciding which files found during the
//! directory walk get processed: an extension allow-list and glob ignore
//! patterns.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;

use crate::verbose_log;

/// Extensions processed when nothing else is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["py"];

/// Result of a file filtering operation.
#[derive(Debug)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter {
  /// Determines whether a file should be processed.
  ///
  /// # Parameters
  ///
  /// * `path` - The path to the file to check
  fn should_process(&self, path: &Path) -> Result<FilterResult>;
}

/// Filter that only lets through files whose extension is on an allow-list.
///
/// Matching is case-insensitive and ignores a leading dot in the configured
/// extensions, so `py`, `.py` and `PY` all mean the same thing.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
  allowed: HashSet<String>,
}

impl ExtensionFilter {
  pub fn new<I, S>(extensions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let allowed = extensions
      .into_iter()
      .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
      .filter(|ext| !ext.is_empty())
      .collect();
    Self { allowed }
  }

  pub fn allows(&self, path: &Path) -> bool {
    path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| self.allowed.contains(&ext.to_lowercase()))
  }
}

impl Default for ExtensionFilter {
  fn default() -> Self {
    Self::new(DEFAULT_EXTENSIONS)
  }
}

impl FileFilter for ExtensionFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    if self.allows(path) {
      Ok(FilterResult::process())
    } else {
      Ok(FilterResult::skip("Extension not in allow-list"))
    }
  }
}

/// Filter that excludes files matching glob ignore patterns.
///
/// Patterns are matched against the path relative to the scan root, and
/// patterns without a `/` also match against the bare file name.
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
  root: PathBuf,
  patterns: Vec<Pattern>,
}

impl IgnoreFilter {
  /// Creates a new IgnoreFilter from a list of ignore patterns.
  ///
  /// # Errors
  ///
  /// Returns an error if any pattern is not a valid glob.
  pub fn from_patterns(root: impl Into<PathBuf>, patterns: &[String]) -> Result<Self> {
    let patterns = patterns
      .iter()
      .map(|p| Pattern::new(p).with_context(|| format!("Invalid glob pattern: {}", p)))
      .collect::<Result<Vec<_>>>()?;

    Ok(Self {
      root: root.into(),
      patterns,
    })
  }

  pub fn is_ignored(&self, path: &Path) -> bool {
    let relative = path.strip_prefix(&self.root).unwrap_or(path);
    let file_name = path.file_name().map(Path::new);

    self.patterns.iter().any(|pattern| {
      pattern.matches_path(relative) || (!pattern.as_str().contains('/') && file_name.is_some_and(|n| pattern.matches_path(n)))
    })
  }
}

impl FileFilter for IgnoreFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    if self.is_ignored(path) {
      verbose_log!("Skipping: {} (matches ignore pattern)", path.display());
      Ok(FilterResult::skip("Matches ignore pattern"))
    } else {
      Ok(FilterResult::process())
    }
  }
}

/// Filter that combines multiple filters.
pub struct CompositeFilter {
  filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
  /// Creates a new CompositeFilter with the given filters.
  pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
    Self { filters }
  }

  /// Adds a filter to this CompositeFilter.
  pub fn add_filter(&mut self, filter: Box<dyn FileFilter>) {
    self.filters.push(filter);
  }
}

impl FileFilter for CompositeFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    for filter in &self.filters {
      let result = filter.should_process(path)?;
      if !result.should_process {
        return Ok(result);
      }
    }
    Ok(FilterResult::process())
  }
}

/// Constructs the filter chain used by the processor: ignore patterns first,
/// then the extension allow-list.
pub fn create_default_filter(root: &Path, extensions: &[String], ignore_patterns: &[String]) -> Result<CompositeFilter> {
  let filters: Vec<Box<dyn FileFilter>> = vec![
    Box::new(IgnoreFilter::from_patterns(root, ignore_patterns)?),
    Box::new(ExtensionFilter::new(extensions)),
  ];
  Ok(CompositeFilter::new(filters))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extension_filter_default_is_python() {
    let filter = ExtensionFilter::default();
    assert!(filter.allows(Path::new("src/module.py")));
    assert!(!filter.allows(Path::new("src/module.pyc")));
    assert!(!filter.allows(Path::new("README")));
  }

  #[test]
  fn test_extension_filter_normalizes() {
    let filter = ExtensionFilter::new([".PY", "pyi"]);
    assert!(filter.allows(Path::new("a.py")));
    assert!(filter.allows(Path::new("a.Py")));
    assert!(filter.allows(Path::new("stubs/a.pyi")));
    assert!(!filter.allows(Path::new("a.rs")));
  }

  #[test]
  fn test_ignore_filter() {
    let patterns = vec!["*_pb2.py".to_string(), "build/*".to_string()];
    let filter = IgnoreFilter::from_patterns("/repo", &patterns).unwrap();

    let result = filter.should_process(Path::new("/repo/src/main.py")).unwrap();
    assert!(result.should_process);

    let result = filter.should_process(Path::new("/repo/src/messages_pb2.py")).unwrap();
    assert!(!result.should_process);
    assert!(result.reason.is_some());

    assert!(filter.is_ignored(Path::new("/repo/build/setup.py")));
    assert!(!filter.is_ignored(Path::new("/repo/src/build/setup.py")));
  }

  #[test]
  fn test_ignore_filter_rejects_bad_glob() {
    let result = IgnoreFilter::from_patterns("/repo", &["[".to_string()]);
    assert!(result.is_err());
  }

  #[test]
  fn test_composite_filter() {
    let mut composite = CompositeFilter::new(Vec::new());

    // Create a mock filter that only processes files with "pass" in their name
    struct MockFilter;
    impl FileFilter for MockFilter {
      fn should_process(&self, path: &Path) -> Result<FilterResult> {
        let path_str = path.to_string_lossy();
        if path_str.contains("pass") {
          Ok(FilterResult::process())
        } else {
          Ok(FilterResult::skip("Not a pass file".to_string()))
        }
      }
    }

    composite.add_filter(Box::new(MockFilter));

    let result = composite.should_process(Path::new("src/pass_test.py")).unwrap();
    assert!(result.should_process);

    let result = composite.should_process(Path::new("src/fail_test.py")).unwrap();
    assert!(!result.should_process);
  }

  #[test]
  fn test_default_filter_chain() {
    let filter = create_default_filter(Path::new("/repo"), &["py".to_string()], &["tests/*".to_string()]).unwrap();

    assert!(filter.should_process(Path::new("/repo/pkg/mod.py")).unwrap().should_process);
    assert!(!filter.should_process(Path::new("/repo/pkg/mod.txt")).unwrap().should_process);
    assert!(!filter.should_process(Path::new("/repo/tests/test_mod.py")).unwrap().should_process);
  }
}
