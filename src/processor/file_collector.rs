//! # File Collector Module
//!
//! This module walks the scan root and collects the files that pass the
//! processor's filters.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::file_filter::FileFilter;

/// File collector for directory traversal.
///
/// Symlinks are never followed, and entries are visited in file-name order so
/// the output is the same from one run to the next.
pub struct FileCollector {
  /// Directory to scan
  root: PathBuf,
}

impl FileCollector {
  /// Creates a new FileCollector rooted at `root`.
  pub const fn new(root: PathBuf) -> Self {
    Self { root }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Traverses the root recursively and collects the files `filter` accepts.
  ///
  /// Directories for which `prune` returns `true` are not descended into.
  /// Unreadable entries are logged and skipped.
  ///
  /// # Errors
  ///
  /// Returns an error if the root is not a directory or a filter fails.
  pub fn collect(&self, filter: &dyn FileFilter, prune: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    if !self.root.is_dir() {
      bail!("Not a directory: {}", self.root.display());
    }

    debug!("Scanning directory: {}", self.root.display());
    let start_time = std::time::Instant::now();
    let mut files = Vec::new();

    let walker = WalkDir::new(&self.root)
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| entry.depth() == 0 || !entry.file_type().is_dir() || !prune(entry.path()));

    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!("Error reading directory entry: {}", e);
          continue;
        }
      };

      let file_type = entry.file_type();
      if file_type.is_symlink() {
        trace!("Skipping: {} (symlink)", entry.path().display());
        continue;
      }
      if !file_type.is_file() {
        continue;
      }

      let result = filter
        .should_process(entry.path())
        .with_context(|| format!("Failed to filter {}", entry.path().display()))?;
      if result.should_process {
        files.push(entry.into_path());
      } else {
        trace!(
          "Skipping: {} ({})",
          entry.path().display(),
          result.reason.as_deref().unwrap_or("Unknown reason")
        );
      }
    }

    debug!(
      "Found {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    Ok(files)
  }
}

/// Converts a potentially relative path to an absolute path.
///
/// # Parameters
///
/// * `path` - The path to absolutize
///
/// # Returns
///
/// The absolute path.
pub fn absolutize_path(path: &Path) -> Result<PathBuf> {
  if path.is_absolute() {
    Ok(path.to_path_buf())
  } else {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    Ok(current_dir.join(path))
  }
}
