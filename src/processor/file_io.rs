//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! It encapsulates synchronous file operations so every failure carries the
//! path it happened on.

use std::path::Path;

use anyhow::{Context, Result};

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Read full file content.
  ///
  /// Files that are not valid UTF-8 are rejected rather than decoded lossily,
  /// since writing a lossy decode back would corrupt them.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to read
  pub fn read_full_content(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    String::from_utf8(bytes).with_context(|| format!("File is not valid UTF-8: {}", path.display()))
  }

  /// Write file content, replacing whatever was there.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to write
  /// * `content` - Content to write to the file
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
