#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const SIMPLE_DOCSTRING: &str = "\"\"\"\nsimple_docstring.py: This file has a docstring.\n\"\"\"\n\nimport os\n";

pub const COMMENT_HEADER: &str = "# comment_header.py\n# This module has a simple comment header\n# which is wrong but sometimes exists.\n\nimport os\n";

pub const NO_HEADER: &str = "import os\n\n\ndef add_ten(x):\n    return x + 10\n";

/// The closer search skips line 1, so the notice lands as a bare line of
/// code between `y = 1` and `z = ...` and the module no longer parses.
pub const BREAKS_ON_INSERT: &str = "x = '''a\nb'''\ny = 1\nz = '''c'''\n";

/// Writes `content` to `rel` under `dir`, creating parent directories.
pub fn write_file(dir: &Path, rel: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

pub fn read_file(path: &Path) -> Result<String> {
  fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
