//! # Header Module
//!
//! Classification of a Python file's header region.
//!
//! Only the first line of the file is inspected. A header that starts after a
//! blank line, or that mixes comment lines with a string literal, is not
//! recognised as such and falls into whichever kind its first line suggests.

use serde::Serialize;

/// Single-line comment marker.
pub const COMMENT_MARKER: char = '#';

/// Triple-quote delimiters that open and close a string-literal header.
pub const STRING_DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

/// Shape of a file's header region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderKind {
  /// The file opens with a run of `#` comment lines.
  CommentBlock,
  /// The file opens with a triple-quoted string literal (a module docstring).
  StringLiteralBlock,
  /// The file has no recognised header.
  NoneFound,
}

impl HeaderKind {
  /// Classifies a header from the file's first line.
  pub fn classify(first_line: &str) -> Self {
    if starts_with_comment(first_line) {
      Self::CommentBlock
    } else if contains_string_delimiter(first_line) {
      Self::StringLiteralBlock
    } else {
      Self::NoneFound
    }
  }

  /// Classifies a header from a whole line sequence. An empty file has no
  /// header.
  pub fn classify_lines<S: AsRef<str>>(lines: &[S]) -> Self {
    lines
      .first()
      .map_or(Self::NoneFound, |line| Self::classify(line.as_ref()))
  }
}

/// Whether the line begins with the comment marker. Indented comments do not
/// count.
pub fn starts_with_comment(line: &str) -> bool {
  line.starts_with(COMMENT_MARKER)
}

/// Whether the line contains either triple-quote delimiter anywhere.
pub fn contains_string_delimiter(line: &str) -> bool {
  STRING_DELIMITERS.iter().any(|delimiter| line.contains(*delimiter))
}
