//! # Notice Module
//!
//! The copyright notice that every processed file must carry.
//!
//! A [`NoticeText`] is built once at start-up and handed to the
//! [`NoticeInserter`](crate::inserter::NoticeInserter) by value, so nothing in
//! the processing pipeline ever reads or mutates process-wide state.

use std::fmt;
use std::sync::Arc;

/// Notice used when neither the CLI nor the config file provides one.
pub const DEFAULT_NOTICE: &str = "Copyright (C) 2018 Will Jenden. All Rights Reserved.";

/// Placeholder substituted with the copyright year when rendering a template.
pub const YEAR_PLACEHOLDER: &str = "{{year}}";

/// Notice text that cannot be placed on a single header line.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum NoticeError {
  #[error("notice cannot be empty")]
  Empty,

  #[error("notice must be a single line")]
  MultiLine,
}

/// Immutable notice text.
///
/// Cloning is cheap; all clones share one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeText(Arc<str>);

impl NoticeText {
  /// Creates a notice from literal text.
  ///
  /// Trailing line breaks are dropped: a notice always occupies exactly one
  /// line of the header.
  ///
  /// # Errors
  ///
  /// Returns [`NoticeError::Empty`] for blank text and
  /// [`NoticeError::MultiLine`] when a line break remains inside the text.
  pub fn new(text: impl AsRef<str>) -> Result<Self, NoticeError> {
    let text = text.as_ref().trim_end_matches(['\r', '\n']);
    if text.trim().is_empty() {
      return Err(NoticeError::Empty);
    }
    // The already-present check matches line by line, so an embedded break
    // would never be found again.
    if text.contains(['\r', '\n']) {
      return Err(NoticeError::MultiLine);
    }
    Ok(Self(Arc::from(text)))
  }

  /// Renders a notice template, replacing every `{{year}}` with `year`.
  ///
  /// # Errors
  ///
  /// Same as [`NoticeText::new`], applied to the rendered text.
  pub fn render(template: &str, year: &str) -> Result<Self, NoticeError> {
    Self::new(template.replace(YEAR_PLACEHOLDER, year))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Whether `line` already carries this notice.
  pub fn appears_in(&self, line: &str) -> bool {
    line.contains(self.as_str())
  }
}

impl Default for NoticeText {
  fn default() -> Self {
    Self(Arc::from(DEFAULT_NOTICE))
  }
}

impl fmt::Display for NoticeText {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_replaces_year() {
    let notice = NoticeText::render("Copyright (C) {{year}} ACME. All Rights Reserved.", "2026").unwrap();
    assert_eq!(notice.as_str(), "Copyright (C) 2026 ACME. All Rights Reserved.");
  }

  #[test]
  fn test_render_without_placeholder_is_verbatim() {
    let notice = NoticeText::render(DEFAULT_NOTICE, "2026").unwrap();
    assert_eq!(notice, NoticeText::default());
  }

  #[test]
  fn test_new_strips_trailing_newline() {
    let notice = NoticeText::new("Copyright ACME\r\n").unwrap();
    assert_eq!(notice.as_str(), "Copyright ACME");
  }

  #[test]
  fn test_new_rejects_blank_text() {
    assert_eq!(NoticeText::new(""), Err(NoticeError::Empty));
    assert_eq!(NoticeText::new("  \n"), Err(NoticeError::Empty));
  }

  #[test]
  fn test_new_rejects_embedded_line_breaks() {
    assert_eq!(
      NoticeText::new("Copyright ACME\nAll Rights Reserved."),
      Err(NoticeError::MultiLine)
    );
    assert_eq!(NoticeText::new("Copyright ACME\rReserved."), Err(NoticeError::MultiLine));
  }

  #[test]
  fn test_render_rejects_multiline_template() {
    let err = NoticeText::render("Copyright (C) {{year}}\nACME", "2026").unwrap_err();
    assert_eq!(err.to_string(), "notice must be a single line");
  }

  #[test]
  fn test_appears_in() {
    let notice = NoticeText::default();
    assert!(notice.appears_in(&format!("# {}\n", DEFAULT_NOTICE)));
    assert!(!notice.appears_in("Copyright (C) 2019 Someone Else.\n"));
  }
}
