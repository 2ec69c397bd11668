//! # Diff Module
//!
//! This module renders line diffs between a file's current content and the
//! content it would have with the notice inserted. It is used in check mode to
//! show what a real run would change.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for notice insertions.
#[derive(Debug, Clone, Default)]
pub struct DiffManager {
  /// Whether to print diffs in check mode
  pub show_diff: bool,
}

impl DiffManager {
  pub const fn new(show_diff: bool) -> Self {
    Self { show_diff }
  }

  /// Renders a diff of `original` against `new`.
  ///
  /// Only changed lines and one line of context on either side are kept, with
  /// `@@` hunk headers between groups.
  pub fn render(path: &Path, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);
    let mut rendered = format!("Diff for {}:\n", path.display());

    for group in diff.grouped_ops(1) {
      let (Some(first), Some(last)) = (group.first(), group.last()) else {
        continue;
      };
      let old_range = first.old_range().start..last.old_range().end;
      let new_range = first.new_range().start..last.new_range().end;
      rendered.push_str(&format!(
        "@@ -{},{} +{},{} @@\n",
        old_range.start + 1,
        old_range.len(),
        new_range.start + 1,
        new_range.len()
      ));

      for op in &group {
        for change in diff.iter_changes(op) {
          let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
          };
          rendered.push_str(sign);
          rendered.push_str(change.value());
          if change.missing_newline() {
            rendered.push('\n');
          }
        }
      }
    }

    rendered
  }

  /// Prints the diff to stderr if diffs are enabled.
  ///
  /// Added lines are green and removed lines red when the terminal supports
  /// colour.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) {
    if !self.show_diff {
      return;
    }

    for line in Self::render(path, original, new).lines() {
      if line.starts_with('+') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
      } else if line.starts_with('-') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
      } else if line.starts_with("@@") {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.cyan()));
      } else {
        eprintln!("{line}");
      }
    }
    eprintln!();
  }
}
