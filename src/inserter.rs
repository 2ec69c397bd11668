//! # Inserter Module
//!
//! Decides where and how the copyright notice goes into a file's header.
//!
//! Planning is pure: [`NoticeInserter::plan`] looks at a line sequence and its
//! [`HeaderKind`] and returns an [`InsertionPlan`]. Nothing touches the disk
//! until the plan has been applied with [`splice`] and handed to the
//! [`SafeWriter`](crate::writer::SafeWriter).
//!
//! | header kind            | where the notice goes                                   |
//! |------------------------|---------------------------------------------------------|
//! | `CommentBlock`         | `# <notice>` after the leading run of `#` lines         |
//! | `StringLiteralBlock`   | its own line just before the closing delimiter line     |
//! | `NoneFound`            | a new `"""` block plus one blank line at the very top   |

use tracing::trace;

use crate::header::{COMMENT_MARKER, HeaderKind, STRING_DELIMITERS, contains_string_delimiter, starts_with_comment};
use crate::notice::NoticeText;

/// Offset from the opening delimiter line at which the search for the closing
/// delimiter starts. The line right after the opener is docstring content.
const CLOSING_SEARCH_OFFSET: usize = 2;

const LF: &str = "\n";
const CRLF: &str = "\r\n";

/// Errors raised while planning an insertion.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum InsertError {
  /// The header opens a string literal that never closes.
  #[error("string-literal header has no closing delimiter at or after line {search_from}")]
  UnterminatedHeader {
    /// One-based line number where the search for the closing delimiter began.
    search_from: usize,
  },

  /// Python rejects non-ASCII characters inside a bytes literal.
  #[error("header is a bytes literal and cannot hold a non-ASCII notice")]
  NonAsciiInBytesLiteral,
}

/// One splice operation on a file's line sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionPlan {
  /// Zero-based line offset of the splice.
  pub index: usize,
  /// Lines to insert, each terminated by a line ending.
  pub lines: Vec<String>,
  /// Replace the line currently at `index` instead of keeping it.
  pub overwrite: bool,
}

impl InsertionPlan {
  /// Creates a plan, appending a newline to every line that lacks one.
  pub fn new<I, S>(index: usize, lines: I, overwrite: bool) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self::with_line_ending(index, lines, overwrite, LF)
  }

  /// Creates a plan, appending `line_ending` to every line that lacks a
  /// terminator.
  pub fn with_line_ending<I, S>(index: usize, lines: I, overwrite: bool, line_ending: &str) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let lines = lines
      .into_iter()
      .map(|line| {
        let mut line: String = line.into();
        if !line.ends_with('\n') {
          line.push_str(line_ending);
        }
        line
      })
      .collect();

    Self {
      index,
      lines,
      overwrite,
    }
  }
}

/// Splices `plan` into `lines`.
///
/// The result is `lines[..index] + plan.lines + lines[index..]`, with
/// `lines[index]` dropped first when the plan overwrites. An index past the end
/// appends.
pub fn splice(lines: &[String], plan: &InsertionPlan) -> Vec<String> {
  let index = plan.index.min(lines.len());
  let resume = if plan.overwrite {
    (index + 1).min(lines.len())
  } else {
    index
  };

  let mut spliced = Vec::with_capacity(lines.len() + plan.lines.len());
  spliced.extend_from_slice(&lines[..index]);
  spliced.extend(plan.lines.iter().cloned());
  spliced.extend_from_slice(&lines[resume..]);
  spliced
}

/// The terminator used by the file around `index`: the line at `index`, then
/// the one before it, then the first terminated line anywhere. Defaults to
/// `\n`.
fn line_ending_near(lines: &[String], index: usize) -> &'static str {
  let previous = index.checked_sub(1).and_then(|before| lines.get(before));
  lines
    .get(index)
    .into_iter()
    .chain(previous)
    .chain(lines.iter())
    .find(|line| line.ends_with('\n'))
    .map_or(LF, |line| if line.ends_with(CRLF) { CRLF } else { LF })
}

/// Byte offset and kind of the first triple-quote delimiter on `line`.
fn opening_delimiter(line: &str) -> Option<(usize, &'static str)> {
  STRING_DELIMITERS
    .iter()
    .filter_map(|delimiter| line.find(*delimiter).map(|at| (at, *delimiter)))
    .min_by_key(|(at, _)| *at)
}

/// Whether the literal opening at `open_at` carries a bytes prefix (`b`, `rb`,
/// `Br`, ...).
fn is_bytes_literal(line: &str, open_at: usize) -> bool {
  line[..open_at]
    .chars()
    .rev()
    .take_while(char::is_ascii_alphabetic)
    .any(|c| c.eq_ignore_ascii_case(&'b'))
}

/// Computes insertion plans for one notice.
#[derive(Debug, Clone, Default)]
pub struct NoticeInserter {
  notice: NoticeText,
}

impl NoticeInserter {
  pub const fn new(notice: NoticeText) -> Self {
    Self { notice }
  }

  pub const fn notice(&self) -> &NoticeText {
    &self.notice
  }

  /// Whether any line already carries the notice.
  pub fn has_notice(&self, lines: &[String]) -> bool {
    lines.iter().any(|line| self.notice.appears_in(line))
  }

  /// Plans the insertion of the notice.
  ///
  /// Returns `Ok(None)` when the file already has the notice.
  ///
  /// # Errors
  ///
  /// Returns [`InsertError::UnterminatedHeader`] when a string-literal header
  /// has no closing delimiter where one is expected.
  pub fn plan(&self, lines: &[String], kind: HeaderKind) -> Result<Option<InsertionPlan>, InsertError> {
    if self.has_notice(lines) {
      trace!("Notice already present");
      return Ok(None);
    }

    let plan = match kind {
      HeaderKind::CommentBlock => self.comment_plan(lines),
      HeaderKind::StringLiteralBlock => self.string_literal_plan(lines)?,
      HeaderKind::NoneFound => self.empty_plan(lines),
    };

    trace!(
      "Planned {:?} insertion at line {} ({} lines, overwrite: {})",
      kind,
      plan.index,
      plan.lines.len(),
      plan.overwrite
    );

    Ok(Some(plan))
  }

  /// `# <notice>` right after the last line of the leading comment run.
  fn comment_plan(&self, lines: &[String]) -> InsertionPlan {
    let run = lines.iter().take_while(|line| starts_with_comment(line)).count();
    let notice_line = format!("{COMMENT_MARKER} {}", self.notice);

    // A comment-only file may end without a newline; rewrite its last line so
    // the notice does not get glued onto it.
    match run.checked_sub(1).map(|last| (last, &lines[last])) {
      Some((last, line)) if !line.ends_with('\n') => {
        InsertionPlan::with_line_ending(last, [line.clone(), notice_line], true, line_ending_near(lines, last))
      }
      _ => InsertionPlan::with_line_ending(run, [notice_line], false, line_ending_near(lines, run)),
    }
  }

  /// The notice on its own line just before the closing delimiter.
  fn string_literal_plan(&self, lines: &[String]) -> Result<InsertionPlan, InsertError> {
    let unterminated = InsertError::UnterminatedHeader {
      search_from: CLOSING_SEARCH_OFFSET + 1,
    };
    let opener = lines.first().ok_or(unterminated.clone())?;

    let bytes_header = opening_delimiter(opener).is_some_and(|(open_at, _)| is_bytes_literal(opener, open_at));
    if bytes_header && !self.notice.as_str().is_ascii() {
      return Err(InsertError::NonAsciiInBytesLiteral);
    }

    if let Some(plan) = self.one_line_literal_plan(opener, line_ending_near(lines, 0)) {
      return Ok(plan);
    }

    let closing = lines
      .iter()
      .enumerate()
      .skip(CLOSING_SEARCH_OFFSET)
      .find(|(_, line)| contains_string_delimiter(line))
      .map(|(index, _)| index)
      .ok_or(unterminated)?;

    Ok(InsertionPlan::with_line_ending(
      closing,
      [self.notice.to_string()],
      false,
      line_ending_near(lines, closing),
    ))
  }

  /// A literal that opens and closes on the first line is split in two around
  /// the notice: `"""Docs."""` becomes `"""Docs.`, the notice, `"""`.
  fn one_line_literal_plan(&self, opener: &str, line_ending: &str) -> Option<InsertionPlan> {
    let (open_at, delimiter) = opening_delimiter(opener)?;

    let body_start = open_at + delimiter.len();
    let close_at = body_start + opener[body_start..].find(delimiter)?;

    let head = opener[..close_at].to_string();
    let tail = opener[close_at..].to_string();

    Some(InsertionPlan::with_line_ending(
      0,
      [head, self.notice.to_string(), tail],
      true,
      line_ending,
    ))
  }

  /// A fresh module docstring holding only the notice, then one blank line.
  fn empty_plan(&self, lines: &[String]) -> InsertionPlan {
    let delimiter = STRING_DELIMITERS[0];
    InsertionPlan::with_line_ending(
      0,
      [delimiter, self.notice.as_str(), delimiter, ""],
      false,
      line_ending_near(lines, 0),
    )
  }
}
