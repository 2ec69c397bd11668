//! # Validator Module
//!
//! Syntax checks run on a file after the notice has been written.
//!
//! The check is parse-only: the file is handed to the tree-sitter Python
//! grammar and never imported or executed. Each call builds a new parser, so
//! no state carries over from one file to the next.
//!
//! The grammar is more permissive than CPython's compiler. Errors that are
//! raised after tokenizing go unnoticed here, for example non-ASCII
//! characters inside a bytes literal (`b'''\n© ACME\n'''`). The inserter
//! refuses that particular case up front with
//! [`InsertError::NonAsciiInBytesLiteral`](crate::inserter::InsertError::NonAsciiInBytesLiteral).

use std::path::Path;

use serde::Serialize;
use tracing::trace;

/// Errors from the validation machinery itself, as opposed to syntax errors in
/// the file being checked.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
  /// The grammar could not be loaded into the parser.
  #[error("Failed to initialise the Python parser: {0}")]
  ParserInit(String),

  /// The parser gave up without producing a tree.
  #[error("Python parser produced no syntax tree for {0}")]
  NoTree(String),
}

/// A syntax error found in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxIssue {
  /// Line number (one-based).
  pub line: usize,
  /// Column number (one-based).
  pub column: usize,
  /// Human-readable description of the problem.
  pub message: String,
}

impl std::fmt::Display for SyntaxIssue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}: {}", self.line, self.column, self.message)
  }
}

/// Trait for syntax validators.
///
/// Implementations report every syntax error they find in `source`. An empty
/// list means the source parses.
pub trait SyntaxValidator {
  /// Checks `source`, which was read from `path`.
  fn validate(&self, path: &Path, source: &str) -> Result<Vec<SyntaxIssue>, ValidatorError>;
}

/// Validator backed by tree-sitter's Python grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonSyntaxValidator;

impl PythonSyntaxValidator {
  pub const fn new() -> Self {
    Self
  }
}

impl SyntaxValidator for PythonSyntaxValidator {
  fn validate(&self, path: &Path, source: &str) -> Result<Vec<SyntaxIssue>, ValidatorError> {
    let mut parser = tree_sitter::Parser::new();
    parser
      .set_language(&tree_sitter_python::LANGUAGE.into())
      .map_err(|e| ValidatorError::ParserInit(e.to_string()))?;

    let tree = parser
      .parse(source, None)
      .ok_or_else(|| ValidatorError::NoTree(path.display().to_string()))?;

    let root = tree.root_node();
    if !root.has_error() {
      trace!("{} parses cleanly", path.display());
      return Ok(Vec::new());
    }

    let mut issues = Vec::new();
    collect_issues(root, &mut issues);
    trace!("{} has {} syntax issue(s)", path.display(), issues.len());
    Ok(issues)
  }
}

/// Walks the tree collecting ERROR and MISSING nodes.
fn collect_issues(node: tree_sitter::Node<'_>, issues: &mut Vec<SyntaxIssue>) {
  if node.is_error() || node.is_missing() {
    let start = node.start_position();
    let message = if node.is_missing() {
      format!("missing {}", node.kind())
    } else {
      "syntax error".to_string()
    };
    issues.push(SyntaxIssue {
      line: start.row + 1,
      column: start.column + 1,
      message,
    });
    // Children of an ERROR node are noise once the node itself is reported.
    return;
  }

  let mut cursor = node.walk();
  for child in node.children(&mut cursor) {
    if child.has_error() {
      collect_issues(child, issues);
    }
  }
}
