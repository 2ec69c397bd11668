//! # pycopyright
//!
//! A tool that inserts a copyright notice into the header of every Python file
//! under a directory, respecting the header style each file already has.
//!
//! `pycopyright` modifies source files in place and never adds the notice to a
//! file that already contains it. Every edit is checked with a parse-only
//! syntax check afterwards; an edit that leaves the file unparsable is rolled
//! back.
//!
//! ## Features
//!
//! * Recursively scan a directory for `.py` files (or other configured extensions)
//! * Place the notice according to the existing header: after a leading `#` comment block, inside a leading
//!   docstring, or in a new docstring at the top of the file
//! * Roll back any edit that breaks the file's syntax
//! * Check mode to list files missing the notice without modifying them
//! * Ignore patterns, a project config file and JSON reports
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use pycopyright::notice::NoticeText;
//! use pycopyright::processor::{Processor, ProcessorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let notice = NoticeText::new("Copyright (C) 2026 ACME Corp. All Rights Reserved.")?;
//!     let processor = Processor::new(ProcessorConfig::new(notice, PathBuf::from("src")))?;
//!
//!     for report in processor.process()? {
//!         if !report.is_success() {
//!             println!("{} does not carry the notice", report.path.display());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`header`] - Header classification
//! * [`inserter`] - Insertion planning and splicing
//! * [`writer`] - Guarded writes with rollback
//! * [`processor`] - Directory walk and the per-file pipeline
//!
//! [`header`]: crate::header
//! [`inserter`]: crate::inserter
//! [`writer`]: crate::writer
//! [`processor`]: crate::processor

pub mod cli;
pub mod config;
pub mod diff;
pub mod file_filter;
pub mod header;
pub mod inserter;
pub mod logging;
pub mod notice;
pub mod output;
pub mod processor;
pub mod report;
pub mod source_file;
pub mod validator;
pub mod writer;
