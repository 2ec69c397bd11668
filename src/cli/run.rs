//! # Run Command
//!
//! This module implements the default command: add the copyright notice to
//! every Python file under a directory, or report the files missing it.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use crate::config::load_config;
use crate::diff::DiffManager;
use crate::file_filter::DEFAULT_EXTENSIONS;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::notice::{DEFAULT_NOTICE, NoticeText};
use crate::output::{print_blank_line, print_file_line, print_hint, print_start_message, print_summary};
use crate::processor::{Processor, ProcessorConfig, absolutize_path};
use crate::report::{ProcessingSummary, ReportGenerator};

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// Location to walk. Directories are processed recursively.
  #[arg(long, short = 'd', default_value = ".", value_name = "DIR")]
  pub directory: PathBuf,

  /// Notice text to insert. `{{year}}` is replaced with the copyright year.
  #[arg(long, value_name = "TEXT")]
  pub notice: Option<String>,

  /// Copyright year used for `{{year}}` (default: current year)
  #[arg(long)]
  pub year: Option<String>,

  /// Only process files with these extensions (repeatable, case-insensitive)
  #[arg(long = "ext", value_name = "EXT")]
  pub extensions: Vec<String>,

  /// File patterns to ignore (supports glob patterns)
  #[arg(long, short = 'i', value_name = "GLOB")]
  pub ignore: Vec<String>,

  /// Check mode: report files missing the notice without modifying them
  #[arg(long)]
  pub check: bool,

  /// Show the diff that would be applied (check mode only)
  #[arg(long, requires = "check")]
  pub show_diff: bool,

  /// Write a JSON report of all file results to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Path to config file (default: .pycopyright.toml in the scan root)
  #[arg(long, value_name = "FILE", conflicts_with = "no_config")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the command with the given arguments.
///
/// Exits with 1 when any file failed, or in check mode when any file is
/// missing the notice.
pub fn run(args: RunArgs) -> Result<ExitCode> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let root = absolutize_path(&args.directory)?;
  if !root.is_dir() {
    bail!("Directory does not exist: {}", args.directory.display());
  }

  let config = load_config(args.config.as_deref(), &root, args.no_config)?.unwrap_or_default();

  // CLI takes precedence over config
  let template = args
    .notice
    .or(config.notice)
    .unwrap_or_else(|| DEFAULT_NOTICE.to_string());
  let year = args.year.unwrap_or_else(|| chrono::Local::now().year().to_string());
  let notice = NoticeText::render(&template, &year).context("Invalid notice text")?;
  debug!("Notice: {}", notice);

  let extensions = if !args.extensions.is_empty() {
    args.extensions
  } else {
    config
      .extensions
      .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect())
  };

  let mut ignore_patterns = config.ignore;
  ignore_patterns.extend(args.ignore);

  let processor = Processor::new(ProcessorConfig {
    extensions,
    ignore_patterns,
    check_only: args.check,
    diff_manager: Some(DiffManager::new(args.show_diff)),
    ..ProcessorConfig::new(notice, root.clone())
  })
  .context("Failed to set up processor")?;
  debug!("Scan root: {}", processor.root().display());

  let file_count = processor.collect_files()?.len();
  print_start_message(file_count, !args.check);
  print_blank_line();

  let display_base = std::env::current_dir().ok();
  let start_time = Instant::now();

  let reports = processor.process_with(|report| print_file_line(report, display_base.as_deref()))?;

  let summary = ProcessingSummary::from_reports(&reports, start_time.elapsed());

  print_blank_line();
  print_summary(&summary, args.check);

  if args.check && summary.missing > 0 {
    print_blank_line();
    print_hint("Run without --check to add the missing notices.");
  }

  if let Some(ref output_path) = args.report_json {
    ReportGenerator::new(output_path)
      .generate(&reports, &summary)
      .with_context(|| format!("Error generating JSON report at {}", output_path.display()))?;
    info_log!("Generated JSON report at {}", output_path.display());
  }

  let failed = summary.failures() > 0 || (args.check && summary.missing > 0);
  Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
