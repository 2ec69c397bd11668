//! # pycopyright
//!
//! A tool that makes sure every Python file in a directory tree carries a
//! copyright notice.

use std::process::ExitCode;

use anyhow::Result;
use pycopyright::cli::{Cli, run};

fn main() -> Result<ExitCode> {
  let cli = Cli::parse_args();
  run(cli.run_args)
}
