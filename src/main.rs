//! `lesson-lint` command-line entry point.
//!
//! Validates the structure of a bilingual curriculum module and exits with a
//! non-zero status if any property fails.

use std::process::ExitCode;

use clap::Parser;

mod cli;
use cli::Cli;

fn main() -> anyhow::Result<ExitCode> {
    Cli::parse().run()
}
