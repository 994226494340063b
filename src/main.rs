//! FoodFleet terminal storefront.

#![expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "Terminal front end"
)]

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

mod cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = cli.run() {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
