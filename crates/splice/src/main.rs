//! Splice - Entry Point
//!
//! Exits with status 0 when every component was generated, 1 otherwise.

use std::process::ExitCode;

use clap::Parser;
use splice::{Cli, RunOptions, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&RunOptions::from(cli)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
