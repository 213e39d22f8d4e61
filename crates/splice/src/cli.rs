//! Command line interface

use std::path::PathBuf;

use clap::Parser;

use crate::init::RunOptions;

/// Command line interface for Splice
#[derive(Parser, Debug)]
#[command(name = "splice")]
#[command(about = "Splice - compile-time dependency-injection code generator")]
#[command(version)]
pub struct Cli {
    /// Declaration manifest (defaults to `splice-manifest.*` found from the working directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print generated files instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Resolve components one at a time
    #[arg(long)]
    pub sequential: bool,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        Self {
            project: cli.project,
            config: cli.config,
            dry_run: cli.dry_run,
            sequential: cli.sequential,
        }
    }
}
