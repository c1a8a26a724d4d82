use std::path::PathBuf;

use clap::Parser;

/// Floating text agent: operator commands and viewer events on stdin.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// JSON config file; defaults are used when absent.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backing file of the label store, overriding the config.
    #[arg(short, long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,
}
