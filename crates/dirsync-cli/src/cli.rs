//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// dirsync - Keep a replica directory identical to a source directory
#[derive(Parser, Debug)]
#[command(name = "dirsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to replicate
    pub source: PathBuf,

    /// Directory kept identical to SOURCE (must already exist)
    pub replica: PathBuf,

    /// Poll interval: whole seconds or minutes, e.g. 30s or 5m
    #[arg(value_parser = parse_interval_arg, allow_hyphen_values = true)]
    pub interval: u64,

    /// Directory that receives dirsync.log
    pub log_dir: PathBuf,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_interval_arg(value: &str) -> Result<u64, String> {
    dirsync_core::parse_interval(value).map_err(|e| e.to_string())
}
