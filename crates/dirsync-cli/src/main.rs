//! dirsync CLI
//!
//! Periodically makes a replica directory identical to a source directory.
//!
//! # Usage
//!
//! ```bash
//! dirsync <SOURCE> <REPLICA> <INTERVAL> <LOG_DIR> [--once] [--verbose]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `info`, `debug` with `--verbose`)

mod cli;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use dirsync_core::{DirectorySyncer, SyncLoop, SyncTarget, TracingSink};
use tracing::debug;

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Validate before touching the log so bad invocations leave no trace
    let target = SyncTarget::new(&cli.source, &cli.replica, &cli.log_dir, cli.interval)?;
    logging::init(&target, cli.verbose)?;

    let sink = TracingSink;
    let syncer = DirectorySyncer::new(target, &sink);

    if cli.once {
        syncer
            .run_cycle()
            .map_err(|e| CliError::user(format!("Sync cycle failed: {e}")))?;
        return Ok(());
    }

    debug!(
        source = %syncer.target().source().display(),
        replica = %syncer.target().replica().display(),
        interval_secs = syncer.target().interval().as_secs(),
        "starting sync loop"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(SyncLoop::new(syncer).run(shutdown_signal()));

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("cannot listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    debug!("shutdown requested");
}
