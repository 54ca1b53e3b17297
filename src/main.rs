//! # Load Test Node
//!
//! Process entry point. Parses the command line, installs tracing, then drives one
//! [`LoadTestNode`] through initialize → start → (run) → stop.
//!
//! The exit status reflects the node's [`StartupError`](loadtest_node::lifecycle::StartupError):
//! failure if one was captured, success otherwise.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};

use loadtest_node::lifecycle::{setup_tracing, LoadTestNode};
use loadtest_node::registry::FileConfigurationResolver;

#[derive(Parser)]
#[command(name = "loadtest-node")]
#[command(about = "Runs the load test agents configured for this node", long_about = None)]
struct Cli {
    /// Node configuration file
    #[arg(short, long, default_value = "loadtest.toml")]
    config: PathBuf,

    /// Stop after this many seconds instead of waiting for Ctrl+C
    #[arg(short, long)]
    duration_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup tracing once for the entire process
    setup_tracing();

    let mut node = LoadTestNode::new(FileConfigurationResolver::new(cli.config));
    let init_monitor = node.progress_monitor();
    let initialized = node.initialize(&init_monitor).await.is_ok();

    // Picks up the configured node name once initialize has resolved it
    let monitor = node.progress_monitor();
    if initialized && node.start(&monitor).await.is_ok() {
        node.log_state();
        wait_for_shutdown(cli.duration_secs).await;
    }

    if let Err(e) = node.stop(&monitor).await {
        warn!(error = %e, "Shutdown completed with errors");
    }

    match node.startup_error() {
        Some(startup_error) => {
            error!(error = %startup_error, "Load test node did not start");
            ExitCode::FAILURE
        }
        None => {
            info!("Shutdown complete");
            ExitCode::SUCCESS
        }
    }
}

/// Waits for Ctrl+C, or for the run duration to elapse when one is given.
async fn wait_for_shutdown(duration_secs: Option<u64>) {
    let run_for = async {
        match duration_secs {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = run_for => info!("Run duration elapsed"),
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Unable to listen for Ctrl+C"),
        },
    }
}
