//! envswitch CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use envswitch::cli::{Cli, Commands};
use envswitch::engine::EnvironmentEngine;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("envswitch=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("envswitch=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("envswitch starting with args: {:?}", cli);

    let result = match &cli.command {
        Commands::Switch(args) => args
            .run_context()
            .and_then(|context| EnvironmentEngine::new(context).run())
            .map(|summary| {
                tracing::info!(
                    "Switch complete: version {} build {} ({} copied, {} unchanged, {} skipped)",
                    summary.version.version,
                    summary.version.build_number,
                    summary.walk.copied.len(),
                    summary.walk.unchanged.len(),
                    summary.walk.skipped.len()
                );
            }),
        Commands::Finalize(args) => args
            .run_context()
            .and_then(|context| EnvironmentEngine::new(context).finalize())
            .map(|summary| {
                tracing::info!(
                    "Finalize complete: manifest updated: {}, {} variant file(s) removed",
                    summary.manifest_updated,
                    summary.cleanup.deleted.len()
                );
            }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
