// PlaceBoard - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Record Store selection and command dispatch

mod cli;

// Re-export modules from the library crate so that `cli.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use placeboard::app;
pub use placeboard::core;
pub use placeboard::platform;
pub use placeboard::util;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// PlaceBoard - campus placement board.
///
/// Browse and filter internship opportunities, review applications, and
/// record performance feedback against a local record store.
#[derive(Parser, Debug)]
#[command(name = "placeboard", version, about)]
struct Cli {
    /// Record store directory (overrides `[store] data_dir`).
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of the platform default.
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = platform::config::PlatformPaths::resolve();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform_paths.config_file());

    // Config picks the log level, so it is read before logging starts and
    // its problems are reported afterwards.
    let (config, config_problems) = platform::config::load_config(&config_path);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "PlaceBoard starting"
    );

    for problem in &config_problems {
        tracing::warn!(error = %problem, "Config problem");
    }

    // Store directory: CLI override > config > platform default
    let store_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.store_dir.clone())
        .unwrap_or_else(|| platform_paths.default_store_dir());

    tracing::debug!(store = %store_dir.display(), "Record store selected");

    let store = Arc::new(app::store::JsonDirStore::new(store_dir));
    let ctx = cli::Context { store, config };

    if let Err(e) = cli::run(cli.command, &ctx) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
