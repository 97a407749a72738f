//! TrashBot Dashboard Server
//!
//! Hosts the dashboard, accepts reports from the vision pipeline and the
//! arm controller, and streams the combined state to every open dashboard.
//!
//! Run with: cargo run --bin trashbot
//!
//! # Configuration
//!
//! Settings come from (lowest to highest precedence): built-in defaults,
//! a TOML file, `TRASHBOT_*` environment variables, command-line flags.
//! See `trashbot --print-config` for the file format.

use clap::Parser;
use std::path::PathBuf;
use trashbot::api::{serve, AppState};
use trashbot::config::{generate_default_config, Config};

#[derive(Parser)]
#[command(name = "trashbot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live dashboard host for the TrashBot sorting robot")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory with the built dashboard
    #[arg(long)]
    web_root: Option<PathBuf>,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(web_root) = args.web_root {
        config.server.web_root = web_root;
    }

    trashbot::logging::init(&config.logging)?;

    tracing::info!("Starting TrashBot dashboard v{}", env!("CARGO_PKG_VERSION"));

    let api_config = config.server.api_config();
    let hub_config = config.server.hub_config();

    if !api_config.web_root.is_dir() {
        tracing::warn!(
            "Web root {:?} not found; build the dashboard with `trunk build` in dashboard/",
            api_config.web_root
        );
    }
    tracing::info!("Max dashboard connections: {}", hub_config.max_connections);

    let state = AppState::with_ws_config(api_config.clone(), hub_config);
    serve(state, &api_config).await?;

    tracing::info!("TrashBot dashboard stopped");
    Ok(())
}
