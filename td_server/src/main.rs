//! Tournament directory HTTP server.
//!
//! Serves sites, tournaments, registrations and leaderboards from an
//! in-memory directory.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Error;
use pico_args::Arguments;
use td_server::{
    api,
    config::{ConfigError, ServerConfig},
    logging, metrics,
};
use tournament_directory::{
    DirectoryManager, FixedLatency, LatencySimulator, NoLatency,
};
use tracing::{info, warn};

const HELP: &str = "\
Run the tournament directory server

USAGE:
  td_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:6969]

FLAGS:
  --seed-demo              Start with the demo sites, tournaments and leaderboards
  --latency                Simulate backend latency on every directory call
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  SEED_DEMO_DATA           Same as --seed-demo when true
  SIMULATE_LATENCY         Same as --latency when true
  LATENCY_CREATE_MS        Delay for creations and leaderboard publishing [default: 500]
  LATENCY_LIST_MS          Delay for list calls                           [default: 300]
  LATENCY_LEADERBOARD_MS   Delay for leaderboard reads                    [default: 400]
  LATENCY_REGISTER_MS      Delay for registrations                        [default: 500]
  LATENCY_LOOKUP_MS        Delay for single-record reads                  [default: 300]
  REQUEST_TIMEOUT_SECS     Per-request timeout, 0 disables                [default: 30]
  METRICS_BIND             Prometheus listener address (disabled when unset)
  RUST_LOG                 Log filter [default: info]
";

struct Args {
    bind: Option<SocketAddr>,
    seed_demo: bool,
    latency: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs
            .opt_value_from_str("--bind")
            .map_err(|e| anyhow::anyhow!("Invalid --bind: {}", e))?,
        seed_demo: pargs.contains("--seed-demo"),
        latency: pargs.contains("--latency"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {:?}", remaining);
    }

    logging::init();

    let config = load_config(&args).map_err(|e| anyhow::anyhow!("{}", e))?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus metrics available at http://{}/metrics", addr);
    }

    let latency: Arc<dyn LatencySimulator> = match &config.latency {
        Some(profile) => {
            info!(?profile, "Simulating backend latency");
            Arc::new(FixedLatency::new(profile.clone()))
        }
        None => Arc::new(NoLatency),
    };

    let directory = if config.seed_demo_data {
        DirectoryManager::with_demo_data(latency)
    } else {
        DirectoryManager::new(latency)
    };

    let stats = directory.stats().await;
    metrics::directory_size(stats);
    info!(
        "Directory ready with {} site(s), {} tournament(s), {} registration(s)",
        stats.sites, stats.tournaments, stats.registrations
    );

    let state = api::AppState {
        directory: Arc::new(directory),
    };
    let app = api::create_router(state, config.request_timeout());

    info!("Starting HTTP server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

fn load_config(args: &Args) -> Result<ServerConfig, ConfigError> {
    let config = ServerConfig::from_env(args.bind, args.seed_demo, args.latency)?;
    config.validate()?;
    Ok(config)
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
