//! Admission gate for the couples movie recommender.
//!
//! Stands between the browser and the expensive AI/metadata calls:
//! every user action passes the auth gate, the per-session rate
//! limiter, and the input sanitizers before anything costly runs.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use admission_gate::config::loader::load_config;
use admission_gate::config::validation::normalize_config;
use admission_gate::{GateConfig, GateServer};

#[derive(Parser, Debug)]
#[command(name = "admission-gate", about = "Request-admission gate for the movie recommender")]
struct Args {
    /// Path to the TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Config first so its log level can seed the subscriber.
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            let mut config = GateConfig::default();
            normalize_config(&mut config);
            config
        }
    };

    admission_gate::observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        block_secs = config.rate_limit.block_secs,
        auth_delay_ms = config.auth.failure_delay_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            admission_gate::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = GateServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
