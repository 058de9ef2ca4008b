//! Store Gateway
//!
//! Edge authorization gate in front of the store service mesh.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                STORE GATEWAY                  │
//!                      │                                               │
//!   Client Request     │  ┌──────────┐   ┌───────────┐   ┌─────────┐  │
//!   ──────────────────▶│  │   http   │──▶│ security  │──▶│ routing │──┼──▶ Upstream
//!                      │  │  server  │   │   gate    │   │  table  │  │    Services
//!                      │  └──────────┘   └─────┬─────┘   └─────────┘  │
//!                      │                       │                      │
//!                      │                       ▼                      │
//!                      │                ┌────────────┐                │
//!                      │                │  delegate  │────────────────┼──▶ Auth
//!                      │                │  (solve)   │                │    Service
//!                      │                └────────────┘                │
//!                      │                                              │
//!                      │  ┌────────────────────────────────────────┐  │
//!                      │  │          Cross-Cutting Concerns        │  │
//!                      │  │  config │ cors │ observability │ meta  │  │
//!                      │  └────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use store_gateway::config::{load_config, GatewayConfig};
use store_gateway::http::HttpServer;
use store_gateway::lifecycle::Shutdown;
use store_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "store-gateway")]
#[command(about = "Edge authorization gateway for the store service mesh", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "store-gateway starting");

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            tracing::info!("No config file given, using defaults");
            GatewayConfig::default()
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        auth_service = %config.auth.service_url,
        open_routes = config.open_routes.len(),
        upstreams = config.upstreams.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run the HTTP server until Ctrl+C
    let shutdown = Shutdown::new();
    shutdown.listen_for_ctrl_c();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
