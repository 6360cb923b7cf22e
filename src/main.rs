//! Employee Gateway
//!
//! HTTP façade exposing employee operations on top of a third-party
//! employee REST API.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                 EMPLOYEE GATEWAY                 │
//!                        │                                                  │
//!     Client Request     │  ┌─────────┐    ┌────────────┐    ┌──────────┐   │
//!     ───────────────────┼─▶│  http   │───▶│ employees  │───▶│ upstream │───┼──▶ Employee API
//!                        │  │ server  │    │ repository │    │  client  │   │
//!                        │  └────┬────┘    └─────┬──────┘    └──────────┘   │
//!     Client Response    │       │               │ on failure               │
//!     ◀──────────────────┼───────┘               ▼                          │
//!                        │                 ┌────────────┐                   │
//!                        │                 │  fallback  │                   │
//!                        │                 │  dataset   │                   │
//!                        │                 └────────────┘                   │
//!                        │                                                  │
//!                        │  config · observability · lifecycle              │
//!                        └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use employee_gateway::config::{self, GatewayConfig};
use employee_gateway::http::HttpServer;
use employee_gateway::lifecycle::{signals, Shutdown};
use employee_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "employee-gateway")]
#[command(about = "HTTP gateway for the employee REST API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => {
            let config = GatewayConfig::default();
            config::validation::validate_config(&config).map_err(config::ConfigError::Validation)?;
            config
        }
    };

    logging::init(&config.observability)?;

    tracing::info!("employee-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let stop = shutdown.signal();
    signals::spawn_signal_handler(shutdown);

    server.run(listener, stop).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
