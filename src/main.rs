//! Resilient Employee Gateway
//!
//! A gateway over one unreliable upstream employee API, built with Tokio
//! and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────┐
//!                  │                EMPLOYEE GATEWAY                   │
//!                  │                                                   │
//!  Client Request  │  ┌────────┐   ┌──────────┐   ┌────────────────┐  │
//!  ────────────────┼─▶│  http  │──▶│ service  │──▶│ resilient      │  │
//!                  │  │ server │   │ +aggreg. │   │ client         │──┼──▶ Upstream
//!                  │  └────────┘   └──────────┘   └───────┬────────┘  │    Employee API
//!                  │                                      │           │
//!                  │                        ┌─────────────▼─────────┐ │
//!                  │                        │ resilience            │ │
//!                  │                        │ breaker/retry/timeout │ │
//!                  │                        └───────────────────────┘ │
//!                  │  ┌────────────────────────────────────────────┐  │
//!                  │  │        Cross-Cutting Concerns               │  │
//!                  │  │  config  ·  observability (logs, metrics)  │  │
//!                  │  └────────────────────────────────────────────┘  │
//!                  └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use employee_gateway::config::loader::load_config;
use employee_gateway::config::schema::GatewayConfig;
use employee_gateway::http::GatewayServer;
use employee_gateway::observability::metrics;

#[derive(Parser)]
#[command(name = "employee-gateway")]
#[command(about = "Resilient gateway over the mock employee API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "employee_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("employee-gateway v0.1.0 starting");

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        call_timeout_secs = config.upstream.call_timeout_secs,
        retry_max_attempts = config.retries.max_attempts,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics endpoint
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run HTTP server
    let server = GatewayServer::new(&config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
