//! Focusboard Gateway -- HTTP front end for the task document store.
//!
//! An axum server that serves today's task feed to the dashboard and
//! records finished focus sessions as annotations on task pages. Store
//! credentials never reach the dashboard -- they live here.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 127.0.0.1:8787
//! cargo run --bin focusboard-gateway
//!
//! # Run on custom address
//! cargo run --bin focusboard-gateway -- --bind 0.0.0.0:9100
//!
//! # Write a one-shot feed snapshot instead of serving
//! cargo run --bin focusboard-gateway -- --snapshot data/tasks.json
//! ```

use std::sync::Arc;

use clap::Parser;
use focusboard_gateway::config::{GatewayCliArgs, GatewayConfig};
use focusboard_gateway::server::{self, GatewayState};
use focusboard_gateway::store::DocumentStore;

#[tokio::main]
async fn main() {
    let cli = GatewayCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match GatewayConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if config.store_token.is_empty() {
        tracing::warn!("no store token configured; store requests will be unauthenticated");
    }

    let store = match DocumentStore::new(&config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to build store client");
            std::process::exit(1);
        }
    };

    // One-shot snapshot mode: fetch, write, exit.
    if let Some(path) = cli.snapshot {
        match server::write_snapshot(&store, &path).await {
            Ok(count) => {
                tracing::info!(path = %path.display(), count, "feed snapshot written");
            }
            Err(e) => {
                tracing::error!(error = %e, "snapshot failed");
                std::process::exit(1);
            }
        }
        return;
    }

    tracing::info!(addr = %config.bind_addr, "starting focusboard gateway");

    let state = Arc::new(GatewayState::new(store));

    match server::start_server(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "gateway listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "gateway server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start gateway");
            std::process::exit(1);
        }
    }
}
