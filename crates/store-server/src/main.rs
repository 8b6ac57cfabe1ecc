//! Extension store HTTP server.
//!
//! Thin, stateless translation between HTTP and the resolver: three read
//! routes keyed by store URL and extension name, plus a webhook endpoint
//! dispatching chat commands onto the same operations.
//!
//! # Usage
//!
//! ```bash
//! store-server [--bind <addr>]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `store_server=info`)
//! - `STORE_BIND`: Listen address, same as `--bind`

mod auth;
mod error;
mod routes;

use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// HTTP server for the git-backed extension store
#[derive(Parser)]
#[command(name = "store-server")]
#[command(about = "HTTP server for the git-backed extension store")]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080", env = "STORE_BIND")]
    bind: SocketAddr,
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: store_resolver::ExtensionStore,
    pub http: reqwest::Client,
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/versions/{extension}", get(routes::extensions::get_versions))
        .route(
            "/checkout/{extension}/{version}",
            get(routes::extensions::get_checkout),
        )
        .route("/extensions", get(routes::extensions::get_store))
        .route("/webhook", post(routes::webhook::post_webhook))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "store_server=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    let state = AppState {
        resolver: store_resolver::ExtensionStore::new(),
        http: reqwest::Client::new(),
    };

    tracing::info!(bind = %args.bind, "starting extension store server");
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
