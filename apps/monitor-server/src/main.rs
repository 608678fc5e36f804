//! Monitoring report analysis server
//!
//! REST API over the analysis engine. Accepts uploaded monitoring
//! report PDFs and returns extracted metrics, page-level evidence and
//! the risk-tier classification with its reasoning trail.

use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod pdf;
#[cfg(test)]
mod tests;

/// Command-line arguments for the monitoring server
#[derive(Parser, Debug)]
#[command(name = "monitor-server")]
#[command(about = "Analysis server for construction-monitoring reports")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5002")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = build_router();

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Router with CORS, request tracing and the raised body limit. The
/// limit must cover the base64-inflated upload cap; axum's 2 MB
/// default would cut off real reports.
pub fn build_router() -> Router {
    // CORS for the upload frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::handle_health))
        .route("/api/analyze-report", post(api::handle_analyze_report))
        .layer(DefaultBodyLimit::max(api::MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
