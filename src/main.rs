//! Complex numbers · interactive lesson backend
//!
//! - Axum HTTP + WebSocket API around the exercise engine
//! - Per-session exercise and recap caching
//! - Static lesson content (theory, LaTeX and text downloads)
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   LESSON_CONFIG_PATH : path to TOML config (engine constants + labels)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod config;
mod domain;
mod engine;
mod lesson;
mod logic;
mod plane;
mod protocol;
mod routes;
mod state;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::routes::build_router;
use crate::state::AppState;

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared application state (session store + lesson config).
  let state = Arc::new(AppState::new());

  let app = build_router(state);

  let port = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .unwrap_or(DEFAULT_PORT);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "complex_lesson", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "complex_lesson", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "complex_lesson", error = %e, "Failed to listen for Ctrl-C; running until killed");
    std::future::pending::<()>().await;
  }
  info!(target: "complex_lesson", "Shutdown signal received");
}
