//! `encrypter-server` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Build the single [`Encrypter`] from the configured key and cipher.
//! 4. Build the Axum router and start the HTTP server.

mod config;
mod server;
mod telemetry;

use anyhow::{Context, Result};
use encrypter::{Encrypter, JsonCodec};
use tracing::info;

use config::Config;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Encrypter
    // -----------------------------------------------------------------------
    let cipher = cfg.cipher_config()?;
    let key = cfg.key()?;
    let encrypter = Encrypter::new(key.as_bytes(), cipher, JsonCodec::new())
        .context("failed to construct encrypter")?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        cipher = %cipher,
        listen_port = cfg.listen_port,
        "encrypter-server starting"
    );

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let router = server::router::build(AppState::new(encrypter));

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router).await?;

    Ok(())
}
