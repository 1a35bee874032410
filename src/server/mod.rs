//! HTTP surface
//!
//! An actix-web server exposing the clinic workflows. Sessions travel in an
//! HttpOnly cookie holding a signed token; see [`cookie`] and [`extract`].
//!
//! ```rust,no_run
//! use medtrack::config::load_config;
//! use medtrack::server;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medtrack.toml")?;
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! server::run(config, shutdown_rx).await?;
//! # Ok(())
//! # }
//! ```

pub mod cookie;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use extract::CurrentSession;
pub use routes::configure;
pub use state::AppState;

use crate::config::MedTrackConfig;
use crate::domain::Result;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use tokio::sync::watch;

/// Serve until the shutdown signal flips to `true`
///
/// In-flight requests are allowed to finish before the server stops.
///
/// # Errors
///
/// Returns `ClinicError::Io` if the listener cannot be bound, or an error if
/// the application state cannot be built
pub async fn run(config: MedTrackConfig, mut shutdown: watch::Receiver<bool>) -> Result<()> {
    let state = web::Data::new(AppState::from_config(&config)?);
    let bind_address = config.server.bind_address();

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .disable_signals()
    .bind(&bind_address)?;

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let server = server.run();
    let handle = server.handle();

    tracing::info!(address = %bind_address, "MedTrack listening");

    tokio::spawn(async move {
        while !*shutdown.borrow() {
            if shutdown.changed().await.is_err() {
                return;
            }
        }
        tracing::info!("Stopping HTTP server");
        handle.stop(true).await;
    });

    server.await?;
    tracing::info!("HTTP server stopped");
    Ok(())
}
