//! Serve command implementation
//!
//! This module implements the `serve` command, which runs the HTTP service
//! until a shutdown signal arrives.

use crate::config::load_config;
use crate::domain::ClinicError;
use crate::log_error_with_context;
use crate::server;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Override the listen host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting serve command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if let Some(host) = &self.host {
            tracing::info!(host = %host, "Overriding listen host from CLI");
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            tracing::info!(port = port, "Overriding listen port from CLI");
            config.server.port = port;
        }

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            return Ok(2);
        }

        println!("🏥 MedTrack listening on http://{}", config.server.bind_address());
        if config.notifications.enabled {
            println!("📧 Booking notices via {}", config.notifications.endpoint);
        } else {
            println!("📧 Booking notices disabled (logged only)");
        }

        match server::run(config, shutdown_signal).await {
            Ok(()) => {
                println!("👋 MedTrack stopped");
                Ok(0)
            }
            Err(e @ ClinicError::Io(_)) => {
                log_error_with_context!(&e, "Failed to bind listener");
                println!("❌ Failed to start HTTP listener");
                println!("   Error: {e}");
                Ok(4)
            }
            Err(e @ ClinicError::Configuration(_)) => {
                log_error_with_context!(&e, "Failed to build application state");
                println!("❌ {e}");
                Ok(2)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_config_returns_config_exit_code() {
        let (_tx, rx) = watch::channel(false);
        let code = ServeArgs::default()
            .execute("does-not-exist.toml", rx)
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_invalid_port_override_rejected() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[session]\nsecret = \"0123456789abcdef0123456789abcdef\"\ncookie_secure = false"
        )
        .unwrap();

        let (_tx, rx) = watch::channel(false);
        let args = ServeArgs {
            host: None,
            port: Some(0),
        };
        let code = args
            .execute(file.path().to_str().unwrap(), rx)
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
