//! `guide serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use guide_config::{CliSettings, Config};
use guide_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover guide.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Kroki server URL for diagram rendering (overrides config).
    #[arg(long, env = "GUIDE_KROKI_URL")]
    kroki_url: Option<String>,

    /// Enable verbose output (page timing and diagram warnings).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            kroki_url: self.kroki_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        if let Some(kroki_url) = &config.diagrams_resolved.kroki_url {
            output.info(&format!("Kroki URL: {kroki_url}"));
        } else {
            output.warning("Diagram rendering: disabled (no kroki_url in config)");
        }

        let server_config = server_config_from_config(&config, version.to_owned(), self.verbose);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
