//! CLI error types.

use guide_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Server(String),

    #[error("{failed} of {total} pages failed")]
    Check { failed: usize, total: usize },
}
