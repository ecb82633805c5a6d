//! Configuration management for the guide server.
//!
//! Parses `guide.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `diagrams.kroki_url`
//!
//! ## Example
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [diagrams]
//! kroki_url = "${KROKI_URL:-https://kroki.io}"
//! timeout_secs = 20
//!
//! [diagrams.options]
//! theme = "forest"
//! ```

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override Kroki URL for diagram rendering.
    pub kroki_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "guide.toml";

/// Default Kroki request timeout in seconds.
const DEFAULT_DIAGRAM_TIMEOUT_SECS: u64 = 30;

/// Default time to wait for a page load before serving the loading placeholder.
const DEFAULT_LOADING_TIMEOUT_MS: u64 = 3000;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site branding.
    pub site: SiteConfig,
    /// Diagram rendering configuration (optional section).
    /// When present, `kroki_url` is required.
    diagrams: Option<DiagramsConfigRaw>,
    /// Page loading behaviour.
    pub loading: LoadingConfig,

    /// Resolved diagrams configuration (set after loading).
    #[serde(skip)]
    pub diagrams_resolved: DiagramsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            diagrams: None,
            loading: LoadingConfig::default(),
            diagrams_resolved: DiagramsConfig::default(),
            config_path: None,
        }
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Site branding shown in the sidebar and document title.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Subtitle shown under the logo.
    pub subtitle: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "LangChain4j".to_owned(),
            subtitle: "入门指南".to_owned(),
        }
    }
}

/// Raw diagrams configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DiagramsConfigRaw {
    kroki_url: Option<String>,
    timeout_secs: Option<u64>,
    options: Option<serde_json::Value>,
}

/// Resolved diagram rendering configuration.
#[derive(Debug)]
pub struct DiagramsConfig {
    /// Kroki server URL (`None` disables diagram rendering).
    pub kroki_url: Option<String>,
    /// HTTP timeout for Kroki requests.
    pub timeout: Duration,
    /// Options merged over the diagram engine defaults on first initialization.
    pub options: Option<serde_json::Value>,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            kroki_url: None,
            timeout: Duration::from_secs(DEFAULT_DIAGRAM_TIMEOUT_SECS),
            options: None,
        }
    }
}

/// Page loading configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Milliseconds to wait for a first page load before serving the
    /// loading placeholder.
    pub timeout_ms: u64,
}

impl LoadingConfig {
    /// Loading timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_LOADING_TIMEOUT_MS,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`diagrams.kroki_url`").
        field: String,
        /// Error message (e.g., "${`KROKI_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `guide.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(kroki_url) = &settings.kroki_url {
            self.diagrams_resolved.kroki_url = Some(kroki_url.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse, expand, resolve and validate configuration text.
    fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before resolution
        config.expand_env_vars()?;
        config.resolve()?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_diagrams()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate diagrams configuration.
    fn validate_diagrams(&self) -> Result<(), ConfigError> {
        if let Some(ref kroki_url) = self.diagrams_resolved.kroki_url {
            require_non_empty(kroki_url, "diagrams.kroki_url")?;
            require_http_url(kroki_url, "diagrams.kroki_url")?;
        }

        if self.diagrams_resolved.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "diagrams.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        if let Some(ref options) = self.diagrams_resolved.options
            && !options.is_object()
        {
            return Err(ConfigError::Validation(
                "diagrams.options must be a table".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref mut diagrams) = self.diagrams
            && let Some(ref url) = diagrams.kroki_url
        {
            diagrams.kroki_url = Some(expand::expand_env(url, "diagrams.kroki_url")?);
        }

        Ok(())
    }

    /// Resolve the raw `[diagrams]` section.
    ///
    /// Validates that `kroki_url` is provided when the section exists.
    fn resolve(&mut self) -> Result<(), ConfigError> {
        self.diagrams_resolved = match self.diagrams.take() {
            Some(diagrams) => {
                let kroki_url = diagrams.kroki_url.ok_or_else(|| {
                    ConfigError::Validation(
                        "[diagrams] section requires kroki_url to be set".to_owned(),
                    )
                })?;
                DiagramsConfig {
                    kroki_url: Some(kroki_url),
                    timeout: Duration::from_secs(
                        diagrams.timeout_secs.unwrap_or(DEFAULT_DIAGRAM_TIMEOUT_SECS),
                    ),
                    options: diagrams.options,
                }
            }
            None => DiagramsConfig::default(),
        };

        Ok(())
    }
}
