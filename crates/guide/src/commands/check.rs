//! `guide check` command implementation.
//!
//! Renders every routed page through the configured diagram engine and
//! reports pages that failed to load or contain fallback diagrams.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use guide_config::{CliSettings, Config};
use guide_server::{create_site, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover guide.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Kroki server URL for diagram rendering (overrides config).
    #[arg(long, env = "GUIDE_KROKI_URL")]
    kroki_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Outcome of checking one page.
#[derive(Debug, PartialEq, Eq)]
enum PageStatus {
    Ok { diagrams: usize },
    DiagramFailures { failures: usize, diagrams: usize },
    Failed(String),
}

impl PageStatus {
    fn from_counts(diagrams: usize, failures: usize) -> Self {
        if failures == 0 {
            Self::Ok { diagrams }
        } else {
            Self::DiagramFailures { failures, diagrams }
        }
    }

    fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any page has a failure.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            kroki_url: self.kroki_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let server_config = server_config_from_config(&config, String::new(), self.verbose);
        let site = create_site(&server_config);

        if site.diagrams_enabled() {
            output.info("Checking pages with diagram rendering");
        } else {
            output.warning("Diagram rendering disabled, checking front matter and markdown only");
        }

        let start = Instant::now();
        let results = site.load_all();
        let total = results.len();
        let mut failed = 0;

        for (path, result) in results {
            let status = match result {
                Ok(page) => PageStatus::from_counts(page.diagram_count, page.diagram_failures),
                Err(e) => PageStatus::Failed(e.to_string()),
            };
            if !status.is_ok() {
                failed += 1;
            }
            report(&output, path, &status, self.verbose);
        }

        let elapsed = start.elapsed();
        tracing::info!(
            pages = total,
            failed,
            elapsed_ms = elapsed.as_millis(),
            "Check finished"
        );

        output.rule();
        let summary = format!("Checked {total} pages in {:.1}s", elapsed.as_secs_f64());
        if failed == 0 {
            output.success(&summary);
            Ok(())
        } else {
            output.warning(&summary);
            Err(CliError::Check { failed, total })
        }
    }
}

fn report(output: &Output, path: &str, status: &PageStatus, verbose: bool) {
    match status {
        PageStatus::Ok { diagrams } => {
            if verbose {
                output.info(&format!("  ok    {path} ({diagrams} diagrams)"));
            }
        }
        PageStatus::DiagramFailures { failures, diagrams } => {
            output.warning(&format!(
                "  WARN  {path}: {failures} of {diagrams} diagrams failed"
            ));
        }
        PageStatus::Failed(message) => {
            output.error(&format!("  FAIL  {path}: {message}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_from_counts() {
        assert_eq!(PageStatus::from_counts(0, 0), PageStatus::Ok { diagrams: 0 });
        assert_eq!(PageStatus::from_counts(3, 0), PageStatus::Ok { diagrams: 3 });
        assert_eq!(
            PageStatus::from_counts(3, 1),
            PageStatus::DiagramFailures {
                failures: 1,
                diagrams: 3
            }
        );
    }

    #[test]
    fn test_only_ok_is_ok() {
        assert!(PageStatus::Ok { diagrams: 2 }.is_ok());
        assert!(!PageStatus::from_counts(1, 1).is_ok());
        assert!(!PageStatus::Failed("bad front matter".to_owned()).is_ok());
    }
}
