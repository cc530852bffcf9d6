//! Diagnostic logging for the govgate CLI
//!
//! Everything goes through `tracing`. The global flags pick a [`LogLevel`],
//! `RUST_LOG` overrides it when set, and output lands on stderr or in the
//! `--log-file` given. Request and response bodies are only logged at trace
//! level and always pass through the [`Redactor`] first.

pub mod level;
pub mod redaction;

pub use level::LogLevel;
pub use redaction::{Redactor, REDACTED};

use crate::error::{CliError, CliResult};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Logging options collected from the command line
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub level: LogLevel,
    /// Errors only, regardless of level
    pub quiet: bool,
    pub log_file: Option<PathBuf>,
}

impl LogConfig {
    pub fn from_args(
        verbose: bool,
        debug: bool,
        trace: bool,
        quiet: bool,
        log_file: Option<PathBuf>,
    ) -> Self {
        Self {
            level: LogLevel::from_flags(verbose, debug, trace),
            quiet,
            log_file,
        }
    }

    /// Filter directive, before any `RUST_LOG` override.
    pub fn directive(&self) -> String {
        if self.quiet {
            "error".to_string()
        } else {
            self.level.filter_directive()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        match std::env::var(EnvFilter::DEFAULT_ENV) {
            Ok(value) if !value.trim().is_empty() => EnvFilter::new(value),
            _ => EnvFilter::new(self.directive()),
        }
    }
}

/// Install the global subscriber. Call once, before any command runs.
pub fn init(config: &LogConfig) -> CliResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_target(config.level.is_debug());

    let result = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    CliError::Config(format!("Cannot open log file {}: {e}", path.display()))
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| CliError::Config(format!("Failed to initialise logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins_over_level() {
        let config = LogConfig::from_args(true, true, false, true, None);
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.directive(), "error");
    }

    #[test]
    fn test_default_directive_is_warn() {
        let config = LogConfig::default();
        assert!(config.directive().starts_with("warn"));
    }
}
