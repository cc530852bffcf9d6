//! Verbosity levels selected by the global flags
//!
//! Levels are cumulative: Debug includes Verbose, Trace includes Debug.

use std::fmt;

/// Verbosity level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Warnings and errors only (default)
    #[default]
    Normal = 0,
    /// Progress messages for each operation
    Verbose = 1,
    /// HTTP method, URL, status code, timing
    Debug = 2,
    /// Redacted request and response bodies
    Trace = 3,
}

impl LogLevel {
    /// Highest level requested by the flags.
    pub fn from_flags(verbose: bool, debug: bool, trace: bool) -> Self {
        if trace {
            Self::Trace
        } else if debug {
            Self::Debug
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    pub fn is_debug(&self) -> bool {
        *self >= Self::Debug
    }

    pub fn is_trace(&self) -> bool {
        *self >= Self::Trace
    }

    /// `EnvFilter` directive for this level. Dependencies stay at `warn`.
    pub fn filter_directive(&self) -> String {
        let own = match self {
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        format!("warn,govgate_cli={own},govgate={own},govgate_core={own}")
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Verbose => "VERBOSE",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
