//! Configuration management for the govgate CLI

mod paths;
mod settings;

pub use paths::{ConfigPaths, CONFIG_DIR_ENV};
pub use settings::{
    Backoff, Config, RetrySettings, API_URL_ENV, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS,
};
