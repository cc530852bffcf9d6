//! govgate CLI library
//!
//! The binary in `main.rs` is a thin clap front end over these modules;
//! they are public so the integration tests can drive the API layer
//! against a mock backend.

pub mod api;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
