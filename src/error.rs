//! Errors raised while setting the driver up
//!
//! Per-frame calls never fail; invalid queries read as "no input".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown button name: {0}")]
    UnknownButton(String),

    #[error("Controller backend error: {0}")]
    Backend(String),
}
