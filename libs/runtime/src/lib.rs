//! Process-level plumbing shared by the booking binaries: layered
//! configuration loading and `tracing` initialization.

pub mod config;
pub mod logging;

pub use config::{
    default_logging_config, AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section,
    ServerConfig,
};
