//! Configuration for procedural terrain generation.
//!
//! Settings persist to disk as `config.ron`, accept partial files (missing
//! sections fall back to defaults), and can be overridden from the command
//! line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{BiomeSettings, CONFIG_FILE_NAME, Config, DebugConfig, default_config_dir};
pub use error::ConfigError;
