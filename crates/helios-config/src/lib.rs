//! Configuration system for the Helios orrery.
//!
//! Provides runtime-configurable settings that persist to disk as RON
//! files, with CLI overrides via clap and change detection for reloads.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{AssetConfig, CameraConfig, Config, DebugConfig, WindowConfig};
pub use error::ConfigError;
