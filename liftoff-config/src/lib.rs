//! Configuration system for the liftoff update coordinator.
//!
//! This crate provides configuration loading, saving, and default values.
//! It includes:
//!
//! - The top-level [`Config`] (YAML, XDG path, atomic save)
//! - Update coordination settings ([`UpdateConfig`], [`ErrorPolicy`])
//! - Per-user data paths for the persisted version record

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{ErrorPolicy, LogLevel, UpdateConfig};
