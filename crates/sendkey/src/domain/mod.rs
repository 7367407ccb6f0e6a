//! Domain layer for sendkey.
//!
//! Holds the plain configuration value shared by the application layer.  No
//! I/O, no argument parsing, no environment reads happen here.

pub mod config;

pub use config::{AgentConfig, ConfigError};
