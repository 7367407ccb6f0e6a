//! Agent configuration types.
//!
//! [`AgentConfig`] is fixed for the lifetime of the process.  It is built
//! once from the command line (see `infrastructure::cli`) and then passed by
//! value to the dispatcher; nothing reads flags from global state.

use sendkey_core::EchoMode;
use thiserror::Error;

/// Process-wide dispatch settings.
///
/// `dry_run` and `echo_mode` are independent: injection can run with or
/// without echo, and echo can run with or without injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AgentConfig {
    /// Validate and echo, but never call the injector.
    pub dry_run: bool,
    /// What, if anything, to write to stdout per dispatched event.
    pub echo_mode: EchoMode,
}

impl AgentConfig {
    /// Resolves the echo flags; pretty wins when both are requested.
    pub fn from_flags(dry_run: bool, echo: bool, pretty: bool) -> Self {
        let echo_mode = if pretty {
            EchoMode::Pretty
        } else if echo {
            EchoMode::Compact
        } else {
            EchoMode::None
        };
        Self { dry_run, echo_mode }
    }
}

/// Invalid start-up configuration.  Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A recognised option that has no implementation.
    #[error("Not implemented")]
    NotImplemented { option: &'static str },

    /// An unknown flag, a stray argument, or a malformed value.
    #[error("{0}")]
    InvalidOption(String),
}

impl ConfigError {
    /// Classification printed before the message on the error channel.
    pub fn classification(&self) -> &'static str {
        match self {
            ConfigError::NotImplemented { option } => *option,
            ConfigError::InvalidOption(_) => "Invalid option",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
