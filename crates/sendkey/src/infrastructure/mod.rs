//! Infrastructure layer for sendkey.
//!
//! Contains OS-specific adapters and process plumbing:
//! - `cli`: command-line flags → `AgentConfig`
//! - `error_sink`: stderr diagnostics
//! - `injection`: OS key injection backends (Windows SendInput, log-only fallback, recorder)

pub mod cli;
pub mod error_sink;
pub mod injection;
