//! Dispatcher: routes a mapped keyevent to the injector and/or the echo output.
//!
//! This use case sits at the application layer and delegates to a
//! [`KeyInjector`] trait object for OS-level event injection.  The
//! platform-specific implementations are in the infrastructure layer.
//!
//! Per event, in order:
//!
//! 1. Validate.  An invalid event is reported and dropped: no injection, no echo.
//! 2. Inject, unless the agent runs in dry-run mode.
//! 3. Echo in the configured form, if any.
//! 4. Flush the output so a line-oriented reader sees the event immediately.

use std::sync::Arc;

use sendkey_core::{validate_keyevent, Keyevent};
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};

use crate::application::report::{Diagnostic, ErrorSink};
use crate::domain::AgentConfig;

/// Error type for key injection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectionError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("{field} {value} does not fit the platform's {bits}-bit field")]
    ValueOutOfRange {
        field: &'static str,
        value: u32,
        bits: u8,
    },
    #[error("unicode_codepoint {0:#X} is not a Unicode scalar value")]
    InvalidCodepoint(u32),
    #[error("the OS accepted {accepted} of {submitted} inputs")]
    PartiallyInjected { accepted: u32, submitted: u32 },
}

impl InjectionError {
    /// Classification printed before the message on the error channel.
    pub fn classification(&self) -> &'static str {
        "Injection failed"
    }
}

/// OS-level key injection.
///
/// Only validated events reach this trait.  Each supported OS provides an
/// implementation in the infrastructure layer.
#[cfg_attr(test, mockall::automock)]
pub trait KeyInjector: Send + Sync {
    /// Injects one keyevent as synthetic keyboard input.
    fn inject(&self, event: &Keyevent) -> Result<(), InjectionError>;
}

/// What happened to one dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Failed validation; reported and dropped.
    Rejected,
    /// Passed validation and was routed according to the configuration.
    Dispatched { injected: bool, echoed: bool },
}

/// The dispatch use case.
pub struct Dispatcher<W> {
    config: AgentConfig,
    injector: Arc<dyn KeyInjector>,
    errors: Arc<dyn ErrorSink>,
    output: W,
}

impl<W: AsyncWrite + Unpin> Dispatcher<W> {
    /// Creates a dispatcher writing echo output to `output`.
    pub fn new(
        config: AgentConfig,
        injector: Arc<dyn KeyInjector>,
        errors: Arc<dyn ErrorSink>,
        output: W,
    ) -> Self {
        Self {
            config,
            injector,
            errors,
            output,
        }
    }

    pub fn config(&self) -> AgentConfig {
        self.config
    }

    /// Consumes the dispatcher and returns the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Dispatches one freshly mapped event.
    ///
    /// Validation and injection failures are reported to the error sink and
    /// do not fail this call.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if writing or flushing the echo output fails.
    pub async fn dispatch(&mut self, event: &Keyevent) -> std::io::Result<DispatchOutcome> {
        if let Err(e) = validate_keyevent(event) {
            debug!(event_type = %event.event_type, "rejecting keyevent: {e}");
            self.errors.report(&Diagnostic::from(&e));
            return Ok(DispatchOutcome::Rejected);
        }

        let injected = !self.config.dry_run;
        if injected {
            trace!(?event, "injecting keyevent");
            if let Err(e) = self.injector.inject(event) {
                self.errors.report(&Diagnostic::from(&e));
            }
        }

        let echoed = match self.config.echo_mode.encode(event) {
            Some(text) => {
                self.output.write_all(text.as_bytes()).await?;
                self.output.flush().await?;
                true
            }
            None => false,
        };

        Ok(DispatchOutcome::Dispatched { injected, echoed })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
