//! Error reporting: diagnostics and the [`ErrorSink`] capability.
//!
//! Every failure in the agent, from a malformed input record to an invalid
//! command-line flag, becomes one [`Diagnostic`] handed to the sink injected
//! at start-up.  The sink renders it as a single line:
//!
//! ```text
//! <classification>: <message>
//! ```

use std::borrow::Cow;
use std::fmt;

use sendkey_core::{DecodeError, MappingError, ValidationError};

use crate::application::dispatch::InjectionError;
use crate::domain::ConfigError;

/// Notice printed after a critical diagnostic, just before the process exits.
pub const CRITICAL_NOTICE: &str = "Exiting due to critical error.";

/// Whether the process can continue after a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Logged; processing resumes with the next record.
    NonCritical,
    /// Logged with [`CRITICAL_NOTICE`]; the process exits with status 1.
    Critical,
}

/// One line on the error channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub classification: Cow<'static, str>,
    pub message: String,
}

impl Diagnostic {
    pub fn non_critical(
        classification: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::NonCritical,
            classification: classification.into(),
            message: message.into(),
        }
    }

    pub fn critical(
        classification: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Critical,
            classification: classification.into(),
            message: message.into(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.classification, self.message)
    }
}

/// Record-level errors are all recoverable.
macro_rules! non_critical_from {
    ($($err:ty),+ $(,)?) => {
        $(
            impl From<&$err> for Diagnostic {
                fn from(err: &$err) -> Self {
                    Diagnostic::non_critical(err.classification(), err.to_string())
                }
            }
        )+
    };
}

non_critical_from!(DecodeError, MappingError, ValidationError, InjectionError);

impl From<&ConfigError> for Diagnostic {
    fn from(err: &ConfigError) -> Self {
        Diagnostic::critical(err.classification(), err.to_string())
    }
}

/// Destination for diagnostics.
///
/// Implementations must not exit the process themselves; the caller decides
/// what happens after a critical diagnostic has been reported.
pub trait ErrorSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
