//! Line-oriented error sink writing to stderr (or any `Write`).
//!
//! Output format, one diagnostic per line:
//!
//! ```text
//! Truncated input: record ended before it was complete: {"type":"keyd
//! Invalid option: unexpected argument '-x' found
//! Exiting due to critical error.
//! ```
//!
//! The notice line follows critical diagnostics only.  The writer is flushed
//! after every diagnostic so stderr readers see it immediately.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::application::report::{Diagnostic, ErrorSink, CRITICAL_NOTICE};

/// [`ErrorSink`] that renders diagnostics as text lines on a writer.
pub struct WriterErrorSink<W> {
    writer: Mutex<W>,
}

/// The sink used by the binary.
pub type StderrErrorSink = WriterErrorSink<std::io::Stderr>;

impl WriterErrorSink<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> WriterErrorSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> ErrorSink for WriterErrorSink<W> {
    fn report(&self, diagnostic: &Diagnostic) {
        debug!(severity = ?diagnostic.severity, "reporting diagnostic");
        let mut w = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        // Nothing useful can be done if stderr itself is gone.
        let _ = writeln!(w, "{diagnostic}");
        if diagnostic.is_critical() {
            let _ = writeln!(w, "{CRITICAL_NOTICE}");
        }
        let _ = w.flush();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
