//! The record pipeline: read → decode → map → dispatch, one record at a time.
//!
//! # Flow
//!
//! ```text
//! AsyncRead ─► RecordReader ─► map_keyevent ─► Dispatcher ─► AsyncWrite
//!                  │                 │              │
//!                  └── DecodeError ──┴─ MappingError ┴──► ErrorSink
//! ```
//!
//! Records are processed strictly in input order.  The only suspension point
//! is [`RecordReader::next_record`] waiting for more bytes; nothing else
//! awaits except flushing the echo output.

use std::sync::Arc;

use sendkey_core::protocol::DecodeResult;
use sendkey_core::{map_keyevent, StreamDecoder};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{debug, trace};

use crate::application::dispatch::{DispatchOutcome, Dispatcher, KeyInjector};
use crate::application::report::{Diagnostic, ErrorSink};
use crate::domain::AgentConfig;

/// Read buffer size for the input stream.
const READ_CHUNK: usize = 8 * 1024;

/// Failures that end the pipeline.  Record-level errors never do.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The reader of our output went away (broken pipe).
    #[error("output stream closed")]
    OutputClosed,

    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),
}

impl PipelineError {
    fn from_output(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            PipelineError::OutputClosed
        } else {
            PipelineError::Output(e)
        }
    }
}

/// Counters reported when the input ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineStats {
    /// Records the decoder produced, good or bad.
    pub records: u64,
    /// Records that passed validation and were routed.
    pub dispatched: u64,
    /// Records dropped with a diagnostic.
    pub rejected: u64,
}

/// Lazy sequence of decoded records pulled from an async byte stream.
pub struct RecordReader<R> {
    input: R,
    decoder: StreamDecoder,
    buf: Box<[u8]>,
}

impl<R: AsyncRead + Unpin> RecordReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            decoder: StreamDecoder::new(),
            buf: vec![0u8; READ_CHUNK].into_boxed_slice(),
        }
    }

    /// Returns the next decoded record, reading more input as needed.
    ///
    /// Returns `Ok(None)` once the input has ended and every record,
    /// including a final truncated one, has been returned.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if reading the input fails.
    pub async fn next_record(&mut self) -> std::io::Result<Option<DecodeResult>> {
        loop {
            if let Some(result) = self.decoder.next_result() {
                return Ok(Some(result));
            }
            if self.decoder.is_exhausted() {
                return Ok(None);
            }
            let n = match self.input.read(&mut self.buf).await {
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if n == 0 {
                trace!("end of input");
                self.decoder.finish();
            } else {
                trace!(bytes = n, "read input chunk");
                self.decoder.push(&self.buf[..n]);
            }
        }
    }
}

/// The whole agent loop for one input and one output stream.
pub struct Pipeline<R, W> {
    records: RecordReader<R>,
    dispatcher: Dispatcher<W>,
    errors: Arc<dyn ErrorSink>,
}

impl<R, W> Pipeline<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        input: R,
        output: W,
        config: AgentConfig,
        injector: Arc<dyn KeyInjector>,
        errors: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            records: RecordReader::new(input),
            dispatcher: Dispatcher::new(config, injector, Arc::clone(&errors), output),
            errors,
        }
    }

    /// Processes records until the input ends.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] only for stream-level I/O failures.
    pub async fn run(self) -> Result<PipelineStats, PipelineError> {
        self.run_with_output().await.map(|(stats, _)| stats)
    }

    /// Like [`run`](Self::run), but also hands back the output stream.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] only for stream-level I/O failures.
    pub async fn run_with_output(mut self) -> Result<(PipelineStats, W), PipelineError> {
        let mut stats = PipelineStats::default();
        debug!(config = ?self.dispatcher.config(), "pipeline started");

        while let Some(record) = self
            .records
            .next_record()
            .await
            .map_err(PipelineError::Input)?
        {
            stats.records += 1;

            let value = match record {
                Ok(value) => value,
                Err(e) => {
                    self.errors.report(&Diagnostic::from(&e));
                    stats.rejected += 1;
                    continue;
                }
            };

            let event = match map_keyevent(&value) {
                Ok(event) => event,
                Err(e) => {
                    self.errors.report(&Diagnostic::from(&e));
                    stats.rejected += 1;
                    continue;
                }
            };

            match self
                .dispatcher
                .dispatch(&event)
                .await
                .map_err(PipelineError::from_output)?
            {
                DispatchOutcome::Rejected => stats.rejected += 1,
                DispatchOutcome::Dispatched { .. } => stats.dispatched += 1,
            }
        }

        debug!(?stats, "input ended");
        Ok((stats, self.dispatcher.into_output()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
