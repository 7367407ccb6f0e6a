//! Application layer: use cases for the sendkey agent.
//!
//! - [`dispatch`] – validates a keyevent and routes it to injection and echo.
//! - [`pipeline`] – pulls records from the input stream and feeds the dispatcher.
//! - [`report`]   – diagnostics and the error sink capability.

pub mod dispatch;
pub mod pipeline;
pub mod report;

pub use dispatch::{DispatchOutcome, Dispatcher, InjectionError, KeyInjector};
pub use pipeline::{Pipeline, PipelineError, PipelineStats, RecordReader};
pub use report::{Diagnostic, ErrorSink, Severity, CRITICAL_NOTICE};
