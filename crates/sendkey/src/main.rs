//! sendkey — entry point.
//!
//! Reads a stream of JSON keyevents on stdin, injects each valid one into the
//! operating system's input queue, and optionally echoes it on stdout.
//!
//! # Usage
//!
//! ```text
//! keyboa-capture | sendkey -o
//! echo '{"type":"keypress","unicode_codepoint":65}' | sendkey -d -p
//! ```
//!
//! # Output channels
//!
//! - stdout: echoed keyevents only (compact with `-o`, pretty with `-p`).
//! - stderr: one line per diagnostic, plus `tracing` logs filtered by
//!   `RUST_LOG` (default `warn`).
//!
//! # Exit status
//!
//! | Situation                          | Status |
//! |------------------------------------|--------|
//! | End of input, or stdout closed     | 0      |
//! | SIGINT / SIGTERM                   | 0      |
//! | Bad option or stream I/O failure   | 1      |
//!
//! # Architecture overview
//!
//! ```text
//! stdin bytes
//!   → sendkey_core::StreamDecoder   (record framing, JSON)
//!   → sendkey_core::map_keyevent    (JSON → Keyevent)
//!   → Dispatcher                    (validate, inject, echo)
//!       ↳ KeyInjector (SendInput on Windows, log-only elsewhere)
//!       ↳ stdout (EchoMode)
//!   errors → StderrErrorSink
//! ```

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sendkey::application::{Diagnostic, ErrorSink, Pipeline, PipelineError};
use sendkey::infrastructure::cli::{parse_args, Startup};
use sendkey::infrastructure::error_sink::StderrErrorSink;
use sendkey::infrastructure::injection::platform_injector;

const SIGNAL_NOTICE: &str = "Quitting due to signal.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // stdout carries echoed events, so logs must go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let errors: Arc<dyn ErrorSink> = Arc::new(StderrErrorSink::stderr());

    // ── Parse CLI arguments ───────────────────────────────────────────────────
    let config = match parse_args(std::env::args_os()) {
        Ok(Startup::Run(config)) => config,
        Ok(Startup::ShowInfo(text)) => {
            let mut out = std::io::stdout();
            write!(out, "{text}")
                .and_then(|()| out.flush())
                .context("failed to write to stdout")?;
            return Ok(());
        }
        Err(e) => exit_critical(errors.as_ref(), Diagnostic::from(&e)),
    };

    info!(
        dry_run = config.dry_run,
        echo = ?config.echo_mode,
        "sendkey starting"
    );

    let pipeline = Pipeline::new(
        tokio::io::stdin(),
        tokio::io::stdout(),
        config,
        platform_injector(),
        Arc::clone(&errors),
    );

    // ── Main loop ─────────────────────────────────────────────────────────────
    tokio::select! {
        result = pipeline.run() => match result {
            Ok(stats) => {
                info!(
                    records = stats.records,
                    dispatched = stats.dispatched,
                    rejected = stats.rejected,
                    "end of input"
                );
                Ok(())
            }
            Err(PipelineError::OutputClosed) => {
                errors.report(&Diagnostic::non_critical(
                    "Output closed",
                    "stdout reader went away; stopping",
                ));
                Ok(())
            }
            Err(e) => exit_critical(
                errors.as_ref(),
                Diagnostic::critical("I/O error", e.to_string()),
            ),
        },
        () = shutdown_signal() => {
            info!("received termination signal; shutting down");
            let mut err = std::io::stderr();
            let _ = writeln!(err, "{SIGNAL_NOTICE}");
            let _ = err.flush();
            std::process::exit(0);
        }
    }
}

/// Reports a critical diagnostic (which appends the exit notice) and exits 1.
fn exit_critical(errors: &dyn ErrorSink, diagnostic: Diagnostic) -> ! {
    errors.report(&diagnostic);
    std::process::exit(1);
}

/// Completes on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
///
/// A handler that cannot be installed never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            debug!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                debug!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
