//! Fallback injector for platforms without an injection backend.
//!
//! The event is still expanded into key strokes, so range errors surface the
//! same way they would on Windows, and the result is logged at `info` level.

use sendkey_core::Keyevent;
use tracing::info;

use super::plan_strokes;
use crate::application::dispatch::{InjectionError, KeyInjector};

/// Logs events instead of injecting them.
#[derive(Debug, Default)]
pub struct LogOnlyInjector;

impl LogOnlyInjector {
    pub fn new() -> Self {
        Self
    }
}

impl KeyInjector for LogOnlyInjector {
    fn inject(&self, event: &Keyevent) -> Result<(), InjectionError> {
        let strokes = plan_strokes(event)?;
        info!(
            event_type = %event.event_type,
            strokes = strokes.len(),
            "no injection backend on this platform; keyevent logged only"
        );
        Ok(())
    }
}
