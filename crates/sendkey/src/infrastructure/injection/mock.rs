//! Recording key injector for tests and embedding.
//!
//! The real injector makes OS API calls that need a desktop session and
//! actually type on the machine running the tests.  [`RecordingInjector`]
//! replaces those calls with in-memory recording so assertions can inspect
//! exactly which events reached the injection boundary, and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let injector = Arc::new(RecordingInjector::new());
//! let pipeline = Pipeline::new(input, output, config, injector.clone(), errors);
//! pipeline.run().await.unwrap();
//!
//! assert_eq!(injector.injected().len(), 1);
//! ```
//!
//! Set `should_fail = true` to simulate an OS failure on every call.

use std::sync::Mutex;

use sendkey_core::Keyevent;

use crate::application::dispatch::{InjectionError, KeyInjector};

/// An injector that records every call without touching the OS.
#[derive(Debug, Default)]
pub struct RecordingInjector {
    /// Every event passed to `inject`, in call order.
    pub events: Mutex<Vec<Keyevent>>,
    /// When `true`, every call records the event and then returns
    /// [`InjectionError::Platform`].
    pub should_fail: bool,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an injector that fails every call.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Returns a snapshot of the recorded events.
    pub fn injected(&self) -> Vec<Keyevent> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl KeyInjector for RecordingInjector {
    fn inject(&self, event: &Keyevent) -> Result<(), InjectionError> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(*event);
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        Ok(())
    }
}
