//! Platform-specific key injection implementations.
//!
//! The correct implementation is selected at compile time via
//! `#[cfg(target_os = ...)]`; [`platform_injector`] returns it as a trait
//! object.  [`plan_strokes`] is the platform-neutral half: it expands one
//! keyevent into the ordered list of key strokes an OS backend submits.

use std::num::NonZeroU32;
use std::sync::Arc;

use sendkey_core::protocol::mapper::{FIELD_SCANCODE, FIELD_VIRTUAL_KEY};
use sendkey_core::{EventType, Keyevent};

use crate::application::dispatch::{InjectionError, KeyInjector};

pub mod log_only;
pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

/// One key transition as submitted to the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyStroke {
    /// Virtual key code; ignored by the OS when `scancode` or `unicode` is set.
    pub virtual_key: u16,
    /// Hardware scancode, or a UTF-16 code unit when `unicode` is set.
    pub scan: u16,
    /// `scan` holds a hardware scancode.
    pub scancode: bool,
    /// `scan` holds a UTF-16 code unit.
    pub unicode: bool,
    pub extended: bool,
    pub key_up: bool,
}

/// Expands `event` into key strokes.
///
/// Physical keys (scancode and/or virtual key) take precedence over the
/// codepoint when both are given.  A codepoint outside the Basic Multilingual
/// Plane becomes a surrogate pair.  `KeyDown` and `KeyUp` produce one phase;
/// `KeyPress` and an unspecified type produce a down phase followed by an up
/// phase.
///
/// # Errors
///
/// Returns [`InjectionError`] if a code does not fit the 16-bit fields the OS
/// expects, or the codepoint is not a Unicode scalar value.
pub fn plan_strokes(event: &Keyevent) -> Result<Vec<KeyStroke>, InjectionError> {
    let phases: &[bool] = match event.event_type {
        EventType::KeyDown => &[false],
        EventType::KeyUp => &[true],
        EventType::KeyPress | EventType::Unspecified => &[false, true],
    };

    let keys: Vec<KeyStroke> = if event.scancode.is_some() || event.virtual_key.is_some() {
        let scan = narrow(FIELD_SCANCODE, event.scancode)?;
        let virtual_key = narrow(FIELD_VIRTUAL_KEY, event.virtual_key)?;
        vec![KeyStroke {
            virtual_key,
            scan,
            scancode: scan != 0,
            extended: event.extended && virtual_key != 0,
            ..KeyStroke::default()
        }]
    } else if let Some(cp) = event.unicode_codepoint {
        let ch = char::from_u32(cp.get()).ok_or(InjectionError::InvalidCodepoint(cp.get()))?;
        let mut units = [0u16; 2];
        ch.encode_utf16(&mut units)
            .iter()
            .map(|&unit| KeyStroke {
                scan: unit,
                unicode: true,
                ..KeyStroke::default()
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(phases
        .iter()
        .flat_map(|&key_up| keys.iter().map(move |k| KeyStroke { key_up, ..*k }))
        .collect())
}

fn narrow(field: &'static str, value: Option<NonZeroU32>) -> Result<u16, InjectionError> {
    value.map_or(Ok(0), |v| {
        u16::try_from(v.get()).map_err(|_| InjectionError::ValueOutOfRange {
            field,
            value: v.get(),
            bits: 16,
        })
    })
}

/// Returns the injector for the platform this binary was built for.
pub fn platform_injector() -> Arc<dyn KeyInjector> {
    #[cfg(target_os = "windows")]
    {
        Arc::new(self::windows::WindowsKeyInjector::new())
    }
    #[cfg(not(target_os = "windows"))]
    {
        Arc::new(log_only::LogOnlyInjector::new())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
