//! Echo encoders: compact and pretty text forms of a [`Keyevent`].
//!
//! Both forms use the input field names, always include `type`, and include
//! each key field only when it is provided, in this fixed order:
//!
//! ```text
//! type, win_scancode, win_virtualkey + win_extended, unicode_codepoint
//! ```
//!
//! Compact output is one line.  Pretty output aligns values in columns and
//! ends with a blank line so consecutive records are visually separated:
//!
//! ```text
//! {"type":         "keypress",
//!  "win_virtualkey":       13,
//!  "win_extended":       false}
//!
//! ```

use std::fmt::Write as _;
use std::num::NonZeroU32;

use serde::Serialize;

use crate::domain::keyevent::{EventType, Keyevent};

/// Which echo form, if any, the dispatcher writes to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoMode {
    /// Write nothing.
    #[default]
    None,
    /// One line per event.
    Compact,
    /// Aligned multi-line block per event.
    Pretty,
}

impl EchoMode {
    /// Encodes `event` in this form; `None` for [`EchoMode::None`].
    pub fn encode(self, event: &Keyevent) -> Option<String> {
        match self {
            EchoMode::None => None,
            EchoMode::Compact => Some(encode_compact(event)),
            EchoMode::Pretty => Some(encode_pretty(event)),
        }
    }
}

/// Serialized shape of a keyevent; field order here is the wire order.
#[derive(Serialize)]
struct WireKeyevent {
    #[serde(rename = "type")]
    event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    win_scancode: Option<NonZeroU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    win_virtualkey: Option<NonZeroU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    win_extended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unicode_codepoint: Option<NonZeroU32>,
}

impl From<&Keyevent> for WireKeyevent {
    fn from(ev: &Keyevent) -> Self {
        Self {
            event_type: ev.event_type,
            win_scancode: ev.scancode,
            win_virtualkey: ev.virtual_key,
            // The extended flag travels only alongside a virtual key.
            win_extended: ev.virtual_key.map(|_| ev.extended),
            unicode_codepoint: ev.unicode_codepoint,
        }
    }
}

/// Encodes `event` as a single JSON line terminated by `\n`.
///
/// # Examples
///
/// ```rust
/// use sendkey_core::{encode_compact, EventType, Keyevent};
///
/// let ev = Keyevent::new(EventType::KeyDown).with_scancode(30);
/// assert_eq!(encode_compact(&ev), "{\"type\":\"keydown\",\"win_scancode\":30}\n");
/// ```
pub fn encode_compact(event: &Keyevent) -> String {
    // Serializing a struct of strings, integers and booleans cannot fail.
    let mut line = serde_json::to_string(&WireKeyevent::from(event)).unwrap_or_default();
    line.push('\n');
    line
}

/// Encodes `event` as an aligned multi-line block terminated by `}\n\n`.
pub fn encode_pretty(event: &Keyevent) -> String {
    let mut out = String::with_capacity(128);
    let quoted = format!("\"{}\"", event.event_type.as_str());
    // Writing into a String is infallible.
    let _ = write!(out, "{{\"type\":         {quoted:>10}");
    if let Some(sc) = event.scancode {
        let _ = write!(out, ",\n \"win_scancode\":      {:>5}", sc.get());
    }
    if let Some(vk) = event.virtual_key {
        let _ = write!(
            out,
            ",\n \"win_virtualkey\":    {:>5},\n \"win_extended\":       {}",
            vk.get(),
            event.extended
        );
    }
    if let Some(cp) = event.unicode_codepoint {
        let _ = write!(out, ",\n \"unicode_codepoint\": {}", cp.get());
    }
    out.push_str("}\n\n");
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
