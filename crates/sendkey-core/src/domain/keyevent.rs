//! The keyevent value: one keyboard action and the fields identifying the key.
//!
//! A [`Keyevent`] is created by the mapper from exactly one input record,
//! consumed by the dispatcher and the encoders, and then dropped.  There is
//! no shared or retained state between events.
//!
//! # Zero means "not provided"
//!
//! On the wire every numeric field uses `0` as "absent".  The model stores
//! these fields as `Option<NonZeroU32>`, so a key code of zero simply cannot
//! be represented.  This mirrors the protocol: a legitimate zero scancode or
//! codepoint is not expressible there either.

use std::num::NonZeroU32;

use serde::Serialize;

/// What the injected key should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Key pressed down.
    KeyDown,
    /// Key released.
    KeyUp,
    /// Key pressed and released.
    KeyPress,
    /// The record carried no recognisable event type.
    #[default]
    #[serde(rename = "nothing")]
    Unspecified,
}

impl EventType {
    /// Returns the wire name used by both echo encoders.
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::KeyDown => "keydown",
            EventType::KeyUp => "keyup",
            EventType::KeyPress => "keypress",
            EventType::Unspecified => "nothing",
        }
    }

    /// Parses a wire name, ignoring ASCII case.
    ///
    /// Anything that is not `keydown`, `keyup` or `keypress` (including the
    /// echo-only name `nothing`) yields [`EventType::Unspecified`].
    pub fn from_wire(name: &str) -> Self {
        if name.eq_ignore_ascii_case("keydown") {
            EventType::KeyDown
        } else if name.eq_ignore_ascii_case("keyup") {
            EventType::KeyUp
        } else if name.eq_ignore_ascii_case("keypress") {
            EventType::KeyPress
        } else {
            EventType::Unspecified
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Keyevent {
    pub event_type: EventType,
    /// Hardware scancode.
    pub scancode: Option<NonZeroU32>,
    /// Platform virtual key code.
    pub virtual_key: Option<NonZeroU32>,
    /// Distinguishes duplicate physical keys; only meaningful with `virtual_key`.
    pub extended: bool,
    /// Character to inject directly instead of a physical key.
    pub unicode_codepoint: Option<NonZeroU32>,
}

impl Keyevent {
    /// Creates an event of the given type with no key fields set.
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            ..Self::default()
        }
    }

    /// Sets the scancode; `0` clears it.
    pub fn with_scancode(self, scancode: u32) -> Self {
        Self {
            scancode: NonZeroU32::new(scancode),
            ..self
        }
    }

    /// Sets the virtual key and its extended flag; a `0` key clears both.
    pub fn with_virtual_key(self, virtual_key: u32, extended: bool) -> Self {
        let virtual_key = NonZeroU32::new(virtual_key);
        Self {
            virtual_key,
            extended: virtual_key.is_some() && extended,
            ..self
        }
    }

    /// Sets the Unicode codepoint; `0` clears it.
    pub fn with_unicode_codepoint(self, codepoint: u32) -> Self {
        Self {
            unicode_codepoint: NonZeroU32::new(codepoint),
            ..self
        }
    }

    /// Returns `true` if at least one key-identifying field is provided.
    pub fn has_key_information(&self) -> bool {
        self.scancode.is_some() || self.virtual_key.is_some() || self.unicode_codepoint.is_some()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
