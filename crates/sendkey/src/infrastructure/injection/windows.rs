//! Windows key injection via the SendInput API.
//!
//! Each keyevent is expanded by [`plan_strokes`] and submitted in a single
//! `SendInput` call, so the strokes of one event are never interleaved with
//! other input.

#![cfg(target_os = "windows")]

use sendkey_core::Keyevent;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, KEYEVENTF_SCANCODE, KEYEVENTF_UNICODE, VIRTUAL_KEY,
};

use super::{plan_strokes, KeyStroke};
use crate::application::dispatch::{InjectionError, KeyInjector};

/// Windows implementation of [`KeyInjector`] using SendInput.
pub struct WindowsKeyInjector;

impl WindowsKeyInjector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsKeyInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyInjector for WindowsKeyInjector {
    fn inject(&self, event: &Keyevent) -> Result<(), InjectionError> {
        let inputs: Vec<INPUT> = plan_strokes(event)?.iter().map(to_input).collect();
        if inputs.is_empty() {
            return Ok(());
        }

        // SAFETY: `inputs` is a slice of fully initialised KEYBDINPUT records
        // and cbsize is the size of one INPUT structure.
        let accepted = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };

        let submitted = inputs.len() as u32;
        if accepted != submitted {
            // SendInput returns 0 when input is blocked by UIPI or another thread.
            return Err(InjectionError::PartiallyInjected {
                accepted,
                submitted,
            });
        }
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn to_input(stroke: &KeyStroke) -> INPUT {
    let mut flags = KEYBD_EVENT_FLAGS(0);
    if stroke.unicode {
        flags |= KEYEVENTF_UNICODE;
    }
    if stroke.scancode {
        flags |= KEYEVENTF_SCANCODE;
    }
    if stroke.extended {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }
    if stroke.key_up {
        flags |= KEYEVENTF_KEYUP;
    }

    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(stroke.virtual_key),
                wScan: stroke.scan,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sendkey_core::EventType;

    #[test]
    fn test_to_input_sets_unicode_and_keyup_flags() {
        let stroke = KeyStroke {
            scan: 0x41,
            unicode: true,
            key_up: true,
            ..KeyStroke::default()
        };
        let input = to_input(&stroke);
        // SAFETY: to_input always fills the `ki` variant.
        let ki = unsafe { input.Anonymous.ki };
        assert_eq!(ki.wScan, 0x41);
        assert_eq!(ki.dwFlags, KEYEVENTF_UNICODE | KEYEVENTF_KEYUP);
    }

    #[test]
    fn test_to_input_extended_virtual_key() {
        let strokes =
            plan_strokes(&Keyevent::new(EventType::KeyDown).with_virtual_key(0x25, true)).unwrap();
        let input = to_input(&strokes[0]);
        // SAFETY: to_input always fills the `ki` variant.
        let ki = unsafe { input.Anonymous.ki };
        assert_eq!(ki.wVk, VIRTUAL_KEY(0x25));
        assert_eq!(ki.dwFlags, KEYEVENTF_EXTENDEDKEY);
    }
}
