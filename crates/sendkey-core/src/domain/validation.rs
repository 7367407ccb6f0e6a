//! Semantic validation applied before a keyevent may be dispatched.
//!
//! Mapping already guarantees that every field has the right type; this
//! module decides whether the event carries enough information to be injected.

use thiserror::Error;

use crate::domain::keyevent::Keyevent;

/// Why a well-shaped keyevent was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// None of scancode, virtual key or codepoint was provided.
    #[error("no win_scancode, win_virtualkey or unicode_codepoint given")]
    NoKeyInformation,
}

impl ValidationError {
    /// Classification printed before the message on the error channel.
    pub fn classification(&self) -> &'static str {
        "Refusing to use invalid keyevent"
    }
}

/// Checks a keyevent before dispatch.
///
/// # Errors
///
/// Returns [`ValidationError::NoKeyInformation`] when scancode, virtual key
/// and codepoint are all absent.
pub fn validate_keyevent(event: &Keyevent) -> Result<(), ValidationError> {
    if !event.has_key_information() {
        return Err(ValidationError::NoKeyInformation);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keyevent::EventType;

    #[test]
    fn test_event_without_key_fields_is_rejected() {
        for event_type in [
            EventType::KeyDown,
            EventType::KeyUp,
            EventType::KeyPress,
            EventType::Unspecified,
        ] {
            let ev = Keyevent::new(event_type);
            assert_eq!(validate_keyevent(&ev), Err(ValidationError::NoKeyInformation));
        }
    }

    #[test]
    fn test_extended_flag_alone_is_rejected() {
        let mut ev = Keyevent::new(EventType::KeyDown);
        ev.extended = true;
        assert!(validate_keyevent(&ev).is_err());
    }

    #[test]
    fn test_event_with_scancode_is_valid() {
        let ev = Keyevent::new(EventType::KeyDown).with_scancode(30);
        assert_eq!(validate_keyevent(&ev), Ok(()));
    }

    #[test]
    fn test_unspecified_type_with_codepoint_is_valid() {
        let ev = Keyevent::new(EventType::Unspecified).with_unicode_codepoint(65);
        assert_eq!(validate_keyevent(&ev), Ok(()));
    }

    #[test]
    fn test_classification_string() {
        assert_eq!(
            ValidationError::NoKeyInformation.classification(),
            "Refusing to use invalid keyevent"
        );
    }
}
