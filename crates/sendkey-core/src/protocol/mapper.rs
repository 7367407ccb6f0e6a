//! Maps a generic JSON value onto a [`Keyevent`].
//!
//! Expected shape (all keys optional, unknown keys ignored):
//!
//! ```json
//! {"type": "keydown", "win_scancode": 30, "win_virtualkey": 65,
//!  "win_extended": false, "unicode_codepoint": 97}
//! ```
//!
//! `eventtype` is accepted in place of `type`.  The event type never fails to
//! map: a missing, null, non-string or unknown type becomes
//! [`EventType::Unspecified`].  Numeric and boolean fields are strict: a
//! present value of the wrong type is a [`MappingError`], never coerced.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::keyevent::{EventType, Keyevent};

/// Wire name of the scancode field.
pub const FIELD_SCANCODE: &str = "win_scancode";
/// Wire name of the virtual key field.
pub const FIELD_VIRTUAL_KEY: &str = "win_virtualkey";
/// Wire name of the extended flag.
pub const FIELD_EXTENDED: &str = "win_extended";
/// Wire name of the codepoint field.
pub const FIELD_UNICODE_CODEPOINT: &str = "unicode_codepoint";

/// A well-formed JSON value that does not describe a keyevent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// The record is not a JSON object.
    #[error("expected a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// A numeric field held something other than an integer.
    #[error("field `{field}` must be a non-negative integer, got {found}")]
    NotAnInteger { field: &'static str, found: String },

    /// A numeric field held an integer outside `0..=u32::MAX`.
    #[error("field `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: String },

    /// The extended flag held something other than a boolean.
    #[error("field `{field}` must be a boolean, got {found}")]
    NotABoolean { field: &'static str, found: String },
}

impl MappingError {
    /// Classification printed before the message on the error channel.
    pub fn classification(&self) -> &'static str {
        "Invalid keyevent"
    }
}

/// Builds a [`Keyevent`] from one decoded JSON value.
///
/// The result may still fail validation (for example when no key field is
/// set); mapping only checks shape and types.
///
/// # Errors
///
/// Returns [`MappingError`] if `value` is not an object or a known field has
/// the wrong type or range.
pub fn map_keyevent(value: &Value) -> Result<Keyevent, MappingError> {
    let obj = value.as_object().ok_or(MappingError::NotAnObject {
        found: kind_of(value),
    })?;

    let event_type = obj
        .get("type")
        .filter(|v| !v.is_null())
        .or_else(|| obj.get("eventtype"))
        .and_then(Value::as_str)
        .map(EventType::from_wire)
        .unwrap_or_default();

    Ok(Keyevent::new(event_type)
        .with_scancode(read_u32(obj, FIELD_SCANCODE)?)
        .with_virtual_key(
            read_u32(obj, FIELD_VIRTUAL_KEY)?,
            read_bool(obj, FIELD_EXTENDED)?,
        )
        .with_unicode_codepoint(read_u32(obj, FIELD_UNICODE_CODEPOINT)?))
}

/// Reads an optional unsigned field; absent and `null` read as zero.
fn read_u32(obj: &Map<String, Value>, field: &'static str) -> Result<u32, MappingError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                u32::try_from(v).map_err(|_| MappingError::OutOfRange {
                    field,
                    value: n.to_string(),
                })
            } else if n.is_i64() {
                Err(MappingError::OutOfRange {
                    field,
                    value: n.to_string(),
                })
            } else {
                Err(MappingError::NotAnInteger {
                    field,
                    found: n.to_string(),
                })
            }
        }
        Some(other) => Err(MappingError::NotAnInteger {
            field,
            found: kind_of(other).to_string(),
        }),
    }
}

/// Reads an optional boolean field; absent and `null` read as `false`.
fn read_bool(obj: &Map<String, Value>, field: &'static str) -> Result<bool, MappingError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(MappingError::NotABoolean {
            field,
            found: kind_of(other).to_string(),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_maps_all_fields() {
        // Arrange
        let value = json!({
            "type": "keydown",
            "win_scancode": 30,
            "win_virtualkey": 65,
            "win_extended": true,
            "unicode_codepoint": 97
        });

        // Act
        let ev = map_keyevent(&value).unwrap();

        // Assert
        assert_eq!(
            ev,
            Keyevent::new(EventType::KeyDown)
                .with_scancode(30)
                .with_virtual_key(65, true)
                .with_unicode_codepoint(97)
        );
    }

    #[test]
    fn test_empty_object_maps_to_unspecified_without_keys() {
        let ev = map_keyevent(&json!({})).unwrap();
        assert_eq!(ev, Keyevent::default());
    }

    #[test]
    fn test_type_is_case_insensitive() {
        let ev = map_keyevent(&json!({"type": "KeyPress"})).unwrap();
        assert_eq!(ev.event_type, EventType::KeyPress);
    }

    #[test]
    fn test_eventtype_alias() {
        let ev = map_keyevent(&json!({"eventtype": "keyup", "win_scancode": 1})).unwrap();
        assert_eq!(ev.event_type, EventType::KeyUp);
    }

    #[test]
    fn test_type_takes_precedence_over_eventtype() {
        let ev = map_keyevent(&json!({"type": "keydown", "eventtype": "keyup"})).unwrap();
        assert_eq!(ev.event_type, EventType::KeyDown);
    }

    #[test]
    fn test_null_type_falls_back_to_eventtype() {
        let ev = map_keyevent(&json!({"type": null, "eventtype": "keyup"})).unwrap();
        assert_eq!(ev.event_type, EventType::KeyUp);
    }

    #[test]
    fn test_unknown_or_wrong_typed_type_is_unspecified() {
        for value in [json!({"type": "init"}), json!({"type": 3}), json!({"type": null})] {
            assert_eq!(map_keyevent(&value).unwrap().event_type, EventType::Unspecified);
        }
    }

    #[test]
    fn test_null_numeric_fields_are_absent() {
        let ev = map_keyevent(&json!({"win_scancode": null, "unicode_codepoint": 65})).unwrap();
        assert!(ev.scancode.is_none());
        assert_eq!(ev.unicode_codepoint.map(|c| c.get()), Some(65));
    }

    #[test]
    fn test_zero_numeric_field_is_absent() {
        let ev = map_keyevent(&json!({"win_virtualkey": 0, "win_extended": true})).unwrap();
        assert!(ev.virtual_key.is_none());
        assert!(!ev.extended);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let ev = map_keyevent(&json!({
            "type": "keydown",
            "win_scancode": 30,
            "win_time": 123456,
            "physkey": "_001E"
        }))
        .unwrap();
        assert_eq!(ev, Keyevent::new(EventType::KeyDown).with_scancode(30));
    }

    #[test]
    fn test_non_object_values_are_rejected() {
        for (value, kind) in [
            (json!([1, 2]), "array"),
            (json!(42), "number"),
            (json!("keydown"), "string"),
            (json!(null), "null"),
            (json!(true), "boolean"),
        ] {
            assert_eq!(
                map_keyevent(&value),
                Err(MappingError::NotAnObject { found: kind })
            );
        }
    }

    #[test]
    fn test_string_scancode_is_an_error() {
        let err = map_keyevent(&json!({"win_scancode": "30"})).unwrap_err();
        assert_eq!(
            err,
            MappingError::NotAnInteger {
                field: FIELD_SCANCODE,
                found: "string".to_string()
            }
        );
        assert_eq!(err.classification(), "Invalid keyevent");
    }

    #[test]
    fn test_fractional_codepoint_is_an_error() {
        let err = map_keyevent(&json!({"unicode_codepoint": 65.5})).unwrap_err();
        assert!(matches!(err, MappingError::NotAnInteger { field: FIELD_UNICODE_CODEPOINT, .. }));
    }

    #[test]
    fn test_negative_virtual_key_is_out_of_range() {
        let err = map_keyevent(&json!({"win_virtualkey": -1})).unwrap_err();
        assert_eq!(
            err,
            MappingError::OutOfRange {
                field: FIELD_VIRTUAL_KEY,
                value: "-1".to_string()
            }
        );
    }

    #[test]
    fn test_u32_overflow_is_out_of_range() {
        let err = map_keyevent(&json!({"win_scancode": 4_294_967_296u64})).unwrap_err();
        assert!(matches!(err, MappingError::OutOfRange { field: FIELD_SCANCODE, .. }));
    }

    #[test]
    fn test_u32_max_is_accepted() {
        let ev = map_keyevent(&json!({"unicode_codepoint": u32::MAX})).unwrap();
        assert_eq!(ev.unicode_codepoint.map(|c| c.get()), Some(u32::MAX));
    }

    #[test]
    fn test_non_boolean_extended_is_an_error() {
        let err = map_keyevent(&json!({"win_virtualkey": 13, "win_extended": 1})).unwrap_err();
        assert_eq!(
            err,
            MappingError::NotABoolean {
                field: FIELD_EXTENDED,
                found: "number".to_string()
            }
        );
    }

    #[test]
    fn test_error_message_names_the_field() {
        let err = map_keyevent(&json!({"win_extended": "yes"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "field `win_extended` must be a boolean, got string"
        );
    }
}
