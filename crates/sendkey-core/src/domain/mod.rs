//! Domain entities: the keyevent value and its validation rules.

pub mod keyevent;
pub mod validation;

pub use keyevent::{EventType, Keyevent};
pub use validation::{validate_keyevent, ValidationError};
