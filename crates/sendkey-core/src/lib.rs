//! # sendkey-core
//!
//! Shared library for sendkey containing the keyevent model, the streaming
//! JSON decoder, the event mapper, and the two echo encoders.
//!
//! This crate has no dependencies on OS APIs, async runtimes, or process
//! state.  Everything here is a pure function or a plain state machine, so
//! the whole decode → map → validate → encode chain can be tested without a
//! terminal or a desktop session.
//!
//! # Architecture overview
//!
//! sendkey reads a stream of JSON objects on stdin, each describing one
//! keyboard event, and injects them as synthetic keyboard input (and/or echoes
//! them back on stdout).  This crate defines:
//!
//! - **`domain`** – The [`Keyevent`] value and its validation rule.
//!
//! - **`protocol`** – How bytes become keyevents and keyevents become text:
//!   the [`StreamDecoder`] isolates one JSON value at a time from an
//!   arbitrarily chunked byte stream, [`map_keyevent`] turns that value into a
//!   [`Keyevent`], and [`encode_compact`] / [`encode_pretty`] produce the echo
//!   format.

pub mod domain;
pub mod protocol;

pub use domain::keyevent::{EventType, Keyevent};
pub use domain::validation::{validate_keyevent, ValidationError};
pub use protocol::decoder::{DecodeError, StreamDecoder};
pub use protocol::encoder::{encode_compact, encode_pretty, EchoMode};
pub use protocol::mapper::{map_keyevent, MappingError};
