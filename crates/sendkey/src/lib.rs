//! sendkey library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does sendkey do?
//!
//! sendkey is the last stage of a keyboard-remapping pipeline.  Another
//! process writes one JSON object per keyboard event to sendkey's stdin:
//!
//! ```text
//! {"type":"keydown","win_scancode":30}
//! {"type":"keyup","win_scancode":30}
//! ```
//!
//! For each record sendkey:
//!
//! 1. Isolates the JSON value from the byte stream (robust to partial reads
//!    and malformed input).
//! 2. Maps it to a [`sendkey_core::Keyevent`] and validates it.
//! 3. Injects it as synthetic OS keyboard input, unless `--dry-run` is set.
//! 4. Echoes it to stdout in compact (`--echo`) or pretty (`--pretty`) form.
//!
//! Every rejected record produces exactly one `"<classification>: <message>"`
//! line on stderr; processing then continues with the next record.

/// Domain layer: agent configuration.
pub mod domain;

/// Application layer: dispatch rules, error reporting, and the record pipeline.
pub mod application;

/// Infrastructure layer: OS injectors, stderr sink, and command-line parsing.
pub mod infrastructure;
