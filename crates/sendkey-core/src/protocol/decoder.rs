//! Incremental decoder that isolates JSON values from an unframed byte stream.
//!
//! Input arrives with no framing other than JSON structure itself, possibly
//! one byte at a time.  The decoder scans bytes as they are pushed, tracks
//! bracket depth and string state, and hands each complete value to
//! `serde_json` as soon as its closing bracket arrives.
//!
//! # Resynchronisation
//!
//! A malformed record never stops the stream:
//!
//! - An object or array ends at its matching close bracket.  If it does not
//!   parse, one [`DecodeError::Malformed`] is produced and scanning continues.
//! - A line break inside a string ends the record: an open object or array
//!   is reported as [`DecodeError::Truncated`], a bare value as
//!   [`DecodeError::Malformed`].
//! - While an object is still open, a `{` as the first byte of a line starts
//!   a new record; the unfinished bytes are reported as
//!   [`DecodeError::Truncated`].  Pretty-printed producers indent nested
//!   lines, so a column-0 brace is always a new top-level record.
//! - Anything else at top level (bare scalars, stray text, a lone `}`) runs to
//!   the end of the line or the next opening bracket and is parsed on its own.
//! - A record longer than [`MAX_RECORD_LEN`] is dropped with
//!   [`DecodeError::Oversized`] and the rest of its line is skipped.
//!
//! # Example
//!
//! ```rust
//! use sendkey_core::protocol::decoder::StreamDecoder;
//!
//! let mut decoder = StreamDecoder::new();
//! decoder.push(br#"{"type":"key"#);
//! assert!(decoder.next_result().is_none());
//! decoder.push(br#"down","win_scancode":30}"#);
//! let value = decoder.next_result().unwrap().unwrap();
//! assert_eq!(value["win_scancode"], 30);
//! ```

use std::collections::VecDeque;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

/// Largest record, in bytes, the decoder will buffer.
pub const MAX_RECORD_LEN: usize = 64 * 1024;

/// Maximum number of characters of offending input quoted in a diagnostic.
const SNIPPET_CHARS: usize = 80;

/// Errors produced while isolating or parsing one record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The bytes of one record do not form valid JSON.
    #[error("{reason}: {snippet}")]
    Malformed { reason: String, snippet: String },

    /// The stream ended, or a new record began, before this one was closed.
    #[error("record ended before it was complete: {snippet}")]
    Truncated { snippet: String },

    /// The record grew past [`MAX_RECORD_LEN`] without closing.
    #[error("record exceeds {limit} bytes: {snippet}")]
    Oversized { limit: usize, snippet: String },
}

impl DecodeError {
    /// Classification printed before the message on the error channel.
    pub fn classification(&self) -> &'static str {
        match self {
            DecodeError::Malformed { .. } => "Malformed input",
            DecodeError::Truncated { .. } => "Truncated input",
            DecodeError::Oversized { .. } => "Oversized input",
        }
    }
}

/// Result of decoding one record.
pub type DecodeResult = Result<Value, DecodeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Between records.
    Idle,
    /// Inside an object or array.
    Structure {
        depth: usize,
        in_string: bool,
        escaped: bool,
    },
    /// Inside a top-level run that is not an object or array.
    Bare { in_string: bool, escaped: bool },
    /// Discarding the remainder of a line after an oversized record.
    Skipping,
}

/// Push-based JSON record scanner.
///
/// Feed bytes with [`push`](Self::push), signal end of input with
/// [`finish`](Self::finish), and drain results with
/// [`next_result`](Self::next_result).  Results come out in input order.
#[derive(Debug)]
pub struct StreamDecoder {
    state: ScanState,
    record: Vec<u8>,
    line_start: bool,
    ready: VecDeque<DecodeResult>,
    finished: bool,
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamDecoder {
    /// Creates a decoder positioned at the start of a line with nothing pending.
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
            record: Vec::new(),
            line_start: true,
            ready: VecDeque::new(),
            finished: false,
        }
    }

    /// Decodes a complete in-memory input, including end-of-stream handling.
    pub fn decode_all(bytes: &[u8]) -> Vec<DecodeResult> {
        let mut decoder = Self::new();
        decoder.push(bytes);
        decoder.finish();
        decoder.ready.into_iter().collect()
    }

    /// Scans `bytes`, queueing a result for every record they complete.
    ///
    /// Bytes pushed after [`finish`](Self::finish) are ignored.
    pub fn push(&mut self, bytes: &[u8]) {
        if self.finished {
            return;
        }
        for &b in bytes {
            self.scan_byte(b);
        }
    }

    /// Marks end of input.
    ///
    /// A pending object or array becomes a final [`DecodeError::Truncated`];
    /// a pending bare value is parsed as-is.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        match self.state {
            ScanState::Structure { .. } => self.abandon_truncated(),
            ScanState::Bare { .. } => self.complete_record(),
            ScanState::Idle | ScanState::Skipping => {}
        }
        self.state = ScanState::Idle;
    }

    /// Pops the oldest completed result, if any.
    pub fn next_result(&mut self) -> Option<DecodeResult> {
        self.ready.pop_front()
    }

    /// Returns `true` once [`finish`](Self::finish) was called and every
    /// result has been drained.
    pub fn is_exhausted(&self) -> bool {
        self.finished && self.ready.is_empty()
    }

    fn scan_byte(&mut self, b: u8) {
        let at_line_start = self.line_start;
        self.line_start = b == b'\n';

        match self.state {
            ScanState::Idle => self.start_record(b),

            ScanState::Structure {
                depth,
                in_string,
                escaped,
            } => {
                if at_line_start && b == b'{' {
                    debug!(
                        pending = self.record.len(),
                        "new record at line start, abandoning unfinished record"
                    );
                    self.abandon_truncated();
                    self.start_record(b);
                    return;
                }
                if in_string && b == b'\n' {
                    // JSON strings cannot span lines.
                    debug!(
                        pending = self.record.len(),
                        "line break inside string, abandoning unfinished record"
                    );
                    self.abandon_truncated();
                    return;
                }
                self.record.push(b);
                self.state = if in_string {
                    ScanState::Structure {
                        depth,
                        in_string: !(b == b'"' && !escaped),
                        escaped: b == b'\\' && !escaped,
                    }
                } else {
                    match b {
                        b'"' => ScanState::Structure {
                            depth,
                            in_string: true,
                            escaped: false,
                        },
                        b'{' | b'[' => ScanState::Structure {
                            depth: depth + 1,
                            in_string: false,
                            escaped: false,
                        },
                        b'}' | b']' if depth == 1 => {
                            self.complete_record();
                            return;
                        }
                        b'}' | b']' => ScanState::Structure {
                            depth: depth - 1,
                            in_string: false,
                            escaped: false,
                        },
                        _ => self.state,
                    }
                };
                self.enforce_limit();
            }

            ScanState::Bare { in_string, escaped } => {
                // A bare run ends at its line, even inside an unclosed string.
                if b == b'\n' {
                    self.complete_record();
                    return;
                }
                if !in_string && (b == b'{' || b == b'[') {
                    self.complete_record();
                    self.start_record(b);
                    return;
                }
                self.record.push(b);
                self.state = if in_string {
                    ScanState::Bare {
                        in_string: !(b == b'"' && !escaped),
                        escaped: b == b'\\' && !escaped,
                    }
                } else {
                    ScanState::Bare {
                        in_string: b == b'"',
                        escaped: false,
                    }
                };
                self.enforce_limit();
            }

            ScanState::Skipping => {
                if b == b'\n' {
                    self.state = ScanState::Idle;
                }
            }
        }
    }

    /// Handles a byte seen while no record is pending.
    fn start_record(&mut self, b: u8) {
        self.state = match b {
            b' ' | b'\t' | b'\r' | b'\n' => ScanState::Idle,
            b'{' | b'[' => {
                self.record.push(b);
                ScanState::Structure {
                    depth: 1,
                    in_string: false,
                    escaped: false,
                }
            }
            _ => {
                self.record.push(b);
                ScanState::Bare {
                    in_string: b == b'"',
                    escaped: false,
                }
            }
        };
    }

    fn complete_record(&mut self) {
        let bytes = std::mem::take(&mut self.record);
        self.state = ScanState::Idle;
        let result = serde_json::from_slice::<Value>(&bytes).map_err(|e| {
            DecodeError::Malformed {
                reason: e.to_string(),
                snippet: snippet(&bytes),
            }
        });
        trace!(len = bytes.len(), ok = result.is_ok(), "record complete");
        self.ready.push_back(result);
    }

    fn abandon_truncated(&mut self) {
        let bytes = std::mem::take(&mut self.record);
        self.state = ScanState::Idle;
        self.ready.push_back(Err(DecodeError::Truncated {
            snippet: snippet(&bytes),
        }));
    }

    fn enforce_limit(&mut self) {
        if self.record.len() <= MAX_RECORD_LEN {
            return;
        }
        let bytes = std::mem::take(&mut self.record);
        debug!(limit = MAX_RECORD_LEN, "dropping oversized record");
        self.ready.push_back(Err(DecodeError::Oversized {
            limit: MAX_RECORD_LEN,
            snippet: snippet(&bytes),
        }));
        self.state = if self.line_start {
            ScanState::Idle
        } else {
            ScanState::Skipping
        };
    }
}

/// Renders offending input for a diagnostic: lossy UTF-8, trimmed, capped.
fn snippet(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    let mut chars = text.chars();
    let mut out: String = chars.by_ref().take(SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        out.push_str("...");
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
