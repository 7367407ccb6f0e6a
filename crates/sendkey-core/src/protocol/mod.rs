//! Protocol module: stream decoder, event mapper, and echo encoders.

pub mod decoder;
pub mod encoder;
pub mod mapper;

pub use decoder::{DecodeError, DecodeResult, StreamDecoder, MAX_RECORD_LEN};
pub use encoder::{encode_compact, encode_pretty, EchoMode};
pub use mapper::{map_keyevent, MappingError};
