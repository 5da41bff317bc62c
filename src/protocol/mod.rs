//! Harp protocol core implementation
//!
//! This module provides the wire format, message types, and codec for the
//! Harp binary protocol spoken by the Behavior board.

mod codec;
mod error;
mod framer;
mod header;
mod message;
mod types;

pub use codec::{checksum, decode, decode_frame, encode};
pub use error::{Error, Result};
pub use framer::{DecoderConfig, FrameDecoder};
pub use header::{
    EXTENDED_LENGTH, MICROSECONDS_PER_TICK, MessageHeader, TIMESTAMP_SIZE, join_timestamp,
    split_timestamp,
};
pub use message::{Element, Message, Timestamped};
pub use types::{MessageType, PayloadType};

/// Port number addressing the device itself
pub const DEFAULT_PORT: u8 = 0xFF;

/// Checksum size in bytes
pub const CHECKSUM_SIZE: usize = 1;

/// Maximum payload size (what the two-byte extended length can describe)
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize - 3 - TIMESTAMP_SIZE - CHECKSUM_SIZE;

/// Largest frame the extended length field can describe
pub const MAX_FRAME_SIZE: usize = 4 + u16::MAX as usize;

/// Minimum frame size (type, length, address, port, payload type, checksum)
pub const MIN_FRAME_SIZE: usize = 5 + CHECKSUM_SIZE;
