//! Harp message header
//!
//! # Wire Format
//!
//! ```text
//! +-------------+--------+---------+------+-------------+----------------+---------+----------+
//! | MessageType | Length | Address | Port | PayloadType | Timestamp (6)? | Payload | Checksum |
//! +-------------+--------+---------+------+-------------+----------------+---------+----------+
//! ```
//!
//! `Length` counts every byte after itself, checksum included. When that count
//! does not fit in one byte the field holds [`EXTENDED_LENGTH`] and the real
//! length follows as a little-endian `u16`.

use super::{MessageType, PayloadType};

/// Length byte value announcing a two-byte extended length
pub const EXTENDED_LENGTH: u8 = 0xFF;

/// Size of the optional timestamp block in bytes
pub const TIMESTAMP_SIZE: usize = 6;

/// Duration of one timestamp tick in microseconds
pub const MICROSECONDS_PER_TICK: u32 = 32;

const TICKS_PER_SECOND: u32 = 1_000_000 / MICROSECONDS_PER_TICK;

/// Harp message header (everything but the length, timestamp and payload)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    message_type: MessageType,
    error: bool,
    address: u8,
    port: u8,
    payload_type: PayloadType,
}

impl MessageHeader {
    /// Create a new message header addressed to the device port
    #[must_use]
    pub const fn new(address: u8, message_type: MessageType, payload_type: PayloadType) -> Self {
        Self {
            message_type,
            error: false,
            address,
            port: super::DEFAULT_PORT,
            payload_type,
        }
    }

    /// Get message type
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// Check whether this is an error reply
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error
    }

    /// Get register address
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Get port
    #[must_use]
    pub const fn port(&self) -> u8 {
        self.port
    }

    /// Get payload type
    #[must_use]
    pub const fn payload_type(&self) -> PayloadType {
        self.payload_type
    }

    /// Set the error flag
    pub fn set_error(&mut self, error: bool) {
        self.error = error;
    }

    /// Set the port
    pub fn set_port(&mut self, port: u8) {
        self.port = port;
    }

    /// Message type byte as written on the wire
    #[must_use]
    pub const fn message_type_byte(&self) -> u8 {
        if self.error {
            self.message_type.as_u8() | MessageType::ERROR_FLAG
        } else {
            self.message_type.as_u8()
        }
    }

    /// Payload type byte as written on the wire
    #[must_use]
    pub const fn payload_type_byte(&self, timestamped: bool) -> u8 {
        if timestamped {
            self.payload_type.as_u8() | PayloadType::TIMESTAMP_FLAG
        } else {
            self.payload_type.as_u8()
        }
    }

    /// Parse the type bytes of a frame
    pub fn from_bytes(
        message_type: u8,
        address: u8,
        port: u8,
        payload_type: u8,
    ) -> super::Result<Self> {
        let Some(kind) = MessageType::from_u8(message_type) else {
            return Err(super::Error::InvalidMessageType {
                type_byte: message_type,
            });
        };
        let Some(payload) = PayloadType::from_u8(payload_type) else {
            return Err(super::Error::InvalidPayloadType {
                type_byte: payload_type,
            });
        };

        Ok(Self {
            message_type: kind,
            error: message_type & MessageType::ERROR_FLAG != 0,
            address,
            port,
            payload_type: payload,
        })
    }
}

/// Split a timestamp in seconds into whole seconds and 32 µs ticks
#[must_use]
pub fn split_timestamp(timestamp: f64) -> (u32, u16) {
    let timestamp = timestamp.max(0.0);
    let mut seconds = timestamp.trunc() as u32;
    let mut ticks = (timestamp.fract() * f64::from(TICKS_PER_SECOND)).round() as u32;
    if ticks >= TICKS_PER_SECOND {
        seconds = seconds.saturating_add(1);
        ticks = 0;
    }
    (seconds, ticks as u16)
}

/// Join whole seconds and 32 µs ticks into a timestamp in seconds
#[must_use]
pub fn join_timestamp(seconds: u32, ticks: u16) -> f64 {
    f64::from(seconds) + f64::from(ticks) * f64::from(MICROSECONDS_PER_TICK) * 1e-6
}
