//! Harp codec error types

use thiserror::Error;

use super::PayloadType;

/// Errors raised while framing messages or decoding register payloads
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer too small
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },

    /// Invalid message type
    #[error("invalid message type: {type_byte:#x}")]
    InvalidMessageType {
        /// Invalid type byte
        type_byte: u8,
    },

    /// Invalid payload type
    #[error("invalid payload type: {type_byte:#x}")]
    InvalidPayloadType {
        /// Invalid type byte
        type_byte: u8,
    },

    /// Checksum mismatch
    #[error("checksum mismatch: expected {expected:#x}, got {found:#x}")]
    ChecksumMismatch {
        /// Expected checksum
        expected: u8,
        /// Found checksum
        found: u8,
    },

    /// Declared frame length disagrees with the header contents
    #[error("invalid frame length: {length}")]
    InvalidLength {
        /// Declared length field
        length: usize,
    },

    /// Payload too large
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Payload size
        size: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Message address does not belong to the register being decoded
    #[error("message address {found} does not match register address {expected}")]
    AddressMismatch {
        /// Register address
        expected: u8,
        /// Message address
        found: u8,
    },

    /// Message payload type does not match the register primitive kind
    #[error("payload type mismatch: expected {expected}, got {found}")]
    PayloadTypeMismatch {
        /// Payload type declared by the register
        expected: PayloadType,
        /// Payload type carried by the message
        found: PayloadType,
    },

    /// Message payload length does not match the register element count
    #[error("payload length mismatch: expected {expected} bytes, got {got}")]
    PayloadLength {
        /// Declared byte length
        expected: usize,
        /// Actual byte length
        got: usize,
    },

    /// Timestamped read on a message without a timestamp
    #[error("message at address {address} carries no timestamp")]
    MissingTimestamp {
        /// Message address
        address: u8,
    },

    /// Address is not part of the register catalogue
    #[error("unknown register address: {address}")]
    UnknownRegister {
        /// Requested address
        address: u8,
    },

    /// Dynamic value does not have the shape declared by the register
    #[error("value shape does not match register {register}")]
    RawShapeMismatch {
        /// Register name
        register: &'static str,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
