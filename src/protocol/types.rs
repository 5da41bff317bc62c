//! Harp message types and payload types

use std::fmt;

/// Harp message types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessageType {
    /// Read a register (request) or the device reply to it
    Read = 0x01,
    /// Write a register (request) or the device reply to it
    Write = 0x02,
    /// Unsolicited message emitted by the device
    Event = 0x03,
}

impl MessageType {
    /// Bit set on the message type byte of an error reply
    pub const ERROR_FLAG: u8 = 0x08;

    /// Convert from byte, ignoring the error flag
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value & !Self::ERROR_FLAG {
            0x01 => Some(Self::Read),
            0x02 => Some(Self::Write),
            0x03 => Some(Self::Event),
            _ => None,
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Read => "Read",
            Self::Write => "Write",
            Self::Event => "Event",
        };
        write!(f, "{name}")
    }
}

/// Harp payload types
///
/// The low nibble holds the element size in bytes; `0x80` marks signed
/// integers and `0x40` floating point. The timestamp flag is carried
/// separately by [`crate::Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PayloadType {
    /// Unsigned 8-bit
    U8 = 0x01,
    /// Signed 8-bit
    S8 = 0x81,
    /// Unsigned 16-bit
    U16 = 0x02,
    /// Signed 16-bit
    S16 = 0x82,
    /// Unsigned 32-bit
    U32 = 0x04,
    /// Signed 32-bit
    S32 = 0x84,
    /// Unsigned 64-bit
    U64 = 0x08,
    /// Signed 64-bit
    S64 = 0x88,
    /// IEEE 754 single precision
    Float = 0x44,
}

impl PayloadType {
    /// Bit set on the payload type byte when a timestamp follows the header
    pub const TIMESTAMP_FLAG: u8 = 0x10;

    const SIZE_MASK: u8 = 0x0F;

    /// Convert from byte, ignoring the timestamp flag
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value & !Self::TIMESTAMP_FLAG {
            0x01 => Some(Self::U8),
            0x81 => Some(Self::S8),
            0x02 => Some(Self::U16),
            0x82 => Some(Self::S16),
            0x04 => Some(Self::U32),
            0x84 => Some(Self::S32),
            0x08 => Some(Self::U64),
            0x88 => Some(Self::S64),
            0x44 => Some(Self::Float),
            _ => None,
        }
    }

    /// Convert to byte (without the timestamp flag)
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Size of one payload element in bytes
    #[must_use]
    pub const fn element_size(self) -> usize {
        (self as u8 & Self::SIZE_MASK) as usize
    }

    /// Check whether elements are signed integers
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::S8 | Self::S16 | Self::S32 | Self::S64)
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::U8 => "U8",
            Self::S8 => "S8",
            Self::U16 => "U16",
            Self::S16 => "S16",
            Self::U32 => "U32",
            Self::S32 => "S32",
            Self::U64 => "U64",
            Self::S64 => "S64",
            Self::Float => "Float",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_roundtrip() {
        for msg_type in [MessageType::Read, MessageType::Write, MessageType::Event] {
            let decoded = MessageType::from_u8(msg_type.as_u8()).unwrap();
            assert_eq!(msg_type, decoded);
        }
    }

    #[test]
    fn test_message_type_ignores_error_flag() {
        assert_eq!(MessageType::from_u8(0x09), Some(MessageType::Read));
        assert_eq!(MessageType::from_u8(0x0A), Some(MessageType::Write));
        assert_eq!(MessageType::from_u8(0x00), None);
        assert_eq!(MessageType::from_u8(0x04), None);
    }

    #[test]
    fn test_payload_type_sizes() {
        assert_eq!(PayloadType::U8.element_size(), 1);
        assert_eq!(PayloadType::S16.element_size(), 2);
        assert_eq!(PayloadType::U32.element_size(), 4);
        assert_eq!(PayloadType::S64.element_size(), 8);
        assert_eq!(PayloadType::Float.element_size(), 4);
        assert!(PayloadType::S16.is_signed());
        assert!(!PayloadType::U16.is_signed());
    }

    #[test]
    fn test_payload_type_ignores_timestamp_flag() {
        assert_eq!(PayloadType::from_u8(0x12), Some(PayloadType::U16));
        assert_eq!(PayloadType::from_u8(0x92), Some(PayloadType::S16));
        assert_eq!(PayloadType::from_u8(0x03), None);
    }
}
