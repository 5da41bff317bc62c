//! Harp message implementation

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{Error, MessageHeader, MessageType, PayloadType, Result};

mod sealed {
    pub trait Sealed {}
}

/// Primitive payload element with a fixed Harp payload type
pub trait Element: Copy + sealed::Sealed {
    /// Payload type tag for this element
    const PAYLOAD_TYPE: PayloadType;

    /// Read one element from the front of `buf` (little-endian)
    fn get(buf: &mut &[u8]) -> Self;

    /// Append one element to `buf` (little-endian)
    fn put(self, buf: &mut BytesMut);
}

macro_rules! impl_element {
    ($($ty:ty => $payload_type:ident, $get:ident, $put:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const PAYLOAD_TYPE: PayloadType = PayloadType::$payload_type;

                #[inline]
                fn get(buf: &mut &[u8]) -> Self {
                    buf.$get()
                }

                #[inline]
                fn put(self, buf: &mut BytesMut) {
                    buf.$put(self);
                }
            }
        )*
    };
}

impl_element! {
    u8 => U8, get_u8, put_u8;
    i8 => S8, get_i8, put_i8;
    u16 => U16, get_u16_le, put_u16_le;
    i16 => S16, get_i16_le, put_i16_le;
    u32 => U32, get_u32_le, put_u32_le;
    i32 => S32, get_i32_le, put_i32_le;
    u64 => U64, get_u64_le, put_u64_le;
    i64 => S64, get_i64_le, put_i64_le;
    f32 => Float, get_f32_le, put_f32_le;
}

/// A value paired with the device timestamp of the message it came from
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamped<T> {
    /// Decoded value
    pub value: T,
    /// Device timestamp in seconds
    pub seconds: f64,
}

impl<T> Timestamped<T> {
    /// Pair a value with a timestamp
    pub const fn new(value: T, seconds: f64) -> Self {
        Self { value, seconds }
    }

    /// Transform the value, keeping the timestamp
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timestamped<U> {
        Timestamped {
            value: f(self.value),
            seconds: self.seconds,
        }
    }
}

/// Harp message
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Message header
    header: MessageHeader,
    /// Device timestamp in seconds, when present
    timestamp: Option<f64>,
    /// Message payload
    payload: Bytes,
}

impl Message {
    /// Create a new message without timestamp
    pub fn new(
        address: u8,
        message_type: MessageType,
        payload_type: PayloadType,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            header: MessageHeader::new(address, message_type, payload_type),
            timestamp: None,
            payload: payload.into(),
        }
    }

    /// Create a new timestamped message
    pub fn with_timestamp(
        address: u8,
        timestamp: f64,
        message_type: MessageType,
        payload_type: PayloadType,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            header: MessageHeader::new(address, message_type, payload_type),
            timestamp: Some(timestamp),
            payload: payload.into(),
        }
    }

    /// Create a message from already-validated parts
    #[must_use]
    pub fn from_parts(header: MessageHeader, timestamp: Option<f64>, payload: Bytes) -> Self {
        Self {
            header,
            timestamp,
            payload,
        }
    }

    /// Create a message whose payload is a sequence of elements
    #[must_use]
    pub fn from_elements<E: Element>(
        address: u8,
        timestamp: Option<f64>,
        message_type: MessageType,
        elements: &[E],
    ) -> Self {
        let mut payload = BytesMut::with_capacity(elements.len() * E::PAYLOAD_TYPE.element_size());
        for element in elements {
            element.put(&mut payload);
        }
        Self {
            header: MessageHeader::new(address, message_type, E::PAYLOAD_TYPE),
            timestamp,
            payload: payload.freeze(),
        }
    }

    /// Create a read request for a register (empty payload)
    #[must_use]
    pub fn read_request(address: u8, payload_type: PayloadType) -> Self {
        Self::new(address, MessageType::Read, payload_type, Bytes::new())
    }

    /// Get header
    #[must_use]
    pub const fn header(&self) -> &MessageHeader {
        &self.header
    }

    /// Get message type
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        self.header.message_type()
    }

    /// Check whether this is an error reply
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.header.is_error()
    }

    /// Get register address
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.header.address()
    }

    /// Get port
    #[must_use]
    pub const fn port(&self) -> u8 {
        self.header.port()
    }

    /// Get payload type
    #[must_use]
    pub const fn payload_type(&self) -> PayloadType {
        self.header.payload_type()
    }

    /// Get timestamp in seconds
    #[must_use]
    pub const fn timestamp(&self) -> Option<f64> {
        self.timestamp
    }

    /// Get payload
    #[must_use]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Set port
    #[must_use]
    pub fn with_port(mut self, port: u8) -> Self {
        self.header.set_port(port);
        self
    }

    /// Mark this message as an error reply
    #[must_use]
    pub fn with_error(mut self, error: bool) -> Self {
        self.header.set_error(error);
        self
    }

    /// Timestamp in seconds, or an error when the message carries none
    pub fn seconds(&self) -> Result<f64> {
        self.timestamp.ok_or(Error::MissingTimestamp {
            address: self.address(),
        })
    }

    /// Payload bytes checked against an expected type and element count
    pub fn checked_payload(&self, payload_type: PayloadType, count: usize) -> Result<&[u8]> {
        if self.payload_type() != payload_type {
            return Err(Error::PayloadTypeMismatch {
                expected: payload_type,
                found: self.payload_type(),
            });
        }
        let expected = payload_type.element_size() * count;
        if self.payload.len() != expected {
            return Err(Error::PayloadLength {
                expected,
                got: self.payload.len(),
            });
        }
        Ok(&self.payload)
    }

    /// Read the payload as a single element
    pub fn read_element<E: Element>(&self) -> Result<E> {
        let mut payload = self.checked_payload(E::PAYLOAD_TYPE, 1)?;
        Ok(E::get(&mut payload))
    }

    /// Read the payload as an array of elements
    pub fn read_array<E: Element>(&self) -> Result<Vec<E>> {
        let size = E::PAYLOAD_TYPE.element_size();
        let count = self.payload.len() / size;
        let mut payload = self.checked_payload(E::PAYLOAD_TYPE, count)?;
        Ok((0..count).map(|_| E::get(&mut payload)).collect())
    }

    /// Read the payload as an unsigned byte
    pub fn read_u8(&self) -> Result<u8> {
        self.read_element()
    }

    /// Read the payload as an unsigned 16-bit integer
    pub fn read_u16(&self) -> Result<u16> {
        self.read_element()
    }

    /// Read the payload as a signed 16-bit integer
    pub fn read_s16(&self) -> Result<i16> {
        self.read_element()
    }

    /// Read a single element together with the message timestamp
    pub fn read_timestamped_element<E: Element>(&self) -> Result<Timestamped<E>> {
        let seconds = self.seconds()?;
        Ok(Timestamped::new(self.read_element()?, seconds))
    }

    /// Read an element array together with the message timestamp
    pub fn read_timestamped_array<E: Element>(&self) -> Result<Timestamped<Vec<E>>> {
        let seconds = self.seconds()?;
        Ok(Timestamped::new(self.read_array()?, seconds))
    }

    /// Read an unsigned byte together with the message timestamp
    pub fn read_timestamped_u8(&self) -> Result<Timestamped<u8>> {
        self.read_timestamped_element()
    }

    /// Read an unsigned 16-bit integer together with the message timestamp
    pub fn read_timestamped_u16(&self) -> Result<Timestamped<u16>> {
        self.read_timestamped_element()
    }

    /// Read a signed 16-bit integer together with the message timestamp
    pub fn read_timestamped_s16(&self) -> Result<Timestamped<i16>> {
        self.read_timestamped_element()
    }

    /// Encode message to bytes
    pub fn encode(&self) -> Result<Vec<u8>> {
        super::encode(self)
    }

    /// Decode message from bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        super::decode(bytes)
    }
}
