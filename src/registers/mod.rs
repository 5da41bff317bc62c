//! Behavior register codec table
//!
//! Every register is a zero-sized type implementing [`Register`]; its payload
//! layout comes from the [`PayloadValue`] implementation of its value type, so
//! each register only declares an address, a value type and its access mode.

mod catalogue;
mod flags;
mod payload;

pub use catalogue::*;
pub use flags::{
    Access, CameraOutputs, DigitalInputs, DigitalOutputs, EncoderInputs, Events, FrameAcquired,
    MimicOutput, PortDigitalIOS, PwmOutputs, ServoOutputs,
};
pub use payload::{AnalogDataPayload, PayloadValue, RgbAllPayload, RgbPayload};

pub(crate) use catalogue::CATALOGUE;

use bytes::BytesMut;

use crate::protocol::{Error, Message, MessageType, PayloadType, Result, Timestamped};

/// Primitive element type of a register payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PrimitiveKind {
    /// Unsigned 8-bit
    U8,
    /// Unsigned 16-bit
    U16,
    /// Signed 16-bit
    S16,
}

impl PrimitiveKind {
    /// Harp payload type carrying this kind
    #[must_use]
    pub const fn payload_type(self) -> PayloadType {
        match self {
            Self::U8 => PayloadType::U8,
            Self::U16 => PayloadType::U16,
            Self::S16 => PayloadType::S16,
        }
    }

    /// Element size in bytes
    #[must_use]
    pub const fn size(self) -> usize {
        self.payload_type().element_size()
    }
}

/// Static description of one register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegisterDescriptor {
    name: &'static str,
    address: u8,
    kind: PrimitiveKind,
    count: usize,
    access: Access,
}

impl RegisterDescriptor {
    /// Describe a register
    #[must_use]
    pub const fn new(
        name: &'static str,
        address: u8,
        kind: PrimitiveKind,
        count: usize,
        access: Access,
    ) -> Self {
        assert!(count > 0, "register payloads hold at least one element");
        Self {
            name,
            address,
            kind,
            count,
            access,
        }
    }

    /// Register name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Register address
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Primitive element kind
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    /// Number of elements in the payload
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Access mode
    #[must_use]
    pub const fn access(&self) -> Access {
        self.access
    }

    /// Harp payload type of the register
    #[must_use]
    pub const fn payload_type(&self) -> PayloadType {
        self.kind.payload_type()
    }

    /// Payload length in bytes
    #[must_use]
    pub const fn payload_len(&self) -> usize {
        self.kind.size() * self.count
    }

    /// Check whether the register accepts writes
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.access.contains(Access::WRITE)
    }

    /// Check whether the device reports this register as events
    #[must_use]
    pub const fn has_events(&self) -> bool {
        self.access.contains(Access::EVENT)
    }

    /// Check whether a message is addressed to this register
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        message.address() == self.address
    }

    /// Read command for this register
    #[must_use]
    pub fn read_request(&self) -> Message {
        Message::read_request(self.address, self.payload_type())
    }

    /// Validated payload bytes of a message addressed to this register
    pub fn payload<'a>(&self, message: &'a Message) -> Result<&'a [u8]> {
        if !self.matches(message) {
            return Err(Error::AddressMismatch {
                expected: self.address,
                found: message.address(),
            });
        }
        message.checked_payload(self.payload_type(), self.count)
    }

    /// Decode a message without knowing the register type statically
    pub fn decode_raw(&self, message: &Message) -> Result<RawValue> {
        self.payload(message)?;
        let value = match (self.kind, self.count) {
            (PrimitiveKind::U8, 1) => RawValue::U8(message.read_element()?),
            (PrimitiveKind::U16, 1) => RawValue::U16(message.read_element()?),
            (PrimitiveKind::S16, 1) => RawValue::S16(message.read_element()?),
            (PrimitiveKind::U8, _) => RawValue::U8Array(message.read_array()?),
            (PrimitiveKind::U16, _) => RawValue::U16Array(message.read_array()?),
            (PrimitiveKind::S16, _) => RawValue::S16Array(message.read_array()?),
        };
        Ok(value)
    }

    /// Encode a dynamic value for this register
    pub fn encode_raw(&self, message_type: MessageType, value: &RawValue) -> Result<Message> {
        self.encode_raw_at(None, message_type, value)
    }

    /// Encode a dynamic value for this register with a timestamp
    pub fn encode_timestamped_raw(
        &self,
        timestamp: f64,
        message_type: MessageType,
        value: &RawValue,
    ) -> Result<Message> {
        self.encode_raw_at(Some(timestamp), message_type, value)
    }

    fn encode_raw_at(
        &self,
        timestamp: Option<f64>,
        message_type: MessageType,
        value: &RawValue,
    ) -> Result<Message> {
        if value.kind() != self.kind || value.len() != self.count {
            return Err(Error::RawShapeMismatch {
                register: self.name,
            });
        }
        let address = self.address;
        let message = match value {
            RawValue::U8(v) => Message::from_elements(address, timestamp, message_type, &[*v]),
            RawValue::U16(v) => Message::from_elements(address, timestamp, message_type, &[*v]),
            RawValue::S16(v) => Message::from_elements(address, timestamp, message_type, &[*v]),
            RawValue::U8Array(v) => {
                Message::from_elements(address, timestamp, message_type, v.as_slice())
            }
            RawValue::U16Array(v) => {
                Message::from_elements(address, timestamp, message_type, v.as_slice())
            }
            RawValue::S16Array(v) => {
                Message::from_elements(address, timestamp, message_type, v.as_slice())
            }
        };
        Ok(message)
    }
}

/// Register payload decoded by primitive kind only
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RawValue {
    /// Single unsigned byte
    U8(u8),
    /// Single unsigned 16-bit value
    U16(u16),
    /// Single signed 16-bit value
    S16(i16),
    /// Byte array
    U8Array(Vec<u8>),
    /// Unsigned 16-bit array
    U16Array(Vec<u16>),
    /// Signed 16-bit array
    S16Array(Vec<i16>),
}

impl RawValue {
    /// Primitive kind of the elements
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::U8(_) | Self::U8Array(_) => PrimitiveKind::U8,
            Self::U16(_) | Self::U16Array(_) => PrimitiveKind::U16,
            Self::S16(_) | Self::S16Array(_) => PrimitiveKind::S16,
        }
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(_) | Self::U16(_) | Self::S16(_) => 1,
            Self::U8Array(v) => v.len(),
            Self::U16Array(v) => v.len(),
            Self::S16Array(v) => v.len(),
        }
    }

    /// Check whether the value holds no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A typed Behavior register
///
/// Implementors only provide the associated items; decoding and encoding come
/// from the value type's [`PayloadValue`] layout.
pub trait Register {
    /// Logical value stored in the register
    type Value: PayloadValue;

    /// Register address
    const ADDRESS: u8;

    /// Register name
    const NAME: &'static str;

    /// Access mode
    const ACCESS: Access;

    /// Static descriptor for registry lookups
    const DESCRIPTOR: RegisterDescriptor = RegisterDescriptor::new(
        Self::NAME,
        Self::ADDRESS,
        <Self::Value as PayloadValue>::KIND,
        <Self::Value as PayloadValue>::COUNT,
        Self::ACCESS,
    );

    /// Decode the register value carried by a message
    fn get_payload(message: &Message) -> Result<Self::Value> {
        let payload = Self::DESCRIPTOR.payload(message)?;
        Ok(Self::Value::decode(payload))
    }

    /// Decode the register value together with the message timestamp
    fn get_timestamped_payload(message: &Message) -> Result<Timestamped<Self::Value>> {
        let seconds = message.seconds()?;
        Ok(Timestamped::new(Self::get_payload(message)?, seconds))
    }

    /// Build a message carrying `value`
    fn from_payload(message_type: MessageType, value: Self::Value) -> Message {
        build_message::<Self>(None, message_type, &value)
    }

    /// Build a timestamped message carrying `value`
    fn from_timestamped_payload(
        timestamp: f64,
        message_type: MessageType,
        value: Self::Value,
    ) -> Message {
        build_message::<Self>(Some(timestamp), message_type, &value)
    }

    /// Read command for this register
    fn read_request() -> Message {
        Self::DESCRIPTOR.read_request()
    }
}

fn build_message<R: Register + ?Sized>(
    timestamp: Option<f64>,
    message_type: MessageType,
    value: &R::Value,
) -> Message {
    let descriptor = R::DESCRIPTOR;
    let mut payload = BytesMut::with_capacity(descriptor.payload_len());
    value.encode(&mut payload);
    debug_assert_eq!(payload.len(), descriptor.payload_len());

    match timestamp {
        Some(timestamp) => Message::with_timestamp(
            descriptor.address(),
            timestamp,
            message_type,
            descriptor.payload_type(),
            payload.freeze(),
        ),
        None => Message::new(
            descriptor.address(),
            message_type,
            descriptor.payload_type(),
            payload.freeze(),
        ),
    }
}
