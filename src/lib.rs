//! Register codec table for the Harp Behavior board
//!
//! The Behavior board is a Harp serial device driving pokes, LEDs, cameras and
//! servos. This crate describes its register map and converts between typed
//! register values and Harp messages.
//!
//! # Quick Start
//!
//! ```rust
//! use harp_behavior::registers::{OutputSet, Register, RgbAll, RgbAllPayload};
//! use harp_behavior::{DigitalOutputs, Message, MessageType};
//!
//! // Build a write command for a register
//! let outputs = DigitalOutputs::DO0 | DigitalOutputs::LED1;
//! let msg = OutputSet::from_payload(MessageType::Write, outputs);
//!
//! // Frame it for the serial line
//! let bytes = msg.encode()?;
//!
//! // Decode the frame and read the value back
//! let decoded = Message::decode(&bytes)?;
//! assert_eq!(OutputSet::get_payload(&decoded)?, outputs);
//!
//! // Multi-field registers pack their fields in declaration order
//! let colors = RgbAll::from_payload(MessageType::Write, RgbAllPayload::new(1, 2, 3, 4, 5, 6));
//! assert_eq!(colors.payload().as_ref(), &[1, 2, 3, 4, 5, 6]);
//! # Ok::<(), harp_behavior::Error>(())
//! ```
//!
//! # Features
//!
//! - **Typed registers** - one zero-sized type per register address
//! - **Lossless bitmasks** - unknown bits read from the device are retained
//! - **Dynamic dispatch** - address lookup and [`registers::RawValue`] decoding
//! - **Stream framing** - [`FrameDecoder`] splits serial bytes into messages

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;
pub mod registers;
pub mod registry;

pub use protocol::{
    DEFAULT_PORT, DecoderConfig, Error, FrameDecoder, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, Message,
    MessageHeader, MessageType, PayloadType, Result, Timestamped,
};
pub use registers::{
    Access, AnalogDataPayload, CameraOutputs, DigitalInputs, DigitalOutputs, EncoderInputs,
    Events, FrameAcquired, MimicOutput, PayloadValue, PortDigitalIOS, PrimitiveKind, PwmOutputs,
    RawValue, Register, RegisterDescriptor, RgbAllPayload, RgbPayload, ServoOutputs,
};

/// Device identifier reported by the `WhoAmI` core register
pub const WHO_AM_I: u16 = 1216;
