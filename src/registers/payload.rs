//! Register payload layouts.

use bytes::{Buf, BufMut, BytesMut};

use super::PrimitiveKind;
use super::flags::{
    CameraOutputs, DigitalInputs, DigitalOutputs, EncoderInputs, Events, FrameAcquired,
    MimicOutput, PortDigitalIOS, PwmOutputs, ServoOutputs,
};

/// Full-scale analog input in volts
const ANALOG_FULL_SCALE_VOLTS: f32 = 5.0;

/// ADC counts read at full scale
const ANALOG_FULL_SCALE_COUNTS: f32 = 3818.0;

/// Logical value stored in a register
///
/// The payload is `COUNT` elements of `KIND`, little-endian, fields packed in
/// declaration order.
pub trait PayloadValue: Sized {
    /// Element kind
    const KIND: PrimitiveKind;

    /// Number of elements
    const COUNT: usize = 1;

    /// Decode from a payload holding exactly `COUNT` elements of `KIND`
    fn decode(payload: &[u8]) -> Self;

    /// Append the payload bytes
    fn encode(&self, buf: &mut BytesMut);
}

impl PayloadValue for u8 {
    const KIND: PrimitiveKind = PrimitiveKind::U8;

    fn decode(mut payload: &[u8]) -> Self {
        payload.get_u8()
    }

    fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(*self);
    }
}

impl PayloadValue for u16 {
    const KIND: PrimitiveKind = PrimitiveKind::U16;

    fn decode(mut payload: &[u8]) -> Self {
        payload.get_u16_le()
    }

    fn encode(&self, buf: &mut BytesMut) {
        buf.put_u16_le(*self);
    }
}

impl PayloadValue for i16 {
    const KIND: PrimitiveKind = PrimitiveKind::S16;

    fn decode(mut payload: &[u8]) -> Self {
        payload.get_i16_le()
    }

    fn encode(&self, buf: &mut BytesMut) {
        buf.put_i16_le(*self);
    }
}

macro_rules! impl_flags_payload {
    ($($ty:ty => $kind:ident, $get:ident, $put:ident;)*) => {
        $(
            impl PayloadValue for $ty {
                const KIND: PrimitiveKind = PrimitiveKind::$kind;

                fn decode(mut payload: &[u8]) -> Self {
                    Self::from_bits_retain(payload.$get())
                }

                fn encode(&self, buf: &mut BytesMut) {
                    buf.$put(self.bits());
                }
            }
        )*
    };
}

impl_flags_payload! {
    DigitalInputs => U8, get_u8, put_u8;
    DigitalOutputs => U16, get_u16_le, put_u16_le;
    PortDigitalIOS => U8, get_u8, put_u8;
    PwmOutputs => U8, get_u8, put_u8;
    Events => U8, get_u8, put_u8;
    CameraOutputs => U8, get_u8, put_u8;
    ServoOutputs => U8, get_u8, put_u8;
    EncoderInputs => U8, get_u8, put_u8;
    FrameAcquired => U8, get_u8, put_u8;
}

impl PayloadValue for MimicOutput {
    const KIND: PrimitiveKind = PrimitiveKind::U8;

    fn decode(mut payload: &[u8]) -> Self {
        Self(payload.get_u8())
    }

    fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.0);
    }
}

/// Analog input and encoder sample (address 44)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalogDataPayload {
    /// Raw ADC counts of the analog input
    pub analog_input: i16,
    /// Quadrature encoder count on port 2
    pub encoder: i16,
}

impl AnalogDataPayload {
    /// Create a sample
    #[must_use]
    pub const fn new(analog_input: i16, encoder: i16) -> Self {
        Self {
            analog_input,
            encoder,
        }
    }

    /// Analog input converted to volts
    #[must_use]
    pub fn analog_input_volts(&self) -> f32 {
        f32::from(self.analog_input) * ANALOG_FULL_SCALE_VOLTS / ANALOG_FULL_SCALE_COUNTS
    }
}

impl PayloadValue for AnalogDataPayload {
    const KIND: PrimitiveKind = PrimitiveKind::S16;
    const COUNT: usize = 2;

    fn decode(mut payload: &[u8]) -> Self {
        Self {
            analog_input: payload.get_i16_le(),
            encoder: payload.get_i16_le(),
        }
    }

    fn encode(&self, buf: &mut BytesMut) {
        buf.put_i16_le(self.analog_input);
        buf.put_i16_le(self.encoder);
    }
}

/// Color of one RGB LED (addresses 71 and 72)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RgbPayload {
    /// Green intensity
    pub green: u8,
    /// Red intensity
    pub red: u8,
    /// Blue intensity
    pub blue: u8,
}

impl RgbPayload {
    /// Create a color from its channels, in wire order
    #[must_use]
    pub const fn new(green: u8, red: u8, blue: u8) -> Self {
        Self { green, red, blue }
    }
}

impl PayloadValue for RgbPayload {
    const KIND: PrimitiveKind = PrimitiveKind::U8;
    const COUNT: usize = 3;

    fn decode(mut payload: &[u8]) -> Self {
        Self {
            green: payload.get_u8(),
            red: payload.get_u8(),
            blue: payload.get_u8(),
        }
    }

    fn encode(&self, buf: &mut BytesMut) {
        buf.put_slice(&[self.green, self.red, self.blue]);
    }
}

/// Colors of both RGB LEDs (address 70)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RgbAllPayload {
    /// Green intensity of LED 0
    pub green0: u8,
    /// Red intensity of LED 0
    pub red0: u8,
    /// Blue intensity of LED 0
    pub blue0: u8,
    /// Green intensity of LED 1
    pub green1: u8,
    /// Red intensity of LED 1
    pub red1: u8,
    /// Blue intensity of LED 1
    pub blue1: u8,
}

impl RgbAllPayload {
    /// Create both colors from their channels, in wire order
    #[must_use]
    pub const fn new(green0: u8, red0: u8, blue0: u8, green1: u8, red1: u8, blue1: u8) -> Self {
        Self {
            green0,
            red0,
            blue0,
            green1,
            red1,
            blue1,
        }
    }

    /// Combine the colors of LED 0 and LED 1
    #[must_use]
    pub const fn from_pair(rgb0: RgbPayload, rgb1: RgbPayload) -> Self {
        Self::new(rgb0.green, rgb0.red, rgb0.blue, rgb1.green, rgb1.red, rgb1.blue)
    }

    /// Separate into the colors of LED 0 and LED 1
    #[must_use]
    pub const fn split(&self) -> (RgbPayload, RgbPayload) {
        (
            RgbPayload::new(self.green0, self.red0, self.blue0),
            RgbPayload::new(self.green1, self.red1, self.blue1),
        )
    }
}

impl PayloadValue for RgbAllPayload {
    const KIND: PrimitiveKind = PrimitiveKind::U8;
    const COUNT: usize = 6;

    fn decode(payload: &[u8]) -> Self {
        let (rgb0, rgb1) = payload.split_at(RgbPayload::COUNT);
        Self::from_pair(RgbPayload::decode(rgb0), RgbPayload::decode(rgb1))
    }

    fn encode(&self, buf: &mut BytesMut) {
        let (rgb0, rgb1) = self.split();
        rgb0.encode(buf);
        rgb1.encode(buf);
    }
}

impl From<(RgbPayload, RgbPayload)> for RgbAllPayload {
    fn from((rgb0, rgb1): (RgbPayload, RgbPayload)) -> Self {
        Self::from_pair(rgb0, rgb1)
    }
}
