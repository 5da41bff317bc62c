//! Bit masks and enumerations of the Behavior board.

use bitflags::bitflags;

bitflags! {
    /// Register access mode
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct Access: u8 {
        /// Register can be read
        const READ = 0x01;
        /// Register can be written
        const WRITE = 0x02;
        /// Device emits events for the register
        const EVENT = 0x04;
        /// Read and write
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
        /// Read-only, reported through events
        const READ_EVENT = Self::READ.bits() | Self::EVENT.bits();
    }
}

bitflags! {
    /// Digital inputs of the poke ports and DI3
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct DigitalInputs: u8 {
        /// Poke input of port 0
        const DI_PORT0 = 0x1;
        /// Poke input of port 1
        const DI_PORT1 = 0x2;
        /// Poke input of port 2
        const DI_PORT2 = 0x4;
        /// Digital input DI3
        const DI3 = 0x8;
    }
}

bitflags! {
    /// Digital outputs of the board
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct DigitalOutputs: u16 {
        /// Digital output of port 0
        const DO_PORT0 = 0x1;
        /// Digital output of port 1
        const DO_PORT1 = 0x2;
        /// Digital output of port 2
        const DO_PORT2 = 0x4;
        /// Supply of port 0
        const SUPPLY_PORT0 = 0x8;
        /// Supply of port 1
        const SUPPLY_PORT1 = 0x10;
        /// Supply of port 2
        const SUPPLY_PORT2 = 0x20;
        /// LED 0
        const LED0 = 0x40;
        /// LED 1
        const LED1 = 0x80;
        /// RGB LED 0
        const RGB0 = 0x100;
        /// RGB LED 1
        const RGB1 = 0x200;
        /// Digital output DO0
        const DO0 = 0x400;
        /// Digital output DO1
        const DO1 = 0x800;
        /// Digital output DO2
        const DO2 = 0x1000;
        /// Digital output DO3
        const DO3 = 0x2000;
    }
}

bitflags! {
    /// Digital IO lines of the ports
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct PortDigitalIOS: u8 {
        /// Line DIO0
        const DIO0 = 0x1;
        /// Line DIO1
        const DIO1 = 0x2;
        /// Line DIO2
        const DIO2 = 0x4;
    }
}

bitflags! {
    /// Digital outputs that can run a PWM
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct PwmOutputs: u8 {
        /// PWM on DO0
        const PWM_DO0 = 0x1;
        /// PWM on DO1
        const PWM_DO1 = 0x2;
        /// PWM on DO2
        const PWM_DO2 = 0x4;
        /// PWM on DO3
        const PWM_DO3 = 0x8;
    }
}

bitflags! {
    /// Event sources that can be enabled on the device
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct Events: u8 {
        /// Port digital input events
        const PORT_DI = 0x1;
        /// Port DIO events
        const PORT_DIO = 0x2;
        /// Analog data events
        const ANALOG_DATA = 0x4;
        /// Camera 0 frame events
        const CAMERA0 = 0x8;
        /// Camera 1 frame events
        const CAMERA1 = 0x10;
    }
}

bitflags! {
    /// Camera trigger outputs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct CameraOutputs: u8 {
        /// Camera trigger 0
        const CAMERA_OUTPUT0 = 0x1;
        /// Camera trigger 1
        const CAMERA_OUTPUT1 = 0x2;
    }
}

bitflags! {
    /// Servo motor outputs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct ServoOutputs: u8 {
        /// Servo on port 2
        const SERVO_OUTPUT2 = 0x4;
        /// Servo on port 3
        const SERVO_OUTPUT3 = 0x8;
    }
}

bitflags! {
    /// Quadrature encoder inputs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct EncoderInputs: u8 {
        /// Encoder on port 2
        const ENCODER_PORT2 = 0x4;
    }
}

bitflags! {
    /// Frame-acquired marker of a camera event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct FrameAcquired: u8 {
        /// A frame was acquired
        const FRAME_ACQUIRED = 0x1;
    }
}

/// Source mirrored by a mimic register
///
/// Kept as a newtype so unknown codes read from the device survive a
/// decode/encode round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct MimicOutput(pub u8);

impl MimicOutput {
    /// No source
    pub const NONE: Self = Self(0);
    /// Port DIO0
    pub const DIO0: Self = Self(1);
    /// Port DIO1
    pub const DIO1: Self = Self(2);
    /// Port DIO2
    pub const DIO2: Self = Self(3);
    /// Output DO0
    pub const DO0: Self = Self(4);
    /// Output DO1
    pub const DO1: Self = Self(5);
    /// Output DO2
    pub const DO2: Self = Self(6);
    /// Output DO3
    pub const DO3: Self = Self(7);

    /// Raw code
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Check whether the code names a known source
    #[must_use]
    pub const fn is_known(self) -> bool {
        self.0 <= Self::DO3.0
    }
}

impl From<u8> for MimicOutput {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl From<MimicOutput> for u8 {
    fn from(output: MimicOutput) -> Self {
        output.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_values() {
        assert_eq!(DigitalOutputs::DO3.bits(), 0x2000);
        assert_eq!(DigitalOutputs::RGB0.bits(), 0x100);
        assert_eq!(Events::CAMERA1.bits(), 0x10);
        assert_eq!(ServoOutputs::SERVO_OUTPUT2.bits(), 0x4);
        assert_eq!(EncoderInputs::ENCODER_PORT2.bits(), 0x4);
    }

    #[test]
    fn test_unknown_bits_retained() {
        let flags = DigitalInputs::from_bits_retain(0xF3);
        assert_eq!(flags.bits(), 0xF3);
        assert!(flags.contains(DigitalInputs::DI_PORT0 | DigitalInputs::DI_PORT1));
        assert!(!flags.contains(DigitalInputs::DI_PORT2));
    }

    #[test]
    fn test_mimic_output() {
        assert!(MimicOutput::DO3.is_known());
        assert!(!MimicOutput::from(42).is_known());
        assert_eq!(u8::from(MimicOutput::DIO2), 3);
    }

    #[test]
    fn test_access_composites() {
        assert!(Access::READ_WRITE.contains(Access::WRITE));
        assert!(!Access::READ_EVENT.contains(Access::WRITE));
    }
}
