//! Register catalogue of the Behavior board.

use super::flags::{
    Access, CameraOutputs, DigitalInputs, DigitalOutputs, EncoderInputs, Events, FrameAcquired,
    MimicOutput, PortDigitalIOS, PwmOutputs, ServoOutputs,
};
use super::payload::{AnalogDataPayload, RgbAllPayload, RgbPayload};
use super::{Register, RegisterDescriptor};

macro_rules! registers {
    ($(
        $(#[$meta:meta])*
        $name:ident = $address:literal => $value:ty, $access:ident;
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name;

            impl Register for $name {
                type Value = $value;
                const ADDRESS: u8 = $address;
                const NAME: &'static str = stringify!($name);
                const ACCESS: Access = Access::$access;
            }
        )*

        /// Descriptors of every register, ordered by address
        pub(crate) const CATALOGUE: &[RegisterDescriptor] = &[
            $(<$name as Register>::DESCRIPTOR,)*
        ];
    };
}

registers! {
    /// State of the digital input lines
    PortDigitalInput = 32 => DigitalInputs, READ_EVENT;
    /// Set the specified digital outputs
    OutputSet = 34 => DigitalOutputs, READ_WRITE;
    /// Clear the specified digital outputs
    OutputClear = 35 => DigitalOutputs, READ_WRITE;
    /// Toggle the specified digital outputs
    OutputToggle = 36 => DigitalOutputs, READ_WRITE;
    /// Write the state of all digital outputs
    OutputState = 37 => DigitalOutputs, READ_WRITE;
    /// Set the specified port DIO lines
    PortDIOSet = 38 => PortDigitalIOS, READ_WRITE;
    /// Clear the specified port DIO lines
    PortDIOClear = 39 => PortDigitalIOS, READ_WRITE;
    /// Toggle the specified port DIO lines
    PortDIOToggle = 40 => PortDigitalIOS, READ_WRITE;
    /// Write the state of all port DIO lines
    PortDIOState = 41 => PortDigitalIOS, READ_WRITE;
    /// Direction of the port DIO lines (set bit is output)
    PortDIODirection = 42 => PortDigitalIOS, READ_WRITE;
    /// State of the port DIO lines configured as inputs
    PortDIOStateEvent = 43 => PortDigitalIOS, READ_EVENT;
    /// Analog input and encoder sample
    AnalogData = 44 => AnalogDataPayload, READ_EVENT;
    /// Outputs that switch off after their pulse duration
    OutputPulseEnable = 45 => DigitalOutputs, READ_WRITE;
    /// Pulse duration of DO port 0 in milliseconds
    PulseDOPort0 = 46 => u16, READ_WRITE;
    /// Pulse duration of DO port 1 in milliseconds
    PulseDOPort1 = 47 => u16, READ_WRITE;
    /// Pulse duration of DO port 2 in milliseconds
    PulseDOPort2 = 48 => u16, READ_WRITE;
    /// Pulse duration of supply port 0 in milliseconds
    PulseSupplyPort0 = 49 => u16, READ_WRITE;
    /// Pulse duration of supply port 1 in milliseconds
    PulseSupplyPort1 = 50 => u16, READ_WRITE;
    /// Pulse duration of supply port 2 in milliseconds
    PulseSupplyPort2 = 51 => u16, READ_WRITE;
    /// Pulse duration of LED 0 in milliseconds
    PulseLed0 = 52 => u16, READ_WRITE;
    /// Pulse duration of LED 1 in milliseconds
    PulseLed1 = 53 => u16, READ_WRITE;
    /// Pulse duration of RGB LED 0 in milliseconds
    PulseRgb0 = 54 => u16, READ_WRITE;
    /// Pulse duration of RGB LED 1 in milliseconds
    PulseRgb1 = 55 => u16, READ_WRITE;
    /// Pulse duration of DO0 in milliseconds
    PulseDO0 = 56 => u16, READ_WRITE;
    /// Pulse duration of DO1 in milliseconds
    PulseDO1 = 57 => u16, READ_WRITE;
    /// Pulse duration of DO2 in milliseconds
    PulseDO2 = 58 => u16, READ_WRITE;
    /// Pulse duration of DO3 in milliseconds
    PulseDO3 = 59 => u16, READ_WRITE;
    /// PWM frequency of DO0 in Hz
    PwmFrequencyDO0 = 60 => u16, READ_WRITE;
    /// PWM frequency of DO1 in Hz
    PwmFrequencyDO1 = 61 => u16, READ_WRITE;
    /// PWM frequency of DO2 in Hz
    PwmFrequencyDO2 = 62 => u16, READ_WRITE;
    /// PWM frequency of DO3 in Hz
    PwmFrequencyDO3 = 63 => u16, READ_WRITE;
    /// PWM duty cycle of DO0 in percent
    PwmDutyCycleDO0 = 64 => u8, READ_WRITE;
    /// PWM duty cycle of DO1 in percent
    PwmDutyCycleDO1 = 65 => u8, READ_WRITE;
    /// PWM duty cycle of DO2 in percent
    PwmDutyCycleDO2 = 66 => u8, READ_WRITE;
    /// PWM duty cycle of DO3 in percent
    PwmDutyCycleDO3 = 67 => u8, READ_WRITE;
    /// Start the PWM on the specified outputs
    PwmStart = 68 => PwmOutputs, READ_WRITE;
    /// Stop the PWM on the specified outputs
    PwmStop = 69 => u8, READ_WRITE;
    /// Colors of both RGB LEDs
    RgbAll = 70 => RgbAllPayload, READ_WRITE;
    /// Color of RGB LED 0
    Rgb0 = 71 => RgbPayload, READ_WRITE;
    /// Color of RGB LED 1
    Rgb1 = 72 => RgbPayload, READ_WRITE;
    /// Current of LED 0 in mA
    Led0Current = 73 => u8, READ_WRITE;
    /// Current of LED 1 in mA
    Led1Current = 74 => u8, READ_WRITE;
    /// Maximum current of LED 0 in mA
    Led0MaxCurrent = 75 => u8, READ_WRITE;
    /// Maximum current of LED 1 in mA
    Led1MaxCurrent = 76 => u8, READ_WRITE;
    /// Event sources reported by the device
    EventEnable = 77 => Events, READ_WRITE;
    /// Start triggering the specified cameras
    StartCameras = 78 => CameraOutputs, READ_WRITE;
    /// Stop triggering the specified cameras
    StopCameras = 79 => CameraOutputs, READ_WRITE;
    /// Enable the specified servo outputs
    EnableServos = 80 => ServoOutputs, READ_WRITE;
    /// Disable the specified servo outputs
    DisableServos = 81 => ServoOutputs, READ_WRITE;
    /// Enable the specified encoder inputs
    EnableEncoders = 82 => EncoderInputs, READ_WRITE;
    /// Frame acquired by camera 0
    Camera0Frame = 92 => FrameAcquired, READ_EVENT;
    /// Trigger frequency of camera 0 in Hz
    Camera0Frequency = 93 => u16, READ_WRITE;
    /// Frame acquired by camera 1
    Camera1Frame = 94 => FrameAcquired, READ_EVENT;
    /// Trigger frequency of camera 1 in Hz
    Camera1Frequency = 95 => u16, READ_WRITE;
    /// Period of servo motor 2 in microseconds
    ServoMotor2Period = 100 => u16, READ_WRITE;
    /// Pulse of servo motor 2 in microseconds
    ServoMotor2Pulse = 101 => u16, READ_WRITE;
    /// Period of servo motor 3 in microseconds
    ServoMotor3Period = 102 => u16, READ_WRITE;
    /// Pulse of servo motor 3 in microseconds
    ServoMotor3Pulse = 103 => u16, READ_WRITE;
    /// Reset the counter of the specified encoders
    EncoderReset = 108 => EncoderInputs, READ_WRITE;
    /// Emit a timestamp event on each serial byte received
    EnableSerialTimestamp = 110 => u8, READ_WRITE;
    /// Output mirroring the IR beam of port 0
    MimicPort0IR = 111 => MimicOutput, READ_WRITE;
    /// Output mirroring the IR beam of port 1
    MimicPort1IR = 112 => MimicOutput, READ_WRITE;
    /// Output mirroring the IR beam of port 2
    MimicPort2IR = 113 => MimicOutput, READ_WRITE;
    /// Output mirroring the valve of port 0
    MimicPort0Valve = 117 => MimicOutput, READ_WRITE;
    /// Output mirroring the valve of port 1
    MimicPort1Valve = 118 => MimicOutput, READ_WRITE;
    /// Output mirroring the valve of port 2
    MimicPort2Valve = 119 => MimicOutput, READ_WRITE;
    /// Low-pass filter of the poke inputs in milliseconds
    PokeInputFilter = 122 => u8, READ_WRITE;
}
