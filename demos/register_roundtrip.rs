//! Encode a few Behavior commands and decode a captured event stream.
//!
//! Run with `cargo run --example register_roundtrip`.

use harp_behavior::registers::{AnalogData, OutputSet, Register, RgbAll};
use harp_behavior::{
    AnalogDataPayload, DigitalOutputs, FrameDecoder, MessageType, RawValue, RgbAllPayload,
    RgbPayload, registry,
};

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> harp_behavior::Result<()> {
    println!("Behavior register round trip (WhoAmI {})", harp_behavior::WHO_AM_I);
    println!("-----------------------------------------------------------------");

    let commands = [
        OutputSet::from_payload(MessageType::Write, DigitalOutputs::LED0 | DigitalOutputs::DO2),
        RgbAll::from_payload(
            MessageType::Write,
            RgbAllPayload::from_pair(RgbPayload::new(255, 0, 0), RgbPayload::new(0, 0, 255)),
        ),
        AnalogData::read_request(),
    ];
    for command in &commands {
        let descriptor = registry::descriptor_for(command)?;
        println!("{:<18} {}", descriptor.name(), hex(&command.encode()?));
    }

    let mut wire = Vec::new();
    for encoder in 0i16..4 {
        let seconds = 100.0 + f64::from(encoder) * 0.001;
        let event = AnalogData::from_timestamped_payload(
            seconds,
            MessageType::Event,
            AnalogDataPayload::new(1909, encoder),
        );
        wire.extend(event.encode()?);
    }

    let mut decoder = FrameDecoder::new();
    for chunk in wire.chunks(5) {
        for message in decoder.decode(chunk)? {
            let sample = AnalogData::get_timestamped_payload(&message)?;
            println!(
                "t={:.6}s analog={:.3}V encoder={}",
                sample.seconds,
                sample.value.analog_input_volts(),
                sample.value.encoder
            );
        }
    }

    if let Some(descriptor) = registry::lookup(70) {
        let raw = RawValue::U8Array(vec![1, 2, 3, 4, 5, 6]);
        let message = descriptor.encode_raw(MessageType::Write, &raw)?;
        println!("{} from raw: {:?}", descriptor.name(), RgbAll::get_payload(&message)?);
    }

    Ok(())
}
