use harp_behavior::registers::{AnalogData, PortDIOStateEvent, PortDigitalInput, Register};
use harp_behavior::{
    AnalogDataPayload, DecoderConfig, DigitalInputs, Error, FrameDecoder, Message, MessageType,
    PayloadType, PortDigitalIOS, RawValue, registry,
};

fn event_stream() -> Vec<Message> {
    (0..32u16)
        .map(|i| {
            let seconds = f64::from(i) * 0.5;
            match i % 3 {
                0 => AnalogData::from_timestamped_payload(
                    seconds,
                    MessageType::Event,
                    AnalogDataPayload::new(i16::try_from(i).unwrap() * 10, -1),
                ),
                1 => PortDigitalInput::from_timestamped_payload(
                    seconds,
                    MessageType::Event,
                    DigitalInputs::from_bits_retain(u8::try_from(i).unwrap()),
                ),
                _ => PortDIOStateEvent::from_timestamped_payload(
                    seconds,
                    MessageType::Event,
                    PortDigitalIOS::DIO1,
                ),
            }
        })
        .collect()
}

#[test]
fn decoder_reassembles_chunked_stream() {
    let messages = event_stream();
    let wire: Vec<u8> = messages
        .iter()
        .flat_map(|m| m.encode().expect("encodable"))
        .collect();

    let mut decoder = FrameDecoder::new();
    let mut received = Vec::new();
    for chunk in wire.chunks(7) {
        received.extend(decoder.decode(chunk).expect("within buffer limit"));
    }

    assert_eq!(received, messages);
    assert_eq!(decoder.buffered(), 0);
    assert_eq!(decoder.skipped(), 0);
}

#[test]
fn decoder_joins_stream_mid_frame() {
    let messages = event_stream();
    let wire: Vec<u8> = messages
        .iter()
        .flat_map(|m| m.encode().expect("encodable"))
        .collect();

    let mut decoder = FrameDecoder::new();
    let received = decoder.decode(&wire[3..]).expect("within buffer limit");

    assert!(decoder.skipped() > 0);
    assert_eq!(received.last(), messages.last());
}

#[test]
fn grouped_events_keep_arrival_order() {
    let groups = registry::group_by_register(event_stream()).expect("known registers");

    assert_eq!(groups.len(), 3);
    let analog = &groups[&44];
    let times: Vec<f64> = analog.iter().map(|m| m.timestamp().unwrap()).collect();
    assert!(times.windows(2).all(|w| w[0] < w[1]));

    let first = AnalogData::get_timestamped_payload(&analog[0]).unwrap();
    assert_eq!(first.value, AnalogDataPayload::new(0, -1));
    assert_eq!(first.seconds, 0.0);
}

#[test]
fn unknown_register_stops_grouping() {
    let mut messages = event_stream();
    messages.push(Message::new(33, MessageType::Event, PayloadType::U8, vec![0]));

    assert!(matches!(
        registry::group_by_register(messages),
        Err(Error::UnknownRegister { address: 33 })
    ));
}

#[test]
fn error_replies_decode_dynamically() {
    let reply =
        PortDigitalInput::from_payload(MessageType::Write, DigitalInputs::DI3).with_error(true);
    let decoded = Message::decode(&reply.encode().unwrap()).unwrap();

    assert!(decoded.is_error());
    let (descriptor, value) = registry::decode(&decoded).unwrap();
    assert_eq!(descriptor.name(), "PortDigitalInput");
    assert_eq!(value, RawValue::U8(0x08));
}

#[test]
fn decoder_recovers_from_garbage_extended_length() {
    let mut decoder = FrameDecoder::new();
    assert!(decoder.decode(&[0x01, 0xFF, 0xFF, 0xFF]).unwrap().is_empty());

    let event = PortDigitalInput::from_payload(MessageType::Event, DigitalInputs::DI_PORT0)
        .encode()
        .expect("encodable");
    let mut delivered = 0;
    for _ in 0..20_000 {
        delivered += decoder.decode(&event).expect("within buffer limit").len();
    }

    assert_eq!(delivered, 20_000);
    assert_eq!(decoder.skipped(), 4);
    assert_eq!(decoder.buffered(), 0);
}

#[test]
fn decoder_drops_header_larger_than_limit() {
    let mut decoder = FrameDecoder::with_config(DecoderConfig {
        max_buffered: 1024,
        ..DecoderConfig::default()
    });
    let mut wire = vec![0x02, 0xFF, 0x00, 0x10];
    for message in event_stream() {
        wire.extend(message.encode().expect("encodable"));
    }

    let received = decoder.decode(&wire).expect("within buffer limit");
    assert_eq!(received, event_stream());
    assert_eq!(decoder.skipped(), 4);
}

#[test]
fn decoder_needs_room_for_a_header() {
    let mut decoder = FrameDecoder::with_config(DecoderConfig {
        max_buffered: 3,
        ..DecoderConfig::default()
    });
    assert!(matches!(
        decoder.decode(&[0x01, 0xFF, 0xFF, 0xFF]),
        Err(Error::BufferTooSmall { .. })
    ));
}
