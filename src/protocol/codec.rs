//! Harp frame codec (encode/decode)
//!
//! Frames are self-delimiting: the length field gives the number of bytes that
//! follow it, so a decoder can split a serial byte stream without lookahead.

use bytes::Bytes;
use tracing::{debug, trace};

use super::header::{EXTENDED_LENGTH, TIMESTAMP_SIZE, join_timestamp, split_timestamp};
use super::{CHECKSUM_SIZE, Error, MAX_PAYLOAD_SIZE, MIN_FRAME_SIZE, Message, MessageHeader, Result};

/// Bytes covered by the length field besides the timestamp and payload:
/// address, port, payload type and checksum
const FIXED_BODY_SIZE: usize = 3 + CHECKSUM_SIZE;

/// Wrapping 8-bit sum of `bytes`
#[must_use]
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, byte| sum.wrapping_add(*byte))
}

/// Encode a message to bytes
///
/// # Format
///
/// ```text
/// [TYPE] [LENGTH (1 or 3)] [ADDRESS] [PORT] [PAYLOAD TYPE] [TIMESTAMP (6)?] [PAYLOAD] [CHECKSUM]
/// ```
///
/// # Errors
///
/// Returns [`Error::PayloadTooLarge`] if the payload cannot be described by
/// the extended length field.
pub fn encode(message: &Message) -> Result<Vec<u8>> {
    let header = message.header();
    let payload = message.payload();

    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(Error::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }

    let timestamp_len = if message.timestamp().is_some() {
        TIMESTAMP_SIZE
    } else {
        0
    };
    let length = FIXED_BODY_SIZE + timestamp_len + payload.len();
    let mut bytes = Vec::with_capacity(length + 4);

    // Write header
    bytes.push(header.message_type_byte());
    if length < usize::from(EXTENDED_LENGTH) {
        bytes.push(length as u8);
    } else {
        bytes.push(EXTENDED_LENGTH);
        bytes.extend_from_slice(&(length as u16).to_le_bytes());
    }
    bytes.push(header.address());
    bytes.push(header.port());
    bytes.push(header.payload_type_byte(message.timestamp().is_some()));

    // Write timestamp
    if let Some(timestamp) = message.timestamp() {
        let (seconds, ticks) = split_timestamp(timestamp);
        bytes.extend_from_slice(&seconds.to_le_bytes());
        bytes.extend_from_slice(&ticks.to_le_bytes());
    }

    // Write payload
    bytes.extend_from_slice(payload);

    // Write checksum (everything before it)
    let sum = checksum(&bytes);
    bytes.push(sum);

    trace!(
        address = header.address(),
        message_type = %header.message_type(),
        len = bytes.len(),
        "encoded frame"
    );

    Ok(bytes)
}

/// Decode the frame at the start of `bytes`
///
/// Bytes past the end of the frame are ignored.
///
/// # Errors
///
/// Returns an error if:
/// - Buffer does not hold a complete frame
/// - Message type or payload type is unknown
/// - Length field is inconsistent with the header
/// - Checksum doesn't match
pub fn decode(bytes: &[u8]) -> Result<Message> {
    match decode_frame(bytes)? {
        Some((message, _)) => Ok(message),
        None => Err(Error::BufferTooSmall {
            needed: frame_size(bytes)?.unwrap_or(MIN_FRAME_SIZE),
            got: bytes.len(),
        }),
    }
}

/// Decode a frame from the start of a byte stream
///
/// Returns `Ok(None)` when more bytes are needed, or the message together with
/// the number of bytes it occupied.
pub fn decode_frame(bytes: &[u8]) -> Result<Option<(Message, usize)>> {
    decode_frame_with(bytes, true)
}

/// Total size of the frame starting at `bytes[0]`, if enough of it is buffered
/// to tell
pub(crate) fn frame_size(bytes: &[u8]) -> Result<Option<usize>> {
    let Some(&type_byte) = bytes.first() else {
        return Ok(None);
    };
    if super::MessageType::from_u8(type_byte).is_none() {
        return Err(Error::InvalidMessageType { type_byte });
    }

    let Some(&length_byte) = bytes.get(1) else {
        return Ok(None);
    };
    let (length, length_field) = if length_byte == EXTENDED_LENGTH {
        let Some(extended) = bytes.get(2..4) else {
            return Ok(None);
        };
        (usize::from(u16::from_le_bytes([extended[0], extended[1]])), 3)
    } else {
        (usize::from(length_byte), 1)
    };

    if length < FIXED_BODY_SIZE {
        return Err(Error::InvalidLength { length });
    }

    Ok(Some(1 + length_field + length))
}

pub(crate) fn decode_frame_with(
    bytes: &[u8],
    verify_checksum: bool,
) -> Result<Option<(Message, usize)>> {
    let Some(total) = frame_size(bytes)? else {
        return Ok(None);
    };
    if bytes.len() < total {
        return Ok(None);
    }
    let frame = &bytes[..total];

    // Verify checksum
    let stored = frame[total - 1];
    let calculated = checksum(&frame[..total - 1]);
    if verify_checksum && stored != calculated {
        debug!(
            expected = calculated,
            found = stored,
            "frame checksum mismatch"
        );
        return Err(Error::ChecksumMismatch {
            expected: calculated,
            found: stored,
        });
    }

    // Parse header
    let body_start = if frame[1] == EXTENDED_LENGTH { 4 } else { 2 };
    let length = total - body_start;
    let header = MessageHeader::from_bytes(
        frame[0],
        frame[body_start],
        frame[body_start + 1],
        frame[body_start + 2],
    )?;
    let timestamped = frame[body_start + 2] & super::PayloadType::TIMESTAMP_FLAG != 0;

    let mut offset = body_start + 3;
    let timestamp = if timestamped {
        if length < FIXED_BODY_SIZE + TIMESTAMP_SIZE {
            return Err(Error::InvalidLength { length });
        }
        let seconds = u32::from_le_bytes([
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]);
        let ticks = u16::from_le_bytes([frame[offset + 4], frame[offset + 5]]);
        offset += TIMESTAMP_SIZE;
        Some(join_timestamp(seconds, ticks))
    } else {
        None
    };

    // Extract payload
    let payload = &frame[offset..total - 1];
    if payload.len() % header.payload_type().element_size() != 0 {
        return Err(Error::InvalidLength { length });
    }

    trace!(
        address = header.address(),
        message_type = %header.message_type(),
        len = total,
        "decoded frame"
    );

    Ok(Some((
        Message::from_parts(header, timestamp, Bytes::copy_from_slice(payload)),
        total,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MessageType, PayloadType};

    #[test]
    fn test_encode_layout() {
        let message = Message::new(70, MessageType::Write, PayloadType::U8, vec![1, 2, 3, 4, 5, 6]);
        let encoded = encode(&message).unwrap();

        let expected_sum = checksum(&[0x02, 10, 70, 0xFF, 0x01, 1, 2, 3, 4, 5, 6]);
        assert_eq!(
            encoded,
            vec![0x02, 10, 70, 0xFF, 0x01, 1, 2, 3, 4, 5, 6, expected_sum]
        );
    }

    #[test]
    fn test_encode_timestamp_layout() {
        let message =
            Message::with_timestamp(32, 1.5, MessageType::Event, PayloadType::U8, vec![0x05]);
        let encoded = encode(&message).unwrap();

        assert_eq!(encoded.len(), 2 + 3 + TIMESTAMP_SIZE + 1 + 1);
        assert_eq!(encoded[1] as usize, encoded.len() - 2);
        assert_eq!(encoded[4], 0x11);
        assert_eq!(&encoded[5..9], &1u32.to_le_bytes());
        assert_eq!(&encoded[9..11], &15_625u16.to_le_bytes());
        assert_eq!(encoded[11], 0x05);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let original = Message::with_timestamp(
            44,
            7.5,
            MessageType::Event,
            PayloadType::S16,
            vec![0x9C, 0xFF, 0xC8, 0x00],
        );
        let encoded = encode(&original).unwrap();
        let decoded = decode(&encoded).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_extended_length_roundtrip() {
        let original = Message::new(12, MessageType::Write, PayloadType::U8, vec![0xAB; 300]);
        let encoded = encode(&original).unwrap();

        assert_eq!(encoded[1], EXTENDED_LENGTH);
        assert_eq!(
            usize::from(u16::from_le_bytes([encoded[2], encoded[3]])),
            encoded.len() - 4
        );
        assert_eq!(decode(&encoded).unwrap(), original);
    }

    #[test]
    fn test_encode_payload_too_large() {
        let message = Message::new(
            12,
            MessageType::Write,
            PayloadType::U8,
            vec![0; MAX_PAYLOAD_SIZE + 1],
        );
        assert!(matches!(encode(&message), Err(Error::PayloadTooLarge { .. })));
    }

    #[test]
    fn test_decode_checksum_mismatch() {
        let original = Message::new(34, MessageType::Write, PayloadType::U16, vec![1, 0]);
        let mut encoded = encode(&original).unwrap();

        // Corrupt the checksum
        let len = encoded.len();
        encoded[len - 1] ^= 0xFF;

        let result = decode(&encoded);
        assert!(matches!(result, Err(Error::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_decode_buffer_too_small() {
        let original = Message::new(34, MessageType::Write, PayloadType::U16, vec![1, 0]);
        let encoded = encode(&original).unwrap();

        let result = decode(&encoded[..encoded.len() - 1]);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall { needed, got })
                if needed == encoded.len() && got == encoded.len() - 1
        ));
        assert!(matches!(decode(&[]), Err(Error::BufferTooSmall { .. })));
    }

    #[test]
    fn test_decode_frame_reports_consumed() {
        let first =
            encode(&Message::new(41, MessageType::Write, PayloadType::U8, vec![7])).unwrap();
        let second =
            encode(&Message::new(42, MessageType::Write, PayloadType::U8, vec![1])).unwrap();
        let mut stream = first.clone();
        stream.extend_from_slice(&second);

        let (message, used) = decode_frame(&stream).unwrap().unwrap();
        assert_eq!(message.address(), 41);
        assert_eq!(used, first.len());

        let (message, used) = decode_frame(&stream[used..]).unwrap().unwrap();
        assert_eq!(message.address(), 42);
        assert_eq!(used, second.len());

        assert!(decode_frame(&stream[..3]).unwrap().is_none());
    }

    #[test]
    fn test_decode_invalid_message_type() {
        let result = decode(&[0x00, 4, 32, 0xFF, 0x01, 0x00]);
        assert!(matches!(result, Err(Error::InvalidMessageType { type_byte: 0 })));
    }

    #[test]
    fn test_decode_invalid_length() {
        assert!(matches!(
            decode(&[0x01, 2, 32, 0xFF]),
            Err(Error::InvalidLength { length: 2 })
        ));

        // Two payload bytes declared as S16 would be fine; three are not.
        let mut frame = vec![0x02, 7, 44, 0xFF, 0x82, 1, 2, 3];
        frame.push(checksum(&frame));
        assert!(matches!(decode(&frame), Err(Error::InvalidLength { length: 7 })));
    }

    // Property-based tests
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn message_type_strategy() -> impl Strategy<Value = MessageType> {
            prop_oneof![
                Just(MessageType::Read),
                Just(MessageType::Write),
                Just(MessageType::Event),
            ]
        }

        fn timestamp_strategy() -> impl Strategy<Value = Option<(u32, u16)>> {
            prop::option::of((any::<u32>(), 0u16..31_250))
        }

        proptest! {
            /// Property: Any byte payload roundtrips with its header and timestamp
            #[test]
            fn prop_roundtrip_preserves_data(
                address in any::<u8>(),
                msg_type in message_type_strategy(),
                timestamp in timestamp_strategy(),
                payload in prop::collection::vec(any::<u8>(), 0..=512),
            ) {
                let timestamp = timestamp.map(|(seconds, ticks)| join_timestamp(seconds, ticks));
                let header = MessageHeader::new(address, msg_type, PayloadType::U8);
                let original = Message::from_parts(header, timestamp, Bytes::from(payload));

                let encoded = encode(&original).unwrap();
                let decoded = decode(&encoded).unwrap();

                prop_assert_eq!(decoded, original);
            }

            /// Property: Corrupting any single byte is detected
            #[test]
            fn prop_corruption_detected(
                payload in prop::collection::vec(any::<u8>(), 1..=64),
                corrupt_offset_ratio in 0.0f64..1.0,
                corrupt_value in 1u8..=255,
            ) {
                let original = Message::new(70, MessageType::Write, PayloadType::U8, payload);
                let mut encoded = encode(&original).unwrap();

                let corrupt_offset = (encoded.len() as f64 * corrupt_offset_ratio) as usize;
                encoded[corrupt_offset] = encoded[corrupt_offset].wrapping_add(corrupt_value);

                // Either the checksum, the type bytes or the length field gives it away.
                prop_assert!(decode(&encoded).map(|decoded| decoded != original).unwrap_or(true));
            }

            /// Property: Every strict prefix of a frame asks for more bytes
            #[test]
            fn prop_prefix_is_incomplete(
                payload in prop::collection::vec(any::<u8>(), 0..=32),
                cut_ratio in 0.0f64..1.0,
            ) {
                let message = Message::new(45, MessageType::Read, PayloadType::U8, payload);
                let encoded = encode(&message).unwrap();
                let cut = (encoded.len() as f64 * cut_ratio) as usize;

                prop_assert!(decode_frame(&encoded[..cut]).unwrap().is_none());
            }
        }
    }
}
