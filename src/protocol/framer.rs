//! Incremental frame decoding for serial byte streams

use bytes::{Buf, BytesMut};
use tracing::{debug, trace};

use super::codec::{decode_frame_with, frame_size};
use super::{Error, MAX_FRAME_SIZE, Message, Result};

/// Tuning knobs for [`FrameDecoder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Reject frames whose checksum does not match (default true)
    pub verify_checksum: bool,
    /// Upper bound on bytes held while waiting for a frame to complete
    ///
    /// Defaults to [`MAX_FRAME_SIZE`]. A header announcing a larger frame is
    /// treated as corrupt.
    pub max_buffered: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            verify_checksum: true,
            max_buffered: MAX_FRAME_SIZE,
        }
    }
}

/// Splits a byte stream into Harp messages
///
/// Bytes can be pushed in chunks of any size. When the buffered data does not
/// start with a valid frame, one byte is dropped and parsing resumes from the
/// next, so a stream joined mid-frame resynchronises by itself.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    config: DecoderConfig,
    buffer: BytesMut,
    skipped: u64,
}

impl FrameDecoder {
    /// Create a decoder with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with an explicit configuration
    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            config,
            buffer: BytesMut::new(),
            skipped: 0,
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Append received bytes
    ///
    /// Callers pushing bytes by hand should drain [`next_message`](Self::next_message)
    /// between calls; [`decode`](Self::decode) does that itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] when the bytes would push the buffer
    /// past `max_buffered`; nothing is appended in that case.
    pub fn extend(&mut self, data: &[u8]) -> Result<()> {
        let needed = self.buffer.len() + data.len();
        if needed > self.config.max_buffered {
            return Err(Error::BufferTooSmall {
                needed,
                got: self.config.max_buffered,
            });
        }
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Pop the next complete message, if any
    pub fn next_message(&mut self) -> Option<Message> {
        loop {
            match decode_frame_with(&self.buffer, self.config.verify_checksum) {
                Ok(Some((message, used))) => {
                    self.buffer.advance(used);
                    trace!(address = message.address(), used, "frame ready");
                    return Some(message);
                }
                Ok(None) => match frame_size(&self.buffer) {
                    Ok(Some(total)) if total > self.config.max_buffered => {
                        debug!(
                            total,
                            max = self.config.max_buffered,
                            "declared frame exceeds buffer limit, resynchronising"
                        );
                        self.skip_byte();
                    }
                    _ => return None,
                },
                Err(err) => {
                    debug!(error = %err, buffered = self.buffer.len(), "resynchronising");
                    self.skip_byte();
                }
            }
        }
    }

    /// Append bytes and collect every message they complete
    ///
    /// Input larger than the free buffer space is consumed in pieces, draining
    /// complete messages in between.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] when `max_buffered` is too small to
    /// hold even a frame header, so no further progress is possible.
    pub fn decode(&mut self, data: &[u8]) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        let mut rest = data;
        loop {
            let room = self.config.max_buffered.saturating_sub(self.buffer.len());
            let (now, later) = rest.split_at(room.min(rest.len()));
            self.buffer.extend_from_slice(now);
            messages.extend(std::iter::from_fn(|| self.next_message()));
            rest = later;

            if rest.is_empty() {
                return Ok(messages);
            }
            if self.buffer.len() >= self.config.max_buffered {
                return Err(Error::BufferTooSmall {
                    needed: self.buffer.len() + rest.len(),
                    got: self.config.max_buffered,
                });
            }
        }
    }

    /// Number of bytes currently buffered
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Number of bytes discarded while resynchronising
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Drop any partially received frame
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    fn skip_byte(&mut self) {
        self.buffer.advance(1);
        self.skipped += 1;
    }
}
