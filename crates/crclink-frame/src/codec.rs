use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::crc::{block_checksum, feed_byte, finish, DEFAULT_POLYNOMIAL};
use crate::error::{FrameError, Result};
use crate::report::{NullReporter, Reporter};
use crate::tags::TagSet;

/// Maximum number of payload bytes covered by one checksum.
pub const BLOCK_SIZE: usize = 8;

/// Default maximum payload size accepted by the framer: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// Default limit on bytes a reader buffers while waiting for a frame: 1 KiB.
///
/// A well-formed frame is at most `2 * BLOCK_SIZE + 3` wire bytes, so anything
/// near this limit is a stalled frame. The extractor rescans the pending frame
/// on every poll, which keeps this bound small.
pub const DEFAULT_MAX_BUFFERED: usize = 1024;

/// Configuration shared by the framer and the extractor of one stream.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Reserved start, stop and escape bytes.
    pub tags: TagSet,
    /// CRC generator polynomial. Default: 0x87.
    pub polynomial: u8,
    /// Maximum payload size in bytes for a single `encode_frames` call.
    pub max_payload_size: usize,
    /// Maximum bytes a `FrameReader` holds before giving up on a stalled frame.
    pub max_buffered: usize,
}

impl FrameConfig {
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_polynomial(mut self, polynomial: u8) -> Self {
        self.polynomial = polynomial;
        self
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            tags: TagSet::default(),
            polynomial: DEFAULT_POLYNOMIAL,
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            max_buffered: DEFAULT_MAX_BUFFERED,
        }
    }
}

/// Worst-case wire size for a payload: every byte escaped, plus start tag,
/// checksum and stop tag per block.
pub fn max_encoded_len(payload_len: usize) -> usize {
    let blocks = payload_len.div_ceil(BLOCK_SIZE);
    payload_len * 2 + blocks * 3
}

/// Encode a payload into one frame per 8-byte block.
///
/// Wire format:
/// ```text
/// ┌───────┬──────────────────────────┬──────────┬──────┐
/// │ START │ (ESCAPE? BYTE){1,8}      │ CHECKSUM │ STOP │
/// │ '{'   │ reserved bytes escaped   │ 1 byte   │ '}'  │
/// └───────┴──────────────────────────┴──────────┴──────┘
/// ```
///
/// The checksum byte is written as-is, even when it collides with a tag.
pub fn encode_frames(payload: &[u8], config: &FrameConfig, dst: &mut BytesMut) -> Result<()> {
    if payload.is_empty() {
        return Err(FrameError::EmptyPayload);
    }
    if payload.len() > config.max_payload_size {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: config.max_payload_size,
        });
    }

    let tags = &config.tags;
    let last = payload.len() - 1;
    let mut remainder = 0u8;
    dst.reserve(max_encoded_len(payload.len()));

    for (index, &byte) in payload.iter().enumerate() {
        let offset = index % BLOCK_SIZE;
        if offset == 0 {
            dst.put_u8(tags.start());
            remainder = byte;
        } else {
            remainder = feed_byte(remainder, byte, config.polynomial);
        }

        if tags.is_reserved(byte) {
            dst.put_u8(tags.escape());
        }
        dst.put_u8(byte);

        if offset == BLOCK_SIZE - 1 || index == last {
            dst.put_u8(finish(remainder, config.polynomial));
            dst.put_u8(tags.stop());
        }
    }
    Ok(())
}

/// Why a complete frame failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Corruption {
    /// The recomputed checksum differs from the received one.
    #[error("checksum mismatch (received {received:#04x}, computed {computed:#04x})")]
    ChecksumMismatch { received: u8, computed: u8 },

    /// No unescaped byte preceded the stop tag.
    #[error("missing checksum byte")]
    MissingChecksum,

    /// A checksum arrived with no payload in front of it.
    #[error("empty block")]
    EmptyBlock,

    /// More payload bytes than one block can hold.
    #[error("oversized block ({len} bytes, max {BLOCK_SIZE})")]
    OversizedBlock { len: usize },
}

/// A frame pulled off the inbound buffer.
///
/// Corrupt frames are still delivered; check [`DecodedFrame::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// The unescaped payload block, checksum removed.
    pub payload: Bytes,
    /// Set when validation failed.
    pub corruption: Option<Corruption>,
}

impl DecodedFrame {
    pub fn is_valid(&self) -> bool {
        self.corruption.is_none()
    }
}

/// Decode one frame from the front of `src`.
///
/// Returns `None` if no complete frame is available yet. Bytes ahead of the
/// first start tag are dropped; bytes from the start tag on stay in `src`
/// until a stop tag completes the frame or a later start tag supersedes it.
pub fn decode_frame(src: &mut BytesMut, config: &FrameConfig) -> Option<DecodedFrame> {
    decode_frame_with(src, config, &mut NullReporter)
}

/// Like [`decode_frame`], sending discards and corruption to `reporter`.
pub fn decode_frame_with<R: Reporter + ?Sized>(
    src: &mut BytesMut,
    config: &FrameConfig,
    reporter: &mut R,
) -> Option<DecodedFrame> {
    let scan = scan(&src[..], &config.tags);

    if scan.start > 0 {
        reporter.discarded(scan.start);
    }
    src.advance(scan.end.unwrap_or(scan.start));

    let frame = scan.frame?.validate(config.polynomial);
    if let Some(corruption) = &frame.corruption {
        reporter.corrupted(&frame, corruption);
    }
    Some(frame)
}

/// Decode every complete frame currently buffered in `src`.
pub fn decode_all<R: Reporter + ?Sized>(
    src: &mut BytesMut,
    config: &FrameConfig,
    reporter: &mut R,
) -> Vec<DecodedFrame> {
    let mut frames = Vec::new();
    while let Some(frame) = decode_frame_with(src, config, reporter) {
        frames.push(frame);
    }
    frames
}

/// Result of scanning a snapshot of the inbound buffer.
struct Scan {
    /// Offset of the start tag the scan settled on; everything before it is garbage.
    start: usize,
    /// One past the stop tag, if the frame completed.
    end: Option<usize>,
    frame: Option<RawFrame>,
}

/// Unescaped frame contents before validation.
struct RawFrame {
    block: Vec<u8>,
    checksum: Option<u8>,
}

/// The most recent logical byte; it is the checksum if the stop tag follows.
#[derive(Clone, Copy)]
struct Slot {
    byte: u8,
    escaped: bool,
}

fn scan(buf: &[u8], tags: &TagSet) -> Scan {
    let Some(mut start) = buf.iter().position(|&b| b == tags.start()) else {
        return Scan {
            start: buf.len(),
            end: None,
            frame: None,
        };
    };

    let incomplete = |start: usize| Scan {
        start,
        end: None,
        frame: None,
    };

    let mut block = Vec::with_capacity(BLOCK_SIZE);
    let mut last: Option<Slot> = None;
    let mut cursor = start + 1;

    loop {
        let Some(&byte) = buf.get(cursor) else {
            return incomplete(start);
        };

        if byte == tags.escape() {
            let Some(&literal) = buf.get(cursor + 1) else {
                return incomplete(start);
            };
            let slot = Slot {
                byte: literal,
                escaped: true,
            };
            block.extend(last.replace(slot).map(|s| s.byte));
            cursor += 2;
        } else if byte == tags.stop() {
            let checksum = match last {
                Some(Slot {
                    byte,
                    escaped: false,
                }) => Some(byte),
                Some(slot) => {
                    block.push(slot.byte);
                    None
                }
                None => None,
            };
            return Scan {
                start,
                end: Some(cursor + 1),
                frame: Some(RawFrame { block, checksum }),
            };
        } else if byte == tags.start() {
            // Damaged frame: restart on the new start tag.
            start = cursor;
            block.clear();
            last = None;
            cursor += 1;
        } else {
            let slot = Slot {
                byte,
                escaped: false,
            };
            block.extend(last.replace(slot).map(|s| s.byte));
            cursor += 1;
        }
    }
}

impl RawFrame {
    fn validate(self, polynomial: u8) -> DecodedFrame {
        let corruption = match self.checksum {
            None => Some(Corruption::MissingChecksum),
            Some(_) if self.block.len() > BLOCK_SIZE => Some(Corruption::OversizedBlock {
                len: self.block.len(),
            }),
            Some(received) => match block_checksum(&self.block, polynomial) {
                None => Some(Corruption::EmptyBlock),
                Some(computed) if computed == received => None,
                Some(computed) => Some(Corruption::ChecksumMismatch { received, computed }),
            },
        };

        DecodedFrame {
            payload: Bytes::from(self.block),
            corruption,
        }
    }
}
