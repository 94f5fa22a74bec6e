//! CRC-checked, tag-delimited framing for unreliable byte channels.
//!
//! A payload is cut into blocks of up to 8 bytes. Every block travels as:
//! - A start tag (`{` by default)
//! - The block bytes, with any reserved byte preceded by an escape tag (`\`)
//! - One unescaped CRC-8 checksum byte
//! - A stop tag (`}`)
//!
//! The extractor resynchronizes on the next start tag after line noise and
//! delivers corrupt frames flagged rather than dropping them.

#[cfg(feature = "async")]
pub mod async_codec;
pub mod codec;
pub mod crc;
pub mod error;
pub mod reader;
pub mod report;
pub mod tags;
pub mod writer;

#[cfg(feature = "async")]
pub use async_codec::CrcCodec;
pub use codec::{
    decode_all, decode_frame, decode_frame_with, encode_frames, max_encoded_len, Corruption,
    DecodedFrame, FrameConfig, BLOCK_SIZE, DEFAULT_MAX_BUFFERED, DEFAULT_MAX_PAYLOAD,
};
pub use crc::{block_checksum, DEFAULT_POLYNOMIAL};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use report::{NullReporter, Reporter, TracingReporter};
pub use tags::TagSet;
pub use writer::FrameWriter;
