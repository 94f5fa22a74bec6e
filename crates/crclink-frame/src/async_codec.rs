//! `tokio_util::codec` adapter for use with `FramedRead` / `FramedWrite`.

use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{decode_frame_with, encode_frames, DecodedFrame, FrameConfig};
use crate::error::FrameError;
use crate::report::{Reporter, TracingReporter};

/// Stream codec over the CRC frame format.
///
/// Each decoded item is one block; callers reassemble multi-block payloads.
#[derive(Debug, Clone, Default)]
pub struct CrcCodec<R = TracingReporter> {
    config: FrameConfig,
    reporter: R,
}

impl CrcCodec {
    pub fn new(config: FrameConfig) -> Self {
        Self::with_reporter(config, TracingReporter)
    }
}

impl<R: Reporter> CrcCodec<R> {
    pub fn with_reporter(config: FrameConfig, reporter: R) -> Self {
        Self { config, reporter }
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}

impl<R: Reporter> Decoder for CrcCodec<R> {
    type Item = DecodedFrame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = decode_frame_with(src, &self.config, &mut self.reporter) {
            return Ok(Some(frame));
        }
        if src.len() >= self.config.max_buffered {
            let size = src.len();
            src.advance(1);
            self.reporter.discarded(1);
            return Err(FrameError::BufferOverflow {
                size,
                max: self.config.max_buffered,
            });
        }
        Ok(None)
    }
}

impl<R> Encoder<&[u8]> for CrcCodec<R> {
    type Error = FrameError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_frames(item, &self.config, dst)
    }
}

impl<R> Encoder<Bytes> for CrcCodec<R> {
    type Error = FrameError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_frames(&item, &self.config, dst)
    }
}
