use std::io::{ErrorKind, Read};

use bytes::{Buf, BytesMut};

use crate::codec::{decode_frame_with, DecodedFrame, FrameConfig};
use crate::error::{FrameError, Result};
use crate::report::{Reporter, TracingReporter};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads frames from any `Read` stream.
///
/// Owns the inbound buffer: bytes are appended as they arrive and only the
/// extractor removes them. Corrupt frames are returned flagged, not dropped.
pub struct FrameReader<T, R = TracingReporter> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
    reporter: R,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self::with_reporter(inner, config, TracingReporter)
    }
}

impl<T: Read, R: Reporter> FrameReader<T, R> {
    /// Create a frame reader that sends diagnostics to `reporter`.
    pub fn with_reporter(inner: T, config: FrameConfig, reporter: R) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
            reporter,
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached. A
    /// stalled frame that fills `max_buffered` is abandoned and reported as
    /// `BufferOverflow`; the reader stays usable afterwards.
    pub fn read_frame(&mut self) -> Result<DecodedFrame> {
        loop {
            let decoded = decode_frame_with(&mut self.buf, &self.config, &mut self.reporter);
            if let Some(frame) = decoded {
                tracing::trace!(
                    len = frame.payload.len(),
                    valid = frame.is_valid(),
                    "frame received"
                );
                return Ok(frame);
            }

            if self.buf.len() >= self.config.max_buffered {
                let size = self.buf.len();
                // Drop the stalled start tag so the next call resynchronizes.
                self.buf.advance(1);
                self.reporter.discarded(1);
                return Err(FrameError::BufferOverflow {
                    size,
                    max: self.config.max_buffered,
                });
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Bytes received but not yet consumed by a frame.
    pub fn buffered(&self) -> &[u8] {
        &self.buf
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Borrow the diagnostic reporter.
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
