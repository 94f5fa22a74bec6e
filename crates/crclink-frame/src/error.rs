/// Errors that can occur while framing payloads or moving frames over a stream.
///
/// Corrupt frames are not errors: the extractor hands them back flagged
/// (see [`crate::Corruption`]) and leaves the decision to the caller.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The framer was given nothing to frame.
    #[error("cannot frame an empty payload")]
    EmptyPayload,

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Start, stop and escape tags must be three distinct byte values.
    #[error("tags must be distinct (start {start:#04x}, stop {stop:#04x}, escape {escape:#04x})")]
    InvalidTags { start: u8, stop: u8, escape: u8 },

    /// The inbound buffer grew past its limit without yielding a frame.
    #[error("inbound buffer overflow ({size} bytes buffered, max {max})")]
    BufferOverflow { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
