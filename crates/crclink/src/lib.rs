//! CRC-checked framing for unreliable byte channels.
//!
//! crclink turns payloads into tag-delimited, escaped frames carrying a
//! CRC-8 per 8-byte block, and recovers them from a noisy inbound stream.
//!
//! # Crate Structure
//!
//! - [`frame`]: Framer, extractor, CRC engine and stream adapters
//! - `crclink` binary (behind `cli` feature): encode/decode/check from the shell

/// Re-export frame types.
pub mod frame {
    pub use crclink_frame::*;
}
