//! Reserved tag bytes.
//!
//! Three byte values delimit and escape frame content on the wire. Any payload
//! byte equal to one of them is preceded by the escape tag.

use crate::error::{FrameError, Result};

/// Default start-of-frame tag: `{`.
pub const DEFAULT_START: u8 = b'{';

/// Default end-of-frame tag: `}`.
pub const DEFAULT_STOP: u8 = b'}';

/// Default escape tag: `\`.
pub const DEFAULT_ESCAPE: u8 = b'\\';

/// The three reserved byte values of one codec instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSet {
    start: u8,
    stop: u8,
    escape: u8,
}

impl TagSet {
    /// Build a tag set, rejecting values that are not pairwise distinct.
    pub fn new(start: u8, stop: u8, escape: u8) -> Result<Self> {
        if start == stop || start == escape || stop == escape {
            return Err(FrameError::InvalidTags {
                start,
                stop,
                escape,
            });
        }
        Ok(Self {
            start,
            stop,
            escape,
        })
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn stop(&self) -> u8 {
        self.stop
    }

    pub fn escape(&self) -> u8 {
        self.escape
    }

    /// Returns true if `byte` must be escaped inside a block.
    pub fn is_reserved(&self, byte: u8) -> bool {
        byte == self.start || byte == self.stop || byte == self.escape
    }
}

impl Default for TagSet {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            stop: DEFAULT_STOP,
            escape: DEFAULT_ESCAPE,
        }
    }
}
