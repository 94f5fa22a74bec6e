use std::fmt;
use std::io;

use crclink_frame::FrameError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound | io::ErrorKind::BrokenPipe => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::EmptyPayload | FrameError::InvalidTags { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        FrameError::PayloadTooLarge { .. } | FrameError::BufferOverflow { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_frame_errors_to_exit_codes() {
        assert_eq!(frame_error("x", FrameError::EmptyPayload).code, USAGE);
        assert_eq!(
            frame_error("x", FrameError::BufferOverflow { size: 2, max: 1 }).code,
            DATA_INVALID
        );
        assert_eq!(frame_error("x", FrameError::ConnectionClosed).code, FAILURE);
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(frame_error("x", FrameError::Io(denied)).code, PERMISSION_DENIED);
    }

    #[test]
    fn message_carries_context() {
        let err = frame_error("encode failed", FrameError::EmptyPayload);
        assert_eq!(err.to_string(), "encode failed: cannot frame an empty payload");
    }
}
