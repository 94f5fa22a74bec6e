//! Diagnostic sink for the extractor.
//!
//! The codec never writes to the console itself. Whatever owns the inbound
//! buffer injects a [`Reporter`]; the default one logs through `tracing`.

use crate::codec::{Corruption, DecodedFrame};

/// Receives notifications about channel noise and corrupt frames.
pub trait Reporter {
    /// A syntactically complete frame failed validation.
    fn corrupted(&mut self, frame: &DecodedFrame, corruption: &Corruption);

    /// Bytes were dropped while resynchronizing on a start tag.
    fn discarded(&mut self, _count: usize) {}
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn corrupted(&mut self, frame: &DecodedFrame, corruption: &Corruption) {
        (**self).corrupted(frame, corruption);
    }

    fn discarded(&mut self, count: usize) {
        (**self).discarded(count);
    }
}

/// Logs corruption at `warn` and resynchronization at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn corrupted(&mut self, frame: &DecodedFrame, corruption: &Corruption) {
        tracing::warn!(
            payload_len = frame.payload.len(),
            payload = %String::from_utf8_lossy(&frame.payload),
            "corrupt frame: {corruption}"
        );
    }

    fn discarded(&mut self, count: usize) {
        tracing::debug!(count, "discarded bytes while resynchronizing");
    }
}

/// Drops every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn corrupted(&mut self, _frame: &DecodedFrame, _corruption: &Corruption) {}
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Collects reports for assertions.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingReporter {
        pub corrupted: Vec<Corruption>,
        pub discarded: usize,
    }

    impl Reporter for RecordingReporter {
        fn corrupted(&mut self, _frame: &DecodedFrame, corruption: &Corruption) {
            self.corrupted.push(corruption.clone());
        }

        fn discarded(&mut self, count: usize) {
            self.discarded += count;
        }
    }

    #[test]
    fn mutable_reference_forwards() {
        let mut recorder = RecordingReporter::default();
        {
            let mut by_ref = &mut recorder;
            Reporter::discarded(&mut by_ref, 3);
        }
        assert_eq!(recorder.discarded, 3);
    }

    #[test]
    fn null_reporter_accepts_everything() {
        let frame = DecodedFrame {
            payload: bytes::Bytes::from_static(b"x"),
            corruption: Some(Corruption::MissingChecksum),
        };
        let mut null = NullReporter;
        null.corrupted(&frame, &Corruption::MissingChecksum);
        null.discarded(10);
    }
}
