use crclink_frame::{
    Corruption, DecodedFrame, FrameConfig, FrameError, FrameReader, Reporter, TracingReporter,
};

use crate::cmd::{open_input, CheckArgs};
use crate::exit::{frame_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_summary, OutputFormat, Summary};

/// Logs through `tracing` and keeps a running count of resync discards.
#[derive(Debug, Default)]
pub struct CountingReporter {
    pub discarded: usize,
    inner: TracingReporter,
}

impl Reporter for CountingReporter {
    fn corrupted(&mut self, frame: &DecodedFrame, corruption: &Corruption) {
        self.inner.corrupted(frame, corruption);
    }

    fn discarded(&mut self, count: usize) {
        self.discarded += count;
        self.inner.discarded(count);
    }
}

pub fn run(args: CheckArgs, config: FrameConfig, format: OutputFormat) -> CliResult<i32> {
    let input = open_input(args.input.as_deref())?;
    let mut reader = FrameReader::with_reporter(input, config, CountingReporter::default());
    let mut summary = Summary::default();

    loop {
        match reader.read_frame() {
            Ok(frame) => summary.record(&frame),
            Err(FrameError::ConnectionClosed) => break,
            Err(FrameError::BufferOverflow { size, max }) => {
                tracing::warn!(size, max, "abandoned stalled frame");
            }
            Err(err) => return Err(frame_error("check failed", err)),
        }
    }

    summary.discarded_bytes = reader.reporter().discarded;
    summary.trailing_bytes = reader.buffered().len();
    print_summary(&summary, format);

    if summary.corrupt > 0 {
        return Ok(DATA_INVALID);
    }
    Ok(SUCCESS)
}
