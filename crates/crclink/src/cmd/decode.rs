use crclink_frame::{FrameConfig, FrameError, FrameReader};

use crate::cmd::{check::CountingReporter, open_input, DecodeArgs};
use crate::exit::{frame_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_frame, OutputFormat, Summary};

pub fn run(args: DecodeArgs, config: FrameConfig, format: OutputFormat) -> CliResult<i32> {
    let input = open_input(args.input.as_deref())?;
    let mut reader = FrameReader::with_reporter(input, config, CountingReporter::default());
    let mut summary = Summary::default();

    loop {
        match reader.read_frame() {
            Ok(frame) => {
                print_frame(summary.frames, &frame, format);
                summary.record(&frame);
            }
            Err(FrameError::ConnectionClosed) => break,
            Err(FrameError::BufferOverflow { size, max }) => {
                tracing::warn!(size, max, "abandoned stalled frame");
            }
            Err(err) => return Err(frame_error("decode failed", err)),
        }
    }

    summary.discarded_bytes = reader.reporter().discarded;
    summary.trailing_bytes = reader.buffered().len();
    if summary.trailing_bytes > 0 {
        tracing::warn!(
            bytes = summary.trailing_bytes,
            "stream ended inside an incomplete frame"
        );
    }
    tracing::info!(
        frames = summary.frames,
        corrupt = summary.corrupt,
        discarded = summary.discarded_bytes,
        "decode finished"
    );

    if args.strict && summary.corrupt > 0 {
        return Ok(DATA_INVALID);
    }
    Ok(SUCCESS)
}
