use std::fs::{self, File};
use std::io::{self, Read, Write};

use crclink_frame::{FrameConfig, FrameWriter, BLOCK_SIZE};

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};

pub fn run(args: EncodeArgs, config: FrameConfig) -> CliResult<i32> {
    let payload = resolve_payload(&args)?;

    let sink: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(
            File::create(path)
                .map_err(|err| io_error(&format!("failed creating {}", path.display()), err))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let mut writer = FrameWriter::with_config(sink, config);
    let written = writer
        .send(&payload)
        .map_err(|err| frame_error("encode failed", err))?;

    tracing::info!(
        payload_bytes = payload.len(),
        frames = payload.len().div_ceil(BLOCK_SIZE),
        wire_bytes = written,
        "payload framed"
    );
    Ok(SUCCESS)
}

fn resolve_payload(args: &EncodeArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    let mut payload = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut payload)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(payload)
}
