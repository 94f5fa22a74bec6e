use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use crclink_frame::FrameConfig;

use crate::exit::{io_error, CliResult};
use crate::output::OutputFormat;

pub mod check;
pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Frame a payload and write the wire bytes.
    Encode(EncodeArgs),
    /// Decode a wire stream and print every frame.
    Decode(DecodeArgs),
    /// Decode a wire stream and print only a summary.
    Check(CheckArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, config: FrameConfig, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, config),
        Command::Decode(args) => decode::run(args, config, format),
        Command::Check(args) => check::run(args, config, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Raw string payload.
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with = "data")]
    pub file: Option<PathBuf>,
    /// Write wire bytes to a file instead of stdout.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Wire stream to read. Default: stdin.
    pub input: Option<PathBuf>,
    /// Exit with DATA_INVALID if any frame fails its checksum.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Wire stream to read. Default: stdin.
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Open a file, or stdin when no path is given.
pub(crate) fn open_input(path: Option<&Path>) -> CliResult<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}
