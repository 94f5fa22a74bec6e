mod cmd;
mod config;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::config::CodecArgs;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "crclink", version, about = "CRC-checked framing CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        env = "CRCLINK_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    #[command(flatten)]
    codec: CodecArgs,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cli
        .codec
        .frame_config()
        .and_then(|config| cmd::run(cli.command, config, format));

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encode_subcommand() {
        let cli = Cli::try_parse_from(["crclink", "encode", "--data", "HELLO"])
            .expect("encode args should parse");

        assert!(matches!(cli.command, Command::Encode(_)));
        assert_eq!(cli.codec.polynomial, 0x87);
        assert_eq!(cli.codec.start_tag, b'{');
    }

    #[test]
    fn rejects_conflicting_payload_args() {
        let err = Cli::try_parse_from([
            "crclink",
            "encode",
            "--data",
            "hello",
            "--file",
            "/tmp/payload.bin",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn codec_options_are_global() {
        let cli = Cli::try_parse_from([
            "crclink",
            "decode",
            "--strict",
            "--polynomial",
            "0x31",
            "--start-tag",
            "0x02",
            "--stop-tag",
            "3",
            "--escape-tag",
            "0x10",
        ])
        .expect("codec args should parse after the subcommand");

        assert!(matches!(cli.command, Command::Decode(ref args) if args.strict));
        let config = cli.codec.frame_config().unwrap();
        assert_eq!(config.polynomial, 0x31);
        assert_eq!(config.tags.start(), 0x02);
        assert_eq!(config.tags.stop(), 0x03);
        assert_eq!(config.tags.escape(), 0x10);
    }

    #[test]
    fn rejects_bad_polynomial() {
        let err = Cli::try_parse_from(["crclink", "--polynomial", "0x187", "check"])
            .expect_err("out of range polynomial should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn parses_log_level() {
        let cli = Cli::try_parse_from(["crclink", "--log-level", "debug", "version"])
            .expect("version args should parse");
        assert_eq!(cli.log_level, LogLevel::Debug);
    }
}
