use clap::Args;
use crclink_frame::{FrameConfig, TagSet, DEFAULT_POLYNOMIAL};

use crate::exit::{frame_error, CliResult};

/// Codec settings shared by every subcommand.
///
/// Both ends of a link must agree on these; the environment variables make
/// it easy to pin them once per shell.
#[derive(Args, Debug, Clone)]
pub struct CodecArgs {
    /// CRC generator polynomial (e.g. 0x87, 135).
    #[arg(long, global = true, env = "CRCLINK_POLYNOMIAL", value_parser = parse_byte, default_value = "0x87")]
    pub polynomial: u8,

    /// Start-of-frame tag: one ASCII character, 0xNN, or 0-255. A lone digit is a
    /// byte value; write digit characters as 0x30-0x39.
    #[arg(long, global = true, env = "CRCLINK_START_TAG", value_parser = parse_byte, default_value = "{")]
    pub start_tag: u8,

    /// End-of-frame tag: one ASCII character, 0xNN, or 0-255. A lone digit is a
    /// byte value; write digit characters as 0x30-0x39.
    #[arg(long, global = true, env = "CRCLINK_STOP_TAG", value_parser = parse_byte, default_value = "}")]
    pub stop_tag: u8,

    /// Escape tag: one ASCII character, 0xNN, or 0-255. A lone digit is a
    /// byte value; write digit characters as 0x30-0x39.
    #[arg(long, global = true, env = "CRCLINK_ESCAPE_TAG", value_parser = parse_byte, default_value = "\\")]
    pub escape_tag: u8,
}

impl Default for CodecArgs {
    fn default() -> Self {
        let tags = TagSet::default();
        Self {
            polynomial: DEFAULT_POLYNOMIAL,
            start_tag: tags.start(),
            stop_tag: tags.stop(),
            escape_tag: tags.escape(),
        }
    }
}

impl CodecArgs {
    pub fn frame_config(&self) -> CliResult<FrameConfig> {
        let tags = TagSet::new(self.start_tag, self.stop_tag, self.escape_tag)
            .map_err(|err| frame_error("invalid codec options", err))?;
        Ok(FrameConfig::default()
            .with_tags(tags)
            .with_polynomial(self.polynomial))
    }
}

/// Parse `0xNN`, a decimal byte, or a single ASCII character.
///
/// A single digit is read as a decimal value, so `"7"` is 0x07, not `b'7'`.
pub fn parse_byte(input: &str) -> Result<u8, String> {
    if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        return u8::from_str_radix(hex, 16).map_err(|_| format!("invalid hex byte: {input}"));
    }

    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => Ok(c as u8 - b'0'),
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        (Some(_), None) => Err(format!("not an ASCII character: {input}")),
        _ => input
            .parse::<u8>()
            .map_err(|_| format!("expected 0xNN, 0-255, or one ASCII character: {input}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::USAGE;

    #[test]
    fn parses_byte_forms() {
        assert_eq!(parse_byte("0x87"), Ok(0x87));
        assert_eq!(parse_byte("0X7e"), Ok(0x7E));
        assert_eq!(parse_byte("135"), Ok(135));
        assert_eq!(parse_byte("7"), Ok(7));
        assert_eq!(parse_byte("{"), Ok(b'{'));
        assert_eq!(parse_byte("\\"), Ok(b'\\'));
    }

    #[test]
    fn single_digit_is_a_value_not_a_character() {
        assert_eq!(parse_byte("5"), Ok(5));
        assert_eq!(parse_byte("0x35"), Ok(b'5'));
    }

    #[test]
    fn tag_help_explains_digit_characters() {
        let cmd = <CodecArgs as clap::Args>::augment_args(clap::Command::new("crclink"));
        for id in ["start_tag", "stop_tag", "escape_tag"] {
            let arg = cmd
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .unwrap();
            let help = arg.get_help().unwrap().to_string();
            assert!(help.contains("A lone digit is a byte value"), "{id}: {help}");
            assert!(help.contains("0x30-0x39"), "{id}: {help}");
        }
    }

    #[test]
    fn rejects_bad_bytes() {
        assert!(parse_byte("0x1FF").is_err());
        assert!(parse_byte("256").is_err());
        assert!(parse_byte("ab").is_err());
        assert!(parse_byte("é").is_err());
        assert!(parse_byte("").is_err());
    }

    #[test]
    fn default_args_match_codec_defaults() {
        let cfg = CodecArgs::default().frame_config().unwrap();
        assert_eq!(cfg.tags, TagSet::default());
        assert_eq!(cfg.polynomial, 0x87);
    }

    #[test]
    fn duplicate_tags_are_usage_errors() {
        let args = CodecArgs {
            stop_tag: b'{',
            ..CodecArgs::default()
        };
        let err = args.frame_config().unwrap_err();
        assert_eq!(err.code, USAGE);
    }
}
