use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use crclink_frame::DecodedFrame;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput {
    index: usize,
    valid: bool,
    corruption: Option<String>,
    payload_size: usize,
    payload: String,
}

impl FrameOutput {
    fn new(index: usize, frame: &DecodedFrame) -> Self {
        Self {
            index,
            valid: frame.is_valid(),
            corruption: frame.corruption.as_ref().map(ToString::to_string),
            payload_size: frame.payload.len(),
            payload: payload_preview(frame.payload.as_ref()),
        }
    }
}

pub fn print_frame(index: usize, frame: &DecodedFrame, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = FrameOutput::new(index, frame);
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let out = FrameOutput::new(index, frame);
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FRAME", "STATUS", "SIZE", "PAYLOAD"])
                .add_row(vec![
                    out.index.to_string(),
                    out.corruption.unwrap_or_else(|| "ok".to_string()),
                    out.payload_size.to_string(),
                    out.payload,
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let status = match &frame.corruption {
                Some(corruption) => format!("CORRUPT ({corruption})"),
                None => "ok".to_string(),
            };
            println!(
                "frame={} status={} size={} payload={}",
                index,
                status,
                frame.payload.len(),
                payload_preview(frame.payload.as_ref())
            );
        }
        OutputFormat::Raw => {
            print_raw(frame.payload.as_ref());
        }
    }
}

/// Totals for a decoded stream.
#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub frames: usize,
    pub valid: usize,
    pub corrupt: usize,
    pub payload_bytes: usize,
    pub discarded_bytes: usize,
    pub trailing_bytes: usize,
}

impl Summary {
    pub fn record(&mut self, frame: &DecodedFrame) {
        self.frames += 1;
        self.payload_bytes += frame.payload.len();
        if frame.is_valid() {
            self.valid += 1;
        } else {
            self.corrupt += 1;
        }
    }
}

pub fn print_summary(summary: &Summary, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(summary).unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FRAMES", "VALID", "CORRUPT", "PAYLOAD", "DISCARDED", "TRAILING"])
                .add_row(vec![
                    summary.frames.to_string(),
                    summary.valid.to_string(),
                    summary.corrupt.to_string(),
                    summary.payload_bytes.to_string(),
                    summary.discarded_bytes.to_string(),
                    summary.trailing_bytes.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => println!(
            "frames={} valid={} corrupt={} payload_bytes={} discarded_bytes={} trailing_bytes={}",
            summary.frames,
            summary.valid,
            summary.corrupt,
            summary.payload_bytes,
            summary.discarded_bytes,
            summary.trailing_bytes
        ),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}
