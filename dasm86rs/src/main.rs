//! # 8086 MOV Decoder - Executable

// External imports
use anyhow::{bail, Result};
use clap::Parser;
use std::io::Write;

// Internal imports
use dasm86rs::decode::decode;
use dasm86rs::display::render_lines;
use dasm86rs::settings::{args_to_settings, Args};
use dasm86rs::{file_to_byte_vec, get_output_writer, logger};

fn main() -> Result<()> {
    // Parse args. Fail if incorrect args are given
    let args = Args::parse();
    let (main_settings, decode_settings) = args_to_settings(args);
    logger::init(main_settings.verbose)?;

    log::debug!(
        "Decoding instructions from file '{}'...",
        main_settings.input_file
    );
    let program_bytes = file_to_byte_vec(&main_settings.input_file)?;
    let mut output = get_output_writer(&main_settings.output_file, main_settings.overwrite)?;
    if let Some(output_file) = &main_settings.output_file {
        log::debug!("Outputting decoded assembly to file '{output_file}'...");
    }

    let decoded = decode(&program_bytes, &decode_settings);

    if main_settings.header {
        writeln!(output, "bits 16")?;
    }
    for line in render_lines(&program_bytes, &decoded, main_settings.listing) {
        writeln!(output, "{line}")?;
    }
    output.flush()?;

    match decoded.error {
        Some(e) => bail!("Decoding stopped at offset {}", e.offset()),
        None => Ok(()),
    }
}
