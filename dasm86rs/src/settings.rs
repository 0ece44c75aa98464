//! Settings
//!
//! This module defines all settings and arguments and related functions

// External imports
use anyhow::{bail, Result};
use clap::Parser;

/// The 8086 MOV instruction decoder
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The input binary file containing 8086 machine code
    pub input_file: String,

    /// The output file to print decoded assembly to. Prints to stdout if not
    /// given.
    pub output_file: Option<String>,

    /// Overwrite the output file instead of appending to it
    #[arg(long)]
    pub overwrite: bool,

    /// Print a `bits 16` line first, so the output can be reassembled by nasm
    #[arg(long)]
    pub header: bool,

    /// Print the offset and raw bytes of each instruction as a comment before
    /// it
    #[arg(long)]
    pub listing: bool,

    /// Stop decoding after this many instructions. Accepts decimal, 0x-prefixed
    /// hex or h-suffixed hex.
    #[arg(long, value_name = "COUNT", value_parser = parse_count)]
    pub exit_after: Option<usize>,

    /// Increase verbosity of print to include debug information
    #[arg(short, long)]
    pub verbose: bool,
}

/// Top-level settings
#[derive(Default, Debug)]
pub struct MainSettings {
    pub input_file: String,
    pub output_file: Option<String>,
    pub overwrite: bool,
    pub header: bool,
    pub listing: bool,
    pub verbose: bool,
}

/// Decode-specific settings
#[derive(Default, Debug, Clone)]
pub struct DecodeSettings {
    /// If specified, stop decoding after this many instructions
    pub exit_after: Option<usize>,
}

/// Parse a count given as decimal, `0x` prefixed hex, or `h` suffixed hex
pub fn parse_count(arg: &str) -> Result<usize> {
    let val = if let Some(hex) = arg.strip_prefix("0x").or(arg.strip_prefix("0X")) {
        usize::from_str_radix(hex, 16)?
    } else if let Some(hex) = arg.strip_suffix('h').or(arg.strip_suffix('H')) {
        usize::from_str_radix(hex, 16)?
    } else {
        arg.parse()?
    };
    if val == 0 {
        bail!("Count must be greater than 0");
    }
    Ok(val)
}

/// Split parsed args into the settings for each part of the program
pub fn args_to_settings(args: Args) -> (MainSettings, DecodeSettings) {
    let main_settings = MainSettings {
        input_file: args.input_file,
        output_file: args.output_file,
        overwrite: args.overwrite,
        header: args.header,
        listing: args.listing,
        verbose: args.verbose,
    };
    let decode_settings = DecodeSettings {
        exit_after: args.exit_after,
    };
    (main_settings, decode_settings)
}
