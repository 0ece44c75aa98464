//! # 8086 MOV Decoder - Library
//!
//! This is an 8086 instruction decoder for the MOV register/memory and
//! immediate to register encodings, following the decoding tables in the 8086
//! manual.
//!
// Define the modules in this library
pub mod byte_reader;
pub mod decode;
pub mod display;
pub mod error;
pub mod instruction;
pub mod logger;
pub mod settings;
pub mod tables;
#[cfg(test)]
mod tests;

// Imports
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};

/// Takes in a file path string and returns a byte vector containing the
/// entire contents of the file.
pub fn file_to_byte_vec(input_path: &str) -> Result<Vec<u8>> {
    let mut input_file =
        File::open(input_path).with_context(|| format!("Failed to open '{input_path}'"))?;

    let mut inst_stream: Vec<u8> = vec![];
    input_file
        .read_to_end(&mut inst_stream)
        .with_context(|| format!("Failed to read '{input_path}'"))?;
    Ok(inst_stream)
}

/// Takes in an optional output file path string and returns a writer for it.
/// If there is no path, returns stdout.
pub fn get_output_writer(output_path: &Option<String>, overwrite: bool) -> Result<Box<dyn Write>> {
    let output_file = match output_path {
        Some(file) => {
            let mut file_options = OpenOptions::new();
            file_options.write(true).create(true);
            if overwrite {
                file_options.truncate(true);
            } else {
                file_options.append(true);
            }
            file_options
                .open(file)
                .with_context(|| format!("Failed to open output file '{file}'"))?
        }
        None => return Ok(Box::new(io::stdout())),
    };
    Ok(Box::new(output_file))
}
