//! Command-line configuration for `lsm-inspect`.
//!
//! This module provides:
//! - Command-line arguments via clap
//! - Environment variables with `LSM_` prefix
//! - Defaults as named constants
//!
//! # Environment Variables
//!
//! - `LSM_VERBOSE` - Enable debug logging (default: false)
//! - `LSM_MAX_BITS` - Maximum LZW code width for `lzw` (default: 12)
//! - `LSM_JSON` - Print `info` output as JSON (default: false)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::lzw::{DEFAULT_MAX_BITS, MAX_BITS, MIN_BITS};

// =============================================================================
// CLI Arguments
// =============================================================================

/// lsm-inspect - Inspect Zeiss LSM microscopy files.
///
/// Prints directory metadata, extracts decoded pixel strips and exercises
/// the LZW codec used for strip compression.
#[derive(Parser, Debug, Clone)]
#[command(name = "lsm-inspect")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true, default_value_t = false, env = "LSM_VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check the selected subcommand's arguments.
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Info(_) | Command::LzwSurvey(_) => Ok(()),
            Command::Strip(config) => config.validate(),
            Command::Lzw(config) => config.validate(),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print every directory of an LSM file.
    Info(InfoConfig),

    /// Decode one pixel strip to a raw file.
    Strip(StripConfig),

    /// Compress a file at every LZW code width and report the ratios.
    LzwSurvey(SurveyConfig),

    /// Compress or decompress a file with the LZW codec.
    Lzw(LzwConfig),
}

// =============================================================================
// Subcommand Arguments
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct InfoConfig {
    /// LSM file to inspect.
    pub file: PathBuf,

    /// Print the parsed directories as JSON.
    #[arg(long, default_value_t = false, env = "LSM_JSON")]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StripConfig {
    /// LSM file to read from.
    pub file: PathBuf,

    /// Directory index, in chain order.
    #[arg(long, default_value_t = 0)]
    pub directory: usize,

    /// Strip index within the directory.
    #[arg(long, default_value_t = 0)]
    pub strip: usize,

    /// Where to write the decoded bytes.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Undo horizontal differencing before writing.
    #[arg(long, default_value_t = false)]
    pub undo_predictor: bool,
}

impl StripConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.output.as_os_str().is_empty() {
            return Err("output path must not be empty".to_string());
        }
        if self.output == self.file {
            return Err("output path must differ from the input file".to_string());
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct SurveyConfig {
    /// File whose bytes are compressed.
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct LzwConfig {
    /// Input file.
    pub file: PathBuf,

    /// Maximum code width in bits (9-15).
    #[arg(long, default_value_t = DEFAULT_MAX_BITS, env = "LSM_MAX_BITS")]
    pub max_bits: u8,

    /// Where to write the result.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Decompress instead of compress.
    #[arg(long, default_value_t = false)]
    pub decode: bool,
}

impl LzwConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_BITS..=MAX_BITS).contains(&self.max_bits) {
            return Err(format!(
                "max_bits must be between {} and {}",
                MIN_BITS, MAX_BITS
            ));
        }
        if self.output == self.file {
            return Err("output path must differ from the input file".to_string());
        }
        Ok(())
    }
}
