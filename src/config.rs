//! Configuration module.
//!
//! This module defines the command-line interface (CLI) for the object file dumper using `clap`.

use clap::builder::TypedValueParser;
use clap::Parser;
use std::path::PathBuf;

use crate::report::DEFAULT_WORDS_PER_LINE;

/// Print the contents of an asteroid object file.
///
/// Shows exported and imported labels, used-label sites and the object code
/// of a single module produced by the galaxy assembler.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Object file to dump
    pub input: PathBuf,

    /// Object code words per output row
    #[arg(long, default_value_t = DEFAULT_WORDS_PER_LINE, value_parser = clap::value_parser!(u16).range(1..=64).map(usize::from))]
    pub words_per_line: usize,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", help = "Set the logging level")]
    pub log_level: String,
}
