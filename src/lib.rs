//! Asteroid object file library.
//!
//! This library reads and writes the object files exchanged between the galaxy
//! assembler and linker for the 16-bit virtual machine.
//! It is organized into several modules:
//! - `scalar`: 16-bit big-endian words.
//! - `text`: Length-prefixed strings.
//! - `header`: Magic token and format version negotiation.
//! - `codec`: Whole-module encoding and decoding.
//! - `module`: The in-memory module.
//! - `file`: Reading and writing object files on disk.
//! - `report`: Human-readable dumps.
//! - `config`: CLI configuration.

pub mod codec;
pub mod config;
pub mod error;
pub mod file;
pub mod header;
pub mod module;
pub mod report;
pub mod scalar;
pub mod text;

pub use codec::{decode, decode_from, encode, encode_into};
pub use error::{ObjectError, Result};
pub use module::{Module, Section};
