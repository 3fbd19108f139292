//! Entry point for the asteroid object file dumper.
//!
//! This file handles high-level application flow:
//! 1. Parse command-line arguments using `clap`.
//! 2. Initialize logging on stderr.
//! 3. Read and decode the object file.
//! 4. Print the report on stdout.
//!
//! Error handling is done via `anyhow`.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use asteroid::config::Config;
use asteroid::file::read_object;
use asteroid::report::Report;

fn main() -> Result<()> {
    let config = Config::parse();

    // RUST_LOG wins over --log-level when set.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let module = read_object(&config.input)
        .with_context(|| format!("failed to read object file {}", config.input.display()))?;

    tracing::info!(
        "decoded {}: {} exports, {} imports, {} used labels, {} code words",
        config.input.display(),
        module.exported_labels.len(),
        module.imported_labels.len(),
        module.used_labels.len(),
        module.object_code.len()
    );

    print!("{}", Report::new(&module).words_per_line(config.words_per_line));
    Ok(())
}
