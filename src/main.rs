//! Scriv - A terminal rich text editor with RTF support.
//!
//! # Usage
//!
//! ```bash
//! scriv notes.rtf
//! scriv --plain readme.rtf
//! scriv
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use scriv::app::App;

/// A terminal rich text editor with RTF support
#[derive(Parser, Debug)]
#[command(name = "scriv", version, about, long_about = None)]
struct Cli {
    /// File to edit (.rtf for rich text, anything else is plain text)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Treat the file as plain text regardless of its extension
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let app = App::new(cli.file).with_force_plain(cli.plain);
    app.run().context("Application error")
}
