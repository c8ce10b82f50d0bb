//! ucanfix CLI - streams UCAN conformance fixtures to stdout.

use std::io;

use clap::{Parser, ValueEnum};
use ucanfix_catalog::{run_batch, BatchKind};

#[derive(Parser)]
#[command(name = "ucanfix")]
#[command(about = "Generate UCAN conformance fixtures as a JSON stream")]
struct Cli {
    /// Which corpus to generate
    #[arg(value_enum, default_value_t = Mode::Valid)]
    mode: Mode,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Fixtures a validator must accept
    Valid,
    /// Fixtures a validator must reject
    Invalid,
}

fn main() {
    let cli = Cli::parse();
    let kind = match cli.mode {
        Mode::Valid => BatchKind::Valid,
        Mode::Invalid => BatchKind::Invalid,
    };

    let stdout = io::stdout();
    if let Err(e) = run_batch(kind, stdout.lock()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
