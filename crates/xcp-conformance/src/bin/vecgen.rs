//! Golden wire-vector generator CLI.
//!
//! ```bash
//! # Write all vectors as JSON
//! cargo run -p xcp-conformance --bin xcp-vecgen -- --out vectors/wire.json
//!
//! # List available vectors
//! cargo run -p xcp-conformance --bin xcp-vecgen -- --list
//!
//! # Verify the implementation against the vectors
//! cargo run -p xcp-conformance --bin xcp-vecgen -- --verify
//! ```

#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use xcp_conformance::WireGoldenVector;

/// XCP wire golden-vector generator.
///
/// Output is stable across runs and platforms.
#[derive(Parser, Debug)]
#[command(name = "xcp-vecgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file for generated vectors (stdout if omitted).
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// List available vectors without generating.
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Verify the implementation against the vectors instead of generating.
    #[arg(long, default_value_t = false)]
    verify: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let vectors = WireGoldenVector::load_all();

    if args.list {
        for vector in &vectors {
            println!("{}  {}", vector.name, vector.description);
        }
        return Ok(());
    }

    if args.verify {
        let mut failed = 0usize;
        for vector in &vectors {
            match vector.verify() {
                Ok(()) => println!("ok    {}", vector.name),
                Err(message) => {
                    failed += 1;
                    eprintln!("FAIL  {message}");
                }
            }
        }
        anyhow::ensure!(failed == 0, "{failed} vector(s) failed verification");
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&vectors)?;
    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            println!("wrote {} vector(s) to {}", vectors.len(), path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
