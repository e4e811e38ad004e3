use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crosscorr_plot::sample::write_sample;

const BINS: usize = 60;
const SEED: u64 = 42;

fn main() -> Result<()> {
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_spectrum.dat"));

    let file = File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    write_sample(&mut BufWriter::new(file), BINS, SEED)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!("Wrote {BINS} wavenumber bins to {}", output_path.display());
    Ok(())
}
