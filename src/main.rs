use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crosscorr_plot::config::PlotConfig;
use crosscorr_plot::{data, plot};

const USAGE: &str = "Usage: plot [OUTPUT FILE]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let (Some(input), None) = (args.next(), args.next()) else {
        println!("{USAGE}");
        return Ok(());
    };

    run(&input_path(input))
}

/// Turn the raw argument into a path. Surrounding whitespace is trimmed when
/// the argument is valid Unicode; other paths are used byte for byte.
fn input_path(arg: OsString) -> PathBuf {
    match arg.to_str() {
        Some(s) => PathBuf::from(s.trim()),
        None => PathBuf::from(arg),
    }
}

/// Load one crosscorr power spectrum and write both log-log plots to the
/// working directory.
fn run(input: &Path) -> Result<()> {
    let table = data::loader::load_file(input)
        .with_context(|| format!("loading {}", input.display()))?;
    println!("{} read in", input.display());

    let config = PlotConfig::load_or_default(Path::new(".")).context("reading plot settings")?;

    plot::plot_spectra(&table, &config, Path::new(".")).context("writing plots")?;
    Ok(())
}
