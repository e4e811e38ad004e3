//! Synthetic crosscorr-style spectra for demos and tests.

use std::f64::consts::{LN_10, PI};
use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError};
use thiserror::Error;

/// Side of the simulated box in Mpc/h, used for the mode count column.
const BOXSIZE: f64 = 160.0;

/// Wavenumber bins span `10^LOG_K_MIN ..= 10^LOG_K_MAX`.
const LOG_K_MIN: f64 = -2.0;
const LOG_K_MAX: f64 = 1.0;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid scatter for bin at k = {k}")]
    Scatter {
        k: f64,
        #[source]
        source: NormalError,
    },
}

/// Broken power law: rises as k^n on large scales, turns over past `k0`.
fn power_law(k: f64, amplitude: f64, n: f64, k0: f64) -> f64 {
    amplitude * k.powf(n) / (1.0 + (k / k0).powi(2)).powi(2)
}

/// Number of Fourier modes in a spherical shell of radius `k`, width `dk`.
fn mode_count(k: f64, dk: f64) -> f64 {
    let kf = 2.0 * PI / BOXSIZE;
    (4.0 * PI * k * k * dk / kf.powi(3)).round().max(1.0)
}

/// Write `bins` log-spaced rows of `k  P(k)  Δ²(k)  N_modes` to `out`.
///
/// The same `seed` always gives the same table.
pub fn write_sample<W: Write>(out: &mut W, bins: usize, seed: u64) -> Result<(), SampleError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dlog = (LOG_K_MAX - LOG_K_MIN) / bins.saturating_sub(1).max(1) as f64;

    writeln!(out, "# k  P(k)  Delta^2(k)  N_modes")?;

    for i in 0..bins {
        let k = 10f64.powf(LOG_K_MIN + i as f64 * dlog);
        let dk = k * dlog * LN_10;

        let modes = mode_count(k, dk);
        // Sample variance shrinks with the number of modes in the shell.
        let scatter = Normal::new(1.0, 1.0 / modes.sqrt())
            .map_err(|source| SampleError::Scatter { k, source })?;
        let mut power = power_law(k, 2.0e4, 1.0, 0.02) * scatter.sample(&mut rng);

        // Cross-spectra go negative where the fields decorrelate.
        if k > 2.0 && rng.gen_bool(0.3) {
            power = -power;
        }

        let deltasq = k.powi(3) * power / (2.0 * PI * PI);
        writeln!(out, "{k:.6e} {power:.6e} {deltasq:.6e} {modes:.0}")?;
    }

    out.flush()?;
    Ok(())
}
