use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::{debug, info, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use thiserror::Error;

use crate::color::{parse_color, ColorError};
use crate::config::{OutputFormat, PlotConfig};
use crate::data::model::SpectralTable;

/// Axis range used when a series has nothing drawable.
const EMPTY_RANGE: Range<f64> = 1.0..10.0;

/// Fraction of the log-space span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

/// Decade exponents an axis end may take while staying a finite, normal f64.
const MIN_DECADE: f64 = -307.0;
const MAX_DECADE: f64 = 308.0;

/// Text face for every label, registered as plotters' "sans-serif".
static SANS_SERIF: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

static FONT_REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to draw {}: {message}", .path.display())]
    Draw { path: PathBuf, message: String },

    #[error("failed to load the bundled font: {0}")]
    Font(String),

    #[error(transparent)]
    Color(#[from] ColorError),
}

// ---------------------------------------------------------------------------
// Series – what actually ends up on a log-log chart
// ---------------------------------------------------------------------------

/// One line on log-log axes, in input order.
///
/// A masked point ends the current run, so the line has a gap there instead
/// of a straight segment across it.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub runs: Vec<Vec<(f64, f64)>>,
    /// Points dropped because a coordinate was non-positive or not finite.
    pub masked: usize,
}

impl Series {
    /// Pair `x` with `|y|`, dropping points a log axis cannot show.
    pub fn abs_of(x: &[f64], y: &[f64]) -> Self {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        let mut masked = 0;

        for (&xi, &yi) in x.iter().zip(y) {
            let yi = yi.abs();
            if is_loggable(xi) && is_loggable(yi) {
                current.push((xi, yi));
            } else {
                masked += 1;
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }

        Series { runs, masked }
    }

    /// All kept points across runs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.runs.iter().flatten().copied()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points().map(|(x, _)| x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points().map(|(_, y)| y).collect()
    }
}

fn is_loggable(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Log-axis range covering `values` with a small margin on each side.
///
/// Works on decade exponents so that any span of positive finite values
/// gives finite ends. A single distinct value gets one decade of padding
/// each way; no values fall back to `1..10`.
pub fn log_range(values: &[f64]) -> Range<f64> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return EMPTY_RANGE;
    }

    let (lo, hi) = (min.log10(), max.log10());
    let (lo, hi) = if hi <= lo {
        (lo - 1.0, hi + 1.0)
    } else {
        let pad = AXIS_MARGIN * (hi - lo);
        (lo - pad, hi + pad)
    };

    let lo = lo.clamp(MIN_DECADE, MAX_DECADE);
    let hi = hi.clamp(MIN_DECADE, MAX_DECADE).max(lo + 1.0);
    10f64.powf(lo)..10f64.powf(hi)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// One log-log chart ready to draw.
#[derive(Debug, Clone)]
pub struct Chart<'a> {
    pub series: Series,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// Draw both spectra of `table` into `out_dir`.
///
/// Plot 1 is `|P(k)|`, plot 2 is `|Δ²(k)|`. Existing files are overwritten.
/// If plot 2 fails, plot 1 is left on disk.
pub fn plot_spectra(
    table: &SpectralTable,
    config: &PlotConfig,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, RenderError> {
    let panels = [
        (&table.power, config.power_label.as_str()),
        (&table.deltasq, config.deltasq_label.as_str()),
    ];

    let mut written = Vec::with_capacity(panels.len());
    for (idx, (column, y_label)) in panels.into_iter().enumerate() {
        let series = Series::abs_of(&table.k, column);
        if series.masked > 0 {
            warn!(
                "{y_label}: {} of {} points are non-positive or non-finite and are not drawn",
                series.masked,
                table.len()
            );
        }

        let chart = Chart {
            series,
            x_label: &config.x_label,
            y_label,
        };
        let path = out_dir.join(config.output_path(idx + 1));
        render_chart(&chart, config, &path)?;
        info!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Render `chart` to `path` in the configured format.
pub fn render_chart(
    chart: &Chart<'_>,
    config: &PlotConfig,
    path: &Path,
) -> Result<(), RenderError> {
    register_fonts()?;

    let line = parse_color(&config.line_color)?.stroke_width(config.line_width);
    let size = (config.size, config.size);

    let result = match config.format {
        OutputFormat::Png => {
            draw(BitMapBackend::new(path, size).into_drawing_area(), chart, line)
                .map_err(|e| e.to_string())
        }
        OutputFormat::Svg => {
            draw(SVGBackend::new(path, size).into_drawing_area(), chart, line)
                .map_err(|e| e.to_string())
        }
    };

    result.map_err(|message| RenderError::Draw {
        path: path.to_path_buf(),
        message,
    })
}

fn register_fonts() -> Result<(), RenderError> {
    FONT_REGISTERED
        .get_or_init(|| {
            register_font("sans-serif", FontStyle::Normal, SANS_SERIF)
                .map_err(|_| "invalid font data".to_string())
        })
        .clone()
        .map_err(RenderError::Font)
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    chart: &Chart<'_>,
    line: ShapeStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let x_range = log_range(&chart.series.xs());
    let y_range = log_range(&chart.series.ys());
    debug!("{}: x {:?}, y {:?}", chart.y_label, x_range, y_range);

    let mut ctx = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(110)
        .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())?;

    ctx.configure_mesh()
        .disable_mesh()
        .x_desc(chart.x_label)
        .y_desc(chart.y_label)
        .axis_desc_style(("sans-serif", 28))
        .label_style(("sans-serif", 20))
        .x_label_formatter(&|v| format_tick(*v))
        .y_label_formatter(&|v| format_tick(*v))
        .draw()?;

    for run in &chart.series.runs {
        ctx.draw_series(LineSeries::new(run.iter().copied(), line.clone()))?;
    }

    root.present()?;
    Ok(())
}

/// `1e-2`, `2.5e1`: scientific with a trailing `.0` dropped.
fn format_tick(v: f64) -> String {
    format!("{v:.1e}").replace(".0e", "e")
}
