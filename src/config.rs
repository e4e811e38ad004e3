//! Plot configuration.
//!
//! The two deployment variants of the plotter differ only in the axis unit
//! label and the output format, so both are fields here rather than separate
//! code paths. Defaults reproduce the raster variant. A JSON file named
//! [`CONFIG_FILE`] in the working directory may override any field.

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::color::{parse_color, ColorError};

/// Optional override file looked up in the working directory.
pub const CONFIG_FILE: &str = "crosscorr_plot.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("{0}")]
    Invalid(String),
}

/// Image format of the written plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Raster image via the plotters bitmap backend.
    #[default]
    Png,
    /// Vector image via the plotters SVG backend.
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    pub format: OutputFormat,

    /// x-axis description shared by both plots.
    pub x_label: String,

    /// y-axis description of plot 1.
    pub power_label: String,

    /// y-axis description of plot 2.
    pub deltasq_label: String,

    /// Output files are `<prefix>_1.<ext>` and `<prefix>_2.<ext>`.
    pub output_prefix: String,

    /// Side of the square canvas in pixels.
    pub size: u32,

    /// CSS colour name or `#rrggbb`.
    pub line_color: String,

    pub line_width: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            x_label: "k [1/units]".to_string(),
            power_label: "P(k)".to_string(),
            deltasq_label: "|Δ²|(k)".to_string(),
            output_prefix: "crosscorr".to_string(),
            // 8in at 100dpi
            size: 800,
            line_color: "red".to_string(),
            line_width: 3,
        }
    }
}

impl PlotConfig {
    /// Vector-output variant with cosmological wavenumber units.
    pub fn vector() -> Self {
        Self {
            format: OutputFormat::Svg,
            x_label: "k [h/Mpc]".to_string(),
            ..Self::default()
        }
    }

    /// Read a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PlotConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Use [`CONFIG_FILE`] inside `dir` when present, defaults otherwise.
    pub fn load_or_default(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        info!("using plot settings from {}", path.display());
        Self::from_json_file(&path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 100 {
            return Err(ConfigError::Invalid(format!(
                "size must be at least 100 pixels, got {}",
                self.size
            )));
        }
        if self.line_width == 0 {
            return Err(ConfigError::Invalid("line_width must be at least 1".into()));
        }
        if self.output_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("output_prefix must not be empty".into()));
        }
        parse_color(&self.line_color)?;
        Ok(())
    }

    /// Fixed output path of plot number `index` (1 or 2), relative to the
    /// working directory.
    pub fn output_path(&self, index: usize) -> PathBuf {
        PathBuf::from(format!(
            "{}_{index}.{}",
            self.output_prefix,
            self.format.extension()
        ))
    }
}
