use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use super::model::{SpectralRow, SpectralTable};

/// Number of columns every data row must carry.
pub const COLUMNS: usize = 4;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}, column {column}: '{token}' is not a number")]
    Parse {
        line: usize,
        column: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("line {line}: expected 4 columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("{} contains no data rows", .path.display())]
    Empty { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a crosscorr power spectrum table from a text file.
///
/// Layout: one row per line, four whitespace-separated numbers
/// `k  P(k)  Δ²(k)  extra`, no header. Blank lines and `#` comments are
/// ignored. Any malformed row fails the whole load.
pub fn load_file(path: &Path) -> Result<SpectralTable, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = parse_rows(&text)?;
    if rows.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let table = SpectralTable::from_rows(rows);
    info!("loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Parse every data line of `text` into a row.
pub fn parse_rows(text: &str) -> Result<Vec<SpectralRow>, LoadError> {
    let mut rows = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let content = strip_comment(raw);
        if content.trim().is_empty() {
            continue;
        }
        rows.push(parse_line(content, line_no)?);
    }

    debug!("parsed {} data rows", rows.len());
    Ok(rows)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_line(content: &str, line: usize) -> Result<SpectralRow, LoadError> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.len() != COLUMNS {
        return Err(LoadError::ColumnCount {
            line,
            found: tokens.len(),
        });
    }

    let mut values = [0.0; COLUMNS];
    for (j, (slot, tok)) in values.iter_mut().zip(&tokens).enumerate() {
        *slot = tok.parse::<f64>().map_err(|source| LoadError::Parse {
            line,
            column: j + 1,
            token: tok.to_string(),
            source,
        })?;
    }

    Ok(SpectralRow::from(values))
}
