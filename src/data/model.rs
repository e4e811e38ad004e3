// ---------------------------------------------------------------------------
// SpectralRow – one line of the crosscorr output table
// ---------------------------------------------------------------------------

/// A single parsed row: `(k, power, deltasq, extra)` in file column order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralRow {
    pub k: f64,
    pub power: f64,
    pub deltasq: f64,
    pub extra: f64,
}

impl From<[f64; 4]> for SpectralRow {
    fn from([k, power, deltasq, extra]: [f64; 4]) -> Self {
        SpectralRow {
            k,
            power,
            deltasq,
            extra,
        }
    }
}

// ---------------------------------------------------------------------------
// SpectralTable – the complete loaded table, stored column-wise
// ---------------------------------------------------------------------------

/// The full parsed table. All four columns always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectralTable {
    /// Wavenumber (x for both plots).
    pub k: Vec<f64>,
    /// Power spectrum P(k).
    pub power: Vec<f64>,
    /// Dimensionless power Δ²(k).
    pub deltasq: Vec<f64>,
    /// Fourth column. Read, never plotted.
    pub extra: Vec<f64>,
}

impl SpectralTable {
    /// Split rows into columns.
    pub fn from_rows(rows: Vec<SpectralRow>) -> Self {
        let mut table = SpectralTable {
            k: Vec::with_capacity(rows.len()),
            power: Vec::with_capacity(rows.len()),
            deltasq: Vec::with_capacity(rows.len()),
            extra: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            table.k.push(row.k);
            table.power.push(row.power);
            table.deltasq.push(row.deltasq);
            table.extra.push(row.extra);
        }
        table
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.k.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }
}
