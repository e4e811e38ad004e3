/// Data layer: table types and loading.
///
/// Architecture:
/// ```text
///  crosscorr output (.dat / .txt)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse whitespace columns → SpectralTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SpectralTable │  k, power, deltasq, extra
///   └──────────────┘
/// ```

pub mod loader;
pub mod model;
