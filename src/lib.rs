//! Log-log plots of crosscorr power spectrum tables.
//!
//! - `data`: table model and whitespace-column loader
//! - `config`: plot settings and the optional JSON override file
//! - `color`: line colour parsing
//! - `plot`: series preparation and plotters rendering
//! - `sample`: deterministic synthetic tables

pub mod color;
pub mod config;
pub mod data;
pub mod plot;
pub mod sample;
