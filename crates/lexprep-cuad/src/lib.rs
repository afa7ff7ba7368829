//! CUAD annotation reader.
//!
//! Flattens the SQuAD-style CUAD release into one [`CuadEntry`] per
//! question so annotations can be inspected next to preprocessed contracts.

pub mod loader;

pub use loader::{load_cuad, parse_cuad, sample_entries, CuadEntry, UNKNOWN_TITLE};
