//!
//! The benchmark log input errors.
//!

use std::path::PathBuf;

///
/// Benchmark log reading error.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error reading the input file.
    #[error("Reading input file {path:?}: {error}")]
    Reading {
        /// The underlying IO error.
        error: std::io::Error,
        /// The path to the input file.
        path: PathBuf,
    },
    /// No benchmark lines were found in the input.
    #[error("No BENCH lines found in input file {path:?}")]
    NoRecords {
        /// The path to the input file.
        path: PathBuf,
    },
}
