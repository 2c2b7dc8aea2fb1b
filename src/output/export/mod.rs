//! Export of simulation results for external analysis
//!
//! The [`Exporter`] trait abstracts the file format. Each format lives in its
//! own sub-module; a new format is a new file implementing the trait.
//!
//! # Available formats
//!
//! | Format  | Module    |
//! |---------|-----------|
//! | CSV     | [`csv`]   |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use diffusion_rs::output::export::{CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::default();
//!
//! // Final profile only: two columns
//! exporter.export_final(grid.coordinates(), &result, "final.csv")?;
//!
//! // Every recorded snapshot: one column per time level
//! exporter.export_snapshots(grid.coordinates(), &result, "evolution.csv")?;
//! ```

pub mod csv;

pub use csv::{
    CsvConfig, CsvError, CsvExporter, CsvMetadata, export_profile_csv, export_snapshots_csv,
};

use crate::solver::SimulationResult;

/// Abstraction over export formats.
///
/// Each format reports its own errors through the associated type, so callers
/// can match on them without downcasting a `Box<dyn Error>`.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Export the final field of a run against the grid positions.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is invalid or the directory does not exist
    /// - `positions` and the field differ in length
    fn export_final(
        &self,
        positions: &[f64],
        result: &SimulationResult,
        path: &str,
    ) -> Result<(), Self::Error>;

    /// Export every snapshot of a run, one column per recorded time.
    fn export_snapshots(
        &self,
        positions: &[f64],
        result: &SimulationResult,
        path: &str,
    ) -> Result<(), Self::Error>;
}
