//! CSV export of concentration profiles
//!
//! Readable by spreadsheets, pandas, MATLAB and most analysis tools.
//!
//! # Quick Examples
//!
//! ## Single profile
//!
//! ```rust,ignore
//! use diffusion_rs::output::export::export_profile_csv;
//!
//! export_profile_csv(grid.coordinates(), result.final_field.as_slice(), "final.csv", None)?;
//! ```
//!
//! **Output** (`final.csv`):
//! ```csv
//! Position (m),Concentration
//! 0.000000,500.000000
//! 0.500000,500.000000
//! ...
//! ```
//!
//! ## Snapshots with metadata
//!
//! ```rust,ignore
//! let metadata = CsvMetadata::from_result(&result);
//! let config = CsvConfig::default().with_metadata(metadata);
//! export_snapshots_csv(grid.coordinates(), &result, "run.csv", Some(&config))?;
//! ```
//!
//! **Output** (`run.csv`):
//! ```csv
//! # Diffusion Simulation Data
//! # Generated: 2026-10-19T09:30:00+00:00
//! # Solver: FTCS
//! # Diffusivity: 100
//! # ...
//! #
//! Position (m),t=0,t=1.25,t=2.5
//! 0.000000,500.000000,500.000000,500.000000
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};

use thiserror::Error;

use crate::solver::SimulationResult;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by the CSV exporter
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("empty data: {0}")]
    EmptyData(&'static str),

    #[error("data length mismatch: {expected} positions versus {found} values in {series}")]
    LengthMismatch {
        series: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid data: NaN or Inf detected in {0}")]
    NonFinite(String),

    #[error("cannot write CSV file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',        // European CSV
///     precision: 10,         // High precision
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header for the position column (default: "Position (m)")
    pub position_header: String,

    /// Header for the concentration column of single-profile exports (default: "Concentration")
    pub concentration_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            position_header: "Position (m)".to_string(),
            concentration_header: "Concentration".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon delimiter, comma decimal separator)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set end up in the header.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Solver name (e.g. "FTCS")
    pub solver_name: Option<String>,

    /// Diffusivity D
    pub diffusivity: Option<f64>,

    /// Grid spacing dx
    pub spacing: Option<f64>,

    /// Time step dt
    pub time_step: Option<f64>,

    /// Number of time steps
    pub time_steps: Option<usize>,

    /// Left boundary concentration
    pub c_left: Option<f64>,

    /// Right boundary concentration
    pub c_right: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Collect metadata recorded by the solver in a [`SimulationResult`]
    pub fn from_result(result: &SimulationResult) -> Self {
        let number = |key: &str| result.metadata.get(key).and_then(|v| v.parse::<f64>().ok());

        Self {
            solver_name: result.metadata.get("solver").cloned(),
            diffusivity: number("diffusivity"),
            spacing: number("dx"),
            time_step: number("dt"),
            time_steps: result.metadata.get("time steps").and_then(|v| v.parse().ok()),
            c_left: result.final_field.iter().next().copied(),
            c_right: result.final_field.iter().last().copied(),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header(out: &mut impl Write, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(out, "# Diffusion Simulation Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(solver) = &metadata.solver_name {
        writeln!(out, "# Solver: {}", solver)?;
    }
    if let Some(d) = metadata.diffusivity {
        writeln!(out, "# Diffusivity: {}", d)?;
    }
    if let Some(dx) = metadata.spacing {
        writeln!(out, "# Spacing: {}", dx)?;
    }
    if let Some(dt) = metadata.time_step {
        writeln!(out, "# Time Step: {}", dt)?;
    }
    if let Some(steps) = metadata.time_steps {
        writeln!(out, "# Time Steps: {}", steps)?;
    }
    if let Some(c) = metadata.c_left {
        writeln!(out, "# C Left: {}", c)?;
    }
    if let Some(c) = metadata.c_right {
        writeln!(out, "# C Right: {}", c)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;

    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn check_series(name: &str, positions: usize, values: &[f64]) -> Result<(), CsvError> {
    if values.len() != positions {
        return Err(CsvError::LengthMismatch {
            series: name.to_string(),
            expected: positions,
            found: values.len(),
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(CsvError::NonFinite(name.to_string()));
    }
    Ok(())
}

/// Write a table: position column followed by one column per series
fn write_table(
    path: &str,
    positions: &[f64],
    headers: &[String],
    columns: &[&[f64]],
    config: &CsvConfig,
) -> Result<(), CsvError> {
    let mut out = BufWriter::new(File::create(path)?);

    if config.include_metadata
        && let Some(metadata) = &config.metadata
    {
        write_metadata_header(&mut out, metadata)?;
    }

    write!(out, "{}", config.position_header)?;
    for header in headers {
        write!(out, "{}{}", config.delimiter, header)?;
    }
    writeln!(out)?;

    for (i, x) in positions.iter().enumerate() {
        write!(out, "{}", format_number(*x, config))?;
        for column in columns {
            write!(out, "{}{}", config.delimiter, format_number(column[i], config))?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export one concentration profile to CSV
///
/// # Errors
///
/// - Empty data
/// - Mismatched lengths
/// - NaN or Inf values
/// - File creation errors
pub fn export_profile_csv(
    positions: &[f64],
    concentration: &[f64],
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    if positions.is_empty() || concentration.is_empty() {
        return Err(CsvError::EmptyData("position and concentration series must not be empty"));
    }
    if positions.iter().any(|x| !x.is_finite()) {
        return Err(CsvError::NonFinite("positions".to_string()));
    }
    check_series("concentration", positions.len(), concentration)?;

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    write_table(
        output_path,
        positions,
        &[configuration.concentration_header.clone()],
        &[concentration],
        configuration,
    )
}

/// Export every recorded snapshot of a run, one column per time level
///
/// Column headers are `t=<time>` using the snapshot times of the result.
pub fn export_snapshots_csv(
    positions: &[f64],
    result: &SimulationResult,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    if positions.is_empty() || result.snapshots.is_empty() {
        return Err(CsvError::EmptyData("positions and snapshots must not be empty"));
    }
    if positions.iter().any(|x| !x.is_finite()) {
        return Err(CsvError::NonFinite("positions".to_string()));
    }

    let headers: Vec<String> = result
        .time_points
        .iter()
        .map(|t| format!("t={}", t))
        .collect();

    if headers.len() != result.snapshots.len() {
        return Err(CsvError::LengthMismatch {
            series: "time points".to_string(),
            expected: result.snapshots.len(),
            found: headers.len(),
        });
    }

    let columns: Vec<&[f64]> = result.snapshots.iter().map(|s| s.as_slice()).collect();
    for (header, column) in headers.iter().zip(columns.iter()) {
        check_series(header, positions.len(), column)?;
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    write_table(output_path, positions, &headers, &columns, configuration)
}

// =============================================================================
// Exporter implementation
// =============================================================================

/// CSV implementation of [`Exporter`](super::Exporter)
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl super::Exporter for CsvExporter {
    type Error = CsvError;

    fn export_final(
        &self,
        positions: &[f64],
        result: &SimulationResult,
        path: &str,
    ) -> Result<(), Self::Error> {
        export_profile_csv(positions, result.final_field.as_slice(), path, Some(&self.config))
    }

    fn export_snapshots(
        &self,
        positions: &[f64],
        result: &SimulationResult,
        path: &str,
    ) -> Result<(), Self::Error> {
        export_snapshots_csv(positions, result, path, Some(&self.config))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
