//! Spatial profile plotting
//!
//! Concentration against position, either one profile, several profiles
//! overlaid, or the snapshots of a run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use diffusion_rs::output::visualization::plot_profile;
//!
//! let result = FtcsSolver.solve(&scenario, &config)?;
//! plot_profile(scenario.grid().coordinates(), result.final_field.as_slice(), "profile.svg", None)?;
//! ```

use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;

use super::config::{NO_TITLE, PlotConfig};
use crate::solver::SimulationResult;

// =================================================================================================
// Helpers
// =================================================================================================

/// Axis range covering every value, padded by 5 % of the span
///
/// A flat series gets a unit-wide window so the chart stays drawable.
fn padded_range<'a>(values: impl Iterator<Item = &'a f64>) -> Result<Range<f64>, Box<dyn Error>> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(*v), hi.max(*v))
    });

    if !min.is_finite() || !max.is_finite() {
        return Err("cannot plot empty or non-finite data".into());
    }

    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        return Ok((min - 0.5)..(max + 0.5));
    }

    let pad = 0.05 * span;
    Ok((min - pad)..(max + pad))
}

fn x_range(profiles: &[(&str, &[f64], &[f64])]) -> Result<Range<f64>, Box<dyn Error>> {
    let (min, max) = profiles
        .iter()
        .flat_map(|(_, x, _)| x.iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    if !min.is_finite() || !max.is_finite() {
        return Err("cannot plot empty or non-finite positions".into());
    }
    if max > min {
        Ok(min..max)
    } else {
        Ok((min - 0.5)..(max + 0.5))
    }
}

// =================================================================================================
// Core Plotting Functions
// =================================================================================================

/// Plot one concentration profile C(x)
///
/// The backend follows the file extension: `.svg` gives SVG, anything else a
/// bitmap.
///
/// # Arguments
///
/// * `positions` - Grid coordinates
/// * `concentration` - Field values, same length as `positions`
/// * `output_path` - Path to save the plot (PNG or SVG)
/// * `config` - Optional plot configuration
pub fn plot_profile(
    positions: &[f64],
    concentration: &[f64],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let mut single = config.clone();
    single.series_colors = Some(vec![config.line_color]);

    plot_profile_comparison(
        vec![("Concentration Profile", positions, concentration)],
        output_path,
        Some(&single),
    )
}

/// Plot several spatial profiles on the same axes
///
/// # Arguments
///
/// * `profiles` - Vec of (label, positions, concentration)
/// * `output_path` - Path to save the plot
/// * `config` - Optional plot configuration
///
/// # Example
///
/// ```rust,ignore
/// let profiles = vec![
///     ("Initial", x, c_initial),
///     ("Final", x, c_final),
/// ];
/// plot_profile_comparison(profiles, "comparison.png", None)?;
/// ```
pub fn plot_profile_comparison(
    profiles: Vec<(&str, &[f64], &[f64])>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if profiles.is_empty() {
        return Err("No profiles provided".into());
    }
    for (label, x, c) in &profiles {
        if x.len() != c.len() {
            return Err(format!(
                "profile '{}': {} positions but {} values",
                label,
                x.len(),
                c.len()
            )
            .into());
        }
    }

    let default_config = PlotConfig::profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let x_range = x_range(&profiles)?;
    let y_range = padded_range(profiles.iter().flat_map(|(_, _, c)| c.iter()))?;

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_profiles_impl(backend, &profiles, config, x_range, y_range)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_profiles_impl(backend, &profiles, config, x_range, y_range)
        }
    }
}

/// Implementation for profile plotting with concrete backend
fn plot_profiles_impl<DB: DrawingBackend>(
    backend: DB,
    profiles: &[(&str, &[f64], &[f64])],
    config: &PlotConfig,
    x_range: Range<f64>,
    y_range: Range<f64>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.2}", x))
            .y_label_formatter(&|y| format!("{:.2}", y))
            .draw()?;
    }

    for (idx, (label, positions, concentration)) in profiles.iter().enumerate() {
        let color = config.series_color(idx);

        chart
            .draw_series(LineSeries::new(
                positions.iter().zip(concentration.iter()).map(|(x, c)| (*x, *c)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

/// Plot the recorded snapshots of a run
///
/// Draws at most `max_profiles` snapshots, evenly spread over the run and
/// always including the first and last one.
///
/// # Example
///
/// ```rust,ignore
/// plot_profile_evolution(grid.coordinates(), &result, 6, "evolution.svg", None)?;
/// ```
pub fn plot_profile_evolution(
    positions: &[f64],
    result: &SimulationResult,
    max_profiles: usize,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if result.snapshots.is_empty() {
        return Err("No snapshots recorded".into());
    }
    if max_profiles == 0 {
        return Err("max_profiles must be at least 1".into());
    }

    let indices = spread_indices(result.snapshots.len(), max_profiles);

    let labels: Vec<String> = indices
        .iter()
        .map(|&i| format!("t={:.3}", result.time_points[i]))
        .collect();

    let profiles: Vec<(&str, &[f64], &[f64])> = indices
        .iter()
        .zip(labels.iter())
        .map(|(&i, label)| (label.as_str(), positions, result.snapshots[i].as_slice()))
        .collect();

    let default_config = PlotConfig::profile("Profile Evolution");
    plot_profile_comparison(profiles, output_path, Some(config.unwrap_or(&default_config)))
}

/// Up to `count` indices in `0..len`, evenly spread, first and last included
fn spread_indices(len: usize, count: usize) -> Vec<usize> {
    if count >= len {
        return (0..len).collect();
    }
    if count == 1 {
        return vec![len - 1];
    }

    let mut indices: Vec<usize> = (0..count)
        .map(|k| (k * (len - 1) + (count - 1) / 2) / (count - 1))
        .collect();
    indices.dedup();
    indices
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{FtcsSolver, Scenario, Solver, SolverConfiguration};

    fn svg_path(dir: &tempfile::TempDir, name: &str) -> String {
        dir.path().join(name).to_str().unwrap().to_string()
    }

    // ====== Helper Tests ======

    #[test]
    fn test_padded_range_includes_min_and_max() {
        let values = [-2.0, 0.0, 8.0];
        let range = padded_range(values.iter()).unwrap();
        assert!(range.start < -2.0);
        assert!(range.end > 8.0);
    }

    #[test]
    fn test_padded_range_flat_series() {
        let values = [3.0, 3.0];
        let range = padded_range(values.iter()).unwrap();
        assert_eq!(range, 2.5..3.5);
    }

    #[test]
    fn test_padded_range_rejects_nan() {
        let values = [f64::NAN];
        assert!(padded_range(values.iter()).is_err());
    }

    #[test]
    fn test_spread_indices() {
        assert_eq!(spread_indices(3, 10), vec![0, 1, 2]);
        assert_eq!(spread_indices(11, 3), vec![0, 5, 10]);
        assert_eq!(spread_indices(11, 1), vec![10]);

        let indices = spread_indices(101, 6);
        assert_eq!(indices.len(), 6);
        assert_eq!(indices.first(), Some(&0));
        assert_eq!(indices.last(), Some(&100));
    }

    // ====== Plot Tests ======

    #[test]
    fn test_plot_profile_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = svg_path(&dir, "profile.svg");

        let x: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
        let c: Vec<f64> = x.iter().map(|v| if *v <= 2.5 { 1.0 } else { 0.0 }).collect();

        plot_profile(&x, &c, &path, None).unwrap();
        assert!(std::path::Path::new(&path).exists());
    }

    #[test]
    fn test_plot_comparison_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = svg_path(&dir, "bad.svg");

        assert!(plot_profile_comparison(vec![], &path, None).is_err());

        let x = [0.0, 1.0];
        let c = [1.0];
        assert!(plot_profile_comparison(vec![("bad", &x[..], &c[..])], &path, None).is_err());
    }

    #[test]
    fn test_plot_profile_evolution_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = svg_path(&dir, "evolution.svg");

        let scenario = Scenario::step(20.0, 0.5, 1.0, 1.0, 0.0).unwrap();
        let config = SolverConfiguration::new(200).with_snapshot_interval(20);
        let result = FtcsSolver.solve(&scenario, &config).unwrap();

        plot_profile_evolution(scenario.grid().coordinates(), &result, 4, &path, None).unwrap();
        assert!(std::path::Path::new(&path).exists());
    }
}
