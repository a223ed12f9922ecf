//! # ChainKit
//!
//! Roller chain routing for parametric drive layouts:
//! - Pitch radius and circumference of sprockets from tooth count and chain pitch
//! - Tangent entry/exit angles around an ordered loop of sprockets
//! - Roller positions along the closed chain path
//! - Sprocket rotations that seat the rollers between teeth
//!
//! ## Architecture
//!
//! ChainKit is organized as a workspace with multiple crates:
//!
//! 1. **chainkit-core** - Error types, length units, shared containers
//! 2. **chainkit-drive** - Sprocket geometry and the chain routing solver
//! 3. **chainkit-settings** - Chain layout files (TOML/JSON)
//! 4. **chainkit** - This facade crate

pub use chainkit_core::{
    format_length, get_unit_label, parse_length, ChainError, MeasurementSystem, INCH, MM,
};

pub use chainkit_drive::{
    pitch_circumference, pitch_radius, solve, solve_all, solve_in_plane,
    solve_in_plane_with_axis, ChainDiagnostic, ChainDimensions, ChainPath, ChainPlane,
    ChainSolution, ChainSpec, Isometry3, LinkKind, LinkPlacement, LinkPlateProfile, PathSegment,
    Point2, Point3, SprocketPlacement, SprocketProfile, SprocketSpec, TangentKind, ToothStyle,
    TransmissionLayout, Vector3, MIN_TEETH,
};

pub use chainkit_settings::{
    ChainLayoutConfig, ChainSettings, ConfigError, LengthValue, SettingsError, SolverSettings,
    SprocketSettings,
};

use anyhow::Context;
use std::path::Path;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

/// Load a layout file and build the transmission it describes
pub fn load_transmission(path: &Path) -> anyhow::Result<(ChainSolution, TransmissionLayout)> {
    let config = ChainLayoutConfig::load_from_file(path)
        .with_context(|| format!("loading chain layout {}", path.display()))?;
    let spec = config.to_chain_spec()?;
    let solution = config
        .solve()
        .with_context(|| format!("solving chain layout {}", path.display()))?;
    let layout = TransmissionLayout::from_solution(&spec, &solution)?;
    Ok((solution, layout))
}

/// One-line summary of a solved chain with its length in `system` units
pub fn chain_summary(solution: &ChainSolution, system: MeasurementSystem) -> String {
    format!(
        "Chain length {} {}, {:.4} links, {} rollers",
        format_length(solution.total_path_length(), system),
        get_unit_label(system),
        solution.chain_links(),
        solution.roller_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert!(BUILD_DATE.ends_with("UTC"));
    }

    #[test]
    fn test_second_logging_init_fails() {
        let _ = init_logging();
        assert!(init_logging().is_err());
    }

    #[test]
    fn test_load_transmission() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pair.toml");
        std::fs::write(
            &path,
            r#"
units = "imperial"

[[sprockets]]
teeth = 16
center = ["-3", "1 37/64"]

[[sprockets]]
teeth = 16
center = [3, "1 37/64"]
"#,
        )
        .unwrap();

        let (solution, layout) = load_transmission(&path).unwrap();
        assert_eq!(solution.roller_count(), layout.links().len());
        assert_eq!(layout.sprockets().len(), 2);
        assert!((layout.sprockets()[0].rotation - 11.25).abs() < 1e-9);
    }

    #[test]
    fn test_chain_summary_units() {
        let spec = ChainSpec::from_lists(
            &[16, 16],
            &[Point3::new(-76.2, 40.0, 0.0), Point3::new(76.2, 40.0, 0.0)],
            &[true, true],
            ChainDimensions::default(),
        )
        .unwrap();
        let solution = solve(&spec).unwrap();

        let system: MeasurementSystem = "in".parse().unwrap();
        let summary = chain_summary(&solution, system);
        assert_eq!(summary, "Chain length 20.052 in, 40.1033 links, 40 rollers");
        assert!(chain_summary(&solution, MeasurementSystem::Metric).contains("509.312 mm"));
    }

    #[test]
    fn test_load_transmission_reports_path() {
        let err = load_transmission(Path::new("does-not-exist.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("does-not-exist.toml"));
    }
}
