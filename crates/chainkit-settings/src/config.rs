//! Chain layout configuration for ChainKit
//!
//! A layout file describes one chain drive: the measurement system, the
//! chain dimensions, the ordered sprockets and solver options. Supports JSON
//! and TOML file formats.
//!
//! Lengths may be written as numbers or as text such as `"1/2"`, `"5/16"`
//! or `"1 1/4"`, all interpreted in the layout's measurement system:
//!
//! ```toml
//! units = "imperial"
//!
//! [chain]
//! pitch = "1/2"
//! roller_diameter = "5/16"
//!
//! [[sprockets]]
//! teeth = 32
//! center = [-5, 0]
//!
//! [[sprockets]]
//! teeth = 16
//! center = [5, 0]
//! ```

pub use chainkit_core::MeasurementSystem;

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use chainkit_core::parse_length;
use chainkit_drive::{
    solve, solve_in_plane_with_axis, ChainDimensions, ChainSolution, ChainSpec, Point3,
    SprocketSpec, Vector3,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// A length written as a number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LengthValue {
    Number(f64),
    Text(String),
}

impl LengthValue {
    /// Convert to millimeters, reading the value in `system` units.
    pub fn to_mm(&self, key: &str, system: MeasurementSystem) -> ConfigResult<f64> {
        match self {
            Self::Number(value) => Ok(system.to_mm(*value)),
            Self::Text(text) => parse_length(text, system).map_err(|reason| {
                ConfigError::InvalidLength {
                    key: key.to_string(),
                    value: text.clone(),
                    reason,
                }
            }),
        }
    }
}

impl From<f64> for LengthValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LengthValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for LengthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Chain dimension settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSettings {
    /// Distance between roller centers
    pub pitch: LengthValue,
    /// Roller diameter
    pub roller_diameter: LengthValue,
    /// Roller length between the inner plates
    #[serde(default = "default_roller_length")]
    pub roller_length: LengthValue,
    /// Thickness of one link plate
    #[serde(default = "default_plate_thickness")]
    pub link_plate_thickness: LengthValue,
}

fn default_roller_length() -> LengthValue {
    LengthValue::Number(ChainDimensions::default().roller_length)
}

fn default_plate_thickness() -> LengthValue {
    LengthValue::Number(ChainDimensions::default().link_plate_thickness)
}

impl Default for ChainSettings {
    fn default() -> Self {
        let dims = ChainDimensions::default();
        Self {
            pitch: dims.pitch.into(),
            roller_diameter: dims.roller_diameter.into(),
            roller_length: dims.roller_length.into(),
            link_plate_thickness: dims.link_plate_thickness.into(),
        }
    }
}

/// One sprocket of the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprocketSettings {
    /// Number of teeth
    pub teeth: u32,
    /// Center as `[x, y]` or `[x, y, z]`
    pub center: Vec<LengthValue>,
    /// Chain passes counter-clockwise around the sprocket
    #[serde(default = "default_positive_wrap")]
    pub positive_wrap: bool,
}

fn default_positive_wrap() -> bool {
    true
}

impl SprocketSettings {
    pub fn new(teeth: u32, center: [f64; 3], positive_wrap: bool) -> Self {
        Self {
            teeth,
            center: center.iter().map(|&c| c.into()).collect(),
            positive_wrap,
        }
    }
}

/// Solver options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Route the chain in the plane of the sprockets instead of world XY
    #[serde(default)]
    pub follow_sprocket_plane: bool,
    /// Plane normal for two-sprocket drives when following the sprocket plane
    #[serde(default = "default_plane_axis")]
    pub plane_axis: [f64; 3],
}

fn default_plane_axis() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            follow_sprocket_plane: false,
            plane_axis: default_plane_axis(),
        }
    }
}

/// Complete chain layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChainLayoutConfig {
    /// Units of every length in the file
    #[serde(default)]
    pub units: MeasurementSystem,
    /// Chain dimensions
    #[serde(default)]
    pub chain: ChainSettings,
    /// Sprockets in the order the chain visits them
    #[serde(default)]
    pub sprockets: Vec<SprocketSettings>,
    /// Solver options
    #[serde(default)]
    pub solver: SolverSettings,
}

/// File format chosen by extension
enum Format {
    Json,
    Toml,
}

impl Format {
    fn for_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl ChainLayoutConfig {
    /// Create new layout with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> SettingsResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json_string(&self) -> SettingsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load layout from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::for_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config = match format {
            Format::Json => Self::from_json_str(&content)?,
            Format::Toml => Self::from_toml_str(&content)?,
        };

        config.validate()?;
        debug!(
            "Loaded chain layout with {} sprockets from {}",
            config.sprockets.len(),
            path.display()
        );
        Ok(config)
    }

    /// Save layout to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::for_path(path)? {
            Format::Json => self.to_json_string()?,
            Format::Toml => self.to_toml_string()?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate layout
    pub fn validate(&self) -> SettingsResult<()> {
        let axis = Vector3::from(self.solver.plane_axis);
        if !axis.iter().all(|c| c.is_finite()) || axis.norm() == 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "solver.plane_axis".to_string(),
                value: format!("{:?}", self.solver.plane_axis),
            }
            .into());
        }
        self.to_chain_spec().map(|_| ())
    }

    /// Chain dimensions in millimeters
    pub fn chain_dimensions(&self) -> SettingsResult<ChainDimensions> {
        let units = self.units;
        Ok(ChainDimensions {
            pitch: self.chain.pitch.to_mm("chain.pitch", units)?,
            roller_diameter: self
                .chain
                .roller_diameter
                .to_mm("chain.roller_diameter", units)?,
            roller_length: self.chain.roller_length.to_mm("chain.roller_length", units)?,
            link_plate_thickness: self
                .chain
                .link_plate_thickness
                .to_mm("chain.link_plate_thickness", units)?,
        })
    }

    fn sprocket_spec(&self, index: usize, sprocket: &SprocketSettings) -> SettingsResult<SprocketSpec> {
        let key = format!("sprockets[{}].center", index);
        let coords = sprocket
            .center
            .iter()
            .map(|c| c.to_mm(&key, self.units))
            .collect::<ConfigResult<Vec<f64>>>()?;

        let center = match coords.as_slice() {
            [x, y] => Point3::new(*x, *y, 0.0),
            [x, y, z] => Point3::new(*x, *y, *z),
            _ => {
                return Err(SettingsError::InvalidSetting {
                    key,
                    reason: format!("expected 2 or 3 coordinates, got {}", coords.len()),
                })
            }
        };
        Ok(SprocketSpec::new(sprocket.teeth, center, sprocket.positive_wrap))
    }

    /// Build the validated chain spec this layout describes
    pub fn to_chain_spec(&self) -> SettingsResult<ChainSpec> {
        let sprockets = self
            .sprockets
            .iter()
            .enumerate()
            .map(|(i, s)| self.sprocket_spec(i, s))
            .collect::<SettingsResult<Vec<_>>>()?;
        Ok(ChainSpec::new(sprockets, self.chain_dimensions()?)?)
    }

    /// Solve the chain routing for this layout
    pub fn solve(&self) -> SettingsResult<ChainSolution> {
        let spec = self.to_chain_spec()?;
        let solution = if self.solver.follow_sprocket_plane {
            solve_in_plane_with_axis(&spec, &Vector3::from(self.solver.plane_axis))?
        } else {
            solve(&spec)?
        };
        info!(
            "Solved chain layout: {} rollers over {:.3} mm",
            solution.roller_count(),
            solution.total_path_length()
        );
        Ok(solution)
    }
}
