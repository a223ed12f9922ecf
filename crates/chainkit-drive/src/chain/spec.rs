//! Chain and sprocket layout inputs.
//!
//! A [`ChainSpec`] is an immutable, validated description of a drive: the
//! ordered sprockets the chain wraps around and the dimensions of the chain
//! itself. Solving it produces a [`ChainSolution`](super::ChainSolution).

use crate::sprocket::{radius_for, validate_positive, validate_teeth};
use chainkit_core::{ChainError, INCH, MM};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Two centers closer than this are the same location.
pub const LOCATION_TOLERANCE: f64 = 1e-9;

/// Reject the first pair of points closer than [`LOCATION_TOLERANCE`]
pub(crate) fn check_distinct<T>(
    points: &[T],
    distance: impl Fn(&T, &T) -> f64,
) -> Result<(), ChainError> {
    for (i, a) in points.iter().enumerate() {
        for (j, b) in points.iter().enumerate().skip(i + 1) {
            if distance(a, b) <= LOCATION_TOLERANCE {
                return Err(ChainError::DuplicateSprocketLocation {
                    first: i,
                    second: j,
                });
            }
        }
    }
    Ok(())
}

/// Index of the sprocket after `index` around the loop
pub(crate) fn successor(index: usize, count: usize) -> usize {
    (index + 1) % count
}

/// Index of the sprocket before `index` around the loop
pub(crate) fn predecessor(index: usize, count: usize) -> usize {
    (index + count - 1) % count
}

/// One sprocket the chain wraps around
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprocketSpec {
    /// Number of teeth (more than 2)
    pub teeth: u32,
    /// Center of the sprocket
    pub center: Point3<f64>,
    /// True when the chain passes counter-clockwise around the sprocket,
    /// viewed from +Z
    pub positive_wrap: bool,
}

impl SprocketSpec {
    pub fn new(teeth: u32, center: Point3<f64>, positive_wrap: bool) -> Self {
        Self {
            teeth,
            center,
            positive_wrap,
        }
    }
}

/// Physical dimensions of a roller chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainDimensions {
    /// Distance between adjacent roller centers
    pub pitch: f64,
    /// Diameter of the rollers (must be below the pitch)
    pub roller_diameter: f64,
    /// Length of a roller between the inner plates
    pub roller_length: f64,
    /// Thickness of a single link plate
    pub link_plate_thickness: f64,
}

impl Default for ChainDimensions {
    /// A standard bicycle chain
    fn default() -> Self {
        Self {
            pitch: 0.5 * INCH,
            roller_diameter: (5.0 / 16.0) * INCH,
            roller_length: (3.0 / 32.0) * INCH,
            link_plate_thickness: 1.0 * MM,
        }
    }
}

impl ChainDimensions {
    /// Chain with the given pitch and roller diameter and bicycle-chain
    /// roller length and plate thickness.
    pub fn with_pitch(pitch: f64, roller_diameter: f64) -> Self {
        Self {
            pitch,
            roller_diameter,
            ..Self::default()
        }
    }

    /// Check that every dimension is positive and the roller fits the pitch
    pub fn validate(&self) -> Result<(), ChainError> {
        validate_positive("chain pitch", self.pitch)?;
        validate_positive("roller diameter", self.roller_diameter)?;
        validate_positive("roller length", self.roller_length)?;
        validate_positive("link plate thickness", self.link_plate_thickness)?;
        if self.roller_diameter >= self.pitch {
            return Err(ChainError::RollerTooLargeForPitch {
                roller_diameter: self.roller_diameter,
                chain_pitch: self.pitch,
            });
        }
        Ok(())
    }
}

/// Validated description of a chain drive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainSpec {
    sprockets: Vec<SprocketSpec>,
    dimensions: ChainDimensions,
}

impl ChainSpec {
    /// Build a chain spec from an ordered list of sprockets.
    ///
    /// # Errors
    /// `TooFewSprockets`, `InvalidSprocketSpec`, `InvalidDimension`,
    /// `RollerTooLargeForPitch` or `DuplicateSprocketLocation`.
    pub fn new(
        sprockets: Vec<SprocketSpec>,
        dimensions: ChainDimensions,
    ) -> Result<Self, ChainError> {
        if sprockets.len() < 2 {
            return Err(ChainError::TooFewSprockets {
                count: sprockets.len(),
            });
        }
        for sprocket in &sprockets {
            validate_teeth(sprocket.teeth)?;
        }
        dimensions.validate()?;
        if let Some(&value) = sprockets
            .iter()
            .flat_map(|s| s.center.coords.iter())
            .find(|c| !c.is_finite())
        {
            return Err(ChainError::InvalidDimension {
                name: "sprocket center",
                value,
            });
        }
        check_distinct(&sprockets, |a, b| nalgebra::distance(&a.center, &b.center))?;

        Ok(Self {
            sprockets,
            dimensions,
        })
    }

    /// Build a chain spec from three parallel per-sprocket lists.
    pub fn from_lists(
        teeth: &[u32],
        centers: &[Point3<f64>],
        positive_wrap: &[bool],
        dimensions: ChainDimensions,
    ) -> Result<Self, ChainError> {
        if teeth.len() != centers.len() || teeth.len() != positive_wrap.len() {
            return Err(ChainError::MismatchedListLengths {
                teeth: teeth.len(),
                centers: centers.len(),
                wraps: positive_wrap.len(),
            });
        }
        let sprockets = teeth
            .iter()
            .zip(centers)
            .zip(positive_wrap)
            .map(|((&teeth, &center), &wrap)| SprocketSpec::new(teeth, center, wrap))
            .collect();
        Self::new(sprockets, dimensions)
    }

    pub fn sprockets(&self) -> &[SprocketSpec] {
        &self.sprockets
    }

    pub fn dimensions(&self) -> &ChainDimensions {
        &self.dimensions
    }

    pub fn sprocket_count(&self) -> usize {
        self.sprockets.len()
    }

    pub fn chain_pitch(&self) -> f64 {
        self.dimensions.pitch
    }

    /// Pitch radius of every sprocket, in order
    pub fn pitch_radii(&self) -> Vec<f64> {
        self.sprockets
            .iter()
            .map(|s| radius_for(s.teeth, self.dimensions.pitch))
            .collect()
    }

    /// A copy of this spec with every center replaced, keeping teeth and
    /// wrap directions. Used to move a layout into another frame.
    pub(crate) fn with_centers(&self, centers: &[Point3<f64>]) -> Result<Self, ChainError> {
        let sprockets = self
            .sprockets
            .iter()
            .zip(centers)
            .map(|(s, &center)| SprocketSpec { center, ..*s })
            .collect();
        Self::new(sprockets, self.dimensions)
    }
}

impl<'de> Deserialize<'de> for ChainSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            sprockets: Vec<SprocketSpec>,
            #[serde(default)]
            dimensions: ChainDimensions,
        }

        let raw = Raw::deserialize(deserializer)?;
        ChainSpec::new(raw.sprockets, raw.dimensions).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sprockets() -> Vec<SprocketSpec> {
        vec![
            SprocketSpec::new(32, Point3::new(-127.0, 0.0, 0.0), true),
            SprocketSpec::new(32, Point3::new(127.0, 0.0, 0.0), true),
        ]
    }

    #[test]
    fn test_cyclic_indexing() {
        assert_eq!(successor(0, 3), 1);
        assert_eq!(successor(2, 3), 0);
        assert_eq!(predecessor(0, 3), 2);
        assert_eq!(predecessor(2, 3), 1);
    }

    #[test]
    fn test_default_dimensions_are_bicycle_chain() {
        let dims = ChainDimensions::default();
        assert!((dims.pitch - 12.7).abs() < 1e-12);
        assert!((dims.roller_diameter - 7.9375).abs() < 1e-12);
        assert!((dims.roller_length - 2.38125).abs() < 1e-12);
        assert_eq!(dims.link_plate_thickness, 1.0);
        assert!(dims.validate().is_ok());
    }

    #[test]
    fn test_valid_spec() {
        let spec = ChainSpec::new(two_sprockets(), ChainDimensions::default()).unwrap();
        assert_eq!(spec.sprocket_count(), 2);
        assert!((spec.pitch_radii()[0] - 64.78458745735234).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_sprockets() {
        let err = ChainSpec::new(
            vec![SprocketSpec::new(16, Point3::origin(), true)],
            ChainDimensions::default(),
        )
        .unwrap_err();
        assert_eq!(err, ChainError::TooFewSprockets { count: 1 });
    }

    #[test]
    fn test_roller_boundary() {
        let at_pitch = ChainDimensions::with_pitch(12.7, 12.7);
        assert!(matches!(
            ChainSpec::new(two_sprockets(), at_pitch),
            Err(ChainError::RollerTooLargeForPitch { .. })
        ));

        let just_below = ChainDimensions::with_pitch(12.7, 12.7 - 1e-9);
        assert!(ChainSpec::new(two_sprockets(), just_below).is_ok());
    }

    #[test]
    fn test_duplicate_location() {
        let sprockets = vec![
            SprocketSpec::new(12, Point3::new(0.0, 0.0, 0.0), true),
            SprocketSpec::new(12, Point3::new(50.0, 0.0, 0.0), true),
            SprocketSpec::new(12, Point3::new(0.0, 0.0, 0.0), false),
        ];
        assert_eq!(
            ChainSpec::new(sprockets, ChainDimensions::default()),
            Err(ChainError::DuplicateSprocketLocation {
                first: 0,
                second: 2
            })
        );
    }

    #[test]
    fn test_non_finite_center() {
        let mut sprockets = two_sprockets();
        sprockets[1].center.y = f64::NAN;
        assert!(matches!(
            ChainSpec::new(sprockets, ChainDimensions::default()),
            Err(ChainError::InvalidDimension {
                name: "sprocket center",
                ..
            })
        ));

        let mut sprockets = two_sprockets();
        sprockets[0].center.z = f64::NEG_INFINITY;
        assert_eq!(
            ChainSpec::new(sprockets, ChainDimensions::default()),
            Err(ChainError::InvalidDimension {
                name: "sprocket center",
                value: f64::NEG_INFINITY
            })
        );
    }

    #[test]
    fn test_check_distinct_uses_tolerance() {
        let points = [0.0_f64, 1.0, 1.0 + 1e-10];
        assert_eq!(
            check_distinct(&points, |a, b| (a - b).abs()),
            Err(ChainError::DuplicateSprocketLocation {
                first: 1,
                second: 2
            })
        );
        assert!(check_distinct(&[0.0_f64, 1e-6], |a, b| (a - b).abs()).is_ok());
    }

    #[test]
    fn test_from_lists_length_mismatch() {
        let err = ChainSpec::from_lists(
            &[20, 20],
            &[Point3::origin(), Point3::new(20.0, 0.0, 0.0)],
            &[true],
            ChainDimensions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ChainError::MismatchedListLengths {
                teeth: 2,
                centers: 2,
                wraps: 1
            }
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "sprockets": [
                {"teeth": 10, "center": [0.0, 0.0, 0.0], "positive_wrap": true},
                {"teeth": 10, "center": [0.0, 0.0, 0.0], "positive_wrap": false}
            ]
        }"#;
        let result: Result<ChainSpec, _> = serde_json::from_str(json);
        assert!(result.is_err());

        let json = r#"{
            "sprockets": [
                {"teeth": 10, "center": [0.0, 0.0, 0.0], "positive_wrap": true},
                {"teeth": 10, "center": [100.0, 0.0, 0.0], "positive_wrap": true}
            ]
        }"#;
        let spec: ChainSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.dimensions(), &ChainDimensions::default());
    }
}
