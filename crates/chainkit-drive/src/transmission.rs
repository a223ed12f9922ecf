//! # Transmission Layout
//!
//! Everything an assembly step needs to place the parts of a chain drive:
//! each sprocket with its profile, axis and tooth alignment, plus every
//! link pair of the chain.

use crate::chain::{ChainSolution, ChainSpec, LinkPlacement, LinkPlateProfile};
use crate::sprocket::SprocketProfile;
use chainkit_core::ChainError;
use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// One sprocket positioned in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprocketPlacement {
    pub index: usize,
    pub profile: SprocketProfile,
    pub center: Point3<f64>,
    /// Axis the sprocket turns about
    pub axis: Unit<Vector3<f64>>,
    /// Rotation about `axis` that seats the rollers between teeth, in degrees
    pub rotation: f64,
}

impl SprocketPlacement {
    /// Orientation of the sprocket as a rotation about its axis
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&self.axis, self.rotation.to_radians())
    }
}

/// Sprockets and chain links of a solved drive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionLayout {
    sprockets: Vec<SprocketPlacement>,
    links: Vec<LinkPlacement>,
    link_plate: LinkPlateProfile,
}

impl TransmissionLayout {
    /// Collect the placements of a solution of `spec`.
    ///
    /// # Errors
    /// `InvalidDimension` or `RollerTooLargeForPitch` are not expected for a
    /// validated spec but are propagated from the sprocket profiles.
    pub fn from_solution(spec: &ChainSpec, solution: &ChainSolution) -> Result<Self, ChainError> {
        let dims = spec.dimensions();
        let axis = solution.normal();

        let sprockets = spec
            .sprockets()
            .iter()
            .zip(solution.sprocket_centers())
            .zip(solution.sprocket_rotation_offsets())
            .enumerate()
            .map(|(index, ((sprocket, &center), &rotation))| {
                Ok(SprocketPlacement {
                    index,
                    profile: SprocketProfile::new(
                        sprocket.teeth,
                        dims.pitch,
                        dims.roller_diameter,
                    )?,
                    center,
                    axis,
                    rotation,
                })
            })
            .collect::<Result<Vec<_>, ChainError>>()?;

        Ok(Self {
            sprockets,
            links: solution.link_placements(),
            link_plate: *LinkPlateProfile::for_chain(dims),
        })
    }

    pub fn sprockets(&self) -> &[SprocketPlacement] {
        &self.sprockets
    }

    pub fn links(&self) -> &[LinkPlacement] {
        &self.links
    }

    pub fn link_plate(&self) -> &LinkPlateProfile {
        &self.link_plate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{solve, solve_in_plane, ChainDimensions, LinkKind};
    use nalgebra::Isometry3;

    fn pair_spec() -> ChainSpec {
        ChainSpec::from_lists(
            &[16, 16],
            &[Point3::new(-76.2, 40.0, 0.0), Point3::new(76.2, 40.0, 0.0)],
            &[true, true],
            ChainDimensions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_layout_from_pair() {
        let spec = pair_spec();
        let solution = solve(&spec).unwrap();
        let layout = TransmissionLayout::from_solution(&spec, &solution).unwrap();

        assert_eq!(layout.sprockets().len(), 2);
        assert_eq!(layout.links().len(), 40);
        assert_eq!(layout.links()[0].kind, LinkKind::Inner);
        assert_eq!(layout.links()[39].kind, LinkKind::Outer);

        let first = &layout.sprockets()[0];
        assert_eq!(first.center, Point3::new(-76.2, 40.0, 0.0));
        assert_eq!(first.profile.teeth(), 16);
        assert!((first.rotation - 11.25).abs() < 1e-9);
        assert_eq!(first.axis.into_inner(), Vector3::z());
    }

    #[test]
    fn test_layout_follows_transform() {
        let spec = pair_spec();
        let moved = solve_in_plane(&spec)
            .unwrap()
            .transformed(&Isometry3::translation(0.0, 0.0, 25.0));
        let layout = TransmissionLayout::from_solution(&spec, &moved).unwrap();
        assert!((layout.sprockets()[1].center.z - 25.0).abs() < 1e-12);
        assert!((layout.links()[0].position.z - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_sprocket_orientation() {
        let spec = pair_spec();
        let solution = solve(&spec).unwrap();
        let layout = TransmissionLayout::from_solution(&spec, &solution).unwrap();
        let q = layout.sprockets()[0].orientation();
        assert!((q.angle().to_degrees() - 11.25).abs() < 1e-9);
    }
}
