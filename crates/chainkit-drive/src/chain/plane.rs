//! Chain plane for drives whose sprockets are not laid out in world XY
//!
//! The plane's x axis points from sprocket 0 towards sprocket 1. With three
//! or more sprockets the normal comes from the first three centers;
//! otherwise a caller-supplied axis (default +Z) is used, made
//! perpendicular to the x axis.

use super::{solve, ChainSolution, ChainSpec};
use chainkit_core::ChainError;
use nalgebra::{Isometry3, Point3, Rotation3, Translation3, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use tracing::debug;

const AXIS_EPSILON: f64 = 1e-9;

/// Orthonormal frame the chain path lies in, through the world origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainPlane {
    rotation: Rotation3<f64>,
}

impl ChainPlane {
    /// World XY plane
    pub fn xy() -> Self {
        Self {
            rotation: Rotation3::identity(),
        }
    }

    /// Derive the plane from the sprocket centers.
    ///
    /// # Errors
    /// `TooFewSprockets` for fewer than two centers and `DegenerateChainPlane`
    /// when no normal perpendicular to the x axis can be found.
    pub fn from_centers(
        centers: &[Point3<f64>],
        axis: &Vector3<f64>,
    ) -> Result<Self, ChainError> {
        let [c0, c1, rest @ ..] = centers else {
            return Err(ChainError::TooFewSprockets {
                count: centers.len(),
            });
        };

        let x_axis = (c1 - c0).try_normalize(AXIS_EPSILON).ok_or_else(|| {
            ChainError::degenerate_plane("the first two sprockets share a center")
        })?;

        let from_centers = rest
            .first()
            .and_then(|c2| (c2 - c0).try_normalize(AXIS_EPSILON))
            .and_then(|towards_c2| Unit::try_new(x_axis.cross(&towards_c2), AXIS_EPSILON));

        let normal = match from_centers {
            Some(normal) => normal,
            None => {
                let perpendicular = axis - x_axis * axis.dot(&x_axis);
                Unit::try_new(perpendicular, AXIS_EPSILON).ok_or_else(|| {
                    ChainError::degenerate_plane(
                        "the plane axis is parallel to the line between the first two sprockets",
                    )
                })?
            }
        };

        let y_axis = normal.cross(&x_axis);
        Ok(Self {
            rotation: Rotation3::from_basis_unchecked(&[x_axis, y_axis, normal.into_inner()]),
        })
    }

    pub fn x_axis(&self) -> Unit<Vector3<f64>> {
        self.rotation * Vector3::x_axis()
    }

    pub fn y_axis(&self) -> Unit<Vector3<f64>> {
        self.rotation * Vector3::y_axis()
    }

    pub fn normal(&self) -> Unit<Vector3<f64>> {
        self.rotation * Vector3::z_axis()
    }

    /// World point expressed in plane coordinates
    pub fn to_local(&self, point: &Point3<f64>) -> Point3<f64> {
        self.rotation.inverse_transform_point(point)
    }

    /// Plane coordinates expressed as a world point
    pub fn to_world(&self, point: &Point3<f64>) -> Point3<f64> {
        self.rotation * point
    }

    /// Rigid transform from plane coordinates to the world
    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_rotation_matrix(&self.rotation),
        )
    }
}

/// Solve a chain in the plane its sprockets define, using +Z as the plane
/// normal for two-sprocket drives.
pub fn solve_in_plane(spec: &ChainSpec) -> Result<ChainSolution, ChainError> {
    solve_in_plane_with_axis(spec, &Vector3::z())
}

/// Solve a chain in the plane its sprockets define. `axis` is the plane
/// normal used when the centers alone do not determine one.
pub fn solve_in_plane_with_axis(
    spec: &ChainSpec,
    axis: &Vector3<f64>,
) -> Result<ChainSolution, ChainError> {
    let centers: Vec<Point3<f64>> = spec.sprockets().iter().map(|s| s.center).collect();
    let plane = ChainPlane::from_centers(&centers, axis)?;
    debug!("Chain plane normal {:?}", plane.normal().as_ref());

    let local: Vec<Point3<f64>> = centers.iter().map(|c| plane.to_local(c)).collect();
    let local_spec = spec.with_centers(&local)?;
    Ok(solve(&local_spec)?.transformed(&plane.isometry()))
}
