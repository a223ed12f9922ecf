//! # Roller Chain Routing
//!
//! Routes a roller chain around an ordered loop of sprockets.
//!
//! Solving runs as a fixed pipeline over an immutable [`ChainSpec`]:
//!
//! 1. **Tangents** - entry and exit angle of the chain on every sprocket
//! 2. **Path** - alternating sprocket arcs and free spans with running lengths
//! 3. **Rollers** - one roller every pitch along the closed path
//! 4. **Alignment** - sprocket rotation putting a tooth gap under the rollers
//!
//! [`solve`] works in the world XY plane with the rollers at the height of
//! the first sprocket. [`solve_in_plane`] first moves the layout into the
//! plane its sprockets define.
//!
//! ## Example
//!
//! ```rust
//! use chainkit_drive::chain::{solve, ChainDimensions, ChainSpec};
//! use nalgebra::Point3;
//!
//! let spec = ChainSpec::from_lists(
//!     &[32, 32],
//!     &[Point3::new(-127.0, 0.0, 0.0), Point3::new(127.0, 0.0, 0.0)],
//!     &[true, true],
//!     ChainDimensions::default(),
//! )?;
//! let solution = solve(&spec)?;
//! assert_eq!(solution.roller_count(), 72);
//! # Ok::<(), chainkit_core::ChainError>(())
//! ```

mod alignment;
mod layout;
pub mod links;
pub mod path;
pub mod plane;
mod rollers;
pub mod solution;
pub mod spec;
pub mod tangent;

pub use links::{LinkKind, LinkPlacement, LinkPlateProfile};
pub use path::{arc_sweep, ChainPath, PathSegment};
pub use plane::{solve_in_plane, solve_in_plane_with_axis, ChainPlane};
pub use solution::{ChainDiagnostic, ChainSolution, GAPPED_LINK_THRESHOLD};
pub use spec::{ChainDimensions, ChainSpec, SprocketSpec, LOCATION_TOLERANCE};
pub use tangent::TangentKind;

use chainkit_core::ChainError;
use layout::PlanarLayout;
use spec::check_distinct;
use nalgebra::Isometry3;
use tracing::{debug, warn};

/// Longest chain the solver will place rollers for
pub const MAX_CHAIN_LINKS: usize = 1_000_000;

/// Solve the routing of a chain in the world XY plane.
///
/// # Errors
/// `DuplicateSprocketLocation` when two centers coincide in XY,
/// `InfeasibleSprocketLayout` when a span has no common tangent,
/// `ChainTooShort` when the path is shorter than one pitch,
/// `ChainTooLong` when it holds more than [`MAX_CHAIN_LINKS`] links and
/// `NoContactRoller` when a sprocket ends up with no seated roller.
pub fn solve(spec: &ChainSpec) -> Result<ChainSolution, ChainError> {
    let layout = PlanarLayout::from_spec(spec);
    let pitch = spec.chain_pitch();
    check_distinct(&layout.centers, nalgebra::distance)?;

    let spans = tangent::spans(&layout)?;
    let angles = tangent::entry_exit_angles(&layout, &spans);
    debug!("Solved entry/exit angles for {} sprockets", layout.len());

    let path = ChainPath::build(&layout, &spans, &angles);
    let total = path.total_length();
    debug!(
        "Chain path has {} segments, {:.4} mm long",
        path.segments().len(),
        total
    );
    // negated so a NaN length is rejected too
    if !(total >= pitch) {
        return Err(ChainError::ChainTooShort {
            length: total,
            pitch,
        });
    }

    let links = total / pitch;
    if !(links <= MAX_CHAIN_LINKS as f64) {
        return Err(ChainError::ChainTooLong {
            links,
            max: MAX_CHAIN_LINKS,
        });
    }

    let roller_count = links.floor() as usize;
    let rollers = rollers::place_rollers(&layout, &path, pitch, roller_count);
    debug!("Placed {} rollers", rollers.len());

    let offsets = alignment::rotation_offsets(&rollers, &layout.teeth)?;
    debug!("Sprocket rotation offsets: {:?}", offsets);

    let frame = Isometry3::translation(0.0, 0.0, layout.elevation);
    let positions = rollers.iter().map(|r| r.position).collect();
    let centers = spec.sprockets().iter().map(|s| s.center).collect();
    let solution = ChainSolution::new(pitch, path, angles, positions, offsets, centers, frame);

    for diagnostic in solution.diagnostics() {
        warn!("{}", diagnostic);
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_symmetric_pair() {
        let spec = ChainSpec::from_lists(
            &[32, 32],
            &[Point3::new(-127.0, 0.0, 0.0), Point3::new(127.0, 0.0, 0.0)],
            &[true, true],
            ChainDimensions::default(),
        )
        .unwrap();
        let solution = solve(&spec).unwrap();

        let (entry, exit) = solution.entry_exit_angles()[0];
        assert!(close(entry, 0.0, 1e-9));
        assert!(close(exit, 180.0, 1e-9));
        assert!(close(solution.sprocket_rotation_offsets()[0], 5.625, 1e-9));
        assert!(close(solution.total_path_length(), 915.0535680437272, 1e-9));
        assert_eq!(solution.roller_count(), 72);
        assert_eq!(solution.roller_positions().len(), 72);
        assert!(solution.diagnostics().is_empty());
    }

    #[test]
    fn test_rollers_lifted_to_first_sprocket() {
        let spec = ChainSpec::from_lists(
            &[16, 16],
            &[Point3::new(-76.2, 40.0, 12.0), Point3::new(76.2, 40.0, 30.0)],
            &[true, true],
            ChainDimensions::default(),
        )
        .unwrap();
        let solution = solve(&spec).unwrap();
        assert!(solution
            .roller_positions()
            .iter()
            .all(|p| close(p.z, 12.0, 1e-12)));
        assert_eq!(solution.normal().into_inner(), Vector3::z());
    }

    #[test]
    fn test_centers_stacked_in_z_collide_in_plane() {
        let spec = ChainSpec::from_lists(
            &[16, 16],
            &[Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 50.0)],
            &[true, true],
            ChainDimensions::default(),
        )
        .unwrap();
        assert_eq!(
            solve(&spec).unwrap_err(),
            ChainError::DuplicateSprocketLocation {
                first: 0,
                second: 1
            }
        );
    }

    #[test]
    fn test_solving_is_deterministic() {
        let spec = ChainSpec::from_lists(
            &[20, 11, 15],
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(150.0, 20.0, 0.0),
                Point3::new(60.0, 120.0, 0.0),
            ],
            &[true, false, true],
            ChainDimensions::default(),
        )
        .unwrap();
        assert_eq!(solve(&spec).unwrap(), solve(&spec).unwrap());
    }
}
