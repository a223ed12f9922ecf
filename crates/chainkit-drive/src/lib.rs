//! # ChainKit Drive
//!
//! Sprocket geometry and roller chain routing.
//!
//! - [`sprocket`]: pitch radius and circumference, sprocket tooth profiles
//! - [`chain`]: the routing solver from a [`ChainSpec`] to a [`ChainSolution`]
//! - [`transmission`]: placement of sprockets and links for assembly
//! - [`batch`]: solving many layouts at once
//!
//! All lengths are millimeters and all angles degrees. Angle zero points
//! along +Y of the path plane and angles grow counter-clockwise.

pub mod batch;
pub mod chain;
pub mod sprocket;
pub mod transmission;

pub use batch::solve_all;
pub use chain::{
    solve, solve_in_plane, solve_in_plane_with_axis, ChainDiagnostic, ChainDimensions,
    ChainPath, ChainPlane, ChainSolution, ChainSpec, LinkKind, LinkPlacement, LinkPlateProfile,
    PathSegment, SprocketSpec, TangentKind, MAX_CHAIN_LINKS,
};
pub use sprocket::{pitch_circumference, pitch_radius, SprocketProfile, ToothStyle, MIN_TEETH};
pub use transmission::{SprocketPlacement, TransmissionLayout};

pub use chainkit_core::{ChainError, INCH, MM};

// Geometry types used throughout the public API
pub use nalgebra::{Isometry3, Point2, Point3, Vector3};
