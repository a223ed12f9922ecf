//! Solved chain routing

use super::links::{LinkKind, LinkPlacement};
use super::path::ChainPath;
use nalgebra::{Isometry3, Point2, Point3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fractional link count above which the chain cannot close cleanly
pub const GAPPED_LINK_THRESHOLD: f64 = 0.5;

/// Advisory findings about a solved chain. None of them invalidate the
/// solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChainDiagnostic {
    /// The path is more than half a link longer than the whole rollers
    /// placed on it, leaving a visible gap where the loop closes
    GappedLink { chain_links: f64, fraction: f64 },
}

impl fmt::Display for ChainDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GappedLink {
                chain_links,
                fraction,
            } => write!(
                f,
                "Chain has a missing/gapped link: {:.4} links ({:.4} of a link unused)",
                chain_links, fraction
            ),
        }
    }
}

/// Everything the solver derives from a [`ChainSpec`](super::ChainSpec).
///
/// Angles and path segments are expressed in the path plane; roller
/// positions are world coordinates. [`frame`](Self::frame) maps the path
/// plane (at z = 0) into the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSolution {
    chain_pitch: f64,
    chain_links: f64,
    roller_count: usize,
    roller_positions: Vec<Point3<f64>>,
    path_positions: Vec<Point2<f64>>,
    entry_exit_angles: Vec<(f64, f64)>,
    rotation_offsets: Vec<f64>,
    sprocket_centers: Vec<Point3<f64>>,
    path: ChainPath,
    frame: Isometry3<f64>,
}

impl ChainSolution {
    pub(crate) fn new(
        chain_pitch: f64,
        path: ChainPath,
        entry_exit_angles: Vec<(f64, f64)>,
        path_positions: Vec<Point2<f64>>,
        rotation_offsets: Vec<f64>,
        sprocket_centers: Vec<Point3<f64>>,
        frame: Isometry3<f64>,
    ) -> Self {
        let chain_links = path.total_length() / chain_pitch;
        let roller_positions = path_positions
            .iter()
            .map(|p| frame * Point3::new(p.x, p.y, 0.0))
            .collect();
        Self {
            chain_pitch,
            chain_links,
            roller_count: path_positions.len(),
            roller_positions,
            path_positions,
            entry_exit_angles,
            rotation_offsets,
            sprocket_centers,
            path,
            frame,
        }
    }

    pub fn chain_pitch(&self) -> f64 {
        self.chain_pitch
    }

    /// Length of the closed path through the roller centers
    pub fn total_path_length(&self) -> f64 {
        self.path.total_length()
    }

    /// Path length in pitches; only the whole part becomes rollers
    pub fn chain_links(&self) -> f64 {
        self.chain_links
    }

    pub fn roller_count(&self) -> usize {
        self.roller_count
    }

    pub fn roller_positions(&self) -> &[Point3<f64>] {
        &self.roller_positions
    }

    /// Roller positions in path-plane coordinates
    pub fn path_positions(&self) -> &[Point2<f64>] {
        &self.path_positions
    }

    /// `(entry, exit)` angle of the chain on each sprocket, in degrees
    pub fn entry_exit_angles(&self) -> &[(f64, f64)] {
        &self.entry_exit_angles
    }

    /// Rotation to apply to each sprocket about the frame normal, in
    /// degrees
    pub fn sprocket_rotation_offsets(&self) -> &[f64] {
        &self.rotation_offsets
    }

    /// World centers of the sprockets, moved along with the solution
    pub fn sprocket_centers(&self) -> &[Point3<f64>] {
        &self.sprocket_centers
    }

    pub fn path(&self) -> &ChainPath {
        &self.path
    }

    pub fn frame(&self) -> &Isometry3<f64> {
        &self.frame
    }

    /// Normal of the path plane in world coordinates
    pub fn normal(&self) -> Unit<Vector3<f64>> {
        self.frame.rotation * Vector3::z_axis()
    }

    /// Fraction of a link left over after the last whole roller
    pub fn link_fraction(&self) -> f64 {
        self.chain_links - self.chain_links.floor()
    }

    pub fn diagnostics(&self) -> Vec<ChainDiagnostic> {
        let fraction = self.link_fraction();
        if fraction > GAPPED_LINK_THRESHOLD {
            vec![ChainDiagnostic::GappedLink {
                chain_links: self.chain_links,
                fraction,
            }]
        } else {
            Vec::new()
        }
    }

    pub fn has_gapped_link(&self) -> bool {
        self.link_fraction() > GAPPED_LINK_THRESHOLD
    }

    /// Move the whole solution rigidly, e.g. onto an oblique plane or an
    /// assembly position. Angles and path segments are unchanged since
    /// they are relative to the frame.
    pub fn transformed(&self, transform: &Isometry3<f64>) -> Self {
        Self {
            roller_positions: self
                .roller_positions
                .iter()
                .map(|p| transform * p)
                .collect(),
            sprocket_centers: self
                .sprocket_centers
                .iter()
                .map(|c| transform * c)
                .collect(),
            frame: transform * self.frame,
            ..self.clone()
        }
    }

    /// One link per roller, oriented towards the following roller.
    pub fn link_placements(&self) -> Vec<LinkPlacement> {
        let n = self.path_positions.len();
        let normal = self.normal();
        self.path_positions
            .iter()
            .zip(&self.roller_positions)
            .enumerate()
            .map(|(index, (here, &position))| {
                let next = self.path_positions[(index + 1) % n];
                let step = next - here;
                LinkPlacement {
                    index,
                    kind: LinkKind::for_index(index),
                    position,
                    heading: step.y.atan2(step.x).to_degrees(),
                    normal,
                }
            })
            .collect()
    }
}
