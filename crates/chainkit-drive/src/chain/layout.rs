//! Sprocket layout projected onto the path plane

use super::spec::ChainSpec;
use crate::sprocket::radius_for;
use nalgebra::{Point2, Vector2};

/// Per-sprocket values the solver stages share
#[derive(Debug, Clone)]
pub(crate) struct PlanarLayout {
    pub teeth: Vec<u32>,
    pub centers: Vec<Point2<f64>>,
    pub radii: Vec<f64>,
    pub wraps: Vec<bool>,
    pub elevation: f64,
}

impl PlanarLayout {
    pub fn from_spec(spec: &ChainSpec) -> Self {
        let pitch = spec.chain_pitch();
        let sprockets = spec.sprockets();
        Self {
            teeth: sprockets.iter().map(|s| s.teeth).collect(),
            centers: sprockets
                .iter()
                .map(|s| Point2::new(s.center.x, s.center.y))
                .collect(),
            radii: sprockets.iter().map(|s| radius_for(s.teeth, pitch)).collect(),
            wraps: sprockets.iter().map(|s| s.positive_wrap).collect(),
            elevation: sprockets.first().map_or(0.0, |s| s.center.z),
        }
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Point on the pitch circle of `sprocket` at `angle` degrees.
    ///
    /// Angle zero points along +Y and angles grow counter-clockwise.
    pub fn pitch_point(&self, sprocket: usize, angle: f64) -> Point2<f64> {
        let r = self.radii[sprocket];
        let a = angle.to_radians();
        self.centers[sprocket] + Vector2::new(-r * a.sin(), r * a.cos())
    }
}
