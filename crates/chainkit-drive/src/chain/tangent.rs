//! Entry and exit angles of the free chain spans
//!
//! Each span leaves sprocket `s` and arrives at sprocket `s + 1` along a
//! common tangent of the two pitch circles. Sprockets wrapped in the same
//! sense share an external tangent, opposite senses an internal one.

use super::layout::PlanarLayout;
use super::spec::{predecessor, successor};
use chainkit_core::ChainError;
use serde::{Deserialize, Serialize};

/// Family of common tangent a free span follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TangentKind {
    /// Both sprockets wrapped in the same sense
    External,
    /// The sprockets are wrapped in opposite senses
    Internal,
}

impl TangentKind {
    pub fn for_wraps(from_positive: bool, to_positive: bool) -> Self {
        if from_positive == to_positive {
            Self::External
        } else {
            Self::Internal
        }
    }

    /// Radius offset between the two tangent points
    fn offset(self, r_from: f64, r_to: f64) -> f64 {
        match self {
            Self::External => r_from - r_to,
            Self::Internal => r_from + r_to,
        }
    }
}

/// Free span between a sprocket and its successor
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Span {
    pub from: usize,
    pub to: usize,
    pub kind: TangentKind,
    pub separation: f64,
    /// Direction from the successor to this sprocket, rotated by 90°
    pub base_angle: f64,
    pub offset: f64,
}

impl Span {
    /// Length of the straight chain between the two tangent points
    pub fn line_length(&self) -> f64 {
        (self.separation * self.separation - self.offset * self.offset)
            .max(0.0)
            .sqrt()
    }

    /// Angle on the `from` sprocket where the chain leaves it
    fn exit_angle(&self, from_positive: bool) -> f64 {
        let tilt = (self.offset / self.separation).asin().to_degrees();
        if from_positive {
            self.base_angle - 90.0 + tilt
        } else {
            self.base_angle + 90.0 - tilt
        }
    }
}

/// Measure every span and reject wrap patterns with no common tangent.
pub(crate) fn spans(layout: &PlanarLayout) -> Result<Vec<Span>, ChainError> {
    let n = layout.len();
    (0..n)
        .map(|from| {
            let to = successor(from, n);
            let delta = layout.centers[from] - layout.centers[to];
            let separation = delta.norm();
            let kind = TangentKind::for_wraps(layout.wraps[from], layout.wraps[to]);
            let offset = kind.offset(layout.radii[from], layout.radii[to]);
            let ratio = offset / separation;
            if !ratio.is_finite() || ratio.abs() > 1.0 {
                return Err(ChainError::InfeasibleSprocketLayout { from, to, ratio });
            }
            Ok(Span {
                from,
                to,
                kind,
                separation,
                base_angle: 90.0 + delta.y.atan2(delta.x).to_degrees(),
                offset,
            })
        })
        .collect()
}

/// `(entry, exit)` angle of the chain on every sprocket, in degrees
pub(crate) fn entry_exit_angles(layout: &PlanarLayout, spans: &[Span]) -> Vec<(f64, f64)> {
    let n = layout.len();
    let exits: Vec<f64> = spans
        .iter()
        .map(|span| span.exit_angle(layout.wraps[span.from]))
        .collect();

    (0..n)
        .map(|s| {
            let prev = predecessor(s, n);
            let entry = if layout.wraps[s] == layout.wraps[prev] {
                exits[prev]
            } else {
                exits[prev] + 180.0
            };
            (entry, exits[s])
        })
        .collect()
}
