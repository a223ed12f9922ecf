//! Closed chain path made of sprocket arcs and free spans

use super::layout::PlanarLayout;
use super::tangent::Span;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// One piece of the closed chain path, in path-plane coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Chain seated on a sprocket
    Arc {
        sprocket: usize,
        /// Angle where the chain arrives, in degrees
        entry_angle: f64,
        /// Angle where the chain leaves, in degrees
        exit_angle: f64,
        /// Angle swept in the sprocket's wrap direction, in `[0, 360)`
        sweep: f64,
        length: f64,
    },
    /// Free chain between two sprockets
    Line {
        from: usize,
        to: usize,
        start: Point2<f64>,
        end: Point2<f64>,
        length: f64,
    },
}

impl PathSegment {
    pub fn length(&self) -> f64 {
        match self {
            Self::Arc { length, .. } | Self::Line { length, .. } => *length,
        }
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, Self::Arc { .. })
    }
}

/// Arc angle covered from `entry` to `exit` moving in the wrap direction
pub fn arc_sweep(entry: f64, exit: f64, positive_wrap: bool) -> f64 {
    let sweep = if positive_wrap {
        exit - entry + 360.0
    } else {
        entry - exit + 360.0
    };
    sweep.rem_euclid(360.0)
}

/// The ordered segments `[arc₀, line₀, arc₁, line₁, …]` and their running
/// totals. Segment `2s` is the arc on sprocket `s` and `2s + 1` the span
/// from sprocket `s` to its successor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainPath {
    segments: Vec<PathSegment>,
    cumulative: Vec<f64>,
}

impl ChainPath {
    pub(crate) fn build(layout: &PlanarLayout, spans: &[Span], angles: &[(f64, f64)]) -> Self {
        let mut segments = Vec::with_capacity(2 * spans.len());
        for span in spans {
            let s = span.from;
            let (entry_angle, exit_angle) = angles[s];
            let sweep = arc_sweep(entry_angle, exit_angle, layout.wraps[s]);
            segments.push(PathSegment::Arc {
                sprocket: s,
                entry_angle,
                exit_angle,
                sweep,
                length: sweep / 360.0 * TAU * layout.radii[s],
            });
            segments.push(PathSegment::Line {
                from: s,
                to: span.to,
                start: layout.pitch_point(s, exit_angle),
                end: layout.pitch_point(span.to, angles[span.to].0),
                length: span.line_length(),
            });
        }

        let cumulative = segments
            .iter()
            .scan(0.0, |total, segment| {
                *total += segment.length();
                Some(*total)
            })
            .collect();

        Self {
            segments,
            cumulative,
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Running total of segment lengths; the last entry is the path length.
    pub fn cumulative_lengths(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn total_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Find the segment holding `distance` along the path and the fraction
    /// of that segment already travelled.
    ///
    /// A distance that lands exactly on a boundary belongs to the start of
    /// the following segment. Returns `None` past the end of the path.
    pub fn locate(&self, distance: f64) -> Option<(usize, f64)> {
        let index = self.cumulative.iter().position(|&total| distance < total)?;
        let length = self.segments[index].length();
        let along = 1.0 - (self.cumulative[index] - distance) / length;
        Some((index, along))
    }
}
