//! Discrete roller positions along the chain path

use super::layout::PlanarLayout;
use super::path::{ChainPath, PathSegment};
use nalgebra::Point2;

/// A roller seated on a sprocket
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Contact {
    pub sprocket: usize,
    /// Angle of the roller on the sprocket's pitch circle, in degrees
    pub angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlacedRoller {
    pub position: Point2<f64>,
    pub contact: Option<Contact>,
}

/// Place `count` rollers one pitch apart, starting where the chain enters
/// sprocket 0.
pub(crate) fn place_rollers(
    layout: &PlanarLayout,
    path: &ChainPath,
    pitch: f64,
    count: usize,
) -> Vec<PlacedRoller> {
    let total = path.total_length();

    (0..count)
        .map(|i| {
            let distance = (i as f64 * pitch) % total;
            // the end of a closed path is its start
            let (index, along) = path.locate(distance).unwrap_or((0, 0.0));
            match path.segments()[index] {
                PathSegment::Arc {
                    sprocket,
                    entry_angle,
                    sweep,
                    ..
                } => {
                    let angle = if layout.wraps[sprocket] {
                        entry_angle + sweep * along
                    } else {
                        entry_angle - sweep * along
                    };
                    PlacedRoller {
                        position: layout.pitch_point(sprocket, angle),
                        contact: Some(Contact { sprocket, angle }),
                    }
                }
                PathSegment::Line { start, end, .. } => PlacedRoller {
                    position: start + (end - start) * along,
                    contact: None,
                },
            }
        })
        .collect()
}
