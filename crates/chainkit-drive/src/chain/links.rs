//! # Chain Links
//!
//! Per-roller link placement and the dog-bone link plate profile.
//!
//! A roller chain alternates inner links (two plates holding the rollers)
//! and outer links (two wider-spaced plates holding the pins). Link `i`
//! spans from roller `i` to roller `i + 1`; even links are inner links.
//!
//! Plate profiles depend only on the chain dimensions, so they are built
//! once per distinct chain and shared from a process-wide cache.

use super::spec::ChainDimensions;
use chainkit_core::{thread_safe_rw_map, ThreadSafeRwMap, MM};
use nalgebra::{Point3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Plate sizes of the 1/2" reference chain, scaled with the pitch
const REFERENCE_PITCH: f64 = 12.7 * MM;
const REFERENCE_PLATE_WIDTH: f64 = 8.5 * MM;
const REFERENCE_NECK_WIDTH: f64 = 4.5 * MM;

/// Kind of link pair starting at a roller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// Plates that carry the rollers
    Inner,
    /// Plates that carry the pins, outside the inner plates
    Outer,
}

impl LinkKind {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Inner
        } else {
            Self::Outer
        }
    }
}

/// Where one link pair sits in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkPlacement {
    /// Index of the roller the link starts at
    pub index: usize,
    pub kind: LinkKind,
    /// World position of the starting roller
    pub position: Point3<f64>,
    /// Direction to the next roller in the path plane, in degrees
    pub heading: f64,
    /// Normal of the path plane; the roller axes point along it
    pub normal: Unit<Vector3<f64>>,
}

/// Dimensions of a dog-bone link plate and how plates stack around the
/// rollers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkPlateProfile {
    pub pitch: f64,
    pub thickness: f64,
    pub roller_diameter: f64,
    pub roller_length: f64,
    /// Radius of the rounded plate ends
    pub plate_radius: f64,
    /// Half width of the plate at its narrowest point
    pub neck_half_width: f64,
    /// Radius of the concave arc forming the neck
    pub neck_radius: f64,
    /// Angle where the neck arc meets the plate end, in degrees
    pub neck_tangent_angle: f64,
}

type ProfileKey = [u64; 4];

fn profile_cache() -> &'static ThreadSafeRwMap<ProfileKey, Arc<LinkPlateProfile>> {
    static CACHE: OnceLock<ThreadSafeRwMap<ProfileKey, Arc<LinkPlateProfile>>> = OnceLock::new();
    CACHE.get_or_init(thread_safe_rw_map)
}

impl LinkPlateProfile {
    /// Compute the plate profile for a chain without consulting the cache.
    pub fn compute(dims: &ChainDimensions) -> Self {
        let pitch = dims.pitch;
        let half_pitch = pitch / 2.0;
        let scale = pitch / REFERENCE_PITCH;
        let neck = scale * REFERENCE_NECK_WIDTH / 2.0;
        let plate_r = scale * REFERENCE_PLATE_WIDTH / 2.0;
        let neck_r = (half_pitch * half_pitch + neck * neck - plate_r * plate_r)
            / (2.0 * plate_r - 2.0 * neck);

        Self {
            pitch,
            thickness: dims.link_plate_thickness,
            roller_diameter: dims.roller_diameter,
            roller_length: dims.roller_length,
            plate_radius: plate_r,
            neck_half_width: neck,
            neck_radius: neck_r,
            neck_tangent_angle: (neck + neck_r).atan2(half_pitch).to_degrees(),
        }
    }

    /// Shared profile for a chain, built on first use.
    pub fn for_chain(dims: &ChainDimensions) -> Arc<Self> {
        let key = [
            dims.pitch.to_bits(),
            dims.link_plate_thickness.to_bits(),
            dims.roller_length.to_bits(),
            dims.roller_diameter.to_bits(),
        ];
        if let Some(profile) = profile_cache().read().get(&key) {
            return Arc::clone(profile);
        }

        let mut cache = profile_cache().write();
        Arc::clone(cache.entry(key).or_insert_with(|| {
            debug!("Building link plate profile for pitch {}", dims.pitch);
            Arc::new(Self::compute(dims))
        }))
    }

    /// Distance from the roller mid-plane to the middle of each plate
    pub fn plate_offset(&self, kind: LinkKind) -> f64 {
        match kind {
            LinkKind::Inner => (self.roller_length + self.thickness) / 2.0,
            LinkKind::Outer => (self.roller_length + 3.0 * self.thickness) / 2.0,
        }
    }

    /// Radius of the pin bosses on outer plates
    pub fn pin_radius(&self) -> f64 {
        self.plate_radius / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_link_kind_alternates() {
        assert_eq!(LinkKind::for_index(0), LinkKind::Inner);
        assert_eq!(LinkKind::for_index(1), LinkKind::Outer);
        assert_eq!(LinkKind::for_index(86), LinkKind::Inner);
    }

    #[test]
    fn test_bicycle_chain_profile() {
        let profile = LinkPlateProfile::compute(&ChainDimensions::default());
        assert!(close(profile.neck_half_width, 2.25));
        assert!(close(profile.plate_radius, 4.25));
        assert!(close(profile.neck_radius, 6.830625));
        assert!(close(profile.neck_tangent_angle, 55.03524963575692));
        assert!(close(profile.plate_offset(LinkKind::Inner), 1.690625));
        assert!(close(profile.plate_offset(LinkKind::Outer), 2.690625));
    }

    #[test]
    fn test_profile_scales_with_pitch() {
        let dims = ChainDimensions::with_pitch(15.875, 10.16);
        let profile = LinkPlateProfile::compute(&dims);
        assert!(close(profile.plate_radius, 5.3125));
        assert!(close(profile.neck_radius, 8.53828125));
        // the shape is similar, so the tangent angle does not change
        assert!(close(profile.neck_tangent_angle, 55.03524963575692));
    }

    #[test]
    fn test_profiles_are_shared() {
        let dims = ChainDimensions::with_pitch(9.525, 6.35);
        let a = LinkPlateProfile::for_chain(&dims);
        let b = LinkPlateProfile::for_chain(&dims);
        assert!(Arc::ptr_eq(&a, &b));

        let other = LinkPlateProfile::for_chain(&ChainDimensions::with_pitch(9.525, 6.0));
        assert!(!Arc::ptr_eq(&a, &other));
        assert_eq!(*a, LinkPlateProfile::compute(&dims));
    }

    #[test]
    fn test_cache_is_thread_safe() {
        let dims = ChainDimensions::with_pitch(19.05, 12.07);
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(move || LinkPlateProfile::for_chain(&dims)))
            .collect();
        let profiles: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(profiles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
