//! # Sprocket Geometry
//!
//! Pitch circle formulas for roller chain sprockets and the tooth profile
//! classification used when a sprocket outline is built downstream.
//!
//! The pitch radius follows from the isosceles triangle formed by the
//! sprocket center and two adjacent roller centers: the apex angle is
//! `360° / teeth` and the base is one chain pitch.

use chainkit_core::ChainError;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Smallest tooth count that forms a sprocket.
pub const MIN_TEETH: u32 = 3;

/// Reject tooth counts that cannot form a sprocket
pub fn validate_teeth(teeth: u32) -> Result<(), ChainError> {
    if teeth < MIN_TEETH {
        return Err(ChainError::InvalidSprocketSpec { teeth });
    }
    Ok(())
}

/// Reject dimensions that are not positive finite numbers
pub(crate) fn validate_positive(name: &'static str, value: f64) -> Result<(), ChainError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChainError::InvalidDimension { name, value });
    }
    Ok(())
}

/// Radius of the circle through the centers of the rollers engaged with a
/// sprocket of `teeth` teeth.
///
/// `sqrt(p² / (2·(1 − cos(2π/teeth))))`
pub fn pitch_radius(teeth: u32, chain_pitch: f64) -> Result<f64, ChainError> {
    validate_teeth(teeth)?;
    validate_positive("chain pitch", chain_pitch)?;
    Ok(radius_for(teeth, chain_pitch))
}

pub(crate) fn radius_for(teeth: u32, chain_pitch: f64) -> f64 {
    let tooth_angle = TAU / teeth as f64;
    (chain_pitch * chain_pitch / (2.0 * (1.0 - tooth_angle.cos()))).sqrt()
}

/// Circumference of the pitch circle, `2π · pitch_radius`.
pub fn pitch_circumference(teeth: u32, chain_pitch: f64) -> Result<f64, ChainError> {
    Ok(TAU * pitch_radius(teeth, chain_pitch)?)
}

/// Shape of the tooth tip between two roller seats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToothStyle {
    /// The flanks are cut off by the outer circle, leaving a flat land
    Flat,
    /// The flanks meet in a point before reaching the outer circle
    Spiky,
}

/// Dimensions of a sprocket for a given chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprocketProfile {
    teeth: u32,
    chain_pitch: f64,
    roller_diameter: f64,
    clearance: f64,
}

impl SprocketProfile {
    /// Create a sprocket profile with no roller clearance.
    pub fn new(teeth: u32, chain_pitch: f64, roller_diameter: f64) -> Result<Self, ChainError> {
        validate_teeth(teeth)?;
        validate_positive("chain pitch", chain_pitch)?;
        validate_positive("roller diameter", roller_diameter)?;
        if roller_diameter >= chain_pitch {
            return Err(ChainError::RollerTooLargeForPitch {
                roller_diameter,
                chain_pitch,
            });
        }
        Ok(Self {
            teeth,
            chain_pitch,
            roller_diameter,
            clearance: 0.0,
        })
    }

    /// Set the gap between the rollers and the tooth seats.
    pub fn with_clearance(mut self, clearance: f64) -> Result<Self, ChainError> {
        if !clearance.is_finite() || clearance < 0.0 {
            return Err(ChainError::InvalidDimension {
                name: "clearance",
                value: clearance,
            });
        }
        self.clearance = clearance;
        Ok(self)
    }

    pub fn teeth(&self) -> u32 {
        self.teeth
    }

    pub fn chain_pitch(&self) -> f64 {
        self.chain_pitch
    }

    pub fn roller_diameter(&self) -> f64 {
        self.roller_diameter
    }

    pub fn clearance(&self) -> f64 {
        self.clearance
    }

    /// Angle between adjacent teeth in degrees
    pub fn tooth_angle(&self) -> f64 {
        360.0 / self.teeth as f64
    }

    pub fn pitch_radius(&self) -> f64 {
        radius_for(self.teeth, self.chain_pitch)
    }

    pub fn pitch_circumference(&self) -> f64 {
        TAU * self.pitch_radius()
    }

    /// Radius of the roller seat, including clearance
    fn seat_radius(&self) -> f64 {
        self.roller_diameter / 2.0 + self.clearance
    }

    /// Distance from the center to the point where the two flank arcs of a
    /// tooth meet. Flanks are arcs of radius `pitch - seat` centered on the
    /// neighbouring roller seats.
    fn spike_radius(&self, seat_radius: f64) -> Option<f64> {
        let half_pitch = self.chain_pitch / 2.0;
        let flank = self.chain_pitch - seat_radius;
        let flank_reach = flank * flank - half_pitch * half_pitch;
        if flank_reach <= 0.0 {
            return None;
        }
        let r = self.pitch_radius();
        Some((r * r - half_pitch * half_pitch).sqrt() + flank_reach.sqrt())
    }

    /// Whether the teeth end in a flat land or a point
    pub fn tooth_style(&self) -> ToothStyle {
        let seat = self.seat_radius();
        let outer_circle = self.pitch_radius() + seat / 2.0;
        match self.spike_radius(seat) {
            Some(spike) if spike <= outer_circle => ToothStyle::Spiky,
            _ => ToothStyle::Flat,
        }
    }

    /// Distance from the center to the tip of the teeth
    pub fn outer_radius(&self) -> f64 {
        let nominal_seat = self.roller_diameter / 2.0;
        match self.tooth_style() {
            ToothStyle::Flat => self.pitch_radius() + self.roller_diameter / 4.0,
            ToothStyle::Spiky => self
                .spike_radius(nominal_seat)
                .unwrap_or_else(|| self.pitch_radius() + self.roller_diameter / 4.0),
        }
    }
}
