//! Error handling for ChainKit
//!
//! Chain errors cover input validation and geometric infeasibility. They
//! use `thiserror`. None of them are transient; a failed layout must be
//! corrected by the caller.

use thiserror::Error;

/// Chain layout error type
///
/// Represents input-validation and geometric-infeasibility failures raised
/// while building a chain layout or solving its routing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    /// Tooth count is too small to form a sprocket
    #[error("Invalid sprocket: {teeth} teeth (a sprocket needs more than 2)")]
    InvalidSprocketSpec {
        /// The rejected tooth count.
        teeth: u32,
    },

    /// The per-sprocket input lists differ in length
    #[error("Mismatched sprocket lists: {teeth} tooth counts, {centers} centers, {wraps} wrap directions")]
    MismatchedListLengths {
        /// Number of tooth counts supplied.
        teeth: usize,
        /// Number of centers supplied.
        centers: usize,
        /// Number of wrap directions supplied.
        wraps: usize,
    },

    /// Two sprockets share a center in the path plane
    #[error("Sprockets {first} and {second} are in the same location")]
    DuplicateSprocketLocation {
        /// Index of the first sprocket.
        first: usize,
        /// Index of the second sprocket.
        second: usize,
    },

    /// Roller does not fit between two adjacent pins
    #[error("Roller diameter {roller_diameter} is too large for chain pitch {chain_pitch}")]
    RollerTooLargeForPitch {
        /// The rejected roller diameter.
        roller_diameter: f64,
        /// The chain pitch it was checked against.
        chain_pitch: f64,
    },

    /// A chain needs at least two sprockets
    #[error("At least two sprockets are required, got {count}")]
    TooFewSprockets {
        /// Number of sprockets supplied.
        count: usize,
    },

    /// The requested wrap pattern has no common tangent between two sprockets
    #[error("Sprockets {from} and {to} are too close for the requested wrap (tangent ratio {ratio:.6})")]
    InfeasibleSprocketLayout {
        /// Index of the sprocket the span leaves.
        from: usize,
        /// Index of the sprocket the span arrives at.
        to: usize,
        /// The out-of-range sine argument.
        ratio: f64,
    },

    /// No roller lands on a sprocket's arc of contact
    #[error("No roller is in contact with sprocket {sprocket}")]
    NoContactRoller {
        /// Index of the sprocket without a roller.
        sprocket: usize,
    },

    /// A chain or sprocket dimension is not a positive finite number
    #[error("Invalid {name}: {value} (must be positive)")]
    InvalidDimension {
        /// Name of the dimension.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The routed path is shorter than a single pitch
    #[error("Chain path length {length} is shorter than one pitch ({pitch})")]
    ChainTooShort {
        /// Total path length.
        length: f64,
        /// Chain pitch.
        pitch: f64,
    },

    /// The routed path holds more links than a chain can be assembled from
    #[error("Chain path of {links} links exceeds the limit of {max} links")]
    ChainTooLong {
        /// Path length in links.
        links: f64,
        /// Largest supported link count.
        max: usize,
    },

    /// Sprocket centers do not span a usable chain plane
    #[error("Cannot derive a chain plane: {reason}")]
    DegenerateChainPlane {
        /// Why the plane could not be built.
        reason: String,
    },
}

impl ChainError {
    /// Create a degenerate plane error.
    pub fn degenerate_plane(reason: impl Into<String>) -> Self {
        Self::DegenerateChainPlane {
            reason: reason.into(),
        }
    }

    /// Check if this error comes from validating the input rather than
    /// from the geometry of an otherwise valid layout.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSprocketSpec { .. }
                | Self::MismatchedListLengths { .. }
                | Self::DuplicateSprocketLocation { .. }
                | Self::RollerTooLargeForPitch { .. }
                | Self::TooFewSprockets { .. }
                | Self::InvalidDimension { .. }
        )
    }

    /// Check if this error means the sprocket arrangement cannot be routed.
    pub fn is_geometric(&self) -> bool {
        !self.is_input_error()
    }
}
