//! ChainKit Settings Crate
//!
//! Loads, validates and saves chain layout files.

pub mod config;
pub mod error;

pub use config::{
    ChainLayoutConfig, ChainSettings, LengthValue, MeasurementSystem, SolverSettings,
    SprocketSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
