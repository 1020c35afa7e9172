//! LasaurKit Settings Crate
//!
//! Machine configuration consumed by the job model and the encoders.

pub mod config;
pub mod error;

pub use config::{
    LaserSettings, DEFAULT_PASS_FEEDRATE, DEFAULT_PASS_INTENSITY, MAX_NUM_DIGITS,
};
pub use error::{SettingsError, SettingsResult};
