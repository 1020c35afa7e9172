//! Feedrate and intensity limits applied before values reach the machine.
//!
//! Both values are truncated toward zero first, so a requested feedrate of
//! `0.5` becomes `0` and is then raised to the floor.

use lasaurkit_core::{MessageSink, ValidationWarning};

use crate::format::format_number;

/// Lowest feedrate sent to the machine, mm/min
pub const MIN_FEEDRATE: f64 = 0.1;

/// Highest feedrate sent to the machine, mm/min
pub const MAX_FEEDRATE: f64 = 24000.0;

/// Intensity range in percent
pub const MIN_INTENSITY: f64 = 0.0;
pub const MAX_INTENSITY: f64 = 100.0;

/// Truncate and clamp a feedrate.
///
/// Returns the value to use and, when it differs from the truncated request,
/// the warning to report. NaN is treated as below range.
pub fn constrain_feedrate(rate: f64) -> (f64, Option<ValidationWarning>) {
    let rate = rate.trunc();
    let clamped = if rate.is_nan() || rate < MIN_FEEDRATE {
        MIN_FEEDRATE
    } else if rate > MAX_FEEDRATE {
        MAX_FEEDRATE
    } else {
        return (rate, None);
    };
    (
        clamped,
        Some(ValidationWarning::FeedrateConstrained {
            requested: rate,
            clamped,
        }),
    )
}

/// Truncate and clamp an intensity percentage. NaN is treated as below range.
pub fn constrain_intensity(intensity: f64) -> (f64, Option<ValidationWarning>) {
    let intensity = intensity.trunc();
    let clamped = if intensity.is_nan() || intensity < MIN_INTENSITY {
        MIN_INTENSITY
    } else if intensity > MAX_INTENSITY {
        MAX_INTENSITY
    } else {
        return (intensity, None);
    };
    (
        clamped,
        Some(ValidationWarning::IntensityConstrained {
            requested: intensity,
            clamped,
        }),
    )
}

/// Map a clamped whole percentage to the 0-255 power scale, halves up
pub fn intensity_to_power(percent: f64) -> u8 {
    let percent = percent.clamp(MIN_INTENSITY, MAX_INTENSITY) as u32;
    ((percent * 255 + 50) / 100) as u8
}

/// Constrain a feedrate and render it for an `F` word
pub fn map_constrain_feedrate(rate: f64, sink: &mut dyn MessageSink) -> String {
    let (rate, warning) = constrain_feedrate(rate);
    if let Some(warning) = warning {
        tracing::warn!("{}", warning);
        sink.warn(warning);
    }
    format_number(rate)
}

/// Constrain an intensity and render it for an `S` word on the 0-255 scale
pub fn map_constrain_intensity(intensity: f64, sink: &mut dyn MessageSink) -> String {
    let (intensity, warning) = constrain_intensity(intensity);
    if let Some(warning) = warning {
        tracing::warn!("{}", warning);
        sink.warn(warning);
    }
    intensity_to_power(intensity).to_string()
}
