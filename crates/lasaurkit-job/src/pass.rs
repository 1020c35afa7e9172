//! Machining passes
//!
//! Passes run in list order; within a pass, colors run in the listed order.

use lasaurkit_settings::{DEFAULT_PASS_FEEDRATE, DEFAULT_PASS_INTENSITY};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One group of colors machined at a single feedrate and intensity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pass {
    /// Color keys, in machining order
    pub colors: Vec<String>,
    /// Feed rate in mm/min
    #[serde(serialize_with = "number", deserialize_with = "number_or_numeric_string")]
    pub feedrate: f64,
    /// Intensity in percent, 0-100
    #[serde(serialize_with = "number", deserialize_with = "number_or_numeric_string")]
    pub intensity: f64,
}

impl Default for Pass {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            feedrate: DEFAULT_PASS_FEEDRATE,
            intensity: DEFAULT_PASS_INTENSITY,
        }
    }
}

impl Pass {
    /// Create a pass
    pub fn new<I, S>(colors: I, feedrate: f64, intensity: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            colors: colors.into_iter().map(Into::into).collect(),
            feedrate,
            intensity,
        }
    }
}

// Whole numbers are written without a fraction so exported jobs read `1200`,
// not `1200.0`.
fn number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn number_or_numeric_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, found {:?}", s))),
    }
}
