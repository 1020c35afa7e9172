//! Lasertag pass parser
//!
//! Lasertags are per-pass metadata rows embedded in a design:
//!
//! ```text
//! (pass_number, feedrate, feedrate_units, intensity, intensity_units,
//!  color_1, color_2, color_3, color_4, color_5, color_6)
//! ```
//!
//! Pass numbers are 1-indexed. Rows are applied in order; a malformed row is
//! reported and skipped.

use crate::pass::Pass;
use lasaurkit_core::{InputError, MessageSink};
use serde::{Deserialize, Serialize};

/// Number of fields in a well-formed lasertag
pub const LASERTAG_ARITY: usize = 11;

const FEEDRATE_FIELD: usize = 1;
const INTENSITY_FIELD: usize = 3;
const FIRST_COLOR_FIELD: usize = 5;

/// One lasertag field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagField {
    Number(f64),
    Text(String),
}

impl TagField {
    /// Numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Text value, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl From<f64> for TagField {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for TagField {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for TagField {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl std::fmt::Display for TagField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// Build a pass list from lasertag rows.
///
/// Malformed rows are reported to `sink` and skipped; the rest are applied.
pub fn passes_from_lasertags<R>(rows: &[R], sink: &mut dyn MessageSink) -> Vec<Pass>
where
    R: AsRef<[TagField]>,
{
    let mut passes: Vec<Pass> = Vec::new();

    for row in rows {
        let fields = row.as_ref();
        if fields.len() != LASERTAG_ARITY {
            tracing::warn!("Skipping lasertag with {} fields", fields.len());
            sink.reject(InputError::LasertagArity {
                found: fields.len(),
            });
            continue;
        }

        let Some(number) = pass_number(&fields[0]) else {
            tracing::warn!("Skipping lasertag with pass number {}", fields[0]);
            sink.reject(InputError::LasertagPassNumber {
                value: fields[0].to_string(),
            });
            continue;
        };

        if passes.len() < number {
            passes.resize_with(number, Pass::default);
        }
        let pass = &mut passes[number - 1];

        if let Some(feedrate) = pass_value(&fields[FEEDRATE_FIELD]) {
            pass.feedrate = feedrate;
        }
        if let Some(intensity) = pass_value(&fields[INTENSITY_FIELD]) {
            pass.intensity = intensity;
        }
        pass.colors.extend(
            fields[FIRST_COLOR_FIELD..]
                .iter()
                .filter_map(TagField::as_text)
                .filter(|color| color.starts_with('#'))
                .map(str::to_string),
        );
    }

    tracing::debug!("Built {} passes from {} lasertags", passes.len(), rows.len());
    passes
}

// Zero counts as blank, like text, and keeps the current value.
fn pass_value(field: &TagField) -> Option<f64> {
    field.as_number().filter(|n| *n != 0.0)
}

fn pass_number(field: &TagField) -> Option<usize> {
    match field {
        TagField::Number(n) if n.is_finite() && *n >= 1.0 && n.fract() == 0.0 => {
            Some(*n as usize)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasaurkit_core::MessageLog;

    fn n(value: f64) -> TagField {
        TagField::Number(value)
    }

    fn t(value: &str) -> TagField {
        TagField::Text(value.to_string())
    }

    #[test]
    fn test_single_row() {
        let rows = vec![vec![
            n(1.0),
            n(2550.0),
            t(""),
            n(100.0),
            t("%"),
            t("#fff000"),
            t("#ababab"),
            t(""),
            t(""),
            t(""),
            t(""),
        ]];
        let mut log = MessageLog::new();
        let passes = passes_from_lasertags(&rows, &mut log);

        assert!(log.is_empty());
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].feedrate, 2550.0);
        assert_eq!(passes[0].intensity, 100.0);
        assert_eq!(passes[0].colors, vec!["#fff000", "#ababab"]);
    }

    #[test]
    fn test_fractional_pass_number_rejected() {
        let mut fields = vec![n(1.5)];
        fields.extend(std::iter::repeat(t("")).take(10));
        let mut log = MessageLog::new();
        let passes = passes_from_lasertags(&[fields], &mut log);
        assert!(passes.is_empty());
        assert_eq!(log.error_count(), 1);
    }

    #[test]
    fn test_colon_prefixed_colors_ignored() {
        let mut fields = vec![n(2.0), t(""), t(""), t(""), t("")];
        fields.push(t(":#fff000"));
        fields.push(t("#00ff00"));
        fields.extend(std::iter::repeat(t("")).take(4));
        let mut log = MessageLog::new();
        let passes = passes_from_lasertags(&[fields], &mut log);
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[1].colors, vec!["#00ff00"]);
        assert_eq!(passes[1].feedrate, 1200.0);
    }

    #[test]
    fn test_non_positive_pass_numbers_rejected() {
        for number in [0.0, -1.0] {
            let mut fields = vec![n(number), n(900.0), t(""), n(30.0), t("%")];
            fields.push(t("#ff0000"));
            fields.extend(std::iter::repeat(t("")).take(5));
            let mut log = MessageLog::new();
            assert!(passes_from_lasertags(&[fields], &mut log).is_empty());
            assert_eq!(log.error_count(), 1);
        }
    }

    #[test]
    fn test_zero_feedrate_and_intensity_keep_defaults() {
        let mut fields = vec![n(1.0), n(0.0), t(""), n(0.0), t("%")];
        fields.push(t("#ff0000"));
        fields.extend(std::iter::repeat(t("")).take(5));
        let mut log = MessageLog::new();
        let passes = passes_from_lasertags(&[fields], &mut log);

        assert!(log.is_empty());
        assert_eq!(passes, vec![Pass::new(["#ff0000"], 1200.0, 10.0)]);
    }

    #[test]
    fn test_text_pass_number_rejected() {
        let mut fields = vec![t("12")];
        fields.extend(std::iter::repeat(t("")).take(10));
        let mut log = MessageLog::new();
        assert!(passes_from_lasertags(&[fields], &mut log).is_empty());
        assert_eq!(log.messages()[0].text, "invalid lasertag (pass number): \"12\"");
    }
}
