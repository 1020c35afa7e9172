//! Error types shared by the LasaurKit crates.
//!
//! Three kinds of problems are distinguished:
//! - [`FormatError`]: a document could not be read at all. Returned as `Err`
//!   and fatal to the import that produced it.
//! - [`InputError`]: one record of a batch was malformed. Reported through a
//!   [`MessageSink`](crate::MessageSink) and skipped.
//! - [`ValidationWarning`]: a value was out of range and has been clamped.
//!   Reported through a sink; processing continues.

use thiserror::Error;

/// Errors raised while reading a serialized job document.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The text is not valid JSON, or does not match the job schema.
    #[error("Invalid job JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A required top-level key is absent.
    #[error("Missing required key: {0}")]
    MissingKey(&'static str),

    /// A raster record violates the raster invariants.
    #[error("Invalid raster {index}: {reason}")]
    InvalidRaster {
        /// Position of the raster in the `rasters` list.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A pass record carries a value that is not a number.
    #[error("Invalid pass {index}: {reason}")]
    InvalidPass {
        /// Position of the pass in the `passes` list.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
}

/// Errors for a single malformed record in a batch. Never aborts the batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// A lasertag row does not have exactly 11 fields.
    #[error("invalid lasertag (num of args): expected 11, found {found}")]
    LasertagArity {
        /// Number of fields in the rejected row.
        found: usize,
    },

    /// A lasertag row has a pass number that is not a positive integer.
    #[error("invalid lasertag (pass number): {value}")]
    LasertagPassNumber {
        /// The offending field, rendered as text.
        value: String,
    },
}

/// Non-fatal range violations. The value has already been clamped.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationWarning {
    /// A feedrate was outside the machine range.
    #[error("Feedrate constrained to {clamped}")]
    FeedrateConstrained {
        /// Value as requested.
        requested: f64,
        /// Value actually used.
        clamped: f64,
    },

    /// An intensity was outside 0-100 percent.
    #[error("Intensity constrained to {clamped}")]
    IntensityConstrained {
        /// Value as requested.
        requested: f64,
        /// Value actually used.
        clamped: f64,
    },
}

/// Result type alias for document reads.
pub type FormatResult<T> = Result<T, FormatError>;
