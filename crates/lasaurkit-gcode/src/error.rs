//! Error types for reading G-code back into a job

use thiserror::Error;

/// Errors raised by the G-code reader
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeReadError {
    /// A word is not a letter followed by a number.
    #[error("Invalid word '{word}' on line {line}")]
    InvalidWord { line: usize, word: String },
}

/// Result type for the G-code reader
pub type GcodeReadResult<T> = Result<T, GcodeReadError>;
