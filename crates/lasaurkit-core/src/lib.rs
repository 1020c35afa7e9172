//! # LasaurKit Core
//!
//! Shared error taxonomy and the message sink through which the translator
//! reports warnings and skipped records.

pub mod error;
pub mod message;

pub use error::{FormatError, FormatResult, InputError, ValidationWarning};
pub use message::{Message, MessageLevel, MessageLog, MessageSink, TracingSink};
