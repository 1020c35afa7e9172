//! Message sink interface
//!
//! The translator reports clamped values and skipped records to a sink owned
//! by the caller. It never formats anything for display beyond the message
//! text itself.

use crate::error::{InputError, ValidationWarning};
use serde::{Deserialize, Serialize};

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    /// Informational message
    Info,
    /// A value was adjusted; output is still produced
    Warning,
    /// A record was rejected and skipped
    Error,
}

impl std::fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A message reported to a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Severity
    pub level: MessageLevel,
    /// Message text
    pub text: String,
}

impl Message {
    /// Create a new message
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    /// Create an info message
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, text)
    }

    /// Create a warning message
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, text)
    }

    /// Create an error message
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Error, text)
    }
}

impl From<ValidationWarning> for Message {
    fn from(warning: ValidationWarning) -> Self {
        Self::warning(warning.to_string())
    }
}

impl From<InputError> for Message {
    fn from(error: InputError) -> Self {
        Self::error(error.to_string())
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.text)
    }
}

/// Receiver for warnings and errors raised by the translator.
///
/// Implemented for any `FnMut(Message)` closure so hosts can route messages
/// wherever they like.
pub trait MessageSink {
    /// Deliver one message
    fn report(&mut self, message: Message);

    /// Report a clamped value
    fn warn(&mut self, warning: ValidationWarning) {
        self.report(warning.into());
    }

    /// Report a skipped record
    fn reject(&mut self, error: InputError) {
        self.report(error.into());
    }
}

impl<F> MessageSink for F
where
    F: FnMut(Message),
{
    fn report(&mut self, message: Message) {
        (*self)(message)
    }
}

/// Sink that forwards every message to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn report(&mut self, message: Message) {
        match message.level {
            MessageLevel::Info => tracing::info!("{}", message.text),
            MessageLevel::Warning => tracing::warn!("{}", message.text),
            MessageLevel::Error => tracing::error!("{}", message.text),
        }
    }
}

/// Sink that keeps every message in order of arrival.
#[derive(Debug, Default, Clone)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received so far
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages of one level
    pub fn with_level(&self, level: MessageLevel) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.level == level)
    }

    /// Number of warnings received
    pub fn warning_count(&self) -> usize {
        self.with_level(MessageLevel::Warning).count()
    }

    /// Number of errors received
    pub fn error_count(&self) -> usize {
        self.with_level(MessageLevel::Error).count()
    }

    /// True when nothing was reported
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop all messages
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl MessageSink for MessageLog {
    fn report(&mut self, message: Message) {
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_log_collects_in_order() {
        let mut log = MessageLog::new();
        log.warn(ValidationWarning::IntensityConstrained {
            requested: 150.0,
            clamped: 100.0,
        });
        log.reject(InputError::LasertagArity { found: 3 });
        log.report(Message::info("done"));

        assert_eq!(log.messages().len(), 3);
        assert_eq!(log.warning_count(), 1);
        assert_eq!(log.error_count(), 1);
        assert_eq!(log.messages()[0].text, "Intensity constrained to 100");
        assert_eq!(log.messages()[2].level, MessageLevel::Info);
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |m: Message| seen.push(m.level);
            sink.reject(InputError::LasertagPassNumber {
                value: "0".to_string(),
            });
        }
        assert_eq!(seen, vec![MessageLevel::Error]);
    }

    #[test]
    fn test_message_display() {
        let msg = Message::warning("Feedrate constrained to 24000");
        assert_eq!(msg.to_string(), "[warning] Feedrate constrained to 24000");
    }
}
