//! Script-visible error values.
//!
//! These are ordinary values that travel on the operand stack; scripts branch
//! on them with the error-inspection host functions. They are unrelated to
//! [`crate::error::VmError`], which signals the embedder and is never visible
//! to a script.

use std::fmt;

use super::MapValue;
use super::Value;

/// The payload of an ERROR value: a type tag, a message, and a
/// human-readable localized message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    error_type: String,
    message: String,
    localized_message: String,
}

impl ErrorValue {
    /// Creates an error whose localized message equals its message.
    pub fn new<T: Into<String>, M: Into<String>>(error_type: T, message: M) -> Self {
        let message = message.into();
        Self {
            error_type: error_type.into(),
            localized_message: message.clone(),
            message,
        }
    }

    /// Creates an error with a distinct localized message.
    pub fn with_localized<T, M, L>(error_type: T, message: M, localized_message: L) -> Self
    where
        T: Into<String>,
        M: Into<String>,
        L: Into<String>,
    {
        Self {
            error_type: error_type.into(),
            message: message.into(),
            localized_message: localized_message.into(),
        }
    }

    /// Returns the error type tag.
    pub fn error_type(&self) -> &str {
        &self.error_type
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the localized message.
    pub fn localized_message(&self) -> &str {
        &self.localized_message
    }

    /// Converts this error into its map representation, with `type`,
    /// `message` and `localizedMessage` entries.
    pub fn to_map(&self) -> MapValue {
        let map = MapValue::new();
        map.set("type", Value::from(self.error_type.as_str()));
        map.set("message", Value::from(self.message.as_str()));
        map.set("localizedMessage", Value::from(self.localized_message.as_str()));
        map
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_defaults_to_message() {
        let error = ErrorValue::new("Arithmetic", "divide by zero");
        assert_eq!(error.error_type(), "Arithmetic");
        assert_eq!(error.message(), "divide by zero");
        assert_eq!(error.localized_message(), "divide by zero");
        assert_eq!(error.to_string(), "divide by zero");
    }

    #[test]
    fn test_map_conversion() {
        let error = ErrorValue::with_localized("BadFile", "missing", "file is missing");
        let map = error.to_map();
        assert_eq!(map.get("type").as_string(), "BadFile");
        assert_eq!(map.get("message").as_string(), "missing");
        assert_eq!(map.get("localizedmessage").as_string(), "file is missing");
        assert_eq!(map.len(), 3);
    }
}
