//! Error types for mapping sheet operations

use thiserror::Error;

/// Main error type for mapping sheet operations
#[derive(Error, Debug)]
pub enum MappingError {
    /// Schema parsing errors
    #[error("Failed to parse schema: {message}")]
    ParseError {
        /// Error message
        message: String,
        /// Location in schema if available
        location: Option<String>,
    },

    /// A schema fragment is missing an expected key
    #[error("Schema fragment at '{path}' is missing '{key}'")]
    MissingKey {
        /// Field path of the fragment
        path: String,
        /// Key that was expected
        key: String,
    },

    /// A localized string lookup failed
    #[error("No '{lang}' translation for string key '{key}'")]
    StringLookup {
        /// String table key
        key: String,
        /// Requested language
        lang: String,
    },

    /// A `$ref` could not be resolved
    #[error("Failed to resolve reference '{pointer}': {reason}")]
    UnresolvedRef {
        /// The reference pointer
        pointer: String,
        /// Reason for failure
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Generic errors with context
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for mapping sheet operations
pub type Result<T> = std::result::Result<T, MappingError>;

impl MappingError {
    /// Create a new parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: None,
        }
    }

    /// Create a new parse error with location
    #[must_use]
    pub fn parse_at(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: Some(location.into()),
        }
    }

    /// Create a new missing-key error
    #[must_use]
    pub fn missing_key(path: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingKey {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Create a new string-lookup error
    #[must_use]
    pub fn string_lookup(key: impl Into<String>, lang: impl Into<String>) -> Self {
        Self::StringLookup {
            key: key.into(),
            lang: lang.into(),
        }
    }

    /// Create a new unresolved-reference error
    #[must_use]
    pub fn unresolved_ref(pointer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnresolvedRef {
            pointer: pointer.into(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError(message.into())
    }

    /// Create a generic error
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            source: None,
        }
    }

    /// Create a generic error with source
    #[must_use]
    pub fn other_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<serde_json::Error> for MappingError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = MappingError::parse("Invalid JSON");
        assert!(matches!(err, MappingError::ParseError { .. }));

        let err = MappingError::parse_at("Invalid fragment", "tender/items");
        match err {
            MappingError::ParseError { location, .. } => {
                assert_eq!(location.as_deref(), Some("tender/items"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = MappingError::missing_key("tender/value", "title");
        let display = err.to_string();
        assert!(display.contains("tender/value"));
        assert!(display.contains("title"));

        let err = MappingError::string_lookup("path_header", "fr");
        assert!(err.to_string().contains("path_header"));
    }

    #[test]
    fn test_error_conversions() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let mapping_err: MappingError = json_err.into();
        assert!(matches!(mapping_err, MappingError::SerializationError(_)));
    }
}
