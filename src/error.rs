//! Error types for amf-typeloader.
//!
//! Only resource conversion (`handle_resource`, `resource_parser`) and
//! configuration loading fail. Type lookups never do: a miss falls back to
//! name transliteration and finally to the placeholder type.

use thiserror::Error;

/// Boxed error returned by collaborators (loaders, parser factories and parsers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Distinguishes the two failure classes without inspecting the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid setup (no resource loader bound, bad config).
    Configuration,
    /// A resource could not be turned into a serializable value.
    Conversion,
}

/// Main error type for all type loader operations.
#[derive(Debug, Error)]
pub enum TypeLoaderError {
    /// Setup error, never retried.
    #[error("{message}")]
    Configuration {
        /// Human readable message.
        message: String,
        /// Numeric code carried over from a reclassified error.
        code: i32,
        /// Original error, if this one wraps another.
        #[source]
        source: Option<BoxError>,
    },

    /// Resource conversion failed.
    #[error("{message}")]
    Conversion {
        /// Runtime type of the resource being processed at failure time.
        resource_type: String,
        /// Human readable message.
        message: String,
        /// Original error, if this one wraps another.
        #[source]
        source: Option<BoxError>,
    },
}

impl TypeLoaderError {
    /// Create a configuration error with code 0 and no cause.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            code: 0,
            source: None,
        }
    }

    /// Create a conversion error for `resource_type` with no cause.
    pub fn conversion(resource_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conversion {
            resource_type: resource_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Error raised when a resource must be converted but no loader is bound.
    pub fn loader_not_set() -> Self {
        Self::configuration("Unable to handle resources - resource plugin loader not set")
    }

    /// Error raised when no handler exists for a resource type.
    pub fn unsupported_resource(resource_type: &str) -> Self {
        Self::conversion(
            resource_type,
            format!("Can not serialize resource type: {resource_type}"),
        )
    }

    /// Attach a numeric code. Only configuration errors carry one.
    pub fn with_code(mut self, new_code: i32) -> Self {
        if let Self::Configuration { code, .. } = &mut self {
            *code = new_code;
        }
        self
    }

    /// Reclassify an error returned by a collaborator while converting a
    /// resource of type `resource_type`.
    ///
    /// Errors of this type become configuration errors keeping message and
    /// code. Anything else becomes a conversion error naming the resource type.
    /// The original error is kept as the cause in both cases.
    pub fn reclassify(err: BoxError, resource_type: &str) -> Self {
        match err.downcast::<TypeLoaderError>() {
            Ok(own) => Self::Configuration {
                message: own.to_string(),
                code: own.code(),
                source: Some(own),
            },
            Err(other) => Self::Conversion {
                resource_type: resource_type.to_string(),
                message: format!("Can not serialize resource type: {resource_type}"),
                source: Some(other),
            },
        }
    }

    /// Failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Conversion { .. } => ErrorKind::Conversion,
        }
    }

    /// Numeric code (always 0 for conversion errors).
    pub fn code(&self) -> i32 {
        match self {
            Self::Configuration { code, .. } => *code,
            Self::Conversion { .. } => 0,
        }
    }

    /// Resource type named by a conversion error.
    pub fn resource_type(&self) -> Option<&str> {
        match self {
            Self::Conversion { resource_type, .. } => Some(resource_type),
            Self::Configuration { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TypeLoaderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid loader configuration: {err}"),
            code: 0,
            source: Some(Box::new(err)),
        }
    }
}

/// Result type alias using TypeLoaderError.
pub type Result<T> = std::result::Result<T, TypeLoaderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, Error)]
    #[error("disk on fire")]
    struct Foreign;

    #[test]
    fn test_loader_not_set_is_configuration() {
        let err = TypeLoaderError::loader_not_set();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.code(), 0);
        assert!(err.source().is_none());
    }

    #[test]
    fn test_unsupported_resource_message() {
        let err = TypeLoaderError::unsupported_resource("gd image");
        assert_eq!(err.kind(), ErrorKind::Conversion);
        assert_eq!(err.resource_type(), Some("gd image"));
        assert_eq!(err.to_string(), "Can not serialize resource type: gd image");
    }

    #[test]
    fn test_reclassify_own_error_keeps_message_and_code() {
        let inner = TypeLoaderError::configuration("parser misconfigured").with_code(42);
        let err = TypeLoaderError::reclassify(Box::new(inner), "stream");

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.code(), 42);
        assert_eq!(err.to_string(), "parser misconfigured");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_reclassify_own_conversion_becomes_configuration() {
        let inner = TypeLoaderError::conversion("stream", "nested failure");
        let err = TypeLoaderError::reclassify(Box::new(inner), "stream");

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "nested failure");
    }

    #[test]
    fn test_reclassify_foreign_error_becomes_conversion() {
        let err = TypeLoaderError::reclassify(Box::new(Foreign), "stream");

        assert_eq!(err.kind(), ErrorKind::Conversion);
        assert_eq!(err.resource_type(), Some("stream"));
        assert_eq!(err.to_string(), "Can not serialize resource type: stream");
        assert_eq!(err.source().unwrap().to_string(), "disk on fire");
    }

    #[test]
    fn test_with_code_ignored_for_conversion() {
        let err = TypeLoaderError::conversion("stream", "x").with_code(7);
        assert_eq!(err.code(), 0);
    }
}
