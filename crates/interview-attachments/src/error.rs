//! Error types for attachment store operations.

/// Result type alias for attachment store operations.
pub type Result<T> = std::result::Result<T, AttachmentError>;

/// Errors that can occur while talking to the attachment store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentError {
    /// The store could not be reached or rejected the request
    /// (transport, credentials, permissions).
    #[error("Attachment store unavailable: {message}")]
    Unavailable { message: String },

    /// The URL was not issued by this store, so no key can be derived from it.
    #[error("URL does not belong to this attachment store: {url}")]
    ForeignUrl { url: String },

    /// The store is misconfigured.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AttachmentError {
    /// Create a new unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a new foreign URL error.
    pub fn foreign_url(url: impl Into<String>) -> Self {
        Self::ForeignUrl { url: url.into() }
    }

    /// Create a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error came from the remote store rather than the caller.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_error() {
        let error = AttachmentError::unavailable("connection refused");
        assert!(error.is_unavailable());
        assert_eq!(
            error.to_string(),
            "Attachment store unavailable: connection refused"
        );
    }

    #[test]
    fn test_foreign_url_error() {
        let error = AttachmentError::foreign_url("https://elsewhere.example/x.png");
        assert!(!error.is_unavailable());
        assert_eq!(
            error.to_string(),
            "URL does not belong to this attachment store: https://elsewhere.example/x.png"
        );
    }

    #[test]
    fn test_configuration_error() {
        let error = AttachmentError::configuration("bucket is required");
        assert!(matches!(error, AttachmentError::Configuration { .. }));
    }
}
