//! Errors reported by metadata sources.

use std::io;

use thiserror::Error;

/// A failure to retrieve or read a metadata document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The document does not exist at the requested location.
    #[error("metadata not found: {location}")]
    NotFound {
        /// Location that was requested.
        location: String,
    },

    /// Reading the document failed.
    #[error("failed to read {location}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON.
    #[error("failed to parse {location}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// The requested combination of coordinates is never published.
    #[error("unsupported coordinates: {0}")]
    Unsupported(String),
}

impl FetchError {
    /// Build an error from an I/O failure, mapping missing files to [`FetchError::NotFound`].
    #[must_use]
    pub fn from_io(location: impl Into<String>, source: io::Error) -> Self {
        let location = location.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { location }
        } else {
            Self::Io { location, source }
        }
    }

    /// Whether the document is simply absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns a user-friendly message suitable for a retry prompt.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::NotFound { .. } => "That combination is not published upstream.",
            Self::Io { .. } => "Could not load installer metadata. Please retry.",
            Self::Parse { .. } => "Installer metadata is corrupt. Please refresh the cache.",
            Self::Unsupported(_) => "That combination is not supported.",
        }
    }

    /// Returns whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Result type alias for metadata fetches.
pub type Result<T> = std::result::Result<T, FetchError>;
