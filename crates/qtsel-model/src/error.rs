//! Error types for parsing installer coordinates.

use thiserror::Error;

/// Errors raised when parsing hosts, targets and versions from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// The version string is not `major.minor[.patch]`.
    #[error("invalid Qt version: {0}")]
    InvalidVersion(String),

    /// The host name is not one of the supported installer hosts.
    #[error("unknown host: {0}")]
    UnknownHost(String),

    /// The target name is not one of the supported deployment targets.
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// The target exists but is not offered for the given host.
    #[error("target {target} is not available on host {host}")]
    IllegalTarget {
        /// Host the target was requested for.
        host: String,
        /// Requested target.
        target: String,
    },
}

impl ModelError {
    /// Returns a short message suitable for showing next to an input field.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidVersion(_) => "Versions look like 6.2.0.",
            Self::UnknownHost(_) => "Hosts are windows, windows_arm64, mac, linux and linux_arm64.",
            Self::UnknownTarget(_) => "Targets are desktop, android, ios and winrt.",
            Self::IllegalTarget { .. } => "That target cannot be installed on this host.",
        }
    }
}

/// Result type alias for model parsing.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::InvalidVersion("six".to_string());
        assert_eq!(err.to_string(), "invalid Qt version: six");

        let err = ModelError::IllegalTarget {
            host: "linux".to_string(),
            target: "ios".to_string(),
        };
        assert_eq!(err.to_string(), "target ios is not available on host linux");
    }

    #[test]
    fn test_user_message() {
        let err = ModelError::UnknownHost("beos".to_string());
        assert!(err.user_message().contains("linux"));
    }
}
