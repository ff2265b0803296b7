//! Error types for the explorer engine.
//!
//! - [`PathError`] - invalid path segments and encodings
//! - [`TransportError`] - the request never produced an HTTP response
//! - [`ClientError`] - what listing, mutation and download callers see

use std::fmt;

use thiserror::Error;

use crate::mutation::MutationKind;

/// Rejected path segments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path segment is empty")]
    EmptySegment,
    #[error("path segment '{0}' contains a separator")]
    ContainsSeparator(String),
    #[error("path segment '{0}' is reserved")]
    ReservedSegment(String),
    #[error("invalid percent-encoding in '{0}'")]
    InvalidEncoding(String),
}

/// Network-level failures reported by a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, connection reset, ...)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Response object had an unexpected shape
    #[error("Invalid response content")]
    InvalidContent,
}

/// Status and body of a failed backend call.
///
/// `status` is `None` when the request never got an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub status: Option<u16>,
    pub body: String,
}

impl Failure {
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
        }
    }

    pub fn message(body: impl Into<String>) -> Self {
        Self {
            status: None,
            body: body.into(),
        }
    }
}

impl From<TransportError> for Failure {
    fn from(err: TransportError) -> Self {
        Self::message(err.to_string())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.body.is_empty()) {
            (Some(status), true) => write!(f, "HTTP {}", status),
            (Some(status), false) => write!(f, "HTTP {}: {}", status, self.body),
            (None, _) => write!(f, "{}", self.body),
        }
    }
}

/// Failures surfaced by the explorer engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Listing endpoint answered non-2xx or with an unparsable body.
    #[error("Listing failed: {0}")]
    ListingFailed(Failure),
    /// A mutation endpoint answered non-2xx.
    #[error("Could not {operation}: {failure}")]
    MutationFailed {
        operation: MutationKind,
        failure: Failure,
    },
    /// Download endpoint answered non-2xx.
    #[error("Download failed: {0}")]
    DownloadFailed(Failure),
    /// A required name was declined or left empty; never reaches the network.
    #[error("{0}")]
    ValidationRejected(String),
}

impl ClientError {
    /// Whether the failure should raise the error indicator.
    ///
    /// Declined prompts are handled by the UI and stay silent.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, Self::ValidationRejected(_))
    }
}

impl From<PathError> for ClientError {
    fn from(err: PathError) -> Self {
        Self::ValidationRejected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display() {
        assert_eq!(Failure::http(404, "").to_string(), "HTTP 404");
        assert_eq!(
            Failure::http(500, "disk full").to_string(),
            "HTTP 500: disk full"
        );
        assert_eq!(
            Failure::from(TransportError::NoWindow).to_string(),
            "Browser window not available"
        );
    }

    #[test]
    fn test_mutation_failed_message() {
        let err = ClientError::MutationFailed {
            operation: MutationKind::CreateDirectory,
            failure: Failure::http(409, "exists"),
        };
        assert_eq!(err.to_string(), "Could not create directory: HTTP 409: exists");
    }

    #[test]
    fn test_validation_rejected_is_silent() {
        assert!(!ClientError::from(PathError::EmptySegment).is_reportable());
        assert!(ClientError::ListingFailed(Failure::http(500, "")).is_reportable());
    }
}
