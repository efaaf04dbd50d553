use thiserror::Error;

use cookbook_core::{ValidationError, ViewError};

/// Error type for calls to the recipe service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<ValidationError> for RemoteError {
    fn from(e: ValidationError) -> Self {
        RemoteError::Malformed(e.to_string())
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(e: serde_json::Error) -> Self {
        RemoteError::Malformed(e.to_string())
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        RemoteError::Transport(e.to_string())
    }
}

impl From<RemoteError> for ViewError {
    fn from(e: RemoteError) -> Self {
        match e {
            RemoteError::Transport(msg) => ViewError::Transport(msg),
            RemoteError::Status(code) => ViewError::Transport(format!("HTTP error: {}", code)),
            RemoteError::Malformed(msg) => ViewError::MalformedResponse(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_transport() {
        let e: ViewError = RemoteError::Status(503).into();
        assert_eq!(e, ViewError::Transport("HTTP error: 503".to_string()));
    }

    #[test]
    fn test_validation_maps_to_malformed() {
        let e: RemoteError = ValidationError::EmptyId.into();
        let e: ViewError = e.into();
        assert!(matches!(e, ViewError::MalformedResponse(_)));
    }
}
