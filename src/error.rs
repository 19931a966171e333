//! Error types for ChaosChat
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for ChaosChat operations
///
/// This enum encompasses all possible errors that can occur while talking
/// to the chat-demo backend, managing local session state, and driving the
/// chaos control panel.
#[derive(Error, Debug)]
pub enum ChaosChatError {
    /// Client-detected bad input; never reaches the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// Forwarding boundary unreachable / network failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend reached but returned a non-2xx status
    ///
    /// Carries the upstream status and raw body for diagnostics.
    #[error("Backend error: status={status}, body={body}")]
    Backend {
        /// Upstream HTTP status code
        status: u16,
        /// Raw upstream response body
        body: String,
    },

    /// Operation referenced a session or message id no longer present
    #[error("Not found: {0}")]
    NotFound(String),

    /// A chat submission was attempted while another is in flight
    #[error("Busy: {0}")]
    Busy(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ChaosChatError {
    /// Returns true if this error came from the backend with a 404 status
    pub fn is_backend_not_found(&self) -> bool {
        matches!(self, Self::Backend { status: 404, .. })
    }
}

/// Result type alias for ChaosChat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let error = ChaosChatError::Validation("prompt is empty".to_string());
        assert_eq!(error.to_string(), "Validation error: prompt is empty");
    }

    #[test]
    fn test_transport_error_display() {
        let error = ChaosChatError::Transport("connection refused".to_string());
        assert_eq!(error.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_backend_error_display() {
        let error = ChaosChatError::Backend {
            status: 502,
            body: "upstream unavailable".to_string(),
        };
        let s = error.to_string();
        assert!(s.contains("status=502"));
        assert!(s.contains("upstream unavailable"));
    }

    #[test]
    fn test_not_found_error_display() {
        let error = ChaosChatError::NotFound("session abc".to_string());
        assert_eq!(error.to_string(), "Not found: session abc");
    }

    #[test]
    fn test_busy_error_display() {
        let error = ChaosChatError::Busy("submission in flight".to_string());
        assert_eq!(error.to_string(), "Busy: submission in flight");
    }

    #[test]
    fn test_config_error_display() {
        let error = ChaosChatError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_is_backend_not_found() {
        let not_found = ChaosChatError::Backend {
            status: 404,
            body: "no such session".to_string(),
        };
        assert!(not_found.is_backend_not_found());

        let server_error = ChaosChatError::Backend {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(!server_error.is_backend_not_found());

        let transport = ChaosChatError::Transport("down".to_string());
        assert!(!transport.is_backend_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: ChaosChatError = io_error.into();
        assert!(matches!(error, ChaosChatError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: ChaosChatError = json_error.into();
        assert!(matches!(error, ChaosChatError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: ChaosChatError = yaml_error.into();
        assert!(matches!(error, ChaosChatError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChaosChatError>();
    }
}
