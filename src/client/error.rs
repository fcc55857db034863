//! Client Error Types

use thiserror::Error;

use crate::session::SessionError;

/// Errors that can occur when talking to the friendlog backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// No stored session; the user has to log in first
    #[error("Not logged in")]
    LoginRequired,

    /// The backend rejected the stored token. The session has been cleared.
    #[error("Session expired or invalid: {0}")]
    SessionExpired(String),

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Unavailable
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Request(e)
        }
    }
}

impl ClientError {
    /// Whether the caller should send the user back to the login screen
    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            ClientError::LoginRequired | ClientError::SessionExpired(_)
        )
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_login() {
        assert!(ClientError::LoginRequired.needs_login());
        assert!(ClientError::SessionExpired("x".to_string()).needs_login());
        assert!(!ClientError::NotFound("friend".to_string()).needs_login());
        assert!(!ClientError::Api {
            status: 500,
            message: "boom".to_string()
        }
        .needs_login());
    }

    #[test]
    fn test_display() {
        let err = ClientError::Api {
            status: 422,
            message: "bad body".to_string(),
        };
        assert_eq!(err.to_string(), "API error 422: bad body");
        assert_eq!(ClientError::LoginRequired.to_string(), "Not logged in");
    }
}
