//! Error types for the HolyBeats API client.

use holybeats_core::HolyBeatsError;
use thiserror::Error;

/// Errors that can occur when talking to the HolyBeats API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Endpoint requires a valid bearer token
    #[error("Authentication required")]
    AuthRequired,

    /// Authentication failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Durable token storage failed
    #[error("Token store error: {0}")]
    TokenStore(String),

    /// IO error in the token store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Classify a transport failure.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }

    /// Turn a non-success response into an error.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            return Self::AuthRequired;
        }
        let message = response.text().await.unwrap_or_default();
        Self::ServerError { status, message }
    }
}

impl From<ClientError> for HolyBeatsError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::AuthRequired => HolyBeatsError::Unauthorized,
            ClientError::AuthFailed(msg) => HolyBeatsError::AuthFailed(msg),
            ClientError::ServerError { status, message } => {
                HolyBeatsError::Server { status, message }
            }
            ClientError::ParseError(msg) => HolyBeatsError::Parse(msg),
            ClientError::ServerUnreachable(msg) => HolyBeatsError::Network(msg),
            ClientError::Request(e) => HolyBeatsError::Network(e.to_string()),
            ClientError::InvalidUrl(msg) => HolyBeatsError::validation(msg),
            ClientError::TokenStore(msg) => HolyBeatsError::Storage(msg),
            ClientError::Io(e) => HolyBeatsError::Storage(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_required_maps_to_unauthorized() {
        let err: HolyBeatsError = ClientError::AuthRequired.into();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn server_error_keeps_status() {
        let err: HolyBeatsError = ClientError::ServerError {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert!(matches!(err, HolyBeatsError::Server { status: 500, .. }));
    }
}
