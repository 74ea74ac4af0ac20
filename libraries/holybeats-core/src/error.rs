/// Core error types for HolyBeats
use thiserror::Error;

/// Result type alias using `HolyBeatsError`
pub type Result<T> = std::result::Result<T, HolyBeatsError>;

/// Core error type for HolyBeats
///
/// Every failure is scoped to the single action that triggered it; none of
/// these are fatal to the application.
#[derive(Error, Debug)]
pub enum HolyBeatsError {
    /// Missing or rejected credential
    #[error("Authorization required")]
    Unauthorized,

    /// Login rejected by the server
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Rejected locally before any network call
    #[error("{0}")]
    Validation(String),

    /// Entity no longer exists server-side
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Server unreachable or request could not be sent
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response from the server
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Durable client storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl HolyBeatsError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether the failure should be answered with a login prompt
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Whether the failure means the target is already gone
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || matches!(self, Self::Server { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_covers_plain_404() {
        let err = HolyBeatsError::Server {
            status: 404,
            message: String::new(),
        };
        assert!(err.is_not_found());
        assert!(HolyBeatsError::not_found("Playlist", "3").is_not_found());
        assert!(!HolyBeatsError::Unauthorized.is_not_found());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            HolyBeatsError::not_found("Track", "9").to_string(),
            "Track not found: 9"
        );
        assert_eq!(
            HolyBeatsError::validation("Playlist name cannot be empty").to_string(),
            "Playlist name cannot be empty"
        );
    }
}
