use thiserror::Error;

/// Failures surfaced by a [`FacilityApi`](crate::api::FacilityApi).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response from server: {0}")]
    Malformed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Map an HTTP status and optional server message onto the taxonomy.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Status { status, message },
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ApiError::Malformed(_))
    }

    /// The text shown after `"Error: "` in comment notices.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::NotFound(message)
            | ApiError::Rejected(message)
            | ApiError::Status { message, .. }
                if !message.is_empty() =>
            {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Failures from the platform location capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    #[error("location sensing is not supported")]
    Unsupported,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    Unavailable(String),

    #[error("location request timed out")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_taxonomy() {
        assert_eq!(
            ApiError::from_status(401, "login"),
            ApiError::Unauthorized("login".into())
        );
        assert_eq!(
            ApiError::from_status(403, "nope"),
            ApiError::Forbidden("nope".into())
        );
        assert_eq!(
            ApiError::from_status(404, "gone"),
            ApiError::NotFound("gone".into())
        );
        assert!(matches!(
            ApiError::from_status(500, "boom"),
            ApiError::Status { status: 500, .. }
        ));
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Forbidden(
            "You can only edit your own status updates".into(),
        );
        assert_eq!(
            err.user_message(),
            "You can only edit your own status updates"
        );

        let empty = ApiError::NotFound(String::new());
        assert_eq!(empty.user_message(), "Not found: ");

        let transport = ApiError::Transport("connection refused".into());
        assert_eq!(
            transport.user_message(),
            "Transport failure: connection refused"
        );
    }
}
