use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - token may be expired")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Maximum length for error response bodies in log lines
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// The server's own explanation: `message`, then `error`, from a JSON body
    pub fn server_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        ["message", "error"].iter().find_map(|key| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = Self::server_message(body)
            .unwrap_or_else(|| format!("Error: {}", status.as_u16()));
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(message),
            404 => ApiError::NotFound(message),
            500..=599 => ApiError::Server(message),
            code => ApiError::Rejected {
                status: code,
                message,
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Text for an error toast
    pub fn user_message(&self) -> String {
        match self {
            ApiError::AccessDenied(message)
            | ApiError::NotFound(message)
            | ApiError::Server(message)
            | ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Unauthorized => "Session expired. Please log in again.".to_string(),
            ApiError::Network(e) if e.is_timeout() => {
                "Connection timed out. Please try again.".to_string()
            }
            ApiError::Network(_) => {
                "Unable to connect to server. Check your internet connection.".to_string()
            }
            ApiError::InvalidResponse(_) => "Unexpected response from server".to_string(),
            ApiError::InvalidRequest(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_401_is_unauthorized() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"message":"jwt expired"}"#);
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_from_status_prefers_message_then_error() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Email already exists","error":"dup"}"#,
        );
        assert_eq!(err.user_message(), "Email already exists");

        let err = ApiError::from_status(StatusCode::CONFLICT, r#"{"error":"Duplicate"}"#);
        assert_eq!(err.user_message(), "Duplicate");
    }

    #[test]
    fn test_from_status_falls_back_to_status_code() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(matches!(err, ApiError::Server(_)));
        assert_eq!(err.user_message(), "Error: 502");

        let err = ApiError::from_status(StatusCode::NOT_FOUND, r#"{"message":""}"#);
        assert_eq!(err.user_message(), "Error: 404");
    }

    #[test]
    fn test_from_status_rejected_keeps_code() {
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "{}");
        assert!(matches!(err, ApiError::Rejected { status: 422, .. }));
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(MAX_ERROR_BODY_LENGTH + 10);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.ends_with("(truncated, 510 total bytes)"));
        assert_eq!(ApiError::truncate_body("short"), "short");
    }
}
