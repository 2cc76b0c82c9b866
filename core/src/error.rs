//! Error types for the movie API client.
//!
//! # Design
//! `NotFound` is its own variant because the detail view renders a dedicated
//! state for it. Other non-2xx responses land in `Http` together with the
//! message the server put in its JSON error body, if any. A 2xx body that does
//! not match the typed contract is `MalformedResponse`, never an empty list.

use thiserror::Error;

use crate::http::HttpResponse;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {}", detail(.message, .body))]
    Http {
        status: u16,
        message: Option<String>,
        body: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response (DNS, connect, reset, ...).
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ApiError {
    /// Build an error from a non-success response.
    pub fn from_response(response: &HttpResponse) -> Self {
        if response.status == 404 {
            return ApiError::NotFound;
        }
        ApiError::Http {
            status: response.status,
            message: server_message(&response.body),
            body: response.body.clone(),
        }
    }

    /// Text for a blocking alert: the server's own message when it sent one,
    /// `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Alert text for a failed mutation: `rejected` (or the server's own
    /// message) when the server answered, `unreachable` when it never did.
    pub fn alert_message(&self, rejected: &str, unreachable: &str) -> String {
        match self {
            ApiError::Transport(_) => unreachable.to_string(),
            _ => self.user_message(rejected),
        }
    }
}

fn detail<'a>(message: &'a Option<String>, body: &'a str) -> &'a str {
    message.as_deref().unwrap_or(body)
}

/// Pull `message` (or `error`) out of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key)?.as_str())
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_has_dedicated_variant() {
        let err = ApiError::from_response(&HttpResponse::new(404, r#"{"message":"gone"}"#));
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn server_message_is_extracted() {
        let err = ApiError::from_response(&HttpResponse::new(400, r#"{"message":"Title taken"}"#));
        assert!(matches!(err, ApiError::Http { status: 400, .. }));
        assert_eq!(err.user_message("Failed to delete movie"), "Title taken");
        assert_eq!(err.to_string(), "HTTP 400: Title taken");
    }

    #[test]
    fn error_field_is_accepted_too() {
        let err = ApiError::from_response(&HttpResponse::new(500, r#"{"error":"db down"}"#));
        assert_eq!(err.user_message("x"), "db down");
    }

    #[test]
    fn fallback_when_body_is_not_json() {
        let err = ApiError::from_response(&HttpResponse::new(502, "Bad Gateway"));
        assert_eq!(err.user_message("Something went wrong"), "Something went wrong");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn alert_separates_rejection_from_unreachable_server() {
        let rejected = ApiError::from_response(&HttpResponse::new(500, ""));
        let unreachable = ApiError::Transport("connection refused".into());
        assert_eq!(rejected.alert_message("Failed", "Try again"), "Failed");
        assert_eq!(unreachable.alert_message("Failed", "Try again"), "Try again");
        assert_eq!(ApiError::NotFound.alert_message("Failed", "Try again"), "Failed");
    }

    #[test]
    fn transport_uses_fallback() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.user_message("Please try again."), "Please try again.");
    }
}
