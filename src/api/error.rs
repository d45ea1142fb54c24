//! Error type for the recruiting API client.
//!
//! Every failure at the HTTP boundary is normalised into [`ApiError`], whose
//! `Display` output is the human-readable message shown to the user.

use thiserror::Error;

/// Errors raised while talking to the recruiting API.
///
/// - [`Status`](ApiError::Status): the server answered with a non-2xx code
/// - [`Network`](ApiError::Network): the request never got a response
/// - [`Decode`](ApiError::Decode): a 2xx response whose body did not parse
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. `message` comes from the body's `message` field, or
    /// is derived from the status code when the body has none.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Transport failure (DNS, connection refused, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds a [`Status`](ApiError::Status) error, falling back to a generic
    /// message when the server supplied none.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));
        ApiError::Status { status, message }
    }

    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(err) => err.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_is_server_message() {
        let err = ApiError::from_status(400, Some("Unsupported document".into()));
        assert_eq!(err.to_string(), "Unsupported document");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn status_without_message_falls_back() {
        let err = ApiError::from_status(502, None);
        assert_eq!(err.to_string(), "HTTP error! status: 502");

        let err = ApiError::from_status(500, Some("  ".into()));
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn decode_display() {
        let err = ApiError::Decode("missing field `analytics`".into());
        assert_eq!(
            err.to_string(),
            "unexpected response from server: missing field `analytics`"
        );
        assert_eq!(err.status(), None);
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
