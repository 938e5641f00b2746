//! NS API client error types.

/// Errors from the NS HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum NsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status. The body is kept verbatim so it
    /// can be forwarded to the caller.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Client could not be constructed from its configuration
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl NsError {
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        NsError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = NsError::Api {
            status: 401,
            body: r#"{"message":"Access denied"}"#.into(),
        };
        assert_eq!(
            err.to_string(),
            r#"API error 401: {"message":"Access denied"}"#
        );

        let err = NsError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");

        let err = NsError::Config("Invalid API key format".into());
        assert!(err.to_string().contains("Invalid API key format"));
    }

    #[test]
    fn json_error_truncates_body() {
        let body = "x".repeat(2000);
        let parse_err = serde_json::from_str::<serde_json::Value>(&body).unwrap_err();
        match NsError::json(parse_err, &body) {
            NsError::Json { body: Some(kept), .. } => assert_eq!(kept.len(), 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
