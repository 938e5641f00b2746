//! Handler error taxonomy and its mapping onto responses.

use serde_json::{Value, json};

use crate::cache::ResolveError;
use crate::ns::NsError;

use super::gateway::HandlerResponse;

/// Message returned when a handler finds no trips.
pub const NO_DATA_AVAILABLE: &str = "No data available";

/// Errors a request handler can end in.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Required input absent or incomplete. Carries the message to report.
    #[error("{0}")]
    MissingParameters(&'static str),

    /// Upstream answered with a non-success status; forwarded as-is.
    #[error("upstream returned status {status}")]
    Upstream { status: u16, body: String },

    /// Upstream succeeded but returned no trips.
    #[error("No data available")]
    NoDataAvailable,

    /// Anything else: transport, decoding, store failures.
    #[error(transparent)]
    Unexpected(Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::MissingParameters(_) | HandlerError::Unexpected(_) => 500,
            HandlerError::Upstream { status, .. } => *status,
            HandlerError::NoDataAvailable => 404,
        }
    }

    /// Whether this is an internal failure rather than an upstream outcome.
    pub fn is_internal(&self) -> bool {
        self.status_code() == 500 && !matches!(self, HandlerError::Upstream { .. })
    }

    /// Error messages from this error down through its sources.
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            messages.push(err.to_string());
            source = err.source();
        }
        messages
    }

    /// Render as a response.
    ///
    /// Upstream bodies are forwarded unchanged when they are JSON and wrapped
    /// as `{"error": <text>}` otherwise.
    pub fn to_response(&self) -> HandlerResponse {
        let body = match self {
            HandlerError::Upstream { body, .. } => serde_json::from_str::<Value>(body)
                .unwrap_or_else(|_| json!({ "error": body })),
            HandlerError::NoDataAvailable => json!({ "error": NO_DATA_AVAILABLE }),
            other => json!({ "error": other.to_string() }),
        };
        HandlerResponse::new(self.status_code(), body)
    }
}

impl From<NsError> for HandlerError {
    fn from(err: NsError) -> Self {
        match err {
            NsError::Api { status, body } => HandlerError::Upstream { status, body },
            other => HandlerError::Unexpected(Box::new(other)),
        }
    }
}

impl From<ResolveError> for HandlerError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Fetch(e) => e.into(),
            ResolveError::Store(e) => HandlerError::Unexpected(Box::new(e)),
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::Unexpected(Box::new(err))
    }
}
