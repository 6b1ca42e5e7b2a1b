//! Error types for the luci-rpc crate.

use reqwest::StatusCode;

/// Errors returned by [`crate::Client`].
///
/// Transport failures (`Http`, `UnexpectedStatus`, `Url`) and protocol
/// failures (`Decode`, `InvalidResponse`) abort the call. The remaining
/// variants carry what the device reported.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request URL is stripped so the session token never reaches logs.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("expected 200 response, got {status}")]
    UnexpectedStatus { status: StatusCode },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("unable to login: {0}")]
    Login(String),

    #[error("RPC error in {method}: {message}")]
    Rpc { method: String, message: String },

    #[error("incorrect config {config:?} and/or section {section:?}")]
    SectionNotFound { config: String, section: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl ClientError {
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    pub fn rpc(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rpc {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Whether the device reported that the config or section does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SectionNotFound { .. })
    }

    /// Whether the HTTP request hit the configured timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
