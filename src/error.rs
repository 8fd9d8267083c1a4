use bytes::Bytes;
use http::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure a caller of this crate can observe.
#[derive(Debug, Error)]
pub enum Error {
    /// Token grant could not be obtained or refreshed.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// HTTP exchange with the catalog could not be completed.
    #[error("request failed, no response: {0}")]
    Transport(#[source] reqwest::Error),

    /// Catalog answered with a status other than 200 OK.
    #[error("request failed with status code {}", .status.as_u16())]
    Api { status: StatusCode, body: Bytes },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Caller input rejected before any network call.
    #[error("invalid input: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failure to get token ({}): {body}", .status.as_u16())]
    MissingToken { status: StatusCode, body: String },
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Status code of an `Api` error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body kept for diagnostics, if any.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Error::Api { body, .. } => Some(&body[..]),
            Error::Auth(AuthError::MissingToken { body, .. }) => Some(body.as_bytes()),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Error::Auth(_) => "auth",
            Error::Transport(_) => "transport",
            Error::Api { .. } => "status",
            Error::Decode(_) => "decode",
            Error::Validation(_) => "validation",
        }
    }
}
