//! Error types for the Affirm client.
//!
//! Failures fall into two tiers that callers usually handle differently:
//!
//! - [`ShapeError`] - the caller passed a configuration or parameter of the
//!   wrong kind. Raised before any network I/O; never worth retrying.
//! - [`ResponseError`] - the server answered with an error status or with a
//!   body that is not JSON.
//!
//! Failures of the transport itself (DNS, TLS, timeouts) are passed through
//! untouched in [`AffirmError::Transport`].

use http::{Method, StatusCode};

use crate::shape::Kind;
use crate::transport::TransportError;

/// Error returned by every API operation.
#[derive(Debug, thiserror::Error)]
pub enum AffirmError {
    /// A configuration value or optional parameter had the wrong shape.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The server returned an error status or an undecodable body.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// The underlying HTTP transport failed.
    #[error("transport error")]
    Transport(#[source] TransportError),
}

impl AffirmError {
    /// Returns the HTTP status of a [`ResponseError::Status`] failure.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Response(err) => err.status(),
            _ => None,
        }
    }
}

/// A value did not match its declared shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// A configuration value was not a mapping.
    #[error("expected a mapping, got {actual}")]
    NotAMapping {
        /// Kind of the value that was supplied.
        actual: &'static str,
    },

    /// A required key was absent.
    #[error("missing required key `{key}`")]
    MissingKey {
        /// The missing key.
        key: String,
    },

    /// A key was present with a value of the wrong kind.
    #[error("`{key}` must be of type {expected}, got {actual}")]
    KindMismatch {
        /// The offending key.
        key: String,
        /// The declared kind.
        expected: Kind,
        /// Kind of the value that was supplied.
        actual: &'static str,
    },

    /// A resource id would not address a single path segment, e.g. `""` or
    /// `".."`.
    #[error("`{id}` is not a valid resource id")]
    InvalidId {
        /// The rejected id.
        id: String,
    },
}

/// The server rejected a request or answered with something other than JSON.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// The server answered with a 4xx or 5xx status.
    #[error("`{method} {url}` resulted in a `{status}` response: {body}")]
    Status {
        /// Method of the failed request.
        method: Method,
        /// URL of the failed request.
        url: String,
        /// Status returned by the server.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// The response body could not be decoded as JSON.
    #[error("unable to decode JSON response ({source}): {body}")]
    Decode {
        /// Raw response body.
        body: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

impl ResponseError {
    /// Returns the HTTP status for [`ResponseError::Status`].
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Decode { .. } => None,
        }
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Status { body, .. } | Self::Decode { body, .. } => body,
        }
    }

    /// Returns the `message` field of a JSON error body, if the API sent one.
    #[must_use]
    pub fn api_message(&self) -> Option<String> {
        let Self::Status { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value.get("message")?.as_str().map(str::to_owned)
    }
}
