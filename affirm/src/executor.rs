//! The request pipeline shared by every API operation.

use std::fmt;
use std::sync::Arc;

use http::Method;
use serde_json::Value;
#[cfg(feature = "telemetry")]
use tracing::{debug, instrument};
use url::Url;

use crate::error::{AffirmError, ResponseError};
use crate::shape::OptionalData;
use crate::transport::{BasicAuth, HttpRequest, HttpTransport};

/// Sends authenticated requests and decodes their JSON responses.
#[derive(Clone)]
pub struct RequestExecutor {
    auth: BasicAuth,
    transport: Arc<dyn HttpTransport>,
}

impl RequestExecutor {
    /// Creates an executor that signs every request with `auth`.
    pub fn new(auth: BasicAuth, transport: Arc<dyn HttpTransport>) -> Self {
        Self { auth, transport }
    }

    /// Returns the credentials attached to every request.
    #[must_use]
    pub const fn auth(&self) -> &BasicAuth {
        &self.auth
    }

    /// Performs one request and returns the decoded response.
    ///
    /// `body` is sent as JSON unless it is empty, in which case the request
    /// has no body. Any query string must already be part of `url`.
    ///
    /// # Errors
    ///
    /// - [`AffirmError::Transport`] if no response was received.
    /// - [`ResponseError::Status`] on a 4xx or 5xx status.
    /// - [`ResponseError::Decode`] if the body is not valid JSON.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "affirm.execute", skip_all, fields(method = %method, url = %url), err)
    )]
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        body: OptionalData,
    ) -> Result<Value, AffirmError> {
        let request = HttpRequest {
            method: method.clone(),
            url: url.clone(),
            auth: self.auth.clone(),
            body: (!body.is_empty()).then_some(Value::Object(body)),
        };

        #[cfg(feature = "telemetry")]
        debug!(has_body = request.body.is_some(), "sending request");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(AffirmError::Transport)?;

        #[cfg(feature = "telemetry")]
        debug!(status = %response.status, "received response");

        let status = response.status;
        if status.is_client_error() || status.is_server_error() {
            return Err(ResponseError::Status {
                method,
                url: url.into(),
                status,
                body: response.body,
            }
            .into());
        }

        match serde_json::from_str(&response.body) {
            Ok(value) => Ok(value),
            Err(source) => Err(ResponseError::Decode {
                body: response.body,
                source,
            }
            .into()),
        }
    }
}

impl fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}
