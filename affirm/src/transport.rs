//! The HTTP transport used to reach the Affirm API.
//!
//! [`HttpTransport`] is the only collaborator a client lets callers inject.
//! It sends one fully-built [`HttpRequest`] and hands back the status and body
//! text, nothing more. Timeouts, retries, proxies and connection pooling are
//! all properties of the transport, so they are configured on it rather than
//! on the client:
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use affirm::{ClientConfig, TransactionClient};
//!
//! let http = reqwest::Client::builder()
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .expect("failed to build reqwest::Client");
//! let config = ClientConfig::new("public-key", "private-key", false);
//! let transactions = TransactionClient::with_transport(&config, http);
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http::{Method, StatusCode};
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;
use url::Url;

/// A boxed, `Send` future returned by [`HttpTransport::send`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error produced by a transport, passed through to callers unchanged.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP Basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    /// Creates credentials from a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username (the public API key).
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password (the private API key).
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A single request, ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method.
    pub method: Method,
    /// Absolute URL, query string included.
    pub url: Url,
    /// Credentials to send as an `Authorization: Basic` header.
    pub auth: BasicAuth,
    /// JSON payload. `None` means the request carries no body.
    pub body: Option<Value>,
}

/// What a transport reports back for a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Response status.
    pub status: StatusCode,
    /// Full response body as text.
    pub body: String,
}

/// Sends requests to the Affirm API.
///
/// A transport must not treat error statuses as failures: a 4xx or 5xx
/// response is returned as an [`HttpResponse`] and turned into a
/// [`ResponseError`](crate::ResponseError) by the executor. `Err` is reserved
/// for failures where no response was received.
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns the response status and body.
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        (**self).send(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        (**self).send(request)
    }
}

async fn read_response(response: reqwest::Response) -> Result<HttpResponse, TransportError> {
    let status = response.status();
    let body = response.text().await?;
    Ok(HttpResponse { status, body })
}

impl HttpTransport for reqwest::Client {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let mut builder = self
                .request(request.method, request.url)
                .basic_auth(request.auth.username(), Some(request.auth.password()))
                .header(ACCEPT, HeaderValue::from_static("application/json"));
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
            let response = builder.send().await?;
            read_response(response).await
        })
    }
}

#[cfg(feature = "middleware")]
impl HttpTransport for reqwest_middleware::ClientWithMiddleware {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let mut builder = self
                .request(request.method, request.url)
                .basic_auth(request.auth.username(), Some(request.auth.password()))
                .header(ACCEPT, HeaderValue::from_static("application/json"));
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
            let response = builder.send().await?;
            read_response(response).await
        })
    }
}
