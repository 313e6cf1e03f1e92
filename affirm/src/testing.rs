//! Test doubles shared by the unit tests.

use std::sync::{Arc, Mutex};

use http::StatusCode;
use url::Url;

use crate::transport::{BoxFuture, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Records every request and answers with a fixed outcome.
#[derive(Debug)]
pub(crate) struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    outcome: Result<HttpResponse, String>,
}

impl RecordingTransport {
    pub(crate) fn responding(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::default(),
            outcome: Ok(HttpResponse {
                status: StatusCode::from_u16(status).expect("valid status code"),
                body: body.to_owned(),
            }),
        })
    }

    pub(crate) fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::default(),
            outcome: Err(message.to_owned()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests()
            .pop()
            .expect("at least one request was sent")
    }
}

impl HttpTransport for RecordingTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        self.requests.lock().expect("requests lock").push(request);
        let outcome = self.outcome.clone().map_err(TransportError::from);
        Box::pin(async move { outcome })
    }
}

/// Forwards every request to `inner` after pointing it at a local mock
/// server. Path and query are kept.
#[derive(Debug)]
pub(crate) struct MockOrigin<T> {
    inner: T,
    origin: Url,
}

impl<T> MockOrigin<T> {
    pub(crate) fn new(inner: T, origin: &str) -> Self {
        Self {
            inner,
            origin: origin.parse().expect("mock origin is a valid URL"),
        }
    }
}

impl<T: HttpTransport> HttpTransport for MockOrigin<T> {
    fn send(&self, mut request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        request.url.set_scheme(self.origin.scheme()).expect("http scheme");
        request.url.set_host(self.origin.host_str()).expect("mock host");
        request.url.set_port(self.origin.port()).expect("mock port");
        self.inner.send(request)
    }
}

/// Returns an origin nothing is listening on.
pub(crate) fn closed_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let origin = format!("http://{}", listener.local_addr().expect("local address"));
    drop(listener);
    origin
}
