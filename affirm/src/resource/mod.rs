//! Resource clients for the Affirm API.
//!
//! Transactions (v1) and charges (v2) expose nearly the same operations.
//! Rather than two copies of the client, a single [`ResourceClient`] is
//! parameterised by a [`Resource`] descriptor that supplies the resource's
//! endpoints and the optional-field whitelist of each shared operation.
//!
//! - Shared operations (`list`, `authorize`, `read`, `capture`, `refund`) are
//!   implemented once for every `ResourceClient<R>`.
//! - Resource-specific operations live in [`transactions`] and [`charges`].

pub mod charges;
pub mod transactions;

use std::borrow::Cow;
use std::marker::PhantomData;
use std::sync::Arc;

use http::Method;
use serde_json::Value;
#[cfg(feature = "telemetry")]
use tracing::instrument;
use url::Url;

pub use charges::{ChargeClient, Charges};
pub use transactions::{TransactionClient, Transactions};

use crate::config::ClientConfig;
use crate::constants::CHECKOUT_TOKEN;
use crate::error::{AffirmError, ShapeError};
use crate::executor::RequestExecutor;
use crate::shape::{OptionalData, ParameterShape, filter_optional};
use crate::transport::HttpTransport;

/// Describes one API resource family: its endpoints and the optional fields
/// each shared operation forwards.
pub trait Resource: Send + Sync + 'static {
    /// Short name used in diagnostics, e.g. `"transactions"`.
    const NAME: &'static str;
    /// Base URL of the live API.
    const LIVE_URL: &'static str;
    /// Base URL of the sandbox API.
    const SANDBOX_URL: &'static str;
    /// Optional fields of `authorize`.
    const AUTHORIZE: &'static ParameterShape;
    /// Optional fields of `read`, sent as the query string.
    const READ: &'static ParameterShape;
    /// Optional fields of `capture`.
    const CAPTURE: &'static ParameterShape;
    /// Optional fields of `refund`.
    const REFUND: &'static ParameterShape;

    /// Returns the base URL for the given environment.
    #[must_use]
    fn base_url(is_sandbox: bool) -> &'static str {
        if is_sandbox {
            Self::SANDBOX_URL
        } else {
            Self::LIVE_URL
        }
    }
}

/// A client for one resource family, bound to one environment.
pub struct ResourceClient<R> {
    base_url: Url,
    executor: RequestExecutor,
    resource: PhantomData<R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            executor: self.executor.clone(),
            resource: PhantomData,
        }
    }
}

impl<R: Resource> std::fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &R::NAME)
            .field("base_url", &self.base_url.as_str())
            .field("executor", &self.executor)
            .finish()
    }
}

impl<R: Resource> ResourceClient<R> {
    /// Creates a client using a default [`reqwest::Client`].
    ///
    /// # Panics
    ///
    /// Panics if the default TLS backend cannot be initialised.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, reqwest::Client::new())
    }

    /// Creates a client that sends its requests through `transport`.
    ///
    /// # Panics
    ///
    /// Panics under the same condition as [`Self::with_shared_transport`].
    pub fn with_transport(config: &ClientConfig, transport: impl HttpTransport + 'static) -> Self {
        Self::with_shared_transport(config, Arc::new(transport))
    }

    /// Creates a client over a transport shared with other clients.
    ///
    /// # Panics
    ///
    /// Panics if `R::LIVE_URL` or `R::SANDBOX_URL` is not an absolute URL.
    /// Both built-in resources use valid constants.
    #[must_use]
    pub fn with_shared_transport(config: &ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let base_url = Url::parse(R::base_url(config.is_sandbox()))
            .expect("resource base URLs are valid absolute URLs");
        Self {
            base_url,
            executor: RequestExecutor::new(config.basic_auth(), transport),
            resource: PhantomData,
        }
    }

    /// Validates an untyped configuration and creates a client with a default
    /// [`reqwest::Client`].
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] if the configuration is malformed.
    pub fn from_value(config: &Value) -> Result<Self, ShapeError> {
        let config = ClientConfig::try_from(config)?;
        Ok(Self::new(&config))
    }

    /// Returns the base URL every request of this client starts from.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the executor shared by this client's operations.
    #[must_use]
    pub const fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Lists resources.
    ///
    /// The API's list filters are not supported yet; the request carries no
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AffirmError`] if the request fails.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "affirm.list", skip_all, fields(resource = R::NAME), err)
    )]
    pub async fn list(&self) -> Result<Value, AffirmError> {
        self.get(self.base_url.clone(), &OptionalData::new()).await
    }

    /// Exchanges a checkout token for a new authorized resource.
    ///
    /// # Errors
    ///
    /// Returns [`AffirmError::Shape`] if `data` is malformed, otherwise any
    /// error of the request.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "affirm.authorize", skip_all, fields(resource = R::NAME), err)
    )]
    pub async fn authorize(
        &self,
        checkout_token: &str,
        data: &OptionalData,
    ) -> Result<Value, AffirmError> {
        let mut body = filter_optional(R::AUTHORIZE, data)?;
        body.insert(CHECKOUT_TOKEN.to_owned(), Value::from(checkout_token));
        self.post(self.base_url.clone(), body).await
    }

    /// Reads a single resource.
    ///
    /// # Errors
    ///
    /// Returns [`AffirmError::Shape`] if `id` is empty, `.` or `..`, or if
    /// `data` is malformed, otherwise any error of the request.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "affirm.read", skip_all, fields(resource = R::NAME, id = %id), err)
    )]
    pub async fn read(&self, id: &str, data: &OptionalData) -> Result<Value, AffirmError> {
        let query = filter_optional(R::READ, data)?;
        self.get(self.endpoint(&[id])?, &query).await
    }

    /// Captures an authorized resource.
    ///
    /// # Errors
    ///
    /// Returns [`AffirmError::Shape`] if `id` is empty, `.` or `..`, or if
    /// `data` is malformed, otherwise any error of the request.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "affirm.capture", skip_all, fields(resource = R::NAME, id = %id), err)
    )]
    pub async fn capture(&self, id: &str, data: &OptionalData) -> Result<Value, AffirmError> {
        let body = filter_optional(R::CAPTURE, data)?;
        self.post(self.endpoint(&[id, "capture"])?, body).await
    }

    /// Refunds a captured resource, fully or partially.
    ///
    /// # Errors
    ///
    /// Returns [`AffirmError::Shape`] if `id` is empty, `.` or `..`, or if
    /// `data` is malformed, otherwise any error of the request.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "affirm.refund", skip_all, fields(resource = R::NAME, id = %id), err)
    )]
    pub async fn refund(&self, id: &str, data: &OptionalData) -> Result<Value, AffirmError> {
        let body = filter_optional(R::REFUND, data)?;
        self.post(self.endpoint(&[id, "refund"])?, body).await
    }

    /// Builds `<base>/<segment>/...`, percent-encoding each segment.
    ///
    /// Empty, `.` and `..` segments are rejected: URL normalisation would
    /// collapse them into a different endpoint.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ShapeError> {
        if let Some(id) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ShapeError::InvalidId { id: (*id).to_owned() });
        }
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    pub(crate) async fn get(&self, url: Url, query: &OptionalData) -> Result<Value, AffirmError> {
        self.executor
            .execute(Method::GET, with_query(url, query), OptionalData::new())
            .await
    }

    pub(crate) async fn post(&self, url: Url, body: OptionalData) -> Result<Value, AffirmError> {
        self.executor.execute(Method::POST, url, body).await
    }
}

/// Appends `query` to `url` as form-encoded pairs. An empty `query` leaves the
/// URL without a `?`.
fn with_query(mut url: Url, query: &OptionalData) -> Url {
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, &query_value(value));
        }
    }
    url
}

fn query_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use serde_json::json;

    fn data(value: Value) -> OptionalData {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_query_is_omitted_when_empty() {
        let url = Url::parse("https://api.affirm.com/api/v1/transactions/txn_1").unwrap();
        assert_eq!(
            with_query(url, &OptionalData::new()).as_str(),
            "https://api.affirm.com/api/v1/transactions/txn_1"
        );
    }

    #[test]
    fn test_query_values_are_form_encoded() {
        let url = Url::parse("https://api.affirm.com/api/v2/charges/c_1").unwrap();
        let query = data(json!({"after": "a b&c", "limit": 25}));
        assert_eq!(
            with_query(url, &query).as_str(),
            "https://api.affirm.com/api/v2/charges/c_1?after=a+b%26c&limit=25"
        );
    }

    #[test]
    fn test_endpoint_segments_are_percent_encoded() {
        let config = ClientConfig::new("pk", "sk", false);
        let transport = RecordingTransport::responding(200, "{}");
        let client = TransactionClient::with_transport(&config, transport);
        assert_eq!(
            client.endpoint(&["a/b c", "void"]).unwrap().as_str(),
            "https://api.affirm.com/api/v1/transactions/a%2Fb%20c/void"
        );
        assert_eq!(
            client.endpoint(&["%2E%2E"]).unwrap().as_str(),
            "https://api.affirm.com/api/v1/transactions/%252E%252E"
        );
    }

    #[test]
    fn test_endpoint_rejects_dot_and_empty_segments() {
        let config = ClientConfig::new("pk", "sk", false);
        let transport = RecordingTransport::responding(200, "{}");
        let client = TransactionClient::with_transport(&config, transport);
        for id in ["", ".", ".."] {
            assert_eq!(
                client.endpoint(&[id, "void"]).unwrap_err(),
                ShapeError::InvalidId { id: id.to_owned() }
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_id_prevents_request() {
        let transport = RecordingTransport::responding(200, "{}");
        let config = ClientConfig::new("pk", "sk", true);
        let transactions = TransactionClient::with_shared_transport(&config, transport.clone());
        let charges = ChargeClient::with_shared_transport(&config, transport.clone());

        let results = [
            transactions.read("..", &OptionalData::new()).await,
            transactions.read("", &OptionalData::new()).await,
            transactions.capture(".", &OptionalData::new()).await,
            transactions.refund("..", &OptionalData::new()).await,
            transactions.update("..", &OptionalData::new()).await,
            transactions.void("..", &OptionalData::new()).await,
            charges.void(".").await,
        ];

        for result in results {
            assert!(matches!(
                result,
                Err(AffirmError::Shape(ShapeError::InvalidId { .. }))
            ));
        }
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_builtin_base_urls_are_absolute() {
        for url in [
            Transactions::LIVE_URL,
            Transactions::SANDBOX_URL,
            Charges::LIVE_URL,
            Charges::SANDBOX_URL,
        ] {
            assert!(!Url::parse(url).unwrap().cannot_be_a_base(), "{url}");
        }
    }

    #[test]
    fn test_from_value_rejects_bad_config() {
        let err = TransactionClient::from_value(&json!({"public_api_key": "pk"})).unwrap_err();
        assert!(matches!(err, ShapeError::MissingKey { .. }));
    }

    #[tokio::test]
    async fn test_shape_error_prevents_request() {
        let transport = RecordingTransport::responding(200, "{}");
        let config = ClientConfig::new("pk", "sk", true);
        let client = ChargeClient::with_shared_transport(&config, transport.clone());

        let err = client
            .refund("c_1", &data(json!({"amount": "10.00"})))
            .await
            .unwrap_err();

        assert!(matches!(err, AffirmError::Shape(_)));
        assert!(transport.requests().is_empty());
    }
}
