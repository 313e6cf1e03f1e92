#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Client for the [Affirm](https://www.affirm.com) transactions and charges REST API.
//!
//! Every API call goes through the same pipeline: the optional parameters of
//! the call are checked against the operation's declared whitelist, falsy
//! values are dropped, and a single HTTP request is sent with Basic Auth. The
//! decoded JSON response is handed back to the caller as a
//! [`serde_json::Value`].
//!
//! # Example
//!
//! ```no_run
//! use affirm::{ClientConfig, TransactionClient};
//! use serde_json::{Map, json};
//!
//! # async fn run() -> Result<(), affirm::AffirmError> {
//! let config = ClientConfig::new("public-key", "private-key", true);
//! let transactions = TransactionClient::new(&config);
//!
//! let mut data = Map::new();
//! data.insert("order_id".into(), json!("order-42"));
//! let transaction = transactions.authorize("checkout-token", &data).await?;
//! println!("{}", transaction["id"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Client configuration and its validator
//! - [`shape`] - Parameter shapes and the optional-parameter filter
//! - [`transport`] - The injectable HTTP transport and its `reqwest` implementations
//! - [`executor`] - The shared request/response pipeline
//! - [`resource`] - Transaction and charge resource clients
//! - [`client`] - A unified client over both resources
//! - [`error`] - Error types
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation
//! - `middleware` - Implements [`HttpTransport`] for `reqwest_middleware::ClientWithMiddleware`

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod executor;
pub mod resource;
pub mod shape;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::AffirmClient;
pub use config::ClientConfig;
pub use error::{AffirmError, ResponseError, ShapeError};
pub use executor::RequestExecutor;
pub use resource::{
    ChargeClient, Charges, Resource, ResourceClient, TransactionClient, Transactions,
};
pub use shape::{Kind, OptionalData, ParameterShape};
pub use transport::{BasicAuth, HttpRequest, HttpResponse, HttpTransport, TransportError};
