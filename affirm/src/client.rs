//! A single entry point for both resource families.

use std::sync::Arc;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ShapeError;
use crate::resource::{ChargeClient, TransactionClient};
use crate::transport::HttpTransport;

/// Holds a transactions client and a charges client that share one
/// configuration and one transport.
///
/// ```no_run
/// use affirm::{AffirmClient, ClientConfig};
/// use serde_json::Map;
///
/// # async fn run() -> Result<(), affirm::AffirmError> {
/// let affirm = AffirmClient::new(&ClientConfig::new("public-key", "private-key", true));
/// let charge = affirm.charges().read("ch_1", &Map::new()).await?;
/// let events = affirm.transactions().list_events(&Map::new()).await?;
/// # let _ = (charge, events);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AffirmClient {
    transactions: TransactionClient,
    charges: ChargeClient,
}

impl AffirmClient {
    /// Creates both clients over a default [`reqwest::Client`].
    ///
    /// # Panics
    ///
    /// Panics if the default TLS backend cannot be initialised.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, reqwest::Client::new())
    }

    /// Creates both clients over `transport`.
    pub fn with_transport(config: &ClientConfig, transport: impl HttpTransport + 'static) -> Self {
        let transport: Arc<dyn HttpTransport> = Arc::new(transport);
        Self {
            transactions: TransactionClient::with_shared_transport(config, Arc::clone(&transport)),
            charges: ChargeClient::with_shared_transport(config, transport),
        }
    }

    /// Validates an untyped configuration and creates both clients.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] if the configuration is malformed.
    pub fn from_value(config: &Value) -> Result<Self, ShapeError> {
        let config = ClientConfig::try_from(config)?;
        Ok(Self::new(&config))
    }

    /// Returns the transactions client.
    #[must_use]
    pub const fn transactions(&self) -> &TransactionClient {
        &self.transactions
    }

    /// Returns the charges client.
    #[must_use]
    pub const fn charges(&self) -> &ChargeClient {
        &self.charges
    }
}
