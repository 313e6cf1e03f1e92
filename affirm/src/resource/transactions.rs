//! The v1 transactions API.

use serde_json::Value;
#[cfg(feature = "telemetry")]
use tracing::instrument;

use super::{Resource, ResourceClient};
use crate::constants::{TRANSACTIONS_LIVE_URL, TRANSACTIONS_SANDBOX_URL};
use crate::error::AffirmError;
use crate::shape::{Kind, OptionalData, ParameterShape, filter_optional};

/// The transactions resource family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transactions;

/// Client for the transactions API.
pub type TransactionClient = ResourceClient<Transactions>;

impl Transactions {
    /// Optional fields of `list_events`, sent as the query string.
    pub const LIST_EVENTS: &'static ParameterShape = &[
        ("transaction_type", Kind::String),
        ("transaction_event_type", Kind::String),
        ("limit", Kind::Integer),
        ("before_date", Kind::String),
        ("after_date", Kind::String),
        ("before_ari", Kind::String),
        ("after_ari", Kind::String),
        ("merchant_id", Kind::String),
    ];

    /// Optional fields of `update`.
    pub const UPDATE: &'static ParameterShape = &[
        ("order_id", Kind::String),
        ("reference_id", Kind::String),
        ("shipping_carrier", Kind::String),
        ("shipping_confirmation", Kind::String),
    ];

    /// Optional fields of `void`.
    pub const VOID: &'static ParameterShape =
        &[("reference_id", Kind::String), ("amount", Kind::Integer)];

    /// Optional fields of `download_revenue_share_csv`, sent as the query
    /// string.
    pub const DOWNLOAD_REVENUE_SHARE_CSV: &'static ParameterShape = &[("date", Kind::String)];
}

impl Resource for Transactions {
    const NAME: &'static str = "transactions";
    const LIVE_URL: &'static str = TRANSACTIONS_LIVE_URL;
    const SANDBOX_URL: &'static str = TRANSACTIONS_SANDBOX_URL;
    const AUTHORIZE: &'static ParameterShape = &[("order_id", Kind::String)];
    const READ: &'static ParameterShape = &[("expand", Kind::String)];
    const CAPTURE: &'static ParameterShape = &[
        ("order_id", Kind::String),
        ("shipping_carrier", Kind::String),
        ("shipping_confirmation", Kind::String),
    ];
    const REFUND: &'static ParameterShape = &[
        ("amount", Kind::Integer),
        ("reference_id", Kind::String),
        ("transaction_event_count", Kind::Integer),
    ];
}

impl ResourceClient<Transactions> {
    /// Lists transaction events across transactions.
    ///
    /// # Errors
    ///
    /// Returns [`AffirmError::Shape`] if `data` is malformed, otherwise any
    /// error of the request.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "affirm.list_events", skip_all, fields(resource = Transactions::NAME), err)
    )]
    pub async fn list_events(&self, data: &OptionalData) -> Result<Value, AffirmError> {
        let query = filter_optional(Transactions::LIST_EVENTS, data)?;
        self.get(self.endpoint(&["events"])?, &query).await
    }

    /// Updates the order and shipping details of a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AffirmError::Shape`] if `id` is empty, `.` or `..`, or if
    /// `data` is malformed, otherwise any error of the request.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "affirm.update", skip_all, fields(resource = Transactions::NAME, id = %id), err)
    )]
    pub async fn update(&self, id: &str, data: &OptionalData) -> Result<Value, AffirmError> {
        let body = filter_optional(Transactions::UPDATE, data)?;
        self.post(self.endpoint(&[id])?, body).await
    }

    /// Voids an authorized transaction, fully or partially.
    ///
    /// # Errors
    ///
    /// Returns [`AffirmError::Shape`] if `id` is empty, `.` or `..`, or if
    /// `data` is malformed, otherwise any error of the request.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "affirm.void", skip_all, fields(resource = Transactions::NAME, id = %id), err)
    )]
    pub async fn void(&self, id: &str, data: &OptionalData) -> Result<Value, AffirmError> {
        let body = filter_optional(Transactions::VOID, data)?;
        self.post(self.endpoint(&[id, "void"])?, body).await
    }

    /// Fetches the revenue share report.
    ///
    /// # Errors
    ///
    /// Returns [`AffirmError::Shape`] if `data` is malformed, otherwise any
    /// error of the request.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "affirm.download_revenue_share_csv",
            skip_all,
            fields(resource = Transactions::NAME),
            err
        )
    )]
    pub async fn download_revenue_share_csv(
        &self,
        data: &OptionalData,
    ) -> Result<Value, AffirmError> {
        let query = filter_optional(Transactions::DOWNLOAD_REVENUE_SHARE_CSV, data)?;
        self.get(self.endpoint(&["download_revenue_share_csv"])?, &query)
            .await
    }
}
