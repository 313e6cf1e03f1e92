//! The v2 charges API.

use serde_json::Value;
#[cfg(feature = "telemetry")]
use tracing::instrument;

use super::{Resource, ResourceClient};
use crate::constants::{CHARGES_LIVE_URL, CHARGES_SANDBOX_URL};
use crate::error::AffirmError;
use crate::shape::{Kind, OptionalData, ParameterShape};

/// The charges resource family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charges;

/// Client for the charges API.
pub type ChargeClient = ResourceClient<Charges>;

impl Resource for Charges {
    const NAME: &'static str = "charges";
    const LIVE_URL: &'static str = CHARGES_LIVE_URL;
    const SANDBOX_URL: &'static str = CHARGES_SANDBOX_URL;
    const AUTHORIZE: &'static ParameterShape = &[("order_id", Kind::String)];
    const READ: &'static ParameterShape = &[
        ("limit", Kind::Integer),
        ("before", Kind::String),
        ("after", Kind::String),
    ];
    const CAPTURE: &'static ParameterShape = &[
        ("order_id", Kind::String),
        ("shipping_carrier", Kind::String),
        ("shipping_confirmation", Kind::String),
    ];
    const REFUND: &'static ParameterShape = &[("amount", Kind::Integer)];
}

impl ResourceClient<Charges> {
    /// Voids an authorized charge.
    ///
    /// # Errors
    ///
    /// Returns [`AffirmError::Shape`] if `id` is empty, `.` or `..`,
    /// otherwise any error of the request.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "affirm.void", skip_all, fields(resource = Charges::NAME, id = %id), err)
    )]
    pub async fn void(&self, id: &str) -> Result<Value, AffirmError> {
        self.post(self.endpoint(&[id, "void"])?, OptionalData::new())
            .await
    }
}
