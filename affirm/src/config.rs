//! Client configuration.
//!
//! A [`ClientConfig`] holds the API key pair and selects the sandbox or live
//! endpoints. It is fixed once built: a client never changes endpoints or
//! credentials afterwards.
//!
//! Configurations coming from untyped sources go through [`validate`], either
//! directly via `ClientConfig::try_from(&value)` or through serde:
//!
//! ```rust
//! use affirm::ClientConfig;
//!
//! let config: ClientConfig = serde_json::from_str(
//!     r#"{"public_api_key": "pk", "private_api_key": "sk", "is_sandbox": true}"#,
//! )
//! .unwrap();
//! assert!(config.is_sandbox());
//! ```

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::constants::{IS_SANDBOX, PRIVATE_API_KEY, PUBLIC_API_KEY};
use crate::error::ShapeError;
use crate::shape::{self, Kind, ParameterShape};
use crate::transport::BasicAuth;

/// Keys every configuration mapping must carry, with their kinds.
pub const CONFIG_SHAPE: &ParameterShape = &[
    (PUBLIC_API_KEY, Kind::String),
    (PRIVATE_API_KEY, Kind::String),
    (IS_SANDBOX, Kind::Boolean),
];

/// Checks that `config` is a mapping holding every key of [`CONFIG_SHAPE`].
///
/// Extra keys are allowed.
///
/// # Errors
///
/// Returns [`ShapeError`] if `config` is not a mapping, or a key is missing or
/// has the wrong kind.
pub fn validate(config: &Value) -> Result<(), ShapeError> {
    let map = config.as_object().ok_or_else(|| ShapeError::NotAMapping {
        actual: shape::kind_of(config),
    })?;
    shape::require(CONFIG_SHAPE, map)
}

/// API credentials and endpoint selection.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct ClientConfig {
    public_api_key: String,
    private_api_key: String,
    is_sandbox: bool,
}

impl ClientConfig {
    /// Creates a configuration from already-typed values.
    pub fn new(
        public_api_key: impl Into<String>,
        private_api_key: impl Into<String>,
        is_sandbox: bool,
    ) -> Self {
        Self {
            public_api_key: public_api_key.into(),
            private_api_key: private_api_key.into(),
            is_sandbox,
        }
    }

    /// Returns the public API key.
    #[must_use]
    pub fn public_api_key(&self) -> &str {
        &self.public_api_key
    }

    /// Returns the private API key.
    #[must_use]
    pub fn private_api_key(&self) -> &str {
        &self.private_api_key
    }

    /// Returns `true` if clients built from this config talk to the sandbox.
    #[must_use]
    pub const fn is_sandbox(&self) -> bool {
        self.is_sandbox
    }

    /// Returns the Basic Auth credentials sent with every request.
    #[must_use]
    pub fn basic_auth(&self) -> BasicAuth {
        BasicAuth::new(&self.public_api_key, &self.private_api_key)
    }
}

impl TryFrom<&Value> for ClientConfig {
    type Error = ShapeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        validate(value)?;
        let string = |key: &str| value[key].as_str().unwrap_or_default().to_owned();
        Ok(Self {
            public_api_key: string(PUBLIC_API_KEY),
            private_api_key: string(PRIVATE_API_KEY),
            is_sandbox: value[IS_SANDBOX].as_bool().unwrap_or_default(),
        })
    }
}

impl TryFrom<Value> for ClientConfig {
    type Error = ShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("public_api_key", &self.public_api_key)
            .field("private_api_key", &"<redacted>")
            .field("is_sandbox", &self.is_sandbox)
            .finish()
    }
}
