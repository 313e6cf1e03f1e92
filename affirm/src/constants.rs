//! Endpoint URLs and configuration keys.

/// Live endpoint of the v1 transactions API.
pub const TRANSACTIONS_LIVE_URL: &str = "https://api.affirm.com/api/v1/transactions";

/// Sandbox endpoint of the v1 transactions API.
pub const TRANSACTIONS_SANDBOX_URL: &str = "https://sandbox.affirm.com/api/v1/transactions";

/// Live endpoint of the v2 charges API.
pub const CHARGES_LIVE_URL: &str = "https://api.affirm.com/api/v2/charges";

/// Sandbox endpoint of the v2 charges API.
pub const CHARGES_SANDBOX_URL: &str = "https://sandbox.affirm.com/api/v2/charges";

/// Configuration key holding the public API key.
pub const PUBLIC_API_KEY: &str = "public_api_key";

/// Configuration key holding the private API key.
pub const PRIVATE_API_KEY: &str = "private_api_key";

/// Configuration key selecting the sandbox endpoints.
pub const IS_SANDBOX: &str = "is_sandbox";

/// Body field carrying the checkout token on authorize.
pub const CHECKOUT_TOKEN: &str = "checkout_token";
