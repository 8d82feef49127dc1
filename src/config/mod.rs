//! Configuration types for the Printify API SDK.
//!
//! This module provides the configuration used to initialize the SDK.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`PrintifyConfig`]: The immutable configuration shared by every client
//! - [`PrintifyConfigBuilder`]: A builder for constructing [`PrintifyConfig`] instances
//! - [`ApiToken`]: A validated API token newtype with masked debug output
//! - [`ShopId`]: A shop identifier used as the default shop scope
//! - [`BaseUrl`]: A validated API base URL
//!
//! # Example
//!
//! ```rust
//! use printify_api::{PrintifyConfig, ApiToken, ShopId};
//!
//! let config = PrintifyConfig::builder()
//!     .api_token(ApiToken::new("my-token").unwrap())
//!     .shop_id(ShopId::from(5432_u64))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop_id().map(|id| id.as_ref()), Some("5432"));
//! ```

mod newtypes;

pub use newtypes::{ApiToken, BaseUrl, ShopId};

use std::time::Duration;

use crate::error::ConfigError;

/// Version segment prepended to every request path.
pub const API_VERSION_PATH: &str = "v1";

/// Configuration for the Printify API SDK.
///
/// Holds the API token, the optional default shop scope and the transport
/// settings. It is never mutated after construction.
///
/// # Thread Safety
///
/// `PrintifyConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct PrintifyConfig {
    api_token: ApiToken,
    shop_id: Option<ShopId>,
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl PrintifyConfig {
    /// Creates a new builder for constructing a `PrintifyConfig`.
    #[must_use]
    pub fn builder() -> PrintifyConfigBuilder {
        PrintifyConfigBuilder::new()
    }

    /// Returns the API token.
    #[must_use]
    pub const fn api_token(&self) -> &ApiToken {
        &self.api_token
    }

    /// Returns the default shop id, if configured.
    ///
    /// Shop-scoped operations fall back to this id when no explicit shop is
    /// given.
    #[must_use]
    pub const fn shop_id(&self) -> Option<&ShopId> {
        self.shop_id.as_ref()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify PrintifyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PrintifyConfig>();
};

/// Builder for constructing [`PrintifyConfig`] instances.
///
/// `api_token` is required. All other fields have defaults.
///
/// # Defaults
///
/// - `shop_id`: `None`
/// - `base_url`: `https://api.printify.com`
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (no timeout beyond the HTTP stack's own)
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use printify_api::{PrintifyConfig, ApiToken, BaseUrl};
///
/// let config = PrintifyConfig::builder()
///     .api_token(ApiToken::new("token").unwrap())
///     .base_url(BaseUrl::new("http://localhost:9000").unwrap())
///     .user_agent_prefix("MyShop/1.0")
///     .timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct PrintifyConfigBuilder {
    api_token: Option<ApiToken>,
    shop_id: Option<ShopId>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl PrintifyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API token (required).
    #[must_use]
    pub fn api_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }

    /// Sets the default shop scope.
    #[must_use]
    pub fn shop_id(mut self, shop_id: ShopId) -> Self {
        self.shop_id = Some(shop_id);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`PrintifyConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_token` is not set.
    pub fn build(self) -> Result<PrintifyConfig, ConfigError> {
        let api_token = self
            .api_token
            .ok_or(ConfigError::MissingRequiredField { field: "api_token" })?;

        Ok(PrintifyConfig {
            api_token,
            shop_id: self.shop_id,
            base_url: self.base_url.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}
