//! The [`Printify`] entry point.

use std::sync::Arc;

use crate::clients::HttpClient;
use crate::config::{ApiToken, PrintifyConfig};
use crate::error::ConfigError;
use crate::resources::{ArtworkClient, Catalog, Orders, Products, Shops, Webhooks};

/// Entry point to the Printify API.
///
/// Holds the immutable configuration and one shared transport. Resource
/// clients are handed out by value and share the transport, so they are
/// cheap to create and can be moved into other tasks.
///
/// # Example
///
/// ```rust
/// use printify_api::{ApiToken, Printify, PrintifyConfig, ShopId};
///
/// let printify = Printify::with_config(
///     PrintifyConfig::builder()
///         .api_token(ApiToken::new("my-token").unwrap())
///         .shop_id(ShopId::from(5432_u64))
///         .build()
///         .unwrap(),
/// )
/// .unwrap();
///
/// // Shop-scoped clients use shop 5432 unless told otherwise.
/// let products = printify.products();
/// let other_shop = printify.orders().with_shop(ShopId::new("9876").unwrap());
/// # let _ = (products, other_shop);
/// ```
#[derive(Clone, Debug)]
pub struct Printify {
    config: PrintifyConfig,
    client: Arc<HttpClient>,
}

// Verify Printify is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Printify>();
};

impl Printify {
    /// Creates a client with the default settings and no default shop.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiToken`] if `token` is empty, or
    /// [`ConfigError::HttpClient`] if the HTTP stack cannot be initialized.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let config = PrintifyConfig::builder()
            .api_token(ApiToken::new(token)?)
            .build()?;
        Self::with_config(config)
    }

    /// Creates a client from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP stack cannot be
    /// initialized.
    pub fn with_config(config: PrintifyConfig) -> Result<Self, ConfigError> {
        let client = Arc::new(HttpClient::new(&config)?);
        tracing::debug!(
            base_url = AsRef::<str>::as_ref(config.base_url()),
            shop_id = ?config.shop_id().map(ToString::to_string),
            "Created Printify client"
        );
        Ok(Self { config, client })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PrintifyConfig {
        &self.config
    }

    /// Returns the shared transport, for calls the resource clients do not
    /// cover.
    #[must_use]
    pub fn http_client(&self) -> Arc<HttpClient> {
        Arc::clone(&self.client)
    }

    /// Shops of the account.
    #[must_use]
    pub fn shops(&self) -> Shops {
        Shops::new(self.http_client())
    }

    /// The product catalog (blueprints, print providers, variants, shipping).
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.http_client())
    }

    /// Products of the default shop.
    #[must_use]
    pub fn products(&self) -> Products {
        Products::new(self.http_client())
    }

    /// Orders of the default shop.
    #[must_use]
    pub fn orders(&self) -> Orders {
        Orders::new(self.http_client())
    }

    /// The artwork library.
    #[must_use]
    pub fn artwork(&self) -> ArtworkClient {
        ArtworkClient::new(self.http_client())
    }

    /// Webhooks of the default shop.
    #[must_use]
    pub fn webhooks(&self) -> Webhooks {
        Webhooks::new(self.http_client())
    }
}
