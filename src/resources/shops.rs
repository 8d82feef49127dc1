//! Shops connected to the Printify account.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clients::HttpClient;
use crate::config::ShopId;
use crate::error::PrintifyError;
use crate::mapping::{self, FieldKind, FieldSpec, Record};
use crate::resources::segment;

/// A shop (sales channel connection) of the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// Shop id. Numeric ids are kept as their decimal string.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Sales channel, e.g. `etsy`, `shopify` or `disconnected`.
    pub sales_channel: String,
}

impl Shop {
    /// Returns the id as a [`ShopId`] usable for shop-scoped clients.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopId`](crate::ConfigError::InvalidShopId)
    /// if the id cannot be used in a path.
    pub fn shop_id(&self) -> Result<ShopId, crate::ConfigError> {
        ShopId::new(self.id.as_str())
    }
}

impl Record for Shop {
    const NAME: &'static str = "Shop";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::Identifier),
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::required("sales_channel", FieldKind::String),
    ];
}

/// Client for `shops.json`.
#[derive(Clone, Debug)]
pub struct Shops {
    client: Arc<HttpClient>,
}

impl Shops {
    /// Creates a shops client over a shared transport.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Lists the shops of the account.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request fails or a shop cannot be
    /// mapped.
    pub async fn list(&self) -> Result<Vec<Shop>, PrintifyError> {
        let body = self.client.get("shops.json", None, None).await?;
        Ok(mapping::from_list(&body)?)
    }

    /// Disconnects a shop from the account.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request fails.
    pub async fn disconnect(&self, shop_id: &ShopId) -> Result<(), PrintifyError> {
        let path = format!("shops/{}/connection.json", segment(shop_id.as_ref()));
        self.client.delete(&path, None).await?;
        Ok(())
    }
}
