//! Resource clients and the records they exchange.
//!
//! Each client is a thin set of named operations over the transport, the
//! paginator and the data mapper. Clients are cheap to clone: they share the
//! underlying [`HttpClient`](crate::clients::HttpClient) through an `Arc`.
//!
//! | Client | Scope |
//! |---|---|
//! | [`Shops`] | account |
//! | [`Catalog`] | account |
//! | [`Products`] | shop |
//! | [`Orders`] | shop |
//! | [`ArtworkClient`] | account |
//! | [`Webhooks`] | shop |
//!
//! Shop-scoped clients use the configured default shop unless
//! `with_shop` was called.

mod artwork;
mod catalog;
mod orders;
mod products;
mod shops;
mod webhooks;

pub use artwork::{Artwork, ArtworkClient, ArtworkSource, ArtworkUpload, UploadListParams};
pub use catalog::{
    Blueprint, Catalog, CatalogVariant, HandlingTime, Location, PrintProvider,
    PrintProviderVariants, ShippingCostAmount, ShippingInfo, ShippingProfile, VariantOptions,
    VariantPlaceholder,
};
pub use orders::{
    Address, CatalogLineItem, CreatedOrder, NewOrder, Order, OrderItem, OrderLineItem,
    OrderListParams, Orders, ProductLineItem, Shipment, ShippingCost, ShippingEstimate,
    SkuLineItem,
};
pub use products::{
    NewProduct, NewProductVariant, PlaceholderImage, Placeholder, PrintArea, Product,
    ProductExternal, ProductExternalUpdate, ProductImage, ProductListParams, ProductOption,
    ProductOptionValue, ProductUpdate, ProductVariant, Products, Publish, PublishedExternal,
    PublishingSucceeded,
};
pub use shops::{Shop, Shops};
pub use webhooks::{NewWebhook, Webhook, WebhookUpdate, Webhooks};

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::mapping::ValidationError;

/// Serializes list parameters into query pairs.
///
/// `null` values are skipped and arrays are joined with commas.
pub(crate) fn serialize_to_query<T: Serialize>(
    params: &T,
) -> Result<BTreeMap<String, String>, ValidationError> {
    let value = serde_json::to_value(params).map_err(|e| ValidationError::Encode {
        record: "query parameters",
        reason: e.to_string(),
    })?;

    let mut query = BTreeMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}

/// Percent-encodes one path segment.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Params {
        limit: Option<u32>,
        page: Option<u32>,
        status: Option<String>,
        ids: Vec<u64>,
    }

    #[test]
    fn test_serialize_to_query_skips_none() {
        let query = serialize_to_query(&Params {
            limit: Some(10),
            page: None,
            status: Some("on-hold".to_string()),
            ids: Vec::new(),
        })
        .unwrap();

        assert_eq!(query.get("limit"), Some(&"10".to_string()));
        assert_eq!(query.get("status"), Some(&"on-hold".to_string()));
        assert!(!query.contains_key("page"));
        assert!(!query.contains_key("ids"));
    }

    #[test]
    fn test_serialize_to_query_joins_arrays() {
        let query = serialize_to_query(&Params {
            limit: None,
            page: None,
            status: None,
            ids: vec![1, 2, 3],
        })
        .unwrap();
        assert_eq!(query.get("ids"), Some(&"1,2,3".to_string()));
    }

    #[test]
    fn test_segment_encodes_reserved_characters() {
        assert_eq!(segment("5d39b159e7c48c000728c89f"), "5d39b159e7c48c000728c89f");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
