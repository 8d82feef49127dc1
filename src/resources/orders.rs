//! Orders of a shop, order creation and shipping estimates.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{HttpClient, Paginator, RecordPaginator, SHOP_ID_PLACEHOLDER};
use crate::config::ShopId;
use crate::error::PrintifyError;
use crate::mapping::{self, parse_timestamp, FieldKind, FieldSpec, Record};
use crate::resources::{segment, serialize_to_query};

/// A delivery address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    /// Two-letter country code.
    pub country: String,
    pub region: String,
    pub zip: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

const ADDRESS_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("first_name", FieldKind::String),
    FieldSpec::required("last_name", FieldKind::String),
    FieldSpec::required("address1", FieldKind::String),
    FieldSpec::optional("address2", FieldKind::String),
    FieldSpec::required("city", FieldKind::String),
    FieldSpec::required("country", FieldKind::String),
    FieldSpec::required("region", FieldKind::String),
    FieldSpec::required("zip", FieldKind::String),
    FieldSpec::optional("email", FieldKind::String),
    FieldSpec::optional("phone", FieldKind::String),
    FieldSpec::optional("company", FieldKind::String),
];

impl Record for Address {
    const NAME: &'static str = "Address";
    const FIELDS: &'static [FieldSpec] = ADDRESS_FIELDS;
}

/// A line item of an existing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: String,
    pub quantity: u64,
    pub variant_id: u64,
    pub print_provider_id: Option<u64>,
    /// Production cost in minor units.
    pub cost: Option<i64>,
    pub shipping_cost: Option<i64>,
    /// Production status, e.g. `in-production`.
    pub status: Option<String>,
    pub metadata: Option<Value>,
    pub sent_to_production_at: Option<String>,
    pub fulfilled_at: Option<String>,
}

const ORDER_LINE_ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("product_id", FieldKind::Identifier),
    FieldSpec::required("quantity", FieldKind::Unsigned),
    FieldSpec::required("variant_id", FieldKind::Unsigned),
    FieldSpec::optional("print_provider_id", FieldKind::Unsigned),
    FieldSpec::optional("cost", FieldKind::Integer),
    FieldSpec::optional("shipping_cost", FieldKind::Integer),
    FieldSpec::optional("status", FieldKind::String),
    FieldSpec::optional("metadata", FieldKind::Object),
    FieldSpec::optional("sent_to_production_at", FieldKind::String),
    FieldSpec::optional("fulfilled_at", FieldKind::String),
];

/// A tracked shipment of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub carrier: String,
    /// Tracking number.
    pub number: String,
    pub url: Option<String>,
    pub delivered_at: Option<String>,
}

const SHIPMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("carrier", FieldKind::String),
    FieldSpec::required("number", FieldKind::Identifier),
    FieldSpec::optional("url", FieldKind::String),
    FieldSpec::optional("delivered_at", FieldKind::String),
];

/// An order of a shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub address_to: Address,
    pub line_items: Vec<OrderLineItem>,
    pub metadata: Option<Value>,
    /// Totals in minor units.
    pub total_price: Option<i64>,
    pub total_shipping: Option<i64>,
    pub total_tax: Option<i64>,
    pub status: Option<String>,
    pub shipping_method: Option<u64>,
    pub created_at: Option<String>,
    pub sent_to_production_at: Option<String>,
    pub shipments: Vec<Shipment>,
    pub fulfilled_at: Option<String>,
    pub fulfilment_type: Option<String>,
}

impl Record for Order {
    const NAME: &'static str = "Order";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::Identifier),
        FieldSpec::required("address_to", FieldKind::Record(ADDRESS_FIELDS)),
        FieldSpec::list("line_items", &FieldKind::Record(ORDER_LINE_ITEM_FIELDS)),
        FieldSpec::optional("metadata", FieldKind::Object),
        FieldSpec::optional("total_price", FieldKind::Integer),
        FieldSpec::optional("total_shipping", FieldKind::Integer),
        FieldSpec::optional("total_tax", FieldKind::Integer),
        FieldSpec::optional("status", FieldKind::String),
        FieldSpec::optional("shipping_method", FieldKind::Unsigned),
        FieldSpec::optional("created_at", FieldKind::String),
        FieldSpec::optional("sent_to_production_at", FieldKind::String),
        FieldSpec::list("shipments", &FieldKind::Record(SHIPMENT_FIELDS)),
        FieldSpec::optional("fulfilled_at", FieldKind::String),
        FieldSpec::optional("fulfilment_type", FieldKind::String),
    ];
}

impl Order {
    /// Parses `created_at`.
    #[must_use]
    pub fn created_at_time(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Returns the total of price, shipping and tax in minor units.
    #[must_use]
    pub fn grand_total(&self) -> i64 {
        self.total_price.unwrap_or(0)
            + self.total_shipping.unwrap_or(0)
            + self.total_tax.unwrap_or(0)
    }
}

/// A line item referring to a product of the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLineItem {
    pub product_id: String,
    pub variant_id: u64,
    pub quantity: u64,
}

const PRODUCT_LINE_ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("product_id", FieldKind::Identifier),
    FieldSpec::required("variant_id", FieldKind::Unsigned),
    FieldSpec::required("quantity", FieldKind::Unsigned),
];

/// A line item built directly from a catalog blueprint.
///
/// `print_areas` / `print_details` carry the artwork for orders placed
/// without an existing product; leave them unset for shipping estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogLineItem {
    pub blueprint_id: u64,
    pub print_provider_id: u64,
    pub variant_id: u64,
    pub quantity: u64,
    pub print_areas: Option<Value>,
    pub print_details: Option<Value>,
}

const CATALOG_LINE_ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("blueprint_id", FieldKind::Unsigned),
    FieldSpec::required("print_provider_id", FieldKind::Unsigned),
    FieldSpec::required("variant_id", FieldKind::Unsigned),
    FieldSpec::required("quantity", FieldKind::Unsigned),
    FieldSpec::optional("print_areas", FieldKind::Object),
    FieldSpec::optional("print_details", FieldKind::Object),
];

/// A line item identified by SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuLineItem {
    pub sku: String,
    pub quantity: u64,
}

const SKU_LINE_ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("sku", FieldKind::String),
    FieldSpec::required("quantity", FieldKind::Unsigned),
];

/// One requested item of a new order or a shipping estimate.
///
/// The variant is picked by the keys present on the wire, in declaration
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderItem {
    /// An existing product variant.
    Product(ProductLineItem),
    /// A catalog variant, optionally with artwork.
    Catalog(CatalogLineItem),
    /// A SKU of the shop.
    Sku(SkuLineItem),
}

impl OrderItem {
    /// An existing product variant.
    #[must_use]
    pub fn product(product_id: impl Into<String>, variant_id: u64, quantity: u64) -> Self {
        Self::Product(ProductLineItem {
            product_id: product_id.into(),
            variant_id,
            quantity,
        })
    }

    /// A catalog variant without artwork.
    #[must_use]
    pub const fn catalog(
        blueprint_id: u64,
        print_provider_id: u64,
        variant_id: u64,
        quantity: u64,
    ) -> Self {
        Self::Catalog(CatalogLineItem {
            blueprint_id,
            print_provider_id,
            variant_id,
            quantity,
            print_areas: None,
            print_details: None,
        })
    }

    /// A SKU.
    #[must_use]
    pub fn sku(sku: impl Into<String>, quantity: u64) -> Self {
        Self::Sku(SkuLineItem {
            sku: sku.into(),
            quantity,
        })
    }
}

const ORDER_ITEM: FieldKind = FieldKind::OneOf(&[
    PRODUCT_LINE_ITEM_FIELDS,
    CATALOG_LINE_ITEM_FIELDS,
    SKU_LINE_ITEM_FIELDS,
]);

/// Payload for creating an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Your own reference for the order.
    pub external_id: String,
    pub line_items: Vec<OrderItem>,
    pub address_to: Address,
    pub label: Option<String>,
    /// `1` standard, `2` priority, `3` Printify Express, `4` economy.
    pub shipping_method: Option<u64>,
    pub send_shipping_notification: Option<bool>,
}

impl NewOrder {
    /// Starts an order shipping to `address_to`.
    #[must_use]
    pub fn new(external_id: impl Into<String>, address_to: Address) -> Self {
        Self {
            external_id: external_id.into(),
            line_items: Vec::new(),
            address_to,
            label: None,
            shipping_method: None,
            send_shipping_notification: None,
        }
    }

    /// Appends a line item.
    pub fn add_item(&mut self, item: OrderItem) -> &mut Self {
        self.line_items.push(item);
        self
    }
}

impl Record for NewOrder {
    const NAME: &'static str = "NewOrder";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("external_id", FieldKind::Identifier),
        FieldSpec::optional("label", FieldKind::String),
        FieldSpec::required("line_items", FieldKind::List(&ORDER_ITEM)),
        FieldSpec::optional("shipping_method", FieldKind::Unsigned),
        FieldSpec::optional("send_shipping_notification", FieldKind::Boolean),
        FieldSpec::required("address_to", FieldKind::Record(ADDRESS_FIELDS)),
    ];
}

/// The id Printify assigned to a new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub id: String,
}

impl Record for CreatedOrder {
    const NAME: &'static str = "CreatedOrder";
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::required("id", FieldKind::Identifier)];
}

/// Items and destination to price shipping for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingEstimate {
    pub line_items: Vec<OrderItem>,
    pub address_to: Address,
}

impl Record for ShippingEstimate {
    const NAME: &'static str = "ShippingEstimate";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("line_items", FieldKind::List(&ORDER_ITEM)),
        FieldSpec::required("address_to", FieldKind::Record(ADDRESS_FIELDS)),
    ];
}

/// Shipping price per method, in minor units. Unavailable methods are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingCost {
    pub standard: i64,
    pub express: Option<i64>,
    pub priority: Option<i64>,
    pub printify_express: Option<i64>,
    pub economy: Option<i64>,
}

impl Record for ShippingCost {
    const NAME: &'static str = "ShippingCost";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("standard", FieldKind::Integer),
        FieldSpec::optional("express", FieldKind::Integer),
        FieldSpec::optional("priority", FieldKind::Integer),
        FieldSpec::optional("printify_express", FieldKind::Integer),
        FieldSpec::optional("economy", FieldKind::Integer),
    ];
}

/// Query parameters for [`Orders::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderListParams {
    /// Results per page (the API caps this at 10).
    pub limit: Option<u32>,
    /// First page to fetch.
    pub page: Option<u32>,
    /// Only orders with this status, e.g. `fulfilled`.
    pub status: Option<String>,
    /// Only orders containing this SKU.
    pub sku: Option<String>,
}

/// Client for `shops/{shop_id}/orders*.json`.
#[derive(Clone, Debug)]
pub struct Orders {
    client: Arc<HttpClient>,
    shop_id: Option<ShopId>,
}

impl Orders {
    /// Creates an orders client using the configured default shop.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            shop_id: None,
        }
    }

    /// Scopes this client to `shop_id` instead of the default shop.
    #[must_use]
    pub fn with_shop(mut self, shop_id: ShopId) -> Self {
        self.shop_id = Some(shop_id);
        self
    }

    /// Walks the orders of the shop, lazily.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError::Validation`] if `params` cannot be encoded.
    pub fn list(&self, params: &OrderListParams) -> Result<RecordPaginator<Order>, PrintifyError> {
        let query = serialize_to_query(params)?;
        let path = format!("shops/{SHOP_ID_PLACEHOLDER}/orders.json");
        let paginator = Paginator::new(Arc::clone(&self.client), path, Some(query))
            .with_shop(self.shop_id.clone());
        Ok(RecordPaginator::new(paginator))
    }

    /// Fetches one order.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request or the mapping fails.
    pub async fn get(&self, order_id: &str) -> Result<Order, PrintifyError> {
        let body = self
            .client
            .get(&order_path(order_id, ""), self.shop_id.as_ref(), None)
            .await?;
        Ok(mapping::from_value(&body)?)
    }

    /// Submits an order.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if encoding, the request or the mapping fails.
    pub async fn create(&self, order: &NewOrder) -> Result<CreatedOrder, PrintifyError> {
        let path = format!("shops/{SHOP_ID_PLACEHOLDER}/orders.json");
        let body = self
            .client
            .post(&path, self.shop_id.as_ref(), Some(mapping::to_value(order)?))
            .await?;
        Ok(mapping::from_value(&body)?)
    }

    /// Sends an on-hold order to production.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request or the mapping fails.
    pub async fn send_to_production(&self, order_id: &str) -> Result<Order, PrintifyError> {
        self.action(order_id, "send_to_production").await
    }

    /// Cancels an unpaid or on-hold order.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request or the mapping fails.
    pub async fn cancel(&self, order_id: &str) -> Result<Order, PrintifyError> {
        self.action(order_id, "cancel").await
    }

    /// Prices shipping for a prospective order.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if encoding, the request or the mapping fails.
    pub async fn calculate_shipping(
        &self,
        estimate: &ShippingEstimate,
    ) -> Result<ShippingCost, PrintifyError> {
        let path = format!("shops/{SHOP_ID_PLACEHOLDER}/orders/shipping.json");
        let body = self
            .client
            .post(&path, self.shop_id.as_ref(), Some(mapping::to_value(estimate)?))
            .await?;
        Ok(mapping::from_value(&body)?)
    }

    async fn action(&self, order_id: &str, action: &str) -> Result<Order, PrintifyError> {
        let path = order_path(order_id, &format!("/{action}"));
        let body = self.client.post(&path, self.shop_id.as_ref(), None).await?;
        Ok(mapping::from_value(&body)?)
    }
}

fn order_path(order_id: &str, suffix: &str) -> String {
    format!(
        "shops/{SHOP_ID_PLACEHOLDER}/orders/{}{suffix}.json",
        segment(order_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn address() -> Address {
        Address {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            address1: "ExampleBaan 121".to_string(),
            city: "Retie".to_string(),
            country: "BE".to_string(),
            region: String::new(),
            zip: "2470".to_string(),
            email: Some("example@msn.com".to_string()),
            ..Address::default()
        }
    }

    #[test]
    fn test_new_order_encodes_each_item_kind() {
        let mut order = NewOrder::new("2750e210-39bb-11e9-a503-452618153e4a", address());
        order
            .add_item(OrderItem::product("5bfd0b66a342bcc9b5563216", 17887, 1))
            .add_item(OrderItem::catalog(384, 1, 45740, 2))
            .add_item(OrderItem::sku("MY-SKU", 3));

        let body = mapping::to_value(&order).unwrap();
        assert_eq!(
            body["line_items"],
            json!([
                {"product_id": "5bfd0b66a342bcc9b5563216", "variant_id": 17887, "quantity": 1},
                {"blueprint_id": 384, "print_provider_id": 1, "variant_id": 45740, "quantity": 2},
                {"sku": "MY-SKU", "quantity": 3}
            ])
        );
        assert!(body["address_to"].get("phone").is_none());
        assert!(body.get("label").is_none());
    }

    #[test]
    fn test_new_order_round_trip() {
        let mut order = NewOrder::new("ext-1", address());
        order.add_item(OrderItem::sku("A", 1));
        order.shipping_method = Some(1);

        let again: NewOrder = mapping::from_value(&mapping::to_value(&order).unwrap()).unwrap();
        assert_eq!(order, again);
    }

    #[test]
    fn test_order_with_shipments() {
        let order: Order = mapping::from_value(&json!({
            "id": "5a96f649b2439217d070f507",
            "address_to": {
                "first_name": "John", "last_name": "Smith", "region": "", "address1": "ExampleBaan 121",
                "city": "Retie", "zip": "2470", "email": "example@msn.com", "phone": "0574 69 21 90",
                "country": "BE", "company": "MSN"
            },
            "line_items": [
                {"product_id": "5b05842f3921c9547531758d", "quantity": 1, "variant_id": 17887,
                 "print_provider_id": 5, "cost": 1050, "shipping_cost": 400, "status": "pending",
                 "metadata": {"title": "18K gold plated Necklace", "price": 2200}}
            ],
            "metadata": {"order_type": "external", "shop_order_id": 1370762297},
            "total_price": 2200,
            "total_shipping": 400,
            "total_tax": 0,
            "status": "pending",
            "shipping_method": 1,
            "shipments": [
                {"carrier": "usps", "number": 94001, "url": "http://example.com/94001",
                 "delivered_at": "2017-04-18 13:24:28+00:00"}
            ],
            "created_at": "2017-04-18 13:24:28+00:00"
        }))
        .unwrap();

        assert_eq!(order.address_to.company.as_deref(), Some("MSN"));
        assert_eq!(order.line_items[0].metadata.as_ref().unwrap()["price"], 2200);
        assert_eq!(order.shipments[0].number, "94001");
        assert_eq!(order.grand_total(), 2600);
        assert!(order.created_at_time().is_some());
    }

    #[test]
    fn test_shipping_estimate_rejects_incomplete_item() {
        let result = mapping::from_value::<ShippingEstimate>(&json!({
            "line_items": [{"variant_id": 1, "quantity": 1}],
            "address_to": {
                "first_name": "a", "last_name": "b", "address1": "c", "city": "d",
                "country": "US", "region": "NY", "zip": "1"
            }
        }));
        assert!(matches!(
            result,
            Err(mapping::ValidationError::MissingField { field, .. }) if field == "line_items[0].product_id"
        ));
    }

    #[test]
    fn test_shipping_cost_optional_methods() {
        let cost: ShippingCost =
            mapping::from_value(&json!({"standard": 1000, "express": 5000})).unwrap();
        assert_eq!(cost.priority, None);
        assert_eq!(cost.express, Some(5000));
    }
}
