//! Products of a shop and their publishing workflow.
//!
//! Monetary values (`price`, `cost`) are integers in minor currency units.
//! Print-area geometry (`x`, `y`, `scale`, `angle`) is the only floating
//! point data.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpClient, Paginator, RecordPaginator, SHOP_ID_PLACEHOLDER};
use crate::config::ShopId;
use crate::error::PrintifyError;
use crate::mapping::{self, parse_timestamp, FieldDefault, FieldKind, FieldSpec, Record};
use crate::resources::{segment, serialize_to_query};

/// A value of a product option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOptionValue {
    pub id: u64,
    pub title: String,
}

const OPTION_VALUE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", FieldKind::Unsigned),
    FieldSpec::required("title", FieldKind::String),
];

/// An option axis of a product, such as color or size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub name: String,
    /// Wire key `type`.
    pub kind: String,
    pub values: Vec<ProductOptionValue>,
}

const OPTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", FieldKind::String),
    FieldSpec::required("kind", FieldKind::String).renamed("type"),
    FieldSpec::list("values", &FieldKind::Record(OPTION_VALUE_FIELDS)),
];

/// A sellable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: u64,
    /// Retail price in minor units.
    pub price: u64,
    pub is_enabled: bool,
    pub sku: Option<String>,
    /// Production cost in minor units.
    pub cost: Option<u64>,
    pub title: Option<String>,
    pub grams: Option<u64>,
    pub is_default: Option<bool>,
    pub is_available: Option<bool>,
    /// Option value ids, one per [`ProductOption`].
    pub options: Vec<u64>,
    pub quantity: Option<u64>,
}

const VARIANT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", FieldKind::Unsigned),
    FieldSpec::required("price", FieldKind::Unsigned),
    FieldSpec::required("is_enabled", FieldKind::Boolean),
    FieldSpec::optional("sku", FieldKind::String),
    FieldSpec::optional("cost", FieldKind::Unsigned),
    FieldSpec::optional("title", FieldKind::String),
    FieldSpec::optional("grams", FieldKind::Unsigned),
    FieldSpec::optional("is_default", FieldKind::Boolean),
    FieldSpec::optional("is_available", FieldKind::Boolean),
    FieldSpec::list("options", &FieldKind::Unsigned),
    FieldSpec::optional("quantity", FieldKind::Unsigned),
];

/// A mockup image of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub src: String,
    pub position: String,
    pub variant_ids: Vec<u64>,
    pub is_default: bool,
    pub is_selected_for_publishing: Option<bool>,
}

const IMAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("src", FieldKind::String),
    FieldSpec::required("position", FieldKind::String),
    FieldSpec::list("variant_ids", &FieldKind::Unsigned),
    FieldSpec::optional("is_default", FieldKind::Boolean)
        .with_default(FieldDefault::Bool(false)),
    FieldSpec::optional("is_selected_for_publishing", FieldKind::Boolean),
];

/// An uploaded image placed inside a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderImage {
    /// Artwork id (see [`Artwork`](crate::resources::Artwork)).
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub angle: f64,
    pub name: Option<String>,
    /// Wire key `type`, e.g. `image/png`.
    pub kind: Option<String>,
    pub height: Option<u64>,
    pub width: Option<u64>,
}

impl PlaceholderImage {
    /// Places artwork `id` centered at full scale.
    #[must_use]
    pub fn centered(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            x: 0.5,
            y: 0.5,
            scale: 1.0,
            angle: 0.0,
            name: None,
            kind: None,
            height: None,
            width: None,
        }
    }
}

const PLACEHOLDER_IMAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", FieldKind::Identifier),
    FieldSpec::required("x", FieldKind::Float),
    FieldSpec::required("y", FieldKind::Float),
    FieldSpec::required("scale", FieldKind::Float),
    FieldSpec::required("angle", FieldKind::Float),
    FieldSpec::optional("name", FieldKind::String),
    FieldSpec::optional("kind", FieldKind::String).renamed("type"),
    FieldSpec::optional("height", FieldKind::Unsigned),
    FieldSpec::optional("width", FieldKind::Unsigned),
];

/// A print position (front, back, ...) and the images placed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub position: String,
    pub images: Vec<PlaceholderImage>,
}

const PLACEHOLDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("position", FieldKind::String),
    FieldSpec::list("images", &FieldKind::Record(PLACEHOLDER_IMAGE_FIELDS)),
];

/// The print layout shared by a group of variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintArea {
    pub variant_ids: Vec<u64>,
    pub placeholders: Vec<Placeholder>,
    /// Background color as hex, e.g. `#ffffff`.
    pub background: Option<String>,
}

const PRINT_AREA_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("variant_ids", FieldKind::List(&FieldKind::Unsigned)),
    FieldSpec::required(
        "placeholders",
        FieldKind::List(&FieldKind::Record(PLACEHOLDER_FIELDS)),
    ),
    FieldSpec::optional("background", FieldKind::String),
];

/// The sales-channel listing a product is published as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductExternal {
    pub id: String,
    pub handle: String,
    pub shipping_template_id: Option<String>,
    pub channel: Option<String>,
}

const EXTERNAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", FieldKind::Identifier),
    FieldSpec::required("handle", FieldKind::String),
    FieldSpec::optional("shipping_template_id", FieldKind::Identifier),
    FieldSpec::optional("channel", FieldKind::String),
];

/// A product of a shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub blueprint_id: u64,
    pub print_provider_id: u64,
    pub shop_id: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub options: Vec<ProductOption>,
    pub variants: Vec<ProductVariant>,
    pub images: Vec<ProductImage>,
    pub print_areas: Vec<PrintArea>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub visible: Option<bool>,
    pub is_locked: Option<bool>,
    pub user_id: Option<u64>,
    pub twodaydelivery_enabled: Option<bool>,
    pub external: Option<ProductExternal>,
}

impl Record for Product {
    const NAME: &'static str = "Product";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::Identifier),
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::required("blueprint_id", FieldKind::Unsigned),
        FieldSpec::required("print_provider_id", FieldKind::Unsigned),
        FieldSpec::required("shop_id", FieldKind::Identifier),
        FieldSpec::optional("description", FieldKind::String),
        FieldSpec::list("tags", &FieldKind::String),
        FieldSpec::list("options", &FieldKind::Record(OPTION_FIELDS)),
        FieldSpec::list("variants", &FieldKind::Record(VARIANT_FIELDS)),
        FieldSpec::list("images", &FieldKind::Record(IMAGE_FIELDS)),
        FieldSpec::list("print_areas", &FieldKind::Record(PRINT_AREA_FIELDS)),
        FieldSpec::optional("created_at", FieldKind::String),
        FieldSpec::optional("updated_at", FieldKind::String),
        FieldSpec::optional("visible", FieldKind::Boolean),
        FieldSpec::optional("is_locked", FieldKind::Boolean),
        FieldSpec::optional("user_id", FieldKind::Unsigned),
        FieldSpec::optional("twodaydelivery_enabled", FieldKind::Boolean),
        FieldSpec::optional("external", FieldKind::Record(EXTERNAL_FIELDS)),
    ];
}

impl Product {
    /// Parses `created_at`.
    #[must_use]
    pub fn created_at_time(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Parses `updated_at`.
    #[must_use]
    pub fn updated_at_time(&self) -> Option<DateTime<FixedOffset>> {
        self.updated_at.as_deref().and_then(parse_timestamp)
    }

    /// Returns the enabled variants, in order.
    pub fn enabled_variants(&self) -> impl Iterator<Item = &ProductVariant> {
        self.variants.iter().filter(|variant| variant.is_enabled)
    }
}

/// A variant selection when creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProductVariant {
    /// Catalog variant id.
    pub id: u64,
    /// Retail price in minor units.
    pub price: u64,
    pub is_enabled: bool,
}

const NEW_VARIANT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", FieldKind::Unsigned),
    FieldSpec::required("price", FieldKind::Unsigned),
    FieldSpec::required("is_enabled", FieldKind::Boolean),
];

/// Payload for creating a product.
///
/// # Example
///
/// ```rust
/// use printify_api::resources::{NewProduct, PlaceholderImage};
///
/// let mut product = NewProduct::new("Mug", 68);
/// product.print_provider_id = Some(1);
/// product.add_variant(33719, 1299);
/// product.add_print_area(vec![33719], "front", vec![PlaceholderImage::centered("5d15ca551163cde90d7b2203")]);
///
/// assert_eq!(product.variants.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub blueprint_id: u64,
    pub description: Option<String>,
    pub print_provider_id: Option<u64>,
    pub tags: Vec<String>,
    pub variants: Vec<NewProductVariant>,
    pub print_areas: Vec<PrintArea>,
}

impl NewProduct {
    /// Starts a product from a blueprint.
    #[must_use]
    pub fn new(title: impl Into<String>, blueprint_id: u64) -> Self {
        Self {
            title: title.into(),
            blueprint_id,
            description: None,
            print_provider_id: None,
            tags: Vec::new(),
            variants: Vec::new(),
            print_areas: Vec::new(),
        }
    }

    /// Adds an enabled variant at `price` minor units.
    pub fn add_variant(&mut self, variant_id: u64, price: u64) -> &mut Self {
        self.variants.push(NewProductVariant {
            id: variant_id,
            price,
            is_enabled: true,
        });
        self
    }

    /// Adds a print area with a single placeholder.
    pub fn add_print_area(
        &mut self,
        variant_ids: Vec<u64>,
        position: impl Into<String>,
        images: Vec<PlaceholderImage>,
    ) -> &mut Self {
        self.print_areas.push(PrintArea {
            variant_ids,
            placeholders: vec![Placeholder {
                position: position.into(),
                images,
            }],
            background: None,
        });
        self
    }
}

impl Record for NewProduct {
    const NAME: &'static str = "NewProduct";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::required("blueprint_id", FieldKind::Unsigned),
        FieldSpec::optional("description", FieldKind::String),
        FieldSpec::optional("print_provider_id", FieldKind::Unsigned),
        FieldSpec::list("tags", &FieldKind::String),
        FieldSpec::list("variants", &FieldKind::Record(NEW_VARIANT_FIELDS)),
        FieldSpec::list("print_areas", &FieldKind::Record(PRINT_AREA_FIELDS)),
    ];
}

/// Partial update of a product's sales-channel listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductExternalUpdate {
    pub id: Option<String>,
    pub handle: Option<String>,
    pub shipping_template_id: Option<String>,
}

const EXTERNAL_UPDATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("id", FieldKind::Identifier),
    FieldSpec::optional("handle", FieldKind::String),
    FieldSpec::optional("shipping_template_id", FieldKind::Identifier),
];

/// Partial product update. Unset fields are not sent.
///
/// ```rust
/// use printify_api::mapping::to_mapping;
/// use printify_api::resources::ProductUpdate;
///
/// let update = ProductUpdate {
///     title: Some("Renamed".to_string()),
///     ..ProductUpdate::default()
/// };
/// let body = to_mapping(&update).unwrap();
/// assert_eq!(body.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub blueprint_id: Option<u64>,
    pub print_provider_id: Option<u64>,
    pub tags: Option<Vec<String>>,
    pub variants: Option<Vec<NewProductVariant>>,
    pub print_areas: Option<Vec<PrintArea>>,
    pub external: Option<ProductExternalUpdate>,
}

impl Record for ProductUpdate {
    const NAME: &'static str = "ProductUpdate";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("title", FieldKind::String),
        FieldSpec::optional("description", FieldKind::String),
        FieldSpec::optional("blueprint_id", FieldKind::Unsigned),
        FieldSpec::optional("print_provider_id", FieldKind::Unsigned),
        FieldSpec::optional("tags", FieldKind::List(&FieldKind::String)),
        FieldSpec::optional(
            "variants",
            FieldKind::List(&FieldKind::Record(NEW_VARIANT_FIELDS)),
        ),
        FieldSpec::optional(
            "print_areas",
            FieldKind::List(&FieldKind::Record(PRINT_AREA_FIELDS)),
        ),
        FieldSpec::optional("external", FieldKind::Record(EXTERNAL_UPDATE_FIELDS)),
    ];
}

/// Which product attributes the sales channel should take over on publish.
///
/// Every flag defaults to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publish {
    pub title: bool,
    pub description: bool,
    pub images: bool,
    pub variants: bool,
    pub tags: bool,
    /// Wire key `keyFeatures`.
    pub key_features: bool,
    pub shipping_template: bool,
}

impl Default for Publish {
    fn default() -> Self {
        Self {
            title: true,
            description: true,
            images: true,
            variants: true,
            tags: true,
            key_features: true,
            shipping_template: true,
        }
    }
}

impl Record for Publish {
    const NAME: &'static str = "Publish";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("title", FieldKind::Boolean).with_default(FieldDefault::Bool(true)),
        FieldSpec::optional("description", FieldKind::Boolean)
            .with_default(FieldDefault::Bool(true)),
        FieldSpec::optional("images", FieldKind::Boolean).with_default(FieldDefault::Bool(true)),
        FieldSpec::optional("variants", FieldKind::Boolean)
            .with_default(FieldDefault::Bool(true)),
        FieldSpec::optional("tags", FieldKind::Boolean).with_default(FieldDefault::Bool(true)),
        FieldSpec::optional("key_features", FieldKind::Boolean)
            .renamed("keyFeatures")
            .with_default(FieldDefault::Bool(true)),
        FieldSpec::optional("shipping_template", FieldKind::Boolean)
            .with_default(FieldDefault::Bool(true)),
    ];
}

/// The listing created by a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedExternal {
    pub id: String,
    pub handle: String,
}

const PUBLISHED_EXTERNAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", FieldKind::Identifier),
    FieldSpec::required("handle", FieldKind::String),
];

/// Confirmation that a publish completed on the sales channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishingSucceeded {
    pub external: PublishedExternal,
}

impl PublishingSucceeded {
    /// Builds a confirmation for listing `id` at `handle`.
    #[must_use]
    pub fn new(id: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            external: PublishedExternal {
                id: id.into(),
                handle: handle.into(),
            },
        }
    }
}

impl Record for PublishingSucceeded {
    const NAME: &'static str = "PublishingSucceeded";
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::required(
        "external",
        FieldKind::Record(PUBLISHED_EXTERNAL_FIELDS),
    )];
}

/// Query parameters for [`Products::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductListParams {
    /// Results per page (the API caps this at 50).
    pub limit: Option<u32>,
    /// First page to fetch.
    pub page: Option<u32>,
}

/// Client for `shops/{shop_id}/products*.json`.
///
/// # Example
///
/// ```rust,ignore
/// use printify_api::resources::{ProductListParams, Publish};
///
/// let products = printify.products();
/// let mut listing = products.list(&ProductListParams::default())?;
/// while let Some(product) = listing.next_item().await? {
///     if product.external.is_none() {
///         products.publish(&product.id, &Publish::default()).await?;
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Products {
    client: Arc<HttpClient>,
    shop_id: Option<ShopId>,
}

impl Products {
    /// Creates a products client using the configured default shop.
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

    /// Walks the products of the shop, lazily.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError::Validation`] if `params` cannot be encoded.
    /// Request failures surface from the returned paginator.
    pub fn list(
        &self,
        params: &ProductListParams,
    ) -> Result<RecordPaginator<Product>, PrintifyError> {
        let query = serialize_to_query(params)?;
        let path = format!("shops/{SHOP_ID_PLACEHOLDER}/products.json");
        let paginator =
            Paginator::new(Arc::clone(&self.client), path, Some(query)).with_shop(self.shop_id.clone());
        Ok(RecordPaginator::new(paginator))
    }

    /// Fetches one product.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request or the mapping fails.
    pub async fn get(&self, product_id: &str) -> Result<Product, PrintifyError> {
        let body = self
            .client
            .get(&product_path(product_id, ""), self.shop_id.as_ref(), None)
            .await?;
        Ok(mapping::from_value(&body)?)
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if encoding, the request or the mapping fails.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, PrintifyError> {
        let path = format!("shops/{SHOP_ID_PLACEHOLDER}/products.json");
        let body = self
            .client
            .post(&path, self.shop_id.as_ref(), Some(mapping::to_value(product)?))
            .await?;
        Ok(mapping::from_value(&body)?)
    }

    /// Updates the fields set in `update`.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if encoding, the request or the mapping fails.
    pub async fn update(
        &self,
        product_id: &str,
        update: &ProductUpdate,
    ) -> Result<Product, PrintifyError> {
        let body = self
            .client
            .put(
                &product_path(product_id, ""),
                self.shop_id.as_ref(),
                mapping::to_value(update)?,
            )
            .await?;
        Ok(mapping::from_value(&body)?)
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request fails.
    pub async fn delete(&self, product_id: &str) -> Result<(), PrintifyError> {
        self.client
            .delete(&product_path(product_id, ""), self.shop_id.as_ref())
            .await?;
        Ok(())
    }

    /// Publishes a product to the shop's sales channel.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if encoding or the request fails.
    pub async fn publish(&self, product_id: &str, publish: &Publish) -> Result<(), PrintifyError> {
        self.action(product_id, "publish", Some(mapping::to_value(publish)?))
            .await
    }

    /// Marks a publish as completed on the sales channel.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if encoding or the request fails.
    pub async fn publishing_succeeded(
        &self,
        product_id: &str,
        succeeded: &PublishingSucceeded,
    ) -> Result<(), PrintifyError> {
        self.action(
            product_id,
            "publishing_succeeded",
            Some(mapping::to_value(succeeded)?),
        )
        .await
    }

    /// Marks a publish as failed, with a reason shown to the merchant.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request fails.
    pub async fn publishing_failed(&self, product_id: &str, reason: &str) -> Result<(), PrintifyError> {
        self.action(product_id, "publishing_failed", Some(json!({ "reason": reason })))
            .await
    }

    /// Notifies Printify that the product was removed from the sales channel.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request fails.
    pub async fn unpublish(&self, product_id: &str) -> Result<(), PrintifyError> {
        self.action(product_id, "unpublish", None).await
    }

    async fn action(
        &self,
        product_id: &str,
        action: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), PrintifyError> {
        let path = product_path(product_id, &format!("/{action}"));
        self.client.post(&path, self.shop_id.as_ref(), body).await?;
        Ok(())
    }
}

fn product_path(product_id: &str, suffix: &str) -> String {
    format!(
        "shops/{SHOP_ID_PLACEHOLDER}/products/{}{suffix}.json",
        segment(product_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_json() -> serde_json::Value {
        json!({
            "id": "5d39b159e7c48c000728c89f",
            "title": "Mug 11oz",
            "description": "Perfect for coffee",
            "tags": ["Home & Living", "Mugs"],
            "options": [
                {"name": "Sizes", "type": "size", "values": [{"id": 1189, "title": "11oz"}]}
            ],
            "variants": [
                {"id": 33719, "sku": "866366009", "cost": 400, "price": 1000, "title": "11oz",
                 "grams": 460, "is_enabled": true, "is_default": true, "is_available": true,
                 "options": [1189]},
                {"id": 33720, "price": 1200, "is_enabled": false}
            ],
            "images": [
                {"src": "https://images.printify.com/mockup/a.jpg", "variant_ids": [33719],
                 "position": "other", "is_default": false}
            ],
            "created_at": "2019-07-25 13:40:41+00:00",
            "updated_at": "2019-07-25 13:40:59+00:00",
            "visible": true,
            "is_locked": false,
            "blueprint_id": 68,
            "user_id": 1337,
            "shop_id": 1337,
            "print_provider_id": 9,
            "print_areas": [
                {
                    "variant_ids": [33719],
                    "placeholders": [
                        {"position": "front", "images": [
                            {"id": "5d15ca551163cde90d7b2203", "name": "a.png", "type": "image/png",
                             "height": 5400, "width": 5400, "x": 0.5, "y": 0.5, "scale": 1, "angle": 0}
                        ]}
                    ],
                    "background": "#ffffff"
                }
            ],
            "sales_channel_properties": []
        })
    }

    #[test]
    fn test_product_maps_nested_records() {
        let product: Product = mapping::from_value(&product_json()).unwrap();

        assert_eq!(product.shop_id, "1337");
        assert_eq!(product.options[0].kind, "size");
        assert_eq!(product.variants[0].cost, Some(400));
        assert_eq!(product.variants[1].options, Vec::<u64>::new());
        assert_eq!(product.enabled_variants().count(), 1);
        let image = &product.print_areas[0].placeholders[0].images[0];
        assert_eq!(image.kind.as_deref(), Some("image/png"));
        assert!((image.scale - 1.0).abs() < f64::EPSILON);
        assert!(product.external.is_none());
    }

    #[test]
    fn test_product_timestamps() {
        let product: Product = mapping::from_value(&product_json()).unwrap();
        assert_eq!(
            product.created_at_time().unwrap().to_rfc3339(),
            "2019-07-25T13:40:41+00:00"
        );
    }

    #[test]
    fn test_product_round_trip_uses_wire_keys() {
        let product: Product = mapping::from_value(&product_json()).unwrap();
        let wire = mapping::to_mapping(&product).unwrap();

        assert_eq!(wire["options"][0]["type"], "size");
        assert!(wire["options"][0].get("kind").is_none());
        assert!(!wire.contains_key("sales_channel_properties"));

        let again: Product = mapping::from_mapping(&wire).unwrap();
        assert_eq!(product, again);
    }

    #[test]
    fn test_new_product_ignores_unknown_keys() {
        let product: NewProduct = mapping::from_value(&json!({
            "title": "Testy",
            "blueprint_id": 1094,
            "variants": [{"id": 81870, "price": 999, "is_enabled": true}],
            "unexpected_field": "x"
        }))
        .unwrap();

        assert_eq!(product.title, "Testy");
        assert_eq!(product.blueprint_id, 1094);
        assert_eq!(product.variants.len(), 1);
        assert_eq!(product.variants[0].price, 999);
        assert!(product.tags.is_empty());
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_missing_variant_price_reports_path() {
        let result = mapping::from_value::<NewProduct>(&json!({
            "title": "Testy",
            "blueprint_id": 1094,
            "variants": [{"id": 1, "is_enabled": true}]
        }));
        assert!(matches!(
            result,
            Err(mapping::ValidationError::MissingField { field, .. }) if field == "variants[0].price"
        ));
    }

    #[test]
    fn test_negative_price_reports_path() {
        let result = mapping::from_value::<NewProduct>(&json!({
            "title": "Testy",
            "blueprint_id": 1094,
            "variants": [{"id": 81870, "price": -5, "is_enabled": true}]
        }));
        assert!(matches!(
            result,
            Err(mapping::ValidationError::InvalidShape { field, expected: "a non-negative integer", .. })
                if field == "variants[0].price"
        ));
    }

    #[test]
    fn test_negative_option_id_reports_path() {
        let mut raw = product_json();
        raw["variants"][1]["options"] = json!([-1]);
        let result = mapping::from_value::<Product>(&raw);
        assert!(matches!(
            result,
            Err(mapping::ValidationError::InvalidShape { field, .. }) if field == "variants[1].options[0]"
        ));
    }

    #[test]
    fn test_publish_defaults_and_rename() {
        let publish: Publish = mapping::from_value(&json!({"tags": false})).unwrap();
        assert!(publish.title);
        assert!(!publish.tags);

        let body = mapping::to_mapping(&Publish::default()).unwrap();
        assert_eq!(body["keyFeatures"], json!(true));
        assert!(!body.contains_key("key_features"));
        assert_eq!(body.len(), 7);
    }

    #[test]
    fn test_update_omits_unset_fields() {
        let update = ProductUpdate {
            tags: Some(vec!["new".to_string()]),
            external: Some(ProductExternalUpdate {
                handle: Some("/products/x".to_string()),
                ..ProductExternalUpdate::default()
            }),
            ..ProductUpdate::default()
        };

        let body = mapping::to_value(&update).unwrap();
        assert_eq!(
            body,
            json!({"tags": ["new"], "external": {"handle": "/products/x"}})
        );
    }

    #[test]
    fn test_product_path_encodes_id() {
        assert_eq!(
            product_path("abc", "/publish"),
            "shops/{shop_id}/products/abc/publish.json"
        );
        assert_eq!(product_path("a/b", ""), "shops/{shop_id}/products/a%2Fb.json");
    }
}
