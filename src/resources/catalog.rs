//! The Printify catalog: blueprints, print providers, variants and shipping.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clients::HttpClient;
use crate::error::PrintifyError;
use crate::mapping::{self, FieldKind, FieldSpec, Record};

/// A blank product model that print providers can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub brand: String,
    pub model: String,
    /// Image URLs.
    pub images: Vec<String>,
}

impl Record for Blueprint {
    const NAME: &'static str = "Blueprint";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::Unsigned),
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::required("description", FieldKind::String),
        FieldSpec::required("brand", FieldKind::String),
        FieldSpec::required("model", FieldKind::String),
        FieldSpec::list("images", &FieldKind::String),
    ];
}

/// Where a print provider ships from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub country: String,
    pub region: String,
    pub zip: String,
}

pub(crate) const LOCATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("address1", FieldKind::String),
    FieldSpec::optional("address2", FieldKind::String),
    FieldSpec::required("city", FieldKind::String),
    FieldSpec::required("country", FieldKind::String),
    FieldSpec::required("region", FieldKind::String),
    FieldSpec::required("zip", FieldKind::String),
];

impl Record for Location {
    const NAME: &'static str = "Location";
    const FIELDS: &'static [FieldSpec] = LOCATION_FIELDS;
}

/// A print provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintProvider {
    pub id: u64,
    pub title: String,
    pub location: Option<Location>,
}

impl Record for PrintProvider {
    const NAME: &'static str = "PrintProvider";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::Unsigned),
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::optional("location", FieldKind::Record(LOCATION_FIELDS)),
    ];
}

/// Option values that distinguish a catalog variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOptions {
    pub color: Option<String>,
    pub size: Option<String>,
    pub paper: Option<String>,
    pub quantity: Option<String>,
}

const VARIANT_OPTIONS_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("color", FieldKind::String),
    FieldSpec::optional("size", FieldKind::String),
    FieldSpec::optional("paper", FieldKind::String),
    FieldSpec::optional("quantity", FieldKind::String),
];

/// A printable area of a catalog variant, in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPlaceholder {
    /// Position name, e.g. `front`.
    pub position: String,
    pub height: u64,
    pub width: u64,
}

const VARIANT_PLACEHOLDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("position", FieldKind::String),
    FieldSpec::required("height", FieldKind::Unsigned),
    FieldSpec::required("width", FieldKind::Unsigned),
];

/// A variant of a blueprint offered by one print provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogVariant {
    pub id: u64,
    pub title: String,
    pub options: VariantOptions,
    pub placeholders: Vec<VariantPlaceholder>,
}

const CATALOG_VARIANT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", FieldKind::Unsigned),
    FieldSpec::required("title", FieldKind::String),
    FieldSpec::required("options", FieldKind::Record(VARIANT_OPTIONS_FIELDS)),
    FieldSpec::list(
        "placeholders",
        &FieldKind::Record(VARIANT_PLACEHOLDER_FIELDS),
    ),
];

impl Record for CatalogVariant {
    const NAME: &'static str = "CatalogVariant";
    const FIELDS: &'static [FieldSpec] = CATALOG_VARIANT_FIELDS;
}

/// All variants a print provider offers for a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintProviderVariants {
    /// Print provider id.
    pub id: u64,
    pub title: String,
    pub variants: Vec<CatalogVariant>,
}

impl Record for PrintProviderVariants {
    const NAME: &'static str = "PrintProviderVariants";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::Unsigned),
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::list("variants", &FieldKind::Record(CATALOG_VARIANT_FIELDS)),
    ];
}

/// Time a print provider needs before shipping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlingTime {
    pub value: u64,
    /// Unit of `value`, e.g. `day`.
    pub unit: String,
}

const HANDLING_TIME_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("value", FieldKind::Unsigned),
    FieldSpec::required("unit", FieldKind::String),
];

/// A monetary amount in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingCostAmount {
    pub cost: i64,
    pub currency: String,
}

const SHIPPING_COST_AMOUNT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("cost", FieldKind::Integer),
    FieldSpec::required("currency", FieldKind::String),
];

/// Shipping prices for a group of variants and countries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingProfile {
    pub variant_ids: Vec<u64>,
    pub first_item: ShippingCostAmount,
    pub additional_items: ShippingCostAmount,
    /// Country codes, or `REST_OF_THE_WORLD`.
    pub countries: Vec<String>,
}

const SHIPPING_PROFILE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("variant_ids", FieldKind::List(&FieldKind::Unsigned)),
    FieldSpec::required("first_item", FieldKind::Record(SHIPPING_COST_AMOUNT_FIELDS)),
    FieldSpec::required(
        "additional_items",
        FieldKind::Record(SHIPPING_COST_AMOUNT_FIELDS),
    ),
    FieldSpec::required("countries", FieldKind::List(&FieldKind::String)),
];

/// Shipping information for a blueprint and print provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub handling_time: HandlingTime,
    pub profiles: Vec<ShippingProfile>,
}

impl Record for ShippingInfo {
    const NAME: &'static str = "ShippingInfo";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("handling_time", FieldKind::Record(HANDLING_TIME_FIELDS)),
        FieldSpec::list("profiles", &FieldKind::Record(SHIPPING_PROFILE_FIELDS)),
    ];
}

impl ShippingInfo {
    /// Returns the profile covering `variant_id` in `country`, falling back
    /// to the `REST_OF_THE_WORLD` profile.
    #[must_use]
    pub fn profile_for(&self, variant_id: u64, country: &str) -> Option<&ShippingProfile> {
        let for_variant = || {
            self.profiles
                .iter()
                .filter(move |profile| profile.variant_ids.contains(&variant_id))
        };

        for_variant()
            .find(|profile| profile.countries.iter().any(|c| c == country))
            .or_else(|| {
                for_variant()
                    .find(|profile| profile.countries.iter().any(|c| c == "REST_OF_THE_WORLD"))
            })
    }
}

/// Read-only client for `catalog/*.json`.
///
/// # Example
///
/// ```rust,ignore
/// let catalog = printify.catalog();
/// let providers = catalog.print_providers_for_blueprint(6).await?;
/// let variants = catalog.variants(6, providers[0].id).await?;
/// ```
#[derive(Clone, Debug)]
pub struct Catalog {
    client: Arc<HttpClient>,
}

impl Catalog {
    /// Creates a catalog client over a shared transport.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Lists all blueprints.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request or the mapping fails.
    pub async fn blueprints(&self) -> Result<Vec<Blueprint>, PrintifyError> {
        let body = self.client.get("catalog/blueprints.json", None, None).await?;
        Ok(mapping::from_list(&body)?)
    }

    /// Fetches one blueprint.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request or the mapping fails.
    pub async fn blueprint(&self, blueprint_id: u64) -> Result<Blueprint, PrintifyError> {
        let path = format!("catalog/blueprints/{blueprint_id}.json");
        let body = self.client.get(&path, None, None).await?;
        Ok(mapping::from_value(&body)?)
    }

    /// Lists the print providers producing a blueprint.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request or the mapping fails.
    pub async fn print_providers_for_blueprint(
        &self,
        blueprint_id: u64,
    ) -> Result<Vec<PrintProvider>, PrintifyError> {
        let path = format!("catalog/blueprints/{blueprint_id}/print_providers.json");
        let body = self.client.get(&path, None, None).await?;
        Ok(mapping::from_list(&body)?)
    }

    /// Lists the variants of a blueprint at one print provider.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request or the mapping fails.
    pub async fn variants(
        &self,
        blueprint_id: u64,
        print_provider_id: u64,
    ) -> Result<PrintProviderVariants, PrintifyError> {
        let path = format!(
            "catalog/blueprints/{blueprint_id}/print_providers/{print_provider_id}/variants.json"
        );
        let body = self.client.get(&path, None, None).await?;
        Ok(mapping::from_value(&body)?)
    }

    /// Fetches shipping information of a blueprint at one print provider.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request or the mapping fails.
    pub async fn shipping(
        &self,
        blueprint_id: u64,
        print_provider_id: u64,
    ) -> Result<ShippingInfo, PrintifyError> {
        let path = format!(
            "catalog/blueprints/{blueprint_id}/print_providers/{print_provider_id}/shipping.json"
        );
        let body = self.client.get(&path, None, None).await?;
        Ok(mapping::from_value(&body)?)
    }

    /// Lists all print providers.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request or the mapping fails.
    pub async fn print_providers(&self) -> Result<Vec<PrintProvider>, PrintifyError> {
        let body = self
            .client
            .get("catalog/print_providers.json", None, None)
            .await?;
        Ok(mapping::from_list(&body)?)
    }

    /// Fetches one print provider.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request or the mapping fails.
    pub async fn print_provider(&self, print_provider_id: u64) -> Result<PrintProvider, PrintifyError> {
        let path = format!("catalog/print_providers/{print_provider_id}.json");
        let body = self.client.get(&path, None, None).await?;
        Ok(mapping::from_value(&body)?)
    }
}
