//! # Printify API Rust SDK
//!
//! A Rust SDK for the Printify print-on-demand REST API: shops, the product
//! catalog, products and their publishing workflow, orders, artwork uploads
//! and webhooks.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`PrintifyConfig`] and [`PrintifyConfigBuilder`]
//! - A single entry point, [`Printify`], exposing one client per resource
//! - Typed records built from API JSON by a declarative mapper ([`mapping`])
//! - Lazy pagination over list endpoints ([`clients::RecordPaginator`])
//! - One error type, [`PrintifyError`], for every failure
//! - Verification of signed webhook deliveries ([`webhooks`])
//!
//! ## Quick Start
//!
//! ```rust
//! use printify_api::{ApiToken, Printify, PrintifyConfig, ShopId};
//!
//! let config = PrintifyConfig::builder()
//!     .api_token(ApiToken::new("your-personal-access-token").unwrap())
//!     .shop_id(ShopId::from(5432_u64))
//!     .build()
//!     .unwrap();
//!
//! let printify = Printify::with_config(config).unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use printify_api::resources::{NewProduct, PlaceholderImage, ProductListParams};
//!
//! // Account-scoped
//! let shops = printify.shops().list().await?;
//! let blueprints = printify.catalog().blueprints().await?;
//!
//! // Shop-scoped, using the default shop
//! let mut pages = printify.products().list(&ProductListParams::default())?;
//! while let Some(product) = pages.next_item().await? {
//!     println!("{} ({} variants)", product.title, product.variants.len());
//! }
//!
//! let mut draft = NewProduct::new("Cat tee", 6);
//! draft
//!     .add_variant(12_100, 1_999)
//!     .add_print_area(vec![12_100], "front", vec![PlaceholderImage::centered("5d15ca55")]);
//! let product = printify.products().create(&draft).await?;
//! printify.products().publish(&product.id, &Default::default()).await?;
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use printify_api::PrintifyError;
//!
//! match printify.orders().get("5a96f649b2439217d070f507").await {
//!     Ok(order) => println!("{:?}", order.status),
//!     Err(PrintifyError::Client(e)) if e.is_not_found() => println!("no such order"),
//!     Err(e) if e.is_retryable() => println!("try again later: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and records validate on construction
//! - **Thread-safe**: The facade and resource clients are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No hidden retries**: Every call issues exactly the requests it names

pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod mapping;
pub mod resources;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use client::Printify;
pub use config::{ApiToken, BaseUrl, PrintifyConfig, PrintifyConfigBuilder, ShopId};
pub use error::{ConfigError, PrintifyError};
pub use mapping::{Record, ValidationError};

// Re-export HTTP client types
pub use clients::{
    ClientError, HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, Paginator, ProtocolError, RecordPaginator, ServerError,
};
