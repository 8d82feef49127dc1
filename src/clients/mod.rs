//! HTTP client types for Printify API communication.
//!
//! This module provides the transport layer the resource clients are built
//! on. It handles authentication, shop scoping, response classification and
//! pagination.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A successful, parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`Paginator`] and [`RecordPaginator`]: Lazy walks over list endpoints
//! - [`ClientError`], [`ServerError`], [`ProtocolError`]: Response failures
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use printify_api::{PrintifyConfig, ApiToken};
//! use printify_api::clients::{HttpClient, HttpRequest, HttpMethod, Paginator};
//!
//! let config = PrintifyConfig::builder()
//!     .api_token(ApiToken::new("token")?)
//!     .build()?;
//! let client = Arc::new(HttpClient::new(&config)?);
//!
//! // A single request
//! let request = HttpRequest::builder(HttpMethod::Get, "shops.json").build()?;
//! let shops = client.request(request).await?.into_body();
//!
//! // A paginated walk
//! let uploads = Paginator::new(client, "uploads.json", None).try_collect().await?;
//! ```
//!
//! # Retry Behavior
//!
//! The client never retries. Failures are returned immediately; use
//! [`PrintifyError::is_retryable`](crate::PrintifyError::is_retryable) and
//! [`ClientError::retry_after`] to implement a policy.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod paginator;

pub use errors::{ClientError, InvalidHttpRequestError, ProtocolError, ServerError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, SHOP_ID_PLACEHOLDER};
pub use http_response::HttpResponse;
pub use paginator::{Paginator, RecordPaginator};
