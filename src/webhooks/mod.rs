//! Handling of incoming webhook deliveries.
//!
//! Webhook subscriptions themselves are managed through
//! [`Webhooks`](crate::resources::Webhooks). This module covers the receiving
//! side: checking the `X-Pfy-Signature` header and decoding the event body.
//!
//! # Overview
//!
//! - [`verify_webhook`]: verify a [`WebhookRequest`] and decode its [`WebhookEvent`]
//! - [`verify_signature`] / [`compute_signature`]: the HMAC-SHA256 primitives
//! - [`parse_event`]: decode a body without checking the signature
//! - [`WebhookTopic`]: the topics a subscription can name
//!
//! # Example
//!
//! ```rust
//! use printify_api::webhooks::{
//!     compute_signature, verify_webhook, WebhookError, WebhookRequest,
//! };
//! use printify_api::PrintifyError;
//!
//! let body = br#"{"id":"e1","type":"product:deleted","created_at":"2024-01-01 00:00:00+00:00",
//!     "resource":{"id":"p1","type":"product"}}"#;
//!
//! let forged = WebhookRequest::new(body.to_vec(), Some("sha256=00".to_string()));
//! assert!(matches!(
//!     verify_webhook("secret", &forged),
//!     Err(PrintifyError::Webhook(WebhookError::InvalidSignature))
//! ));
//!
//! let genuine = WebhookRequest::new(body.to_vec(), Some(compute_signature(body, "secret").unwrap()));
//! let event = verify_webhook("secret", &genuine).unwrap();
//! assert_eq!(event.resource.id, "p1");
//! ```

mod errors;
mod events;
mod verification;

pub use errors::WebhookError;
pub use events::{parse_event, WebhookEvent, WebhookResource, WebhookTopic};
pub use verification::{
    compute_signature, verify_signature, verify_webhook, WebhookRequest, HEADER_SIGNATURE,
};
