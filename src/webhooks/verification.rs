//! Signature verification for webhook deliveries.
//!
//! Printify signs the raw request body with HMAC-SHA256, keyed by the secret
//! given when the webhook was created, and sends the hex digest in the
//! [`HEADER_SIGNATURE`] header as `sha256=<digest>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::PrintifyError;
use crate::webhooks::errors::WebhookError;
use crate::webhooks::events::{parse_event, WebhookEvent};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the delivery signature.
pub const HEADER_SIGNATURE: &str = "X-Pfy-Signature";

const SIGNATURE_PREFIX: &str = "sha256=";

fn signer(secret: &str) -> Result<HmacSha256, WebhookError> {
    if secret.is_empty() {
        return Err(WebhookError::EmptySecret);
    }
    // Keys of any length are accepted.
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| WebhookError::EmptySecret)
}

/// Computes the header value Printify would send for `body`.
///
/// # Errors
///
/// Returns [`WebhookError::EmptySecret`] if `secret` is empty.
///
/// # Example
///
/// ```rust
/// use printify_api::webhooks::compute_signature;
///
/// let header = compute_signature(b"{}", "secret").unwrap();
/// assert!(header.starts_with("sha256="));
/// assert_eq!(header.len(), "sha256=".len() + 64);
/// ```
pub fn compute_signature(body: &[u8], secret: &str) -> Result<String, WebhookError> {
    let mut mac = signer(secret)?;
    mac.update(body);
    Ok(format!(
        "{SIGNATURE_PREFIX}{}",
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Checks a signature header against the raw body.
///
/// The digest comparison runs in constant time. Hex digits are accepted in
/// either case.
///
/// # Errors
///
/// - [`WebhookError::MalformedSignature`] if the header is not `sha256=<hex>`
/// - [`WebhookError::InvalidSignature`] if the digest does not match
/// - [`WebhookError::EmptySecret`] if `secret` is empty
pub fn verify_signature(body: &[u8], header: &str, secret: &str) -> Result<(), WebhookError> {
    let digest = header
        .trim()
        .strip_prefix(SIGNATURE_PREFIX)
        .ok_or_else(|| WebhookError::MalformedSignature {
            reason: format!("missing '{SIGNATURE_PREFIX}' prefix"),
        })?;
    let provided = hex::decode(digest).map_err(|e| WebhookError::MalformedSignature {
        reason: e.to_string(),
    })?;

    let mut mac = signer(secret)?;
    mac.update(body);
    let expected = mac.finalize().into_bytes();

    if expected.as_slice().ct_eq(&provided).into() {
        Ok(())
    } else {
        tracing::warn!("Webhook signature mismatch");
        Err(WebhookError::InvalidSignature)
    }
}

/// A webhook delivery as received by your HTTP handler.
///
/// Framework-agnostic: pass the raw body bytes and the signature header,
/// if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    body: Vec<u8>,
    signature: Option<String>,
}

impl WebhookRequest {
    /// Creates a delivery from its raw parts.
    #[must_use]
    pub const fn new(body: Vec<u8>, signature: Option<String>) -> Self {
        Self { body, signature }
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the signature header, if present.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }
}

/// Verifies a delivery and decodes its event.
///
/// # Errors
///
/// Returns [`PrintifyError::Webhook`] if the signature is missing or wrong
/// or the body is not JSON, and [`PrintifyError::Validation`] if the JSON
/// is not an event.
///
/// # Example
///
/// ```rust
/// use printify_api::webhooks::{compute_signature, verify_webhook, WebhookRequest, WebhookTopic};
///
/// let body = br#"{"id":"e1","type":"order:created","created_at":"2024-03-01 10:00:00+00:00",
///     "resource":{"id":"o1","type":"order"}}"#;
/// let signature = compute_signature(body, "secret").unwrap();
/// let request = WebhookRequest::new(body.to_vec(), Some(signature));
///
/// let event = verify_webhook("secret", &request).unwrap();
/// assert_eq!(event.topic(), Some(WebhookTopic::OrderCreated));
/// ```
pub fn verify_webhook(secret: &str, request: &WebhookRequest) -> Result<WebhookEvent, PrintifyError> {
    let signature = request.signature().ok_or(WebhookError::MissingSignature)?;
    verify_signature(request.body(), signature, secret)?;
    parse_event(request.body())
}
