//! Webhook-specific error types.

use thiserror::Error;

/// Errors raised while verifying or decoding a webhook delivery.
///
/// Messages are deliberately vague about which byte of a signature was wrong.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebhookError {
    /// The delivery carried no `X-Pfy-Signature` header.
    #[error("Webhook delivery has no signature header")]
    MissingSignature,

    /// The signature header is not of the form `sha256=<hex digest>`.
    #[error("Malformed webhook signature header: {reason}")]
    MalformedSignature {
        /// What was wrong with the header.
        reason: String,
    },

    /// The secret used to sign deliveries is empty.
    #[error("Webhook secret cannot be empty")]
    EmptySecret,

    /// The signature does not match the body.
    #[error("Webhook signature verification failed")]
    InvalidSignature,

    /// The body is not a JSON document.
    #[error("Webhook body is not valid JSON: {reason}")]
    InvalidPayload {
        /// The parser's message.
        reason: String,
    },

    /// A topic string is not one the API emits.
    #[error("Unknown webhook topic '{topic}'")]
    UnknownTopic {
        /// The unrecognized topic.
        topic: String,
    },
}
