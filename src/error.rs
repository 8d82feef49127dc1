//! Error types for the Printify API SDK.
//!
//! [`ConfigError`] covers configuration problems; [`PrintifyError`] is the
//! single error type returned by every operation that talks to the API.
//!
//! # Error Handling
//!
//! Every failed operation yields exactly one [`PrintifyError`] variant:
//!
//! - [`PrintifyError::Config`]: missing token or shop scope, invalid base URL
//! - [`PrintifyError::Validation`]: a record could not be built from (or encoded to) JSON
//! - [`PrintifyError::Client`]: the API answered with a 4xx status
//! - [`PrintifyError::Server`]: the API answered with a 5xx status
//! - [`PrintifyError::Transport`]: no response was obtained
//! - [`PrintifyError::Protocol`]: the API broke the pagination or JSON contract, or
//!   answered with a status that is neither success nor an error
//!
//! The SDK never retries. Use [`PrintifyError::is_retryable`] to drive your
//! own policy.
//!
//! # Example
//!
//! ```rust
//! use printify_api::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiToken)));
//! ```

use thiserror::Error;

use crate::clients::{ClientError, InvalidHttpRequestError, ProtocolError, ServerError};
use crate::mapping::ValidationError;
use crate::webhooks::WebhookError;

/// Errors that can occur during SDK configuration.
///
/// Configuration errors are never retryable: they are raised before any
/// request leaves the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API token cannot be empty.
    #[error("API token cannot be empty. Please provide a valid Printify personal access token.")]
    EmptyApiToken,

    /// Shop id is invalid.
    #[error("Invalid shop id '{id}'. Expected a non-empty identifier without '/'.")]
    InvalidShopId {
        /// The invalid id that was provided.
        id: String,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an http(s) URL with a host (e.g., 'https://api.printify.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A shop-scoped operation was called without a shop id.
    #[error("No shop id was specified for '{path}'. Pass one to the operation or set a default shop id in PrintifyConfig.")]
    MissingShopId {
        /// The path template of the operation that needed a shop.
        path: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {reason}")]
    HttpClient {
        /// The reason reported by the HTTP stack.
        reason: String,
    },
}

/// Unified error type for all Printify API operations.
///
/// # Example
///
/// ```rust,ignore
/// use printify_api::PrintifyError;
///
/// match printify.products().get("5d39b159e7c48c000728c89f").await {
///     Ok(product) => println!("{}", product.title),
///     Err(PrintifyError::Client(e)) if e.is_not_found() => println!("no such product"),
///     Err(e) if e.is_retryable() => println!("try again later: {e}"),
///     Err(e) => return Err(e.into()),
/// }
/// ```
#[derive(Debug, Error)]
pub enum PrintifyError {
    /// Required configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A record could not be constructed or encoded.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The API rejected the request (HTTP 4xx).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The API failed to handle the request (HTTP 5xx).
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Network or connection error before a response was received.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API response broke the expected protocol.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The request failed local validation before being sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A local file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A webhook delivery failed verification.
    #[error(transparent)]
    Webhook(#[from] WebhookError),
}

impl PrintifyError {
    /// Returns the HTTP status code if the API produced a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Client(e) => Some(e.code),
            Self::Server(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns `true` if repeating the same request may succeed.
    ///
    /// Transport failures, server errors and rate limiting (429) are
    /// retryable. Everything else needs a different request.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Server(_) => true,
            Self::Client(e) => e.is_rate_limited(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_api_token_error_message() {
        let message = ConfigError::EmptyApiToken.to_string();
        assert!(message.contains("API token cannot be empty"));
    }

    #[test]
    fn test_missing_shop_id_error_names_path() {
        let error = ConfigError::MissingShopId {
            path: "shops/{shop_id}/products.json".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("shops/{shop_id}/products.json"));
        assert!(message.contains("default shop id"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "api_token" };
        let message = error.to_string();
        assert!(message.contains("api_token"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_status_and_retryability() {
        let not_found = PrintifyError::Client(ClientError::new(404, json!({}), None));
        assert_eq!(not_found.status(), Some(404));
        assert!(!not_found.is_retryable());

        let throttled = PrintifyError::Client(ClientError::new(429, json!({}), Some(2.0)));
        assert!(throttled.is_retryable());

        let server = PrintifyError::Server(ServerError::new(503, json!({})));
        assert_eq!(server.status(), Some(503));
        assert!(server.is_retryable());

        let config = PrintifyError::Config(ConfigError::EmptyApiToken);
        assert_eq!(config.status(), None);
        assert!(!config.is_retryable());
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = PrintifyError::Config(ConfigError::EmptyApiToken);
        let _: &dyn std::error::Error = &error;
    }
}
