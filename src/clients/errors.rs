//! HTTP-specific error types for the Printify API SDK.
//!
//! This module contains the error types raised by the transport and the
//! paginator:
//!
//! - [`ClientError`]: 4xx responses, carrying the status and the vendor error body
//! - [`ServerError`]: 5xx responses, carrying the status
//! - [`ProtocolError`]: responses that break the pagination or JSON contract
//! - [`InvalidHttpRequestError`]: requests rejected before they are sent
//!
//! Network failures are reported as [`reqwest::Error`] inside
//! [`PrintifyError::Transport`](crate::PrintifyError::Transport).

use serde_json::Value;
use thiserror::Error;

/// Error returned when the API answers with a 4xx status.
///
/// The `message` is condensed from Printify's error body
/// (`{"message": "...", "errors": {"reason": "..."}}`), falling back to the
/// status line when the body carries nothing useful.
///
/// # Example
///
/// ```rust
/// use printify_api::clients::ClientError;
/// use serde_json::json;
///
/// let error = ClientError::new(
///     400,
///     json!({"message": "Validation failed.", "errors": {"reason": "Title is required"}}),
///     None,
/// );
///
/// assert_eq!(error.code, 400);
/// assert_eq!(error.message, "Validation failed. Title is required");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Printify rejected the request ({code}): {message}")]
pub struct ClientError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The parsed response body.
    pub body: Value,
    /// Human readable message extracted from the body.
    pub message: String,
    /// Seconds to wait before retrying (from the `Retry-After` header).
    pub retry_after: Option<f64>,
}

impl ClientError {
    /// Creates a client error, condensing the vendor body into `message`.
    #[must_use]
    pub fn new(code: u16, body: Value, retry_after: Option<f64>) -> Self {
        let message = error_message(code, &body);
        Self {
            code,
            body,
            message,
            retry_after,
        }
    }

    /// Returns `true` for 401 responses (invalid or revoked token).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.code == 401
    }

    /// Returns `true` for 403 responses (token lacks the required scope).
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        self.code == 403
    }

    /// Returns `true` for 404 responses.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.code == 404
    }

    /// Returns `true` for 429 responses.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.code == 429
    }
}

/// Error returned when the API answers with a 5xx status.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Printify failed to handle the request ({code}): {message}")]
pub struct ServerError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The parsed response body (raw text is kept under `raw_body`).
    pub body: Value,
    /// Human readable message extracted from the body.
    pub message: String,
}

impl ServerError {
    /// Creates a server error.
    #[must_use]
    pub fn new(code: u16, body: Value) -> Self {
        let message = error_message(code, &body);
        Self {
            code,
            body,
            message,
        }
    }
}

/// Error returned when a response breaks the API contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A next-page indicator pointed at a page that was already fetched.
    #[error("Pagination of '{path}' looped back to page {page}")]
    RepeatedPage {
        /// The collection being paginated.
        path: String,
        /// The page number that was reported again.
        page: u64,
    },

    /// A page payload did not have the expected shape.
    #[error("Malformed page from '{path}': {reason}")]
    MalformedPage {
        /// The collection being paginated.
        path: String,
        /// What was wrong with the payload.
        reason: String,
    },

    /// A successful response body was not valid JSON.
    #[error("Response from '{path}' is not valid JSON: {reason}")]
    InvalidJson {
        /// The requested path.
        path: String,
        /// The parser's error message.
        reason: String,
    },

    /// The response status was neither success nor an HTTP error, e.g. a
    /// redirect that was not followed.
    #[error("Unexpected HTTP status {code} from '{path}'")]
    UnexpectedStatus {
        /// The requested path.
        path: String,
        /// The status code received.
        code: u16,
    },
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was attached to a method that does not carry one.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that was used.
        method: String,
    },

    /// The request path was empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,
}

fn error_message(code: u16, body: &Value) -> String {
    let message = body.get("message").and_then(Value::as_str);
    let reason = body
        .get("errors")
        .and_then(|errors| errors.get("reason"))
        .and_then(Value::as_str);
    let error = body.get("error").and_then(Value::as_str);

    match (message, reason, error) {
        (Some(message), Some(reason), _) => format!("{message} {reason}"),
        (Some(message), None, _) => message.to_string(),
        (None, Some(reason), _) => reason.to_string(),
        (None, None, Some(error)) => error.to_string(),
        (None, None, None) => format!("HTTP {code}"),
    }
}
