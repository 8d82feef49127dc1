//! Error type for record construction and encoding.

use thiserror::Error;

/// Error returned when a record cannot be built from JSON or encoded back.
///
/// Field paths are dotted and indexed the way they appear on the wire, e.g.
/// `variants[0].price`.
///
/// # Example
///
/// ```rust
/// use printify_api::mapping::{from_value, ValidationError};
/// use printify_api::resources::NewProduct;
/// use serde_json::json;
///
/// let result = from_value::<NewProduct>(&json!({"title": "Mug"}));
/// assert!(matches!(
///     result,
///     Err(ValidationError::MissingField { field, .. }) if field == "blueprint_id"
/// ));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent or `null`.
    #[error("{record} is missing required field '{field}'")]
    MissingField {
        /// The record being built.
        record: &'static str,
        /// Path of the missing field.
        field: String,
    },

    /// A field was present with a JSON type the record cannot hold.
    #[error("{record} field '{field}' should be {expected}, found {found}")]
    InvalidShape {
        /// The record being built.
        record: &'static str,
        /// Path of the offending field.
        field: String,
        /// The JSON type the field table declares.
        expected: &'static str,
        /// The JSON type that was received.
        found: &'static str,
    },

    /// The input (or the encoded record) was not a JSON object.
    #[error("{record} must be a JSON object, found {found}")]
    NotAnObject {
        /// The record being built or encoded.
        record: &'static str,
        /// The JSON type that was received.
        found: &'static str,
    },

    /// The normalized object could not be converted into the typed record.
    #[error("Could not decode {record}: {reason}")]
    Decode {
        /// The record being built.
        record: &'static str,
        /// The deserializer's message.
        reason: String,
    },

    /// The record could not be serialized.
    #[error("Could not encode {record}: {reason}")]
    Encode {
        /// The record being encoded.
        record: &'static str,
        /// The serializer's message.
        reason: String,
    },
}
