//! Conversion between wire JSON and typed records.
//!
//! Every record type implements [`Record`], naming itself and declaring a
//! field table ([`FieldSpec`]). One generic routine walks that table:
//!
//! - unknown input keys are dropped
//! - absent optional keys receive their declared default
//! - absent (or `null`) required keys fail with [`ValidationError`]
//! - nested records and lists of records are normalized recursively
//!
//! `serde_json` then turns the normalized object into the typed record.
//! [`to_mapping`] goes the other way, omitting unset fields so partial
//! updates never overwrite server state.
//!
//! # Example
//!
//! ```rust
//! use printify_api::mapping::{from_value, to_mapping};
//! use printify_api::resources::NewProduct;
//! use serde_json::json;
//!
//! let product: NewProduct = from_value(&json!({
//!     "title": "Testy",
//!     "blueprint_id": 1094,
//!     "variants": [{"id": 81870, "price": 999, "is_enabled": true}],
//!     "unexpected_field": "x"
//! }))
//! .unwrap();
//!
//! assert_eq!(product.variants[0].price, 999);
//! assert!(!to_mapping(&product).unwrap().contains_key("unexpected_field"));
//! ```

mod errors;
mod fields;
mod timestamps;

pub use errors::ValidationError;
pub use fields::{FieldDefault, FieldKind, FieldSpec};
pub use timestamps::parse_timestamp;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// A typed record backed by a declared field table.
///
/// Implementors derive `Serialize`/`Deserialize` without field attributes:
/// the table carries the wire names and defaults.
pub trait Record: Serialize + DeserializeOwned {
    /// Record name used in error messages.
    const NAME: &'static str;

    /// The record's fields, in wire order.
    const FIELDS: &'static [FieldSpec];
}

/// Builds a record from a JSON object.
///
/// # Errors
///
/// Returns [`ValidationError`] if a required field is missing, a field has
/// an incompatible shape, or the normalized object cannot be decoded.
pub fn from_mapping<R: Record>(raw: &Map<String, Value>) -> Result<R, ValidationError> {
    let normalized = normalize_object(R::NAME, R::FIELDS, raw, "")?;
    serde_json::from_value(Value::Object(normalized)).map_err(|e| ValidationError::Decode {
        record: R::NAME,
        reason: e.to_string(),
    })
}

/// Builds a record from a JSON value that must be an object.
///
/// # Errors
///
/// Returns [`ValidationError::NotAnObject`] for non-object input, otherwise
/// as [`from_mapping`].
pub fn from_value<R: Record>(raw: &Value) -> Result<R, ValidationError> {
    match raw {
        Value::Object(map) => from_mapping(map),
        other => Err(ValidationError::NotAnObject {
            record: R::NAME,
            found: json_type(other),
        }),
    }
}

/// Builds a list of records from a JSON array.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidShape`] if `raw` is not an array, or
/// the first element error (with its index in the path).
pub fn from_list<R: Record>(raw: &Value) -> Result<Vec<R>, ValidationError> {
    let Value::Array(items) = raw else {
        return Err(ValidationError::InvalidShape {
            record: R::NAME,
            field: "[]".to_string(),
            expected: "a list",
            found: json_type(raw),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            from_value(item).map_err(|e| prefix_error(e, &format!("[{index}]")))
        })
        .collect()
}

/// Encodes a record into a JSON object using wire keys.
///
/// Unset (`None`) fields are omitted at every level.
///
/// # Errors
///
/// Returns [`ValidationError::Encode`] if serialization fails and
/// [`ValidationError::NotAnObject`] if the record does not serialize to an
/// object.
pub fn to_mapping<R: Record>(record: &R) -> Result<Map<String, Value>, ValidationError> {
    let value = serde_json::to_value(record).map_err(|e| ValidationError::Encode {
        record: R::NAME,
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(encode_object(R::FIELDS, &map)),
        other => Err(ValidationError::NotAnObject {
            record: R::NAME,
            found: json_type(&other),
        }),
    }
}

/// Encodes a record into a JSON value. See [`to_mapping`].
///
/// # Errors
///
/// As [`to_mapping`].
pub fn to_value<R: Record>(record: &R) -> Result<Value, ValidationError> {
    to_mapping(record).map(Value::Object)
}

fn normalize_object(
    record: &'static str,
    fields: &'static [FieldSpec],
    raw: &Map<String, Value>,
    prefix: &str,
) -> Result<Map<String, Value>, ValidationError> {
    let mut normalized = Map::new();

    for spec in fields {
        let path = join_path(prefix, spec.key);
        match raw.get(spec.key).filter(|value| !value.is_null()) {
            Some(value) => {
                let value = normalize_value(record, &spec.kind, value, &path)?;
                normalized.insert(spec.name.to_string(), value);
            }
            None if spec.required => {
                return Err(ValidationError::MissingField {
                    record,
                    field: path,
                });
            }
            None => {
                if let Some(value) = default_value(spec.default) {
                    normalized.insert(spec.name.to_string(), value);
                }
            }
        }
    }

    Ok(normalized)
}

fn normalize_value(
    record: &'static str,
    kind: &FieldKind,
    value: &Value,
    path: &str,
) -> Result<Value, ValidationError> {
    let shape_error = || ValidationError::InvalidShape {
        record,
        field: path.to_string(),
        expected: kind.describe(),
        found: json_type(value),
    };

    match (*kind, value) {
        (FieldKind::Any, _)
        | (FieldKind::String, Value::String(_))
        | (FieldKind::Float, Value::Number(_))
        | (FieldKind::Boolean, Value::Bool(_))
        | (FieldKind::Object, Value::Object(_)) => Ok(value.clone()),
        (FieldKind::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        (FieldKind::Unsigned, Value::Number(n)) if n.is_u64() => Ok(value.clone()),
        (FieldKind::Identifier, Value::String(_)) => Ok(value.clone()),
        (FieldKind::Identifier, Value::Number(n)) if n.is_i64() || n.is_u64() => {
            Ok(Value::String(n.to_string()))
        }
        (FieldKind::List(element), Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                normalize_value(record, element, item, &format!("{path}[{index}]"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        (FieldKind::Record(fields), Value::Object(map)) => {
            normalize_object(record, fields, map, path).map(Value::Object)
        }
        (FieldKind::OneOf(tables), Value::Object(map)) => {
            let fields = select_alternative(tables, |spec| {
                map.get(spec.key).is_some_and(|value| !value.is_null())
            });
            normalize_object(record, fields, map, path).map(Value::Object)
        }
        _ => Err(shape_error()),
    }
}

fn encode_object(fields: &'static [FieldSpec], source: &Map<String, Value>) -> Map<String, Value> {
    let mut encoded = Map::new();

    for spec in fields {
        if let Some(value) = source.get(spec.name).filter(|value| !value.is_null()) {
            encoded.insert(spec.key.to_string(), encode_value(&spec.kind, value));
        }
    }

    encoded
}

fn encode_value(kind: &FieldKind, value: &Value) -> Value {
    match (*kind, value) {
        (FieldKind::List(element), Value::Array(items)) => Value::Array(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| encode_value(element, item))
                .collect(),
        ),
        (FieldKind::Record(fields), Value::Object(map)) => Value::Object(encode_object(fields, map)),
        (FieldKind::OneOf(tables), Value::Object(map)) => {
            let fields = select_alternative(tables, |spec| {
                map.get(spec.name).is_some_and(|value| !value.is_null())
            });
            Value::Object(encode_object(fields, map))
        }
        _ => value.clone(),
    }
}

/// Picks the table missing the fewest required fields, the first one on a
/// tie. A complete match always wins, and an incomplete one reports the
/// field the input actually lacks.
fn select_alternative(
    tables: &'static [&'static [FieldSpec]],
    present: impl Fn(&FieldSpec) -> bool,
) -> &'static [FieldSpec] {
    tables
        .iter()
        .copied()
        .min_by_key(|fields| {
            fields
                .iter()
                .filter(|spec| spec.required && !present(spec))
                .count()
        })
        .unwrap_or(&[])
}

fn default_value(default: FieldDefault) -> Option<Value> {
    match default {
        FieldDefault::None => None,
        FieldDefault::EmptyList => Some(Value::Array(Vec::new())),
        FieldDefault::Bool(value) => Some(Value::Bool(value)),
        FieldDefault::Integer(value) => Some(Value::from(value)),
        FieldDefault::Str(value) => Some(Value::String(value.to_string())),
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn prefix_error(error: ValidationError, prefix: &str) -> ValidationError {
    match error {
        ValidationError::MissingField { record, field } => ValidationError::MissingField {
            record,
            field: format!("{prefix}.{field}"),
        },
        ValidationError::InvalidShape {
            record,
            field,
            expected,
            found,
        } => ValidationError::InvalidShape {
            record,
            field: format!("{prefix}.{field}"),
            expected,
            found,
        },
        other => other,
    }
}

pub(crate) const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Line {
        sku: String,
        quantity: u32,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct ProductLine {
        product_id: String,
        variant_id: u64,
        quantity: u32,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    enum AnyLine {
        Product(ProductLine),
        Sku(Line),
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Basket {
        id: String,
        label: Option<String>,
        lines: Vec<AnyLine>,
        is_open: bool,
        weights: Vec<f64>,
        key_features: Option<bool>,
    }

    const SKU_LINE: &[FieldSpec] = &[
        FieldSpec::required("sku", FieldKind::String),
        FieldSpec::required("quantity", FieldKind::Integer),
    ];

    const PRODUCT_LINE: &[FieldSpec] = &[
        FieldSpec::required("product_id", FieldKind::Identifier),
        FieldSpec::required("variant_id", FieldKind::Integer),
        FieldSpec::required("quantity", FieldKind::Integer),
    ];

    impl Record for Basket {
        const NAME: &'static str = "Basket";
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::required("id", FieldKind::Identifier),
            FieldSpec::optional("label", FieldKind::String),
            FieldSpec::list("lines", &FieldKind::OneOf(&[PRODUCT_LINE, SKU_LINE])),
            FieldSpec::optional("is_open", FieldKind::Boolean).with_default(FieldDefault::Bool(true)),
            FieldSpec::list("weights", &FieldKind::Float),
            FieldSpec::optional("key_features", FieldKind::Boolean).renamed("keyFeatures"),
        ];
    }

    #[test]
    fn test_unknown_keys_are_dropped_and_defaults_applied() {
        let basket: Basket = from_value(&json!({"id": 12, "bogus": 1})).unwrap();
        assert_eq!(basket.id, "12");
        assert_eq!(basket.label, None);
        assert!(basket.lines.is_empty());
        assert!(basket.is_open);
    }

    #[test]
    fn test_extra_key_does_not_change_record() {
        let plain: Basket = from_value(&json!({"id": "b1", "label": "x"})).unwrap();
        let noisy: Basket = from_value(&json!({"id": "b1", "label": "x", "bogus": 1})).unwrap();
        assert_eq!(plain, noisy);
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let result = from_value::<Basket>(&json!({"id": null}));
        assert!(matches!(
            result,
            Err(ValidationError::MissingField { field, .. }) if field == "id"
        ));
    }

    #[test]
    fn test_nested_missing_field_reports_indexed_path() {
        let result = from_value::<Basket>(&json!({
            "id": "b1",
            "lines": [{"sku": "A", "quantity": 1}, {"sku": "B"}]
        }));
        assert!(matches!(
            result,
            Err(ValidationError::MissingField { field, .. }) if field == "lines[1].quantity"
        ));
    }

    #[test]
    fn test_one_of_reports_field_of_closest_alternative() {
        let result = from_value::<Basket>(&json!({
            "id": "b1",
            "lines": [{"product_id": "p1", "quantity": 2}]
        }));
        assert!(matches!(
            result,
            Err(ValidationError::MissingField { field, .. }) if field == "lines[0].variant_id"
        ));
    }

    #[test]
    fn test_scalar_where_list_expected_is_shape_error() {
        let result = from_value::<Basket>(&json!({"id": "b1", "lines": "nope"}));
        assert!(matches!(
            result,
            Err(ValidationError::InvalidShape { field, expected: "a list", .. }) if field == "lines"
        ));
    }

    #[test]
    fn test_identifier_keeps_large_integers_exact() {
        let basket: Basket = from_value(&json!({"id": 9_007_199_254_740_993_u64})).unwrap();
        assert_eq!(basket.id, "9007199254740993");
    }

    #[test]
    fn test_one_of_selects_matching_alternative() {
        let basket: Basket = from_value(&json!({
            "id": "b1",
            "lines": [
                {"product_id": "p1", "variant_id": 5, "quantity": 2},
                {"sku": "MUG-11", "quantity": 1, "product_id": null}
            ]
        }))
        .unwrap();

        assert!(matches!(&basket.lines[0], AnyLine::Product(line) if line.variant_id == 5));
        assert!(matches!(&basket.lines[1], AnyLine::Sku(line) if line.sku == "MUG-11"));
    }

    #[test]
    fn test_to_mapping_omits_unset_and_renames() {
        let basket: Basket = from_value(&json!({
            "id": "b1",
            "keyFeatures": false,
            "lines": [{"sku": "A", "quantity": 3}]
        }))
        .unwrap();

        let mapping = to_mapping(&basket).unwrap();
        assert!(!mapping.contains_key("label"));
        assert_eq!(mapping["keyFeatures"], json!(false));
        assert_eq!(mapping["lines"], json!([{"sku": "A", "quantity": 3}]));
        assert_eq!(mapping["is_open"], json!(true));
    }

    #[test]
    fn test_round_trip_preserves_record() {
        let basket: Basket = from_value(&json!({
            "id": "b1",
            "label": "weekly",
            "lines": [{"product_id": "p1", "variant_id": 5, "quantity": 2}],
            "weights": [0.5, 1],
            "keyFeatures": true
        }))
        .unwrap();

        let again: Basket = from_mapping(&to_mapping(&basket).unwrap()).unwrap();
        assert_eq!(basket, again);
    }

    #[test]
    fn test_from_list_prefixes_index() {
        let result = from_list::<Basket>(&json!([{"id": "a"}, {"label": "x"}]));
        assert!(matches!(
            result,
            Err(ValidationError::MissingField { field, .. }) if field == "[1].id"
        ));

        let result = from_list::<Basket>(&json!({"id": "a"}));
        assert!(matches!(result, Err(ValidationError::InvalidShape { .. })));
    }

    #[test]
    fn test_non_object_input_is_rejected() {
        let result = from_value::<Basket>(&json!([1, 2]));
        assert!(matches!(
            result,
            Err(ValidationError::NotAnObject { record: "Basket", found: "a list" })
        ));
    }
}
