//! Declarative field tables.
//!
//! A record lists its fields once, as a `&'static [FieldSpec]`, and the
//! generic routines in [`crate::mapping`] consult that table to filter,
//! default, validate and rename.

/// The JSON shape a field is allowed to take.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    /// A JSON string.
    String,
    /// A JSON integer (signed or unsigned). Never converted through `f64`.
    Integer,
    /// A non-negative JSON integer: ids, counts, dimensions and prices.
    Unsigned,
    /// Any JSON number. Used for geometry only.
    Float,
    /// A JSON boolean.
    Boolean,
    /// A string or integer id, normalized to its exact decimal string.
    Identifier,
    /// A free-form JSON object, passed through untouched.
    Object,
    /// Any JSON value, passed through untouched.
    Any,
    /// A list whose elements have the given kind.
    List(&'static FieldKind),
    /// A nested record described by its own field table.
    Record(&'static [FieldSpec]),
    /// Untagged alternatives. The first table whose required keys are all
    /// present is used; otherwise the one missing the fewest.
    OneOf(&'static [&'static [FieldSpec]]),
}

impl FieldKind {
    /// Human readable description used in shape errors.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Integer => "an integer",
            Self::Unsigned => "a non-negative integer",
            Self::Float => "a number",
            Self::Boolean => "a boolean",
            Self::Identifier => "a string or integer id",
            Self::Object | Self::Record(_) | Self::OneOf(_) => "an object",
            Self::Any => "any value",
            Self::List(_) => "a list",
        }
    }
}

/// Value given to an optional field that is absent from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldDefault {
    /// Leave the field unset (`None`).
    None,
    /// An empty list.
    EmptyList,
    /// A boolean literal.
    Bool(bool),
    /// An integer literal.
    Integer(i64),
    /// A string literal.
    Str(&'static str),
}

/// One entry of a record's field table.
///
/// `name` is the Rust field name; `key` is the wire key. They only differ for
/// renamed fields such as `Publish::key_features` (`keyFeatures`).
///
/// # Example
///
/// ```rust
/// use printify_api::mapping::{FieldDefault, FieldKind, FieldSpec};
///
/// const FIELDS: &[FieldSpec] = &[
///     FieldSpec::required("id", FieldKind::Identifier),
///     FieldSpec::list("tags", &FieldKind::String),
///     FieldSpec::optional("key_features", FieldKind::Boolean)
///         .renamed("keyFeatures")
///         .with_default(FieldDefault::Bool(true)),
/// ];
///
/// assert_eq!(FIELDS[2].key, "keyFeatures");
/// assert!(!FIELDS[1].required);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    /// Rust field name.
    pub name: &'static str,
    /// Wire key.
    pub key: &'static str,
    /// Accepted JSON shape.
    pub kind: FieldKind,
    /// Whether construction fails when the key is absent or `null`.
    pub required: bool,
    /// Default for an absent optional field.
    pub default: FieldDefault,
}

impl FieldSpec {
    /// A required field whose wire key equals its name.
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            key: name,
            kind,
            required: true,
            default: FieldDefault::None,
        }
    }

    /// An optional field that stays unset when absent.
    #[must_use]
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            key: name,
            kind,
            required: false,
            default: FieldDefault::None,
        }
    }

    /// An optional list that defaults to empty.
    #[must_use]
    pub const fn list(name: &'static str, element: &'static FieldKind) -> Self {
        Self {
            name,
            key: name,
            kind: FieldKind::List(element),
            required: false,
            default: FieldDefault::EmptyList,
        }
    }

    /// Uses a different wire key.
    #[must_use]
    pub const fn renamed(self, key: &'static str) -> Self {
        Self { key, ..self }
    }

    /// Sets the default for an absent optional field.
    #[must_use]
    pub const fn with_default(self, default: FieldDefault) -> Self {
        Self { default, ..self }
    }
}
