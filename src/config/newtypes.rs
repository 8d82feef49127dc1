//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Printify personal access token.
///
/// This newtype ensures the token is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use printify_api::ApiToken;
///
/// let token = ApiToken::new("my-token").unwrap();
/// assert_eq!(token.as_ref(), "my-token");
/// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a new validated API token.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(ConfigError::EmptyApiToken);
        }
        Ok(Self(token))
    }

    /// Returns the value of the `Authorization` header for this token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(*****)")
    }
}

/// A Printify shop identifier.
///
/// Printify reports shop ids as integers, but callers frequently carry them
/// around as strings. Both convert into a `ShopId`, which stores the
/// canonical decimal/string form used in request paths.
///
/// # Example
///
/// ```rust
/// use printify_api::ShopId;
///
/// let from_int = ShopId::from(5432_u64);
/// let from_str = ShopId::new("5432").unwrap();
/// assert_eq!(from_int, from_str);
/// assert_eq!(from_int.to_string(), "5432");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShopId(String);

impl ShopId {
    /// Creates a new shop id from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopId`] if the id is empty or contains
    /// a path separator.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into().trim().to_string();
        if id.is_empty() || id.contains('/') {
            return Err(ConfigError::InvalidShopId { id });
        }
        Ok(Self(id))
    }
}

impl From<u64> for ShopId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl TryFrom<&str> for ShopId {
    type Error = ConfigError;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl TryFrom<String> for ShopId {
    type Error = ConfigError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl AsRef<str> for ShopId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ShopId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ShopId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(s) => Self::new(s).map_err(de::Error::custom),
            serde_json::Value::Number(n) => Self::new(n.to_string()).map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "expected a string or integer shop id, found {other}"
            ))),
        }
    }
}

/// A validated base URL for the Printify API.
///
/// Defaults to `https://api.printify.com`. Overriding it is mostly useful
/// for pointing the client at a proxy or a mock server in tests. A trailing
/// slash is removed.
///
/// # Example
///
/// ```rust
/// use printify_api::BaseUrl;
///
/// let url = BaseUrl::new("http://localhost:3000/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:3000");
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), Some("localhost"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// The production Printify API host.
    pub const DEFAULT: &'static str = "https://api.printify.com";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no `http` or
    /// `https` scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            scheme_end: 5,
            host_start: 8,
            host_end: Self::DEFAULT.len(),
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_token_rejects_empty_string() {
        assert!(matches!(ApiToken::new(""), Err(ConfigError::EmptyApiToken)));
        assert!(matches!(ApiToken::new("   "), Err(ConfigError::EmptyApiToken)));
    }

    #[test]
    fn test_api_token_masks_value_in_debug() {
        let token = ApiToken::new("super-secret-token").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "ApiToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_api_token_bearer_header() {
        let token = ApiToken::new("abc").unwrap();
        assert_eq!(token.bearer(), "Bearer abc");
    }

    #[test]
    fn test_shop_id_from_integer_and_string_agree() {
        assert_eq!(ShopId::from(42_u64), ShopId::new("42").unwrap());
        assert_eq!(ShopId::try_from("S1").unwrap().as_ref(), "S1");
    }

    #[test]
    fn test_shop_id_rejects_empty_and_slashes() {
        assert!(ShopId::new("").is_err());
        assert!(ShopId::new("12/34").is_err());
    }

    #[test]
    fn test_shop_id_deserializes_from_number_or_string() {
        let from_number: ShopId = serde_json::from_str("5432").unwrap();
        let from_string: ShopId = serde_json::from_str(r#""5432""#).unwrap();
        assert_eq!(from_number, from_string);
        assert!(serde_json::from_str::<ShopId>("true").is_err());
    }

    #[test]
    fn test_base_url_default_matches_constant() {
        let default = BaseUrl::default();
        let parsed = BaseUrl::new(BaseUrl::DEFAULT).unwrap();
        assert_eq!(default, parsed);
        assert_eq!(default.host_name(), Some("api.printify.com"));
    }

    #[test]
    fn test_base_url_validates_format() {
        let url = BaseUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), Some("127.0.0.1"));

        assert!(BaseUrl::new("api.printify.com").is_err());
        assert!(BaseUrl::new("ftp://api.printify.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
    }
}
