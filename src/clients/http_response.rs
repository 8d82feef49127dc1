//! HTTP response types for the Printify API SDK.

use std::collections::HashMap;

use serde_json::Value;

/// A successful HTTP response from the Printify API.
///
/// Error statuses never reach this type: the transport turns them into
/// [`ClientError`](crate::clients::ClientError) or
/// [`ServerError`](crate::clients::ServerError).
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body. `Value::Null` for empty bodies and 204.
    pub body: Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Consumes the response and returns the body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }
}

/// Parses a `Retry-After` header value given in seconds.
pub(crate) fn parse_retry_after(headers: &HashMap<String, Vec<String>>) -> Option<f64> {
    headers
        .get("retry-after")
        .and_then(|values| values.first())
        .and_then(|value| value.trim().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(
                response.is_ok(),
                "Expected is_ok() to be true for code {code}"
            );
        }
        assert!(!HttpResponse::new(404, HashMap::new(), Value::Null).is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            vec!["application/json".to_string()],
        );
        let response = HttpResponse::new(200, headers, Value::Null);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("X-Missing"), None);
    }

    #[test]
    fn test_parse_retry_after() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["1.5".to_string()]);
        assert_eq!(parse_retry_after(&headers), Some(1.5));

        headers.insert("retry-after".to_string(), vec!["soon".to_string()]);
        assert_eq!(parse_retry_after(&headers), None);
        assert_eq!(parse_retry_after(&HashMap::new()), None);
    }
}
