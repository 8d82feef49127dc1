//! HTTP client for Printify API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Printify API and classifying their responses.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::clients::errors::{ClientError, ProtocolError, ServerError};
use crate::clients::http_request::{HttpMethod, HttpRequest, SHOP_ID_PLACEHOLDER};
use crate::clients::http_response::{parse_retry_after, HttpResponse};
use crate::config::{PrintifyConfig, ShopId, API_VERSION_PATH};
use crate::error::{ConfigError, PrintifyError};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Printify API.
///
/// The client handles:
/// - URL construction from the base URL and the `/v1/` prefix
/// - Default headers including User-Agent and the bearer token
/// - Shop-scope substitution for `{shop_id}` paths
/// - Response classification into typed errors
///
/// It never retries: every failure is returned to the caller as soon as it
/// is observed.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and holds only read-only configuration,
/// making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://api.printify.com`).
    base_uri: String,
    /// Shop used when a shop-scoped request carries no explicit shop.
    default_shop_id: Option<ShopId>,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use printify_api::{PrintifyConfig, ApiToken};
    /// use printify_api::clients::HttpClient;
    ///
    /// let config = PrintifyConfig::builder()
    ///     .api_token(ApiToken::new("token").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config).unwrap();
    /// assert_eq!(client.base_uri(), "https://api.printify.com");
    /// ```
    pub fn new(config: &PrintifyConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}printify-api-rust v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Authorization".to_string(), config.api_token().bearer());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::HttpClient {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_uri: config.base_url().as_ref().to_string(),
            default_shop_id: config.shop_id().cloned(),
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default shop scope, if configured.
    #[must_use]
    pub const fn default_shop_id(&self) -> Option<&ShopId> {
        self.default_shop_id.as_ref()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Resolves a request path to the path actually sent, substituting the
    /// shop scope when the path needs one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingShopId`] if the path is shop-scoped and
    /// neither `shop_id` nor the configured default is available.
    pub fn resolve_path(&self, path: &str, shop_id: Option<&ShopId>) -> Result<String, ConfigError> {
        if !path.contains(SHOP_ID_PLACEHOLDER) {
            return Ok(path.trim_start_matches('/').to_string());
        }

        let shop_id = shop_id
            .or(self.default_shop_id.as_ref())
            .ok_or_else(|| ConfigError::MissingShopId {
                path: path.to_string(),
            })?;

        Ok(path
            .trim_start_matches('/')
            .replace(SHOP_ID_PLACEHOLDER, &urlencoding::encode(shop_id.as_ref())))
    }

    /// Sends an HTTP request to the Printify API.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A shop-scoped path has no shop id (`Config`)
    /// - A network error occurs (`Transport`)
    /// - A 4xx response is received (`Client`)
    /// - A 5xx response is received (`Server`)
    /// - A 2xx body is not JSON (`Protocol`)
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = HttpRequest::builder(HttpMethod::Get, "shops.json")
    ///     .build()
    ///     .unwrap();
    ///
    /// let response = client.request(request).await?;
    /// println!("Shops: {}", response.body);
    /// ```
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, PrintifyError> {
        request.verify()?;

        let path = self.resolve_path(&request.path, request.shop_id.as_ref())?;
        let url = format!("{}/{}/{}", self.base_uri, API_VERSION_PATH, path);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        // Action endpoints reject POSTs without a JSON document
        if request.http_method.carries_body() {
            let body = request
                .body
                .clone()
                .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
            req_builder = req_builder.json(&body);
        }

        tracing::debug!(method = %request.http_method, path = %path, "Sending Printify API request");

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        Self::classify(&path, code, res_headers, &body_text)
    }

    /// Sends a `GET` request and returns the JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get(
        &self,
        path: &str,
        shop_id: Option<&ShopId>,
        query: Option<BTreeMap<String, String>>,
    ) -> Result<Value, PrintifyError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, path).shop_id(shop_id.cloned());
        if let Some(query) = query {
            builder = builder.query(query);
        }
        Ok(self.request(builder.build()?).await?.into_body())
    }

    /// Sends a `POST` request and returns the JSON body.
    ///
    /// An absent `body` is sent as an empty JSON object.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post(
        &self,
        path: &str,
        shop_id: Option<&ShopId>,
        body: Option<Value>,
    ) -> Result<Value, PrintifyError> {
        let mut builder = HttpRequest::builder(HttpMethod::Post, path).shop_id(shop_id.cloned());
        if let Some(body) = body {
            builder = builder.body(body);
        }
        Ok(self.request(builder.build()?).await?.into_body())
    }

    /// Sends a `PUT` request and returns the JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn put(
        &self,
        path: &str,
        shop_id: Option<&ShopId>,
        body: Value,
    ) -> Result<Value, PrintifyError> {
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .shop_id(shop_id.cloned())
            .body(body)
            .build()?;
        Ok(self.request(request).await?.into_body())
    }

    /// Sends a `DELETE` request and returns the JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete(&self, path: &str, shop_id: Option<&ShopId>) -> Result<Value, PrintifyError> {
        let request = HttpRequest::builder(HttpMethod::Delete, path)
            .shop_id(shop_id.cloned())
            .build()?;
        Ok(self.request(request).await?.into_body())
    }

    /// Turns a raw status, header map and body into a response or a typed error.
    fn classify(
        path: &str,
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body_text: &str,
    ) -> Result<HttpResponse, PrintifyError> {
        if (200..300).contains(&code) {
            let body = if code == 204 || body_text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(body_text).map_err(|e| ProtocolError::InvalidJson {
                    path: path.to_string(),
                    reason: e.to_string(),
                })?
            };
            return Ok(HttpResponse::new(code, headers, body));
        }

        if !(400..600).contains(&code) {
            tracing::warn!(code, path = %path, "Unexpected Printify API status");
            return Err(ProtocolError::UnexpectedStatus {
                path: path.to_string(),
                code,
            }
            .into());
        }

        // Error bodies are best-effort: keep the raw text when it is not JSON
        let body = if body_text.trim().is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(body_text)
                .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
        };

        if code >= 500 {
            tracing::warn!(code, path = %path, "Printify API server error");
            return Err(ServerError::new(code, body).into());
        }

        tracing::debug!(code, path = %path, "Printify API rejected request");
        let retry_after = parse_retry_after(&headers);
        Err(ClientError::new(code, body, retry_after).into())
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
