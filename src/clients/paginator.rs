//! Lazy walks over paginated Printify collections.
//!
//! Printify list endpoints answer with a page envelope:
//!
//! ```json
//! {
//!     "current_page": 1,
//!     "last_page": 3,
//!     "next_page_url": "?page=2",
//!     "data": [ ... ]
//! }
//! ```
//!
//! [`Paginator`] yields the raw `data` items one page at a time and asks for
//! the next page only when the caller pulls past the end of the current one.
//! [`RecordPaginator`] does the same but maps each item into a typed record.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::errors::ProtocolError;
use crate::clients::http_client::HttpClient;
use crate::config::ShopId;
use crate::error::PrintifyError;
use crate::mapping::{self, Record};

/// Pull-based cursor over a paginated collection of JSON items.
///
/// Nothing is requested until the first call to [`Paginator::next_item`] or
/// [`Paginator::next_page`]. Dropping the paginator stops fetching.
///
/// # Example
///
/// ```rust,ignore
/// let mut pages = Paginator::new(client, "uploads.json", None);
///
/// while let Some(item) = pages.next_item().await? {
///     println!("{}", item["file_name"]);
/// }
/// ```
#[derive(Debug)]
pub struct Paginator {
    client: Arc<HttpClient>,
    path: String,
    query: BTreeMap<String, String>,
    shop_id: Option<ShopId>,
    next_page: Option<u64>,
    seen_pages: HashSet<u64>,
    buffer: VecDeque<Value>,
    pages_fetched: u32,
    max_pages: Option<u32>,
}

impl Paginator {
    /// Creates a paginator over `path`.
    ///
    /// The walk starts at the `page` query parameter when one is given,
    /// otherwise at page 1.
    #[must_use]
    pub fn new(
        client: Arc<HttpClient>,
        path: impl Into<String>,
        query: Option<BTreeMap<String, String>>,
    ) -> Self {
        let query = query.unwrap_or_default();
        let first_page = query
            .get("page")
            .and_then(|page| page.parse::<u64>().ok())
            .unwrap_or(1);

        Self {
            client,
            path: path.into(),
            query,
            shop_id: None,
            next_page: Some(first_page),
            seen_pages: HashSet::new(),
            buffer: VecDeque::new(),
            pages_fetched: 0,
            max_pages: None,
        }
    }

    /// Scopes the walk to an explicit shop.
    #[must_use]
    pub fn with_shop(mut self, shop_id: Option<ShopId>) -> Self {
        self.shop_id = shop_id;
        self
    }

    /// Stops after `max_pages` pages have been fetched.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Returns the number of pages fetched so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Returns the next item, fetching the following page when needed.
    ///
    /// Returns `Ok(None)` once the collection is exhausted.
    ///
    /// # Errors
    ///
    /// Returns the transport error of the failing page request, or
    /// [`ProtocolError`] if a page is malformed or the walk loops.
    pub async fn next_item(&mut self) -> Result<Option<Value>, PrintifyError> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if !self.fetch_next().await? {
                return Ok(None);
            }
        }
    }

    /// Returns the remaining items of the current page, or the next page.
    ///
    /// Returns `Ok(None)` once the collection is exhausted. Empty pages in
    /// the middle of a collection are returned as empty vectors.
    ///
    /// # Errors
    ///
    /// As [`Paginator::next_item`].
    pub async fn next_page(&mut self) -> Result<Option<Vec<Value>>, PrintifyError> {
        if self.buffer.is_empty() && !self.fetch_next().await? {
            return Ok(None);
        }
        Ok(Some(self.buffer.drain(..).collect()))
    }

    /// Drains the whole collection into a vector.
    ///
    /// # Errors
    ///
    /// As [`Paginator::next_item`]. No partial result is returned.
    pub async fn try_collect(mut self) -> Result<Vec<Value>, PrintifyError> {
        let mut items = Vec::new();
        while let Some(item) = self.next_item().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Fetches the next page into the buffer. Returns `false` when done.
    async fn fetch_next(&mut self) -> Result<bool, PrintifyError> {
        let Some(page) = self.next_page else {
            return Ok(false);
        };

        if self.max_pages.is_some_and(|max| self.pages_fetched >= max) {
            self.next_page = None;
            return Ok(false);
        }

        if !self.seen_pages.insert(page) {
            tracing::warn!(path = %self.path, page, "Pagination looped back to a fetched page");
            self.next_page = None;
            return Err(ProtocolError::RepeatedPage {
                path: self.path.clone(),
                page,
            }
            .into());
        }

        let mut query = self.query.clone();
        query.insert("page".to_string(), page.to_string());

        tracing::debug!(path = %self.path, page, "Fetching page");

        // A failed page ends the walk
        self.next_page = None;
        let body = self
            .client
            .get(&self.path, self.shop_id.as_ref(), Some(query))
            .await?;

        let data = match body.get("data") {
            Some(Value::Array(items)) => items.clone(),
            _ => {
                return Err(ProtocolError::MalformedPage {
                    path: self.path.clone(),
                    reason: "missing 'data' list".to_string(),
                }
                .into());
            }
        };

        self.pages_fetched += 1;
        self.next_page = self.following_page(&body, page)?;
        self.buffer.extend(data);
        Ok(true)
    }

    /// Ends the walk, discarding any buffered items.
    fn stop(&mut self) {
        self.next_page = None;
        self.buffer.clear();
    }

    /// Reads the next page number from a page envelope.
    ///
    /// `next_page_url` wins when the key is present (`null` or empty ends the
    /// walk);
    /// otherwise `current_page < last_page` advances by one.
    fn following_page(&self, body: &Value, fetched: u64) -> Result<Option<u64>, PrintifyError> {
        match body.get("next_page_url") {
            Some(Value::Null) => Ok(None),
            Some(Value::String(url)) if url.is_empty() => Ok(None),
            Some(Value::String(url)) => page_param(url).map(Some).ok_or_else(|| {
                ProtocolError::MalformedPage {
                    path: self.path.clone(),
                    reason: format!("next_page_url '{url}' has no page number"),
                }
                .into()
            }),
            Some(_) => Err(ProtocolError::MalformedPage {
                path: self.path.clone(),
                reason: "next_page_url is not a string".to_string(),
            }
            .into()),
            None => {
                let current = body
                    .get("current_page")
                    .and_then(Value::as_u64)
                    .unwrap_or(fetched);
                let last = body.get("last_page").and_then(Value::as_u64);
                Ok(last.filter(|last| current < *last).map(|_| current + 1))
            }
        }
    }
}

/// Extracts the `page` query parameter from a relative or absolute URL.
fn page_param(url: &str) -> Option<u64> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

/// A [`Paginator`] that maps every item into a record `T`.
///
/// # Example
///
/// ```rust,ignore
/// let mut products = printify.products().list(&ProductListParams::default())?;
///
/// while let Some(product) = products.next_item().await? {
///     println!("{}", product.title);
/// }
/// ```
#[derive(Debug)]
pub struct RecordPaginator<T> {
    inner: Paginator,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> RecordPaginator<T> {
    /// Wraps a raw paginator.
    #[must_use]
    pub const fn new(inner: Paginator) -> Self {
        Self {
            inner,
            _record: PhantomData,
        }
    }

    /// Stops after `max_pages` pages have been fetched.
    #[must_use]
    pub fn max_pages(self, max_pages: u32) -> Self {
        Self::new(self.inner.max_pages(max_pages))
    }

    /// Returns the number of pages fetched so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> u32 {
        self.inner.pages_fetched()
    }

    /// Returns the next record.
    ///
    /// # Errors
    ///
    /// As [`Paginator::next_item`], plus [`PrintifyError::Validation`] when an
    /// item cannot be mapped. A mapping failure ends the walk.
    pub async fn next_item(&mut self) -> Result<Option<T>, PrintifyError> {
        let Some(item) = self.inner.next_item().await? else {
            return Ok(None);
        };
        mapping::from_value(&item).map(Some).map_err(|error| {
            self.inner.stop();
            error.into()
        })
    }

    /// Returns the next page of records.
    ///
    /// # Errors
    ///
    /// As [`RecordPaginator::next_item`].
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, PrintifyError> {
        let Some(items) = self.inner.next_page().await? else {
            return Ok(None);
        };
        items
            .iter()
            .map(mapping::from_value::<T>)
            .collect::<Result<Vec<T>, _>>()
            .map(Some)
            .map_err(|error| {
                self.inner.stop();
                error.into()
            })
    }

    /// Drains the whole collection into a vector of records.
    ///
    /// # Errors
    ///
    /// As [`RecordPaginator::next_item`].
    pub async fn try_collect(mut self) -> Result<Vec<T>, PrintifyError> {
        let mut records = Vec::new();
        while let Some(record) = self.next_item().await? {
            records.push(record);
        }
        Ok(records)
    }
}
