//! Parsing of vendor timestamps.
//!
//! Records keep timestamps as the strings the API sent; accessors such as
//! [`Product::created_at_time`](crate::resources::Product::created_at_time)
//! parse them on demand.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// Parses a Printify timestamp.
///
/// Accepts the API's `2019-07-25 13:40:41+00:00` form, RFC 3339, and a
/// naive `2019-07-25 13:40:41` (read as UTC). Returns `None` otherwise.
///
/// # Example
///
/// ```rust
/// use printify_api::mapping::parse_timestamp;
///
/// let parsed = parse_timestamp("2019-07-25 13:40:41+00:00").unwrap();
/// assert_eq!(parsed.to_rfc3339(), "2019-07-25T13:40:41+00:00");
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();

    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).fixed_offset())
        })
}
