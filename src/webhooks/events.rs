//! Webhook topics and the event payload delivered for them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PrintifyError;
use crate::mapping::{self, parse_timestamp, FieldKind, FieldSpec, Record};
use crate::webhooks::errors::WebhookError;

/// Events a webhook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookTopic {
    ShopDisconnected,
    ProductDeleted,
    ProductPublishStarted,
    OrderCreated,
    OrderUpdated,
    OrderSentToProduction,
    OrderShipmentCreated,
    OrderShipmentDelivered,
}

impl WebhookTopic {
    /// Every topic, in the order the API documents them.
    pub const ALL: [Self; 8] = [
        Self::ShopDisconnected,
        Self::ProductDeleted,
        Self::ProductPublishStarted,
        Self::OrderCreated,
        Self::OrderUpdated,
        Self::OrderSentToProduction,
        Self::OrderShipmentCreated,
        Self::OrderShipmentDelivered,
    ];

    /// Returns the wire name, such as `order:created`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShopDisconnected => "shop:disconnected",
            Self::ProductDeleted => "product:deleted",
            Self::ProductPublishStarted => "product:publish:started",
            Self::OrderCreated => "order:created",
            Self::OrderUpdated => "order:updated",
            Self::OrderSentToProduction => "order:sent-to-production",
            Self::OrderShipmentCreated => "order:shipment:created",
            Self::OrderShipmentDelivered => "order:shipment:delivered",
        }
    }
}

impl fmt::Display for WebhookTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookTopic {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| WebhookError::UnknownTopic {
                topic: s.to_string(),
            })
    }
}

/// The object an event is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookResource {
    pub id: String,
    /// Wire key `type`, e.g. `order` or `product`.
    pub kind: String,
    /// Topic-specific details, kept as raw JSON.
    pub data: Option<Value>,
}

const RESOURCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", FieldKind::Identifier),
    FieldSpec::required("kind", FieldKind::String).renamed("type"),
    FieldSpec::optional("data", FieldKind::Any),
];

impl Record for WebhookResource {
    const NAME: &'static str = "WebhookResource";
    const FIELDS: &'static [FieldSpec] = RESOURCE_FIELDS;
}

/// One webhook delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    /// Wire key `type`: the topic name.
    pub kind: String,
    pub created_at: String,
    pub resource: WebhookResource,
}

impl Record for WebhookEvent {
    const NAME: &'static str = "WebhookEvent";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::Identifier),
        FieldSpec::required("kind", FieldKind::String).renamed("type"),
        FieldSpec::required("created_at", FieldKind::String),
        FieldSpec::required("resource", FieldKind::Record(RESOURCE_FIELDS)),
    ];
}

impl WebhookEvent {
    /// Returns the topic, or `None` for topics this SDK does not know yet.
    #[must_use]
    pub fn topic(&self) -> Option<WebhookTopic> {
        self.kind.parse().ok()
    }

    /// Parses `created_at`.
    #[must_use]
    pub fn created_at_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.created_at)
    }
}

/// Decodes a raw delivery body. Does not check the signature.
///
/// # Errors
///
/// Returns [`PrintifyError::Webhook`] if the body is not JSON and
/// [`PrintifyError::Validation`] if it does not describe an event.
pub fn parse_event(body: &[u8]) -> Result<WebhookEvent, PrintifyError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| WebhookError::InvalidPayload {
        reason: e.to_string(),
    })?;
    Ok(mapping::from_value(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::ValidationError;
    use serde_json::json;

    #[test]
    fn test_topic_round_trips_through_str() {
        for topic in WebhookTopic::ALL {
            assert_eq!(topic.as_str().parse::<WebhookTopic>(), Ok(topic));
        }
        assert_eq!(WebhookTopic::OrderSentToProduction.to_string(), "order:sent-to-production");
    }

    #[test]
    fn test_unknown_topic_is_error() {
        assert!(matches!(
            "order:lost".parse::<WebhookTopic>(),
            Err(WebhookError::UnknownTopic { .. })
        ));
    }

    #[test]
    fn test_parse_event() {
        let body = json!({
            "id": "653b6be8-2ff7-4ab5-a7a6-6889a8b3bbf5",
            "type": "order:shipment:created",
            "created_at": "2024-04-18 13:24:28+00:00",
            "resource": {
                "id": 5_432_101,
                "type": "order",
                "data": {"shop_id": 815_256, "carrier": {"code": "usps"}}
            }
        });
        let event = parse_event(body.to_string().as_bytes()).unwrap();

        assert_eq!(event.topic(), Some(WebhookTopic::OrderShipmentCreated));
        assert_eq!(event.resource.id, "5432101");
        assert_eq!(event.resource.kind, "order");
        assert_eq!(event.resource.data.as_ref().unwrap()["carrier"]["code"], "usps");
        assert!(event.created_at_time().is_some());
    }

    #[test]
    fn test_parse_event_unknown_topic_is_kept() {
        let body = br#"{"id":"e","type":"shop:renamed","created_at":"x","resource":{"id":"s","type":"shop"}}"#;
        let event = parse_event(body).unwrap();
        assert_eq!(event.topic(), None);
        assert_eq!(event.kind, "shop:renamed");
        assert!(event.resource.data.is_none());
    }

    #[test]
    fn test_parse_event_rejects_non_json() {
        assert!(matches!(
            parse_event(b"not json"),
            Err(PrintifyError::Webhook(WebhookError::InvalidPayload { .. }))
        ));
    }

    #[test]
    fn test_parse_event_requires_resource() {
        let error = parse_event(br#"{"id":"e","type":"order:created","created_at":"x"}"#).unwrap_err();
        assert!(matches!(
            error,
            PrintifyError::Validation(ValidationError::MissingField { ref field, .. }) if field == "resource"
        ));
    }
}
