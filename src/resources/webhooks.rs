//! Webhook subscriptions of a shop.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clients::{HttpClient, SHOP_ID_PLACEHOLDER};
use crate::config::ShopId;
use crate::error::PrintifyError;
use crate::mapping::{self, FieldKind, FieldSpec, Record};
use crate::resources::segment;
use crate::webhooks::WebhookTopic;

/// A registered webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    /// Topic name, e.g. `order:created`.
    pub topic: String,
    /// Callback URL.
    pub url: String,
    pub shop_id: Option<String>,
}

impl Record for Webhook {
    const NAME: &'static str = "Webhook";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::Identifier),
        FieldSpec::required("topic", FieldKind::String),
        FieldSpec::required("url", FieldKind::String),
        FieldSpec::optional("shop_id", FieldKind::Identifier),
    ];
}

impl Webhook {
    /// Returns the topic, or `None` if this SDK does not know it.
    #[must_use]
    pub fn topic_kind(&self) -> Option<WebhookTopic> {
        self.topic.parse().ok()
    }
}

/// The body of [`Webhooks::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWebhook {
    pub topic: String,
    pub url: String,
    /// Key used to sign deliveries. See [`crate::webhooks::verify_signature`].
    pub secret: Option<String>,
}

impl Record for NewWebhook {
    const NAME: &'static str = "NewWebhook";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("topic", FieldKind::String),
        FieldSpec::required("url", FieldKind::String),
        FieldSpec::optional("secret", FieldKind::String),
    ];
}

impl NewWebhook {
    /// Creates an unsigned subscription.
    #[must_use]
    pub fn new(topic: WebhookTopic, url: impl Into<String>) -> Self {
        Self {
            topic: topic.as_str().to_string(),
            url: url.into(),
            secret: None,
        }
    }

    /// Sets the signing secret.
    #[must_use]
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// The body of [`Webhooks::update`]. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookUpdate {
    pub url: Option<String>,
    pub secret: Option<String>,
}

impl Record for WebhookUpdate {
    const NAME: &'static str = "WebhookUpdate";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("url", FieldKind::String),
        FieldSpec::optional("secret", FieldKind::String),
    ];
}

/// Client for `shops/{shop_id}/webhooks*.json`.
#[derive(Clone, Debug)]
pub struct Webhooks {
    client: Arc<HttpClient>,
    shop_id: Option<ShopId>,
}

impl Webhooks {
    /// Creates a client scoped to the configured default shop.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            shop_id: None,
        }
    }

    /// Scopes the client to `shop_id` instead of the default shop.
    #[must_use]
    pub fn with_shop(mut self, shop_id: ShopId) -> Self {
        self.shop_id = Some(shop_id);
        self
    }

    /// Lists the webhooks of the shop.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if no shop is in scope, the request fails or
    /// a webhook cannot be mapped.
    pub async fn list(&self) -> Result<Vec<Webhook>, PrintifyError> {
        let body = self
            .client
            .get(&webhook_path(None), self.shop_id.as_ref(), None)
            .await?;
        Ok(mapping::from_list(&body)?)
    }

    /// Registers a webhook.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if no shop is in scope or the request fails.
    pub async fn create(&self, webhook: &NewWebhook) -> Result<Webhook, PrintifyError> {
        tracing::debug!(topic = %webhook.topic, "Creating webhook");
        let body = self
            .client
            .post(
                &webhook_path(None),
                self.shop_id.as_ref(),
                Some(mapping::to_value(webhook)?),
            )
            .await?;
        Ok(mapping::from_value(&body)?)
    }

    /// Changes the URL or secret of a webhook.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if no shop is in scope or the request fails.
    pub async fn update(
        &self,
        webhook_id: &str,
        update: &WebhookUpdate,
    ) -> Result<Webhook, PrintifyError> {
        let body = self
            .client
            .put(
                &webhook_path(Some(webhook_id)),
                self.shop_id.as_ref(),
                mapping::to_value(update)?,
            )
            .await?;
        Ok(mapping::from_value(&body)?)
    }

    /// Removes a webhook.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if no shop is in scope or the request fails.
    pub async fn delete(&self, webhook_id: &str) -> Result<(), PrintifyError> {
        self.client
            .delete(&webhook_path(Some(webhook_id)), self.shop_id.as_ref())
            .await?;
        Ok(())
    }
}

fn webhook_path(webhook_id: Option<&str>) -> String {
    webhook_id.map_or_else(
        || format!("shops/{SHOP_ID_PLACEHOLDER}/webhooks.json"),
        |id| format!("shops/{SHOP_ID_PLACEHOLDER}/webhooks/{}.json", segment(id)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_webhook_path() {
        assert_eq!(webhook_path(None), "shops/{shop_id}/webhooks.json");
        assert_eq!(webhook_path(Some("abc")), "shops/{shop_id}/webhooks/abc.json");
    }

    #[test]
    fn test_new_webhook_body() {
        let body = mapping::to_mapping(
            &NewWebhook::new(WebhookTopic::OrderCreated, "https://example.com/hook").secret("s3"),
        )
        .unwrap();
        assert_eq!(body["topic"], "order:created");
        assert_eq!(body["url"], "https://example.com/hook");
        assert_eq!(body["secret"], "s3");

        let unsigned =
            mapping::to_mapping(&NewWebhook::new(WebhookTopic::ShopDisconnected, "u")).unwrap();
        assert!(!unsigned.contains_key("secret"));
    }

    #[test]
    fn test_empty_update_is_empty_object() {
        let body = mapping::to_mapping(&WebhookUpdate::default()).unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_webhook_from_numeric_shop_id() {
        let webhook: Webhook = mapping::from_value(&json!({
            "id": "5cb87a8cd490a2ccb256cec4",
            "topic": "order:updated",
            "url": "https://example.com/webhooks/order/updated",
            "shop_id": 815_256
        }))
        .unwrap();
        assert_eq!(webhook.shop_id.as_deref(), Some("815256"));
        assert_eq!(webhook.topic_kind(), Some(WebhookTopic::OrderUpdated));
    }
}
