//! Webhook subscription resource implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::rest::RestResource;
//! use shopify_rest::rest::resources::Webhook;
//!
//! let mut hook = Webhook::new_with_client(&client);
//! hook.topic = Some("orders/create".to_string());
//! hook.address = Some("https://example.com/hooks/orders".to_string());
//! hook.format = Some("json".to_string());
//! hook.save().await?;
//!
//! // Change only the address
//! let changes = Webhook {
//!     address: Some("https://example.com/hooks/v2/orders".to_string()),
//!     ..Default::default()
//! };
//! hook.save_changes(&changes).await?;
//!
//! hook.delete().await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::ClientRef;
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

/// A webhook subscription.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Webhook {
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// The event that triggers the webhook, e.g. `orders/create`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// Where notifications are delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// `json` or `xml`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Restricts the payload to these fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,

    /// Metafield namespaces included in the payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metafield_namespaces: Option<Vec<String>>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    client: ClientRef,
}

impl Webhook {
    /// Sends only the fields set on `changes`, then reloads this webhook from
    /// the response.
    ///
    /// Without an ID this creates a webhook from `changes` alone.
    ///
    /// # Errors
    ///
    /// Same as [`RestResource::save`].
    pub async fn save_changes(&mut self, changes: &Self) -> Result<(), ResourceError> {
        let changes = serde_json::to_value(changes).map_err(ResourceError::Serialize)?;
        self.save_partial(changes).await
    }
}

impl RestResource for Webhook {
    type Id = u64;
    type AllParams = WebhookListParams;
    type CountParams = WebhookCountParams;

    const NAME: &'static str = "Webhook";
    const PLURAL: &'static str = "webhooks";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "webhooks/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "webhooks"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Count, &[], "webhooks/count"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "webhooks"),
        ResourcePath::new(HttpMethod::Put, ResourceOperation::Update, &["id"], "webhooks/{id}"),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "webhooks/{id}",
        ),
    ];

    fn get_id(&self) -> Option<u64> {
        self.id
    }

    fn client(&self) -> &ClientRef {
        &self.client
    }

    fn attach(&mut self, client: ClientRef) {
        self.client = client;
    }
}

/// Parameters for listing webhooks.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WebhookListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<String>,
}

/// Parameters for counting webhooks.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WebhookCountParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::get_path;

    #[test]
    fn test_partial_webhook_serializes_only_set_fields() {
        let changes = Webhook {
            address: Some("https://example.com/hooks".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&changes).unwrap();
        assert_eq!(json, serde_json::json!({"address": "https://example.com/hooks"}));
    }

    #[test]
    fn test_webhook_deserialization() {
        let json = r#"{
            "id": 4759306,
            "address": "https://apple.com",
            "topic": "orders/create",
            "created_at": "2024-01-02T09:28:43-05:00",
            "updated_at": "2024-01-02T09:28:43-05:00",
            "format": "json",
            "fields": [],
            "metafield_namespaces": ["google", "inventory"]
        }"#;

        let webhook: Webhook = serde_json::from_str(json).unwrap();
        assert_eq!(webhook.topic.as_deref(), Some("orders/create"));
        assert_eq!(webhook.fields, Some(vec![]));
        assert_eq!(webhook.metafield_namespaces.unwrap().len(), 2);
    }

    #[test]
    fn test_webhook_statuses() {
        let create = get_path(Webhook::PATHS, ResourceOperation::Create, &[]).unwrap();
        assert_eq!(create.expected_status, 201);

        let update = get_path(Webhook::PATHS, ResourceOperation::Update, &["id"]).unwrap();
        assert_eq!(update.expected_status, 200);

        let delete = get_path(Webhook::PATHS, ResourceOperation::Delete, &["id"]).unwrap();
        assert_eq!(delete.http_method, HttpMethod::Delete);
        assert_eq!(delete.expected_status, 200);
    }
}
