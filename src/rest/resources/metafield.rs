//! Metafield resource implementation.
//!
//! Metafields attach namespaced key/value data to the shop or to another
//! resource. Shop metafields live at `metafields`; product and variant
//! metafields are nested under their owner.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use shopify_rest::rest::RestResource;
//! use shopify_rest::rest::resources::Metafield;
//!
//! let mut warranty = Metafield::new_with_client(&client);
//! warranty.namespace = Some("inventory".to_string());
//! warranty.key = Some("warranty".to_string());
//! warranty.value = Some(json!("2 years"));
//! warranty.value_type = Some("string".to_string());
//! warranty.save_for_product(632910392).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::ClientRef;
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

/// A metafield.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Metafield {
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// Groups related metafields, e.g. `inventory`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// The stored value. Depending on `value_type` the API sends a string or
    /// a number, so the raw JSON value is kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// `string`, `integer` or `json_string`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing)]
    pub owner_id: Option<u64>,

    /// The kind of owner, e.g. `shop`, `product` or `variant`.
    #[serde(skip_serializing)]
    pub owner_resource: Option<String>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    client: ClientRef,
}

impl Metafield {
    /// Creates or updates this metafield under a product.
    ///
    /// Creating expects 201; updating expects 200, unlike a standalone
    /// update.
    ///
    /// # Errors
    ///
    /// Same as [`RestResource::save`].
    pub async fn save_for_product(&mut self, product_id: u64) -> Result<(), ResourceError> {
        self.save_with_parent("product_id", product_id).await
    }
}

impl RestResource for Metafield {
    type Id = u64;
    type AllParams = MetafieldListParams;
    type CountParams = MetafieldCountParams;

    const NAME: &'static str = "Metafield";
    const PLURAL: &'static str = "metafields";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "metafields/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "metafields"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &["product_id"],
            "products/{product_id}/metafields",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &["variant_id"],
            "variants/{variant_id}/metafields",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Count,
            &[],
            "metafields/count",
        ),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "metafields"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &["product_id"],
            "products/{product_id}/metafields",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "metafields/{id}",
        )
        .with_status(201),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["product_id", "id"],
            "products/{product_id}/metafields/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "metafields/{id}",
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

/// Parameters for listing metafields.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MetafieldListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
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

/// Parameters for counting metafields.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MetafieldCountParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}
