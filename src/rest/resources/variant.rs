//! Variant resource implementation.
//!
//! Variants are listed, counted and created under their product, but found
//! and updated by their own ID.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::rest::RestResource;
//! use shopify_rest::rest::resources::Variant;
//!
//! let variants = Variant::all_with_parent(&client, "product_id", 632910392, None).await?;
//!
//! let mut variant = Variant::find(&client, 808950810).await?.into_inner();
//! variant.price = Some("1.00".to_string());
//! variant.save().await?; // PUT variants/808950810, expects 200
//!
//! let metafields = variant.metafields(None).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::ClientRef;
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, ResourceResponse, RestResource};
use crate::HttpMethod;

use super::metafield::{Metafield, MetafieldListParams};

/// A product variant.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Variant {
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// The owning product. Selects the nested path on create.
    #[serde(skip_serializing)]
    pub product_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The price as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub option1: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub option2: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub option3: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_shipping: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_service: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grams: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// `g`, `kg`, `oz` or `lb`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_management: Option<String>,

    /// `deny` or `continue` selling when out of stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_policy: Option<String>,

    #[serde(skip_serializing)]
    pub inventory_quantity: Option<i64>,

    #[serde(skip_serializing)]
    pub old_inventory_quantity: Option<i64>,

    #[serde(skip_serializing)]
    pub inventory_item_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<u64>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    client: ClientRef,
}

impl Variant {
    /// Lists the metafields of this variant through its client.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the variant has no
    /// ID, and an HTTP error if its client has been dropped.
    pub async fn metafields(
        &self,
        params: Option<MetafieldListParams>,
    ) -> Result<ResourceResponse<Vec<Metafield>>, ResourceError> {
        let id = self.id.ok_or(ResourceError::PathResolutionFailed {
            resource: Metafield::NAME,
            operation: ResourceOperation::All.as_str(),
        })?;
        let client = self.client.upgrade()?;
        Metafield::all_with_parent(&client, "variant_id", id, params).await
    }
}

impl RestResource for Variant {
    type Id = u64;
    type AllParams = VariantListParams;
    type CountParams = VariantCountParams;

    const NAME: &'static str = "Variant";
    const PLURAL: &'static str = "variants";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "variants/{id}"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &["product_id"],
            "products/{product_id}/variants",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Count,
            &["product_id"],
            "products/{product_id}/variants/count",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &["product_id"],
            "products/{product_id}/variants",
        ),
        ResourcePath::new(HttpMethod::Put, ResourceOperation::Update, &["id"], "variants/{id}"),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["product_id", "id"],
            "products/{product_id}/variants/{id}",
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

    fn parent_ids(&self) -> Vec<(&'static str, String)> {
        self.product_id
            .map(|id| vec![("product_id", id.to_string())])
            .unwrap_or_default()
    }
}

/// Parameters for listing the variants of a product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VariantListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<String>,
}

/// Parameters for counting the variants of a product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VariantCountParams {}
