//! Collection resource implementation.
//!
//! Collections group products, either by hand (through
//! [`Collect`](super::Collect)s) or automatically through `rules`.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::rest::RestResource;
//! use shopify_rest::rest::resources::Collection;
//!
//! let collection = Collection::find(&client, 841564295).await?;
//! let products = Collection::products(&client, 841564295, 50).await?;
//! for product in products.iter() {
//!     println!("{:?}", product.title);
//! }
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{ClientRef, HttpClient};
use crate::rest::errors::expect_status;
use crate::rest::resource::send;
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, ResourceResponse, RestResource};
use crate::HttpMethod;

use super::common::CollectionRule;

/// A collection of products.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Collection {
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// The description, as HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,

    /// Product ordering, e.g. `best-selling`, `alpha-asc` or `manual`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_suffix: Option<String>,

    /// `web` or `global`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_scope: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// The collection image, kept as the raw JSON object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,

    /// Conditions of an automated collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<CollectionRule>>,

    /// Whether a product must match any rule (`true`) or all of them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disjunctive: Option<bool>,

    #[serde(skip_serializing)]
    pub products_count: Option<u64>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    client: ClientRef,
}

/// A product as listed by [`Collection::products`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CollectionProduct {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub handle: Option<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub tags: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Collection {
    /// Lists the products of a collection, at most `limit` per page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the server does not
    /// answer 200.
    pub async fn products(
        client: &HttpClient,
        collection_id: u64,
        limit: u32,
    ) -> Result<ResourceResponse<Vec<CollectionProduct>>, ResourceError> {
        let mut query = HashMap::new();
        query.insert("limit".to_string(), limit.to_string());

        let path = format!("collections/{collection_id}/products");
        let response = send(client, HttpMethod::Get, &path, Some(query), None).await?;
        expect_status(&response, 200)?;
        ResourceResponse::from_http_response(&response, "products")
    }
}

impl RestResource for Collection {
    type Id = u64;
    type AllParams = CollectionListParams;
    type CountParams = CollectionCountParams;

    const NAME: &'static str = "Collection";
    const PLURAL: &'static str = "collections";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "collections/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "collections"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Count,
            &[],
            "collections/count",
        ),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "collections"),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "collections/{id}",
        )
        .with_status(201),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "collections/{id}",
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

/// Parameters for listing collections.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CollectionListParams {
    /// Restrict to these IDs; sent as a comma-separated list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Only collections containing this product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at_max: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<String>,
}

/// Parameters for counting collections.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CollectionCountParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{get_path, serialize_to_query};

    #[test]
    fn test_collection_with_rules_deserializes() {
        let json = r#"{
            "id": 1063001322,
            "handle": "ipods",
            "title": "IPods",
            "updated_at": "2024-01-02T09:28:43-05:00",
            "body_html": "<p>The best selling ipod ever</p>",
            "published_at": "2008-02-01T19:00:00-05:00",
            "sort_order": "manual",
            "template_suffix": null,
            "disjunctive": false,
            "rules": [{"column": "title", "relation": "starts_with", "condition": "iPod"}],
            "published_scope": "web",
            "products_count": 2,
            "image": {"src": "https://cdn.example.com/ipod.png", "width": 123}
        }"#;

        let collection: Collection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.products_count, Some(2));
        assert_eq!(collection.rules.as_ref().unwrap()[0].relation, "starts_with");
        assert_eq!(collection.image.as_ref().unwrap()["width"], 123);

        let body = serde_json::to_value(&collection).unwrap();
        assert!(body.get("products_count").is_none());
        assert!(body.get("updated_at").is_none());
        assert_eq!(body["rules"][0]["condition"], "iPod");
    }

    #[test]
    fn test_collection_paths_use_plural_endpoint() {
        let all = get_path(Collection::PATHS, ResourceOperation::All, &[]).unwrap();
        assert_eq!(all.template, "collections");

        let create = get_path(Collection::PATHS, ResourceOperation::Create, &[]).unwrap();
        assert_eq!(create.template, "collections");
        assert_eq!(create.expected_status, 201);

        let update = get_path(Collection::PATHS, ResourceOperation::Update, &["id"]).unwrap();
        assert_eq!(update.expected_status, 201);
    }

    #[test]
    fn test_ids_are_comma_joined() {
        let params = CollectionListParams {
            ids: Some(vec![841564295, 395646240]),
            ..Default::default()
        };
        let query = serialize_to_query(&params).unwrap();
        assert_eq!(query["ids"], "841564295,395646240");
    }
}
