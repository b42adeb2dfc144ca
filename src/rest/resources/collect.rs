//! Collect resource implementation.
//!
//! A collect links one product to one manual collection. Collects are
//! created and deleted, never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::ClientRef;
use crate::rest::{ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

/// The membership of a product in a collection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Collect {
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,

    /// Position within the collection when it is sorted manually.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    #[serde(skip_serializing)]
    pub sort_value: Option<String>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    client: ClientRef,
}

impl RestResource for Collect {
    type Id = u64;
    type AllParams = CollectListParams;
    type CountParams = CollectCountParams;

    const NAME: &'static str = "Collect";
    const PLURAL: &'static str = "collects";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "collects/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "collects"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Count, &[], "collects/count"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "collects"),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "collects/{id}",
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

/// Parameters for listing collects.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CollectListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<String>,
}

/// Parameters for counting collects.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CollectCountParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
}
