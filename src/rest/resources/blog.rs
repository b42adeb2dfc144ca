//! Blog resource implementation.
//!
//! Blogs are containers for articles; see [`Article`](super::Article) for the
//! posts themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::ClientRef;
use crate::rest::{ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

/// A blog in a Shopify store.
///
/// # Fields
///
/// ## Read-Only Fields
/// - `id`, `created_at`, `updated_at`
///
/// ## Writable Fields
/// - `title`, `handle`, `commentable` (`no`, `moderate` or `yes`)
/// - `feedburner`, `feedburner_location`, `template_suffix`, `tags`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Blog {
    /// The unique identifier of the blog.
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The URL-friendly handle, generated from the title when not set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// Comment moderation setting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentable: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedburner: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedburner_location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_suffix: Option<String>,

    /// Comma-separated tags of the blog's articles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    client: ClientRef,
}

impl RestResource for Blog {
    type Id = u64;
    type AllParams = BlogListParams;
    type CountParams = BlogCountParams;

    const NAME: &'static str = "Blog";
    const PLURAL: &'static str = "blogs";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "blogs/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "blogs"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Count, &[], "blogs/count"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "blogs"),
        ResourcePath::new(HttpMethod::Put, ResourceOperation::Update, &["id"], "blogs/{id}")
            .with_status(201),
        ResourcePath::new(HttpMethod::Delete, ResourceOperation::Delete, &["id"], "blogs/{id}"),
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

/// Parameters for listing blogs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BlogListParams {
    /// Filter by blog handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// Maximum number of results to return (default: 50, max: 250).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Return blogs after this ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,

    /// Cursor for pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<String>,

    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

/// Parameters for counting blogs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BlogCountParams {}
