//! Article resource implementation.
//!
//! Articles are blog posts. They can be listed store-wide or per blog, but
//! only counted per blog.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::rest::RestResource;
//! use shopify_rest::rest::resources::{Article, ArticleListParams};
//!
//! // Articles of one blog, newest first
//! let params = ArticleListParams {
//!     order: Some("published_at DESC".to_string()),
//!     limit: Some(10),
//!     ..Default::default()
//! };
//! let articles = Article::blog_articles(&client, 241253187, Some(params)).await?;
//!
//! // Count them
//! let count = Article::count_for_blog(&client, 241253187, None).await?;
//!
//! // Write a new one
//! let mut article = Article::new_with_client(&client);
//! article.blog_id = Some(241253187);
//! article.title = Some("Launch day".to_string());
//! article.save().await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ClientRef, HttpClient};
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, ResourceResponse, RestResource};
use crate::HttpMethod;

/// A blog article.
///
/// # Fields
///
/// ## Read-Only Fields
/// - `id`, `created_at`, `updated_at`, `user_id`
///
/// ## Writable Fields
/// - `blog_id` - The blog the article belongs to; selects the nested path
/// - `title`, `author`, `body_html`, `summary_html`, `handle`, `tags`
/// - `published_at`, `template_suffix`, `image`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Article {
    /// The unique identifier of the article.
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// The ID of the blog containing the article.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// The article content, as HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,

    /// A summary shown on listing pages, as HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_html: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// Comma-separated tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_suffix: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ArticleImage>,

    /// When the article was published. `None` for unpublished articles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub user_id: Option<u64>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    client: ClientRef,
}

/// The feature image of an article.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ArticleImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Lists the articles of one blog.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the server does not
    /// answer 200.
    pub async fn blog_articles(
        client: &HttpClient,
        blog_id: u64,
        params: Option<ArticleListParams>,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        Self::all_with_parent(client, "blog_id", blog_id, params).await
    }

    /// Counts the articles of one blog.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the server does not
    /// answer 200.
    pub async fn count_for_blog(
        client: &HttpClient,
        blog_id: u64,
        params: Option<ArticleCountParams>,
    ) -> Result<u64, ResourceError> {
        Self::count_with_parent(client, "blog_id", blog_id, params).await
    }
}

impl RestResource for Article {
    type Id = u64;
    type AllParams = ArticleListParams;
    type CountParams = ArticleCountParams;

    const NAME: &'static str = "Article";
    const PLURAL: &'static str = "articles";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "articles/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "articles"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &["blog_id"],
            "blogs/{blog_id}/articles",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Count,
            &["blog_id"],
            "blogs/{blog_id}/articles/count",
        ),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "articles"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &["blog_id"],
            "blogs/{blog_id}/articles",
        ),
        ResourcePath::new(HttpMethod::Put, ResourceOperation::Update, &["id"], "articles/{id}")
            .with_status(201),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["blog_id", "id"],
            "blogs/{blog_id}/articles/{id}",
        )
        .with_status(201),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "articles/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["blog_id", "id"],
            "blogs/{blog_id}/articles/{id}",
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
        self.blog_id
            .map(|id| vec![("blog_id", id.to_string())])
            .unwrap_or_default()
    }
}

/// Parameters for listing articles.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ArticleListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// Maximum number of results to return (default: 50, max: 250).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at_max: Option<DateTime<Utc>>,

    /// `published`, `unpublished` or `any`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_status: Option<String>,

    /// Sort order, e.g. `published_at DESC`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<String>,
}

/// Parameters for counting the articles of a blog.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ArticleCountParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,

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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{get_path, serialize_to_query};

    #[test]
    fn test_article_serialization_omits_read_only_fields() {
        let article = Article {
            id: Some(134645308),
            blog_id: Some(241253187),
            title: Some("get on the train now".to_string()),
            author: Some("dennis".to_string()),
            user_id: Some(799407056),
            created_at: Some(Utc::now()),
            ..Default::default()
        };

        let json = serde_json::to_value(&article).unwrap();

        assert_eq!(json["title"], "get on the train now");
        assert_eq!(json["blog_id"], 241253187);
        assert!(json.get("id").is_none());
        assert!(json.get("user_id").is_none());
        assert!(json.get("created_at").is_none());
        assert!(json.get("body_html").is_none());
    }

    #[test]
    fn test_article_deserialization() {
        let json = r#"{
            "id": 989034056,
            "title": "Some crazy article I'm coming up with",
            "created_at": "2008-12-31T19:00:00-05:00",
            "body_html": "I have no idea what to write about, but it's going to rock!",
            "blog_id": 241253187,
            "author": "John",
            "user_id": null,
            "published_at": null,
            "updated_at": "2009-01-31T19:00:00-05:00",
            "summary_html": null,
            "template_suffix": null,
            "handle": "some-crazy-article-im-coming-up-with",
            "tags": "Mystery",
            "image": {"src": "https://cdn.example.com/a.jpg", "alt": null, "created_at": "2009-01-31T19:00:00-05:00"}
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();

        assert_eq!(article.id, Some(989034056));
        assert_eq!(article.blog_id, Some(241253187));
        assert!(article.published_at.is_none());
        assert_eq!(
            article.image.as_ref().unwrap().src.as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
        assert!(!article.client().is_attached());
    }

    #[test]
    fn test_article_paths() {
        let all = get_path(Article::PATHS, ResourceOperation::All, &[]).unwrap();
        assert_eq!(all.template, "articles");

        let blog = get_path(Article::PATHS, ResourceOperation::All, &["blog_id"]).unwrap();
        assert_eq!(blog.template, "blogs/{blog_id}/articles");

        assert!(get_path(Article::PATHS, ResourceOperation::Count, &[]).is_none());

        let update = get_path(Article::PATHS, ResourceOperation::Update, &["id"]).unwrap();
        assert_eq!(update.http_method, HttpMethod::Put);
        assert_eq!(update.expected_status, 201);

        let create = get_path(Article::PATHS, ResourceOperation::Create, &[]).unwrap();
        assert_eq!(create.expected_status, 201);
    }

    #[test]
    fn test_parent_ids_follow_blog_id() {
        let mut article = Article::default();
        assert!(article.parent_ids().is_empty());

        article.blog_id = Some(7);
        assert_eq!(article.parent_ids(), vec![("blog_id", "7".to_string())]);
    }

    #[test]
    fn test_list_params_serialize_to_query() {
        let params = ArticleListParams {
            author: Some("dennis".to_string()),
            published_status: Some("published".to_string()),
            limit: Some(5),
            ..Default::default()
        };
        let query = serialize_to_query(&params).unwrap();

        assert_eq!(query.len(), 3);
        assert_eq!(query["author"], "dennis");
        assert_eq!(query["limit"], "5");
    }
}
