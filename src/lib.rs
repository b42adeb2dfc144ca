//! # Shopify REST client
//!
//! An async client for the Shopify Admin REST API.
//!
//! ## Overview
//!
//! Every call goes through one request pipeline ([`HttpClient::request`]):
//! - authentication with an access token or private-app basic auth
//! - throttled (429) requests retried with exponential backoff
//! - `Link` header pagination and call-limit bookkeeping on every response
//! - an optional cache for plain GET requests
//!
//! On top of it, [`rest::resources`] maps articles, blogs, collections,
//! collects, orders, pages, variants, webhooks, metafields and transactions
//! onto typed records with find/list/count/save/delete.
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_rest::{AccessToken, ApiConfig, HttpClient, ShopDomain};
//!
//! let config = ApiConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_xxx").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = HttpClient::new(config);
//! assert_eq!(client.base_uri(), "https://my-store.myshopify.com");
//! ```
//!
//! ## Working with resources
//!
//! ```rust,ignore
//! use shopify_rest::rest::RestResource;
//! use shopify_rest::rest::resources::{Webhook, WebhookListParams};
//!
//! let hooks = Webhook::all(&client, Some(WebhookListParams {
//!     topic: Some("orders/create".to_string()),
//!     ..Default::default()
//! })).await?;
//!
//! for hook in hooks.iter() {
//!     hook.delete().await?;
//! }
//! ```
//!
//! ## Raw requests
//!
//! ```rust,ignore
//! use shopify_rest::clients::ApiRequest;
//!
//! let endpoint = client.endpoint("shop")?;
//! let response = client.request(ApiRequest::get(endpoint)).await?;
//! println!("{} {}", response.code, response.text());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: all types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

pub use config::{
    AccessToken, ApiConfig, ApiConfigBuilder, ApiKey, ApiSecretKey, ApiVersion, Credentials,
    HostUrl, ShopDomain,
};
pub use error::ConfigError;

pub use clients::{
    ApiCallLimit, ApiRequest, Backoff, HttpClient, HttpError, HttpMethod, HttpResponse,
    MemoryCache, PaginationInfo, RequestCache,
};
pub use rest::{ResourceError, ResourceResponse, RestResource};
