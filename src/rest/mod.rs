//! Typed REST resources on top of the request pipeline.
//!
//! - **[`RestResource`] trait**: find/list/count/save/delete for any resource
//!   that declares its paths
//! - **[`ResourceResponse<T>`]**: decoded data plus pagination and call-limit
//!   metadata, derefs to `T`
//! - **Path building**: [`ResourcePath`] templates, most specific match wins
//! - **[`ResourceError`]**: unexpected statuses with the decoded `errors`
//!   payload, decode failures, and pipeline errors
//!
//! Individual resources live in [`resources`].
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::{ApiConfig, HttpClient};
//! use shopify_rest::rest::RestResource;
//! use shopify_rest::rest::resources::{Blog, Article};
//!
//! let client = HttpClient::new(config);
//!
//! let blogs = Blog::all(&client, None).await?;
//! for blog in blogs.iter() {
//!     let count = Article::count_for_blog(&client, blog.id.unwrap_or_default(), None).await?;
//!     println!("{:?}: {count} articles", blog.title);
//! }
//! ```

mod errors;
mod path;
mod resource;
mod response;
pub mod resources;

pub use errors::ResourceError;
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::{serialize_to_query, RestResource};
pub use response::ResourceResponse;
