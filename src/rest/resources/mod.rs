//! Admin REST resources.
//!
//! | Resource | Paths | Update status |
//! |---|---|---|
//! | [`Article`] | `articles`, `blogs/{blog_id}/articles` | 201 |
//! | [`Blog`] | `blogs` | 201 |
//! | [`Collection`] | `collections` | 201 |
//! | [`Collect`] | `collects` | no update |
//! | [`Metafield`] | `metafields`, `products/{product_id}/metafields`, `variants/{variant_id}/metafields` | 201 standalone, 200 under a product |
//! | [`Order`] | `orders` | 201 |
//! | [`Page`] | `pages` | 201 |
//! | [`Transaction`] | `orders/{order_id}/transactions` | no update |
//! | [`Variant`] | `variants`, `products/{product_id}/variants` | 200 |
//! | [`Webhook`] | `webhooks` | 200 |
//!
//! Creates expect 201 and deletes expect 200 throughout.

mod article;
mod blog;
mod collect;
mod collection;
pub mod common;
mod metafield;
mod order;
mod page;
mod transaction;
mod variant;
mod webhook;

pub use article::{Article, ArticleCountParams, ArticleImage, ArticleListParams};
pub use blog::{Blog, BlogCountParams, BlogListParams};
pub use collect::{Collect, CollectCountParams, CollectListParams};
pub use collection::{Collection, CollectionCountParams, CollectionListParams, CollectionProduct};
pub use common::{Address, ClientDetails, CollectionRule, LineItem, OrderCustomer, ShippingLine, TaxLine};
pub use metafield::{Metafield, MetafieldCountParams, MetafieldListParams};
pub use order::{Order, OrderCountParams, OrderListParams};
pub use page::{Page, PageCountParams, PageListParams};
pub use transaction::{Transaction, TransactionCountParams, TransactionListParams};
pub use variant::{Variant, VariantCountParams, VariantListParams};
pub use webhook::{Webhook, WebhookCountParams, WebhookListParams};
