//! Path templates for resource operations.
//!
//! A resource lists every way it can be reached as a [`ResourcePath`]:
//! operation, HTTP method, the IDs the template needs, and the status a
//! successful response carries. [`get_path`] picks the most specific
//! template the available IDs can fill, so articles resolve to
//! `blogs/{blog_id}/articles` when a blog ID is known and to `articles`
//! otherwise.
//!
//! # Example
//!
//! ```rust
//! use shopify_rest::rest::{build_path, get_path, ResourceOperation, ResourcePath};
//! use shopify_rest::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &["blog_id"], "blogs/{blog_id}/articles"),
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "articles"),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::All, &["blog_id"]).unwrap();
//! let mut ids = HashMap::new();
//! ids.insert("blog_id", "241253187");
//! assert_eq!(build_path(path.template, &ids), "blogs/241253187/articles");
//! ```

use crate::clients::HttpMethod;
use crate::rest::ResourceError;
use std::collections::HashMap;
use std::fmt::Display;

/// What a resource call does. Paths are looked up by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Read one record by its id.
    Find,
    /// List records, one page at a time.
    All,
    /// POST a new record.
    Create,
    /// PUT changes to a stored record.
    Update,
    /// Remove a stored record.
    Delete,
    /// Number of records matching the filters.
    Count,
}

impl ResourceOperation {
    /// 201 for creates, 200 for everything else.
    #[must_use]
    pub const fn default_status(&self) -> u16 {
        match self {
            Self::Create => 201,
            _ => 200,
        }
    }

    /// Lowercase name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::All => "all",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Count => "count",
        }
    }
}

impl std::fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One way of reaching a resource.
///
/// `template` is relative to the versioned Admin API root, has no `.json`
/// suffix, and names its ids in braces: `orders/{order_id}/transactions/{id}`.
/// [`HttpClient::endpoint`](crate::HttpClient::endpoint) turns it into a full
/// endpoint once the ids are filled in.
///
/// ```rust
/// use shopify_rest::rest::{ResourceOperation, ResourcePath};
/// use shopify_rest::HttpMethod;
///
/// const PAGE_UPDATE: ResourcePath =
///     ResourcePath::new(HttpMethod::Put, ResourceOperation::Update, &["id"], "pages/{id}")
///         .with_status(201);
///
/// assert_eq!(PAGE_UPDATE.expected_status, 201);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    pub http_method: HttpMethod,
    pub operation: ResourceOperation,
    /// Ids the template needs, outermost first.
    pub ids: &'static [&'static str],
    pub template: &'static str,
    /// Status of a successful response; anything else is an error.
    pub expected_status: u16,
}

impl ResourcePath {
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            expected_status: operation.default_status(),
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Expects `status` instead of the operation's default.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    fn is_reachable_with(&self, known: &[&str]) -> bool {
        self.ids.iter().all(|needed| known.contains(needed))
    }
}

/// Picks the path for `operation` that uses the most of the `known` ids.
///
/// Returns `None` when every candidate needs an id the caller does not have.
///
/// ```rust
/// use shopify_rest::rest::{get_path, ResourceOperation, ResourcePath};
/// use shopify_rest::HttpMethod;
///
/// const PATHS: &[ResourcePath] = &[
///     ResourcePath::new(HttpMethod::Get, ResourceOperation::Count, &["blog_id"], "blogs/{blog_id}/articles/count"),
///     ResourcePath::new(HttpMethod::Get, ResourceOperation::Count, &[], "articles/count"),
/// ];
///
/// assert_eq!(
///     get_path(PATHS, ResourceOperation::Count, &[]).map(|p| p.template),
///     Some("articles/count")
/// );
/// ```
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    known: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|candidate| candidate.operation == operation && candidate.is_reachable_with(known))
        .max_by_key(|candidate| candidate.ids.len())
}

/// Fills the `{name}` slots of `template` from `ids`.
///
/// Slots with no matching id are copied through untouched.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let slot = &rest[open..=open + len];
        match ids.get(&slot[1..slot.len() - 1]) {
            Some(value) => out.push_str(&value.to_string()),
            None => out.push_str(slot),
        }
        rest = &rest[open + len + 1..];
    }

    out.push_str(rest);
    out
}

/// Resolves a path and interpolates it in one step.
pub(crate) fn resolve_path<'a>(
    paths: &'a [ResourcePath],
    resource: &'static str,
    operation: ResourceOperation,
    ids: &HashMap<&str, String>,
) -> Result<(&'a ResourcePath, String), ResourceError> {
    let available_ids: Vec<&str> = ids.keys().copied().collect();
    let path = get_path(paths, operation, &available_ids).ok_or(
        ResourceError::PathResolutionFailed {
            resource,
            operation: operation.as_str(),
        },
    )?;
    Ok((path, build_path(path.template, ids)))
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};

#[cfg(test)]
mod tests {
    use super::*;

    const METAFIELD_PATHS: &[ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["product_id", "id"],
            "products/{product_id}/metafields/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "metafields/{id}",
        )
        .with_status(201),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "metafields"),
    ];

    #[test]
    fn test_new_uses_operation_default_status() {
        let create = ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "pages");
        assert_eq!(create.expected_status, 201);

        let find = ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "pages/{id}");
        assert_eq!(find.expected_status, 200);
    }

    #[test]
    fn test_with_status_overrides_default() {
        let path = get_path(METAFIELD_PATHS, ResourceOperation::Update, &["id"]).unwrap();
        assert_eq!(path.template, "metafields/{id}");
        assert_eq!(path.expected_status, 201);
    }

    #[test]
    fn test_get_path_selects_most_specific_path() {
        let path = get_path(METAFIELD_PATHS, ResourceOperation::Update, &["product_id", "id"]).unwrap();
        assert_eq!(path.template, "products/{product_id}/metafields/{id}");
        assert_eq!(path.expected_status, 200);
    }

    #[test]
    fn test_get_path_returns_none_when_no_match() {
        assert!(get_path(METAFIELD_PATHS, ResourceOperation::Delete, &["id"]).is_none());
        assert!(get_path(METAFIELD_PATHS, ResourceOperation::Update, &[]).is_none());
    }

    #[test]
    fn test_build_path_interpolates_multiple_ids() {
        let mut ids = HashMap::new();
        ids.insert("order_id", "450789469");
        ids.insert("id", "389404469");

        let result = build_path("orders/{order_id}/transactions/{id}", &ids);
        assert_eq!(result, "orders/450789469/transactions/389404469");
    }

    #[test]
    fn test_build_path_leaves_missing_placeholders() {
        let ids: HashMap<&str, u64> = HashMap::new();
        assert_eq!(build_path("pages/{id}", &ids), "pages/{id}");
    }

    #[test]
    fn test_resolve_path_reports_failure() {
        let ids = HashMap::new();
        let result = resolve_path(METAFIELD_PATHS, "Metafield", ResourceOperation::Delete, &ids);
        assert!(matches!(
            result,
            Err(ResourceError::PathResolutionFailed {
                resource: "Metafield",
                operation: "delete"
            })
        ));
    }

    #[test]
    fn test_build_path_keeps_unclosed_brace() {
        let mut ids = HashMap::new();
        ids.insert("id", 7);
        assert_eq!(build_path("pages/{id}/x{", &ids), "pages/7/x{");
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(ResourceOperation::Count.to_string(), "count");
    }
}
