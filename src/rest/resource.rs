//! The [`RestResource`] trait.
//!
//! A resource declares its name, its JSON keys and its [`ResourcePath`]s, and
//! gets find/list/count/save/delete for free. Every operation goes through
//! [`HttpClient::request`], so throttling retries and caching apply
//! uniformly.
//!
//! Records keep a [`ClientRef`] to the client that loaded them, which is
//! what lets `save` and `delete` work without passing the client again.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::rest::RestResource;
//! use shopify_rest::rest::resources::Page;
//!
//! let mut page = Page::find(&client, 108828309).await?.into_inner();
//! page.title = Some("Warranty information".to_string());
//! page.save().await?;
//!
//! let mut draft = Page::new_with_client(&client);
//! draft.title = Some("Shipping".to_string());
//! draft.save().await?; // POST, expects 201
//! assert!(draft.id.is_some());
//! ```

use std::collections::HashMap;
use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::{ApiRequest, ClientRef, HttpClient, HttpMethod, HttpResponse, PaginationInfo};
use crate::rest::errors::expect_status;
use crate::rest::path::resolve_path;
use crate::rest::response::decode_key;
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, ResourceResponse};

type Ids<'a> = HashMap<&'a str, String>;

/// A REST resource that can be fetched, created, updated, and deleted.
///
/// Operations whose path is missing from `PATHS` fail with
/// [`ResourceError::PathResolutionFailed`].
#[allow(async_fn_in_trait)]
pub trait RestResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The type of the resource's identifier.
    type Id: Display + Clone + Send + Sync;

    /// Parameters for `all()` operations (filtering, pagination, etc.).
    type AllParams: Serialize + Default + Send + Sync;

    /// Parameters for `count()` operations.
    type CountParams: Serialize + Default + Send + Sync;

    /// The singular name of the resource (e.g., "Article").
    const NAME: &'static str;

    /// The plural name, used as the response key for lists.
    const PLURAL: &'static str;

    /// Available paths for this resource.
    const PATHS: &'static [ResourcePath];

    /// Returns the resource's ID, `None` until it has been created.
    fn get_id(&self) -> Option<Self::Id>;

    /// Returns the handle to the client that loaded this record.
    fn client(&self) -> &ClientRef;

    /// Points this record at a client.
    fn attach(&mut self, client: ClientRef);

    /// Parent IDs taken from the record's own fields, used to pick nested
    /// paths when saving or deleting.
    fn parent_ids(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Returns the lowercase key used in JSON request/response bodies.
    #[must_use]
    fn resource_key() -> String {
        Self::NAME.to_lowercase()
    }

    /// Creates an empty record attached to `client`, ready to be filled in and
    /// saved.
    #[must_use]
    fn new_with_client(client: &HttpClient) -> Self
    where
        Self: Default,
    {
        let mut record = Self::default();
        record.attach(client.downgrade());
        record
    }

    /// Finds a single resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Status`] if the server does not answer 200.
    async fn find(client: &HttpClient, id: Self::Id) -> Result<ResourceResponse<Self>, ResourceError> {
        let mut ids = Ids::new();
        ids.insert("id", id.to_string());
        fetch_one(client, &ids).await
    }

    /// Finds a single resource by ID under a parent resource.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find).
    async fn find_with_parent<ParentId: Display + Send>(
        client: &HttpClient,
        parent_id_name: &str,
        parent_id: ParentId,
        id: Self::Id,
    ) -> Result<ResourceResponse<Self>, ResourceError> {
        let mut ids = Ids::new();
        ids.insert(parent_id_name, parent_id.to_string());
        ids.insert("id", id.to_string());
        fetch_one(client, &ids).await
    }

    /// Lists resources matching the given parameters.
    ///
    /// The response carries the pagination links; pass them to
    /// [`next_page`](Self::next_page) to continue.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Status`] if the server does not answer 200.
    async fn all(
        client: &HttpClient,
        params: Option<Self::AllParams>,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        fetch_list(client, &Ids::new(), params.as_ref()).await
    }

    /// Lists resources under a parent resource (e.g. articles of a blog).
    ///
    /// # Errors
    ///
    /// Same as [`all`](Self::all).
    async fn all_with_parent<ParentId: Display + Send>(
        client: &HttpClient,
        parent_id_name: &str,
        parent_id: ParentId,
        params: Option<Self::AllParams>,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        let mut ids = Ids::new();
        ids.insert(parent_id_name, parent_id.to_string());
        fetch_list(client, &ids, params.as_ref()).await
    }

    /// Fetches the page after the one `pagination` came from.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoNextPage`] if there is no next link.
    async fn next_page(
        client: &HttpClient,
        pagination: &PaginationInfo,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        let link = pagination
            .next
            .as_deref()
            .filter(|link| !link.is_empty())
            .ok_or(ResourceError::NoNextPage)?;

        let response = client.get_page(link).await?;
        expect_status(&response, 200)?;
        decode_list(client, &response)
    }

    /// Counts resources matching the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Status`] if the server does not answer 200.
    async fn count(
        client: &HttpClient,
        params: Option<Self::CountParams>,
    ) -> Result<u64, ResourceError> {
        fetch_count::<Self>(client, &Ids::new(), params.as_ref()).await
    }

    /// Counts resources under a parent resource.
    ///
    /// # Errors
    ///
    /// Same as [`count`](Self::count).
    async fn count_with_parent<ParentId: Display + Send>(
        client: &HttpClient,
        parent_id_name: &str,
        parent_id: ParentId,
        params: Option<Self::CountParams>,
    ) -> Result<u64, ResourceError> {
        let mut ids = Ids::new();
        ids.insert(parent_id_name, parent_id.to_string());
        fetch_count::<Self>(client, &ids, params.as_ref()).await
    }

    /// Creates the record (no ID, POST) or updates it (PUT).
    ///
    /// On success the record is replaced by what the server returned, and
    /// stays attached to the same client.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Status`] carrying the decoded `errors` if the
    /// server does not answer with the path's expected status, and
    /// [`HttpError::ClientDropped`](crate::HttpError::ClientDropped) if the
    /// record has no live client.
    async fn save(&mut self) -> Result<(), ResourceError> {
        let body = serde_json::to_value(&*self).map_err(ResourceError::Serialize)?;
        let parents = self.parent_ids();
        write_record(self, &parents, body).await
    }

    /// Like [`save`](Self::save), but under a parent the record's own fields
    /// do not name (e.g. a metafield saved for a product).
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save).
    async fn save_with_parent<ParentId: Display + Send>(
        &mut self,
        parent_id_name: &'static str,
        parent_id: ParentId,
    ) -> Result<(), ResourceError> {
        let body = serde_json::to_value(&*self).map_err(ResourceError::Serialize)?;
        let mut parents = self.parent_ids();
        parents.push((parent_id_name, parent_id.to_string()));
        write_record(self, &parents, body).await
    }

    /// Sends only `changes` as the record body, then replaces the record with
    /// the server's version.
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save).
    async fn save_partial(&mut self, changes: Value) -> Result<(), ResourceError> {
        let parents = self.parent_ids();
        write_record(self, &parents, changes).await
    }

    /// Deletes the record.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the record has no
    /// ID, and [`ResourceError::Status`] if the server does not answer 200.
    async fn delete(&self) -> Result<(), ResourceError> {
        let id = self.get_id().ok_or(ResourceError::PathResolutionFailed {
            resource: Self::NAME,
            operation: ResourceOperation::Delete.as_str(),
        })?;
        let client = self.client().upgrade()?;

        let parents = self.parent_ids();
        let mut ids: Ids<'_> = parents.iter().map(|(k, v)| (*k, v.clone())).collect();
        ids.insert("id", id.to_string());

        let (path, url) = resolve_path(Self::PATHS, Self::NAME, ResourceOperation::Delete, &ids)?;
        let response = send(&client, path.http_method, &url, None, None).await?;
        expect_status(&response, path.expected_status)
    }
}

/// Serializes a params struct to a query parameter map.
///
/// `null` values are skipped and arrays are joined with commas, which is how
/// the Admin API takes `ids=1,2,3`.
///
/// # Errors
///
/// Returns [`ResourceError::Serialize`] if `params` cannot be serialized.
pub fn serialize_to_query<T: Serialize>(params: &T) -> Result<HashMap<String, String>, ResourceError> {
    let value = serde_json::to_value(params).map_err(ResourceError::Serialize)?;

    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}

/// Sends one resource request through the pipeline.
pub(crate) async fn send(
    client: &HttpClient,
    method: HttpMethod,
    path: &str,
    query: Option<HashMap<String, String>>,
    body: Option<&Value>,
) -> Result<HttpResponse, ResourceError> {
    let mut builder = ApiRequest::builder(method, client.endpoint(path)?);
    if let Some(query) = query {
        builder = builder.query(query);
    }
    if let Some(body) = body {
        builder = builder.json(body).map_err(ResourceError::Serialize)?;
    }
    Ok(client.request(builder.build()?).await?)
}

fn to_query<P: Serialize>(params: Option<&P>) -> Result<Option<HashMap<String, String>>, ResourceError> {
    Ok(params
        .map(serialize_to_query)
        .transpose()?
        .filter(|q| !q.is_empty()))
}

pub(crate) fn decode_list<R: RestResource>(
    client: &HttpClient,
    response: &HttpResponse,
) -> Result<ResourceResponse<Vec<R>>, ResourceError> {
    let mut result: ResourceResponse<Vec<R>> =
        ResourceResponse::from_http_response(response, R::PLURAL)?;
    for record in result.iter_mut() {
        record.attach(client.downgrade());
    }
    Ok(result)
}

async fn fetch_one<R: RestResource>(
    client: &HttpClient,
    ids: &Ids<'_>,
) -> Result<ResourceResponse<R>, ResourceError> {
    let (path, url) = resolve_path(R::PATHS, R::NAME, ResourceOperation::Find, ids)?;
    let response = send(client, path.http_method, &url, None, None).await?;
    expect_status(&response, path.expected_status)?;

    let mut result: ResourceResponse<R> =
        ResourceResponse::from_http_response(&response, &R::resource_key())?;
    result.attach(client.downgrade());
    Ok(result)
}

pub(crate) async fn fetch_list<R: RestResource, P: Serialize>(
    client: &HttpClient,
    ids: &Ids<'_>,
    params: Option<&P>,
) -> Result<ResourceResponse<Vec<R>>, ResourceError> {
    let (path, url) = resolve_path(R::PATHS, R::NAME, ResourceOperation::All, ids)?;
    let response = send(client, path.http_method, &url, to_query(params)?, None).await?;
    expect_status(&response, path.expected_status)?;
    decode_list(client, &response)
}

async fn fetch_count<R: RestResource>(
    client: &HttpClient,
    ids: &Ids<'_>,
    params: Option<&R::CountParams>,
) -> Result<u64, ResourceError> {
    let (path, url) = resolve_path(R::PATHS, R::NAME, ResourceOperation::Count, ids)?;
    let response = send(client, path.http_method, &url, to_query(params)?, None).await?;
    expect_status(&response, path.expected_status)?;
    decode_key(&response.body, "count")
}

async fn write_record<R: RestResource>(
    record: &mut R,
    parents: &[(&'static str, String)],
    fields: Value,
) -> Result<(), ResourceError> {
    let client = record.client().upgrade()?;
    let key = R::resource_key();

    let mut ids: Ids<'_> = parents.iter().map(|(k, v)| (*k, v.clone())).collect();
    let operation = match record.get_id() {
        Some(id) => {
            ids.insert("id", id.to_string());
            ResourceOperation::Update
        }
        None => ResourceOperation::Create,
    };

    let (path, url) = resolve_path(R::PATHS, R::NAME, operation, &ids)?;

    let mut body = serde_json::Map::new();
    body.insert(key.clone(), fields);
    let body = Value::Object(body);

    let response = send(&client, path.http_method, &url, None, Some(&body)).await?;
    expect_status(&response, path.expected_status)?;

    let mut saved: R = decode_key(&response.body, &key)?;
    saved.attach(client.downgrade());
    *record = saved;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Serialize, Default)]
    struct Params {
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ids: Option<Vec<u64>>,
        published_status: Option<String>,
        fields: Option<String>,
    }

    #[test]
    fn test_serialize_to_query_skips_nulls_and_joins_arrays() {
        let query = serialize_to_query(&Params {
            limit: Some(50),
            ids: Some(vec![1, 2, 3]),
            published_status: Some("published".to_string()),
            fields: None,
        })
        .unwrap();

        assert_eq!(query.get("limit").map(String::as_str), Some("50"));
        assert_eq!(query.get("ids").map(String::as_str), Some("1,2,3"));
        assert_eq!(query.get("published_status").map(String::as_str), Some("published"));
        assert!(!query.contains_key("fields"));
    }

    #[test]
    fn test_empty_params_produce_no_query() {
        assert!(to_query(Some(&Params::default())).unwrap().is_none());
        assert!(to_query::<Params>(None).unwrap().is_none());
    }

    #[test]
    fn test_serialize_to_query_keeps_nested_objects_as_json() {
        #[derive(Serialize)]
        struct Nested {
            filter: serde_json::Value,
        }
        let query = serialize_to_query(&Nested {
            filter: json!({"a": 1}),
        })
        .unwrap();
        assert_eq!(query.get("filter").map(String::as_str), Some(r#"{"a":1}"#));
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Note {
        id: Option<u64>,
        #[serde(skip)]
        client: ClientRef,
    }

    impl RestResource for Note {
        type Id = u64;
        type AllParams = ();
        type CountParams = ();

        const NAME: &'static str = "Note";
        const PLURAL: &'static str = "notes";
        const PATHS: &'static [ResourcePath] = &[];

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

    #[test]
    fn test_resource_key_is_lowercase_name() {
        assert_eq!(Note::resource_key(), "note");
    }

    #[tokio::test]
    async fn test_save_on_detached_record_reports_dropped_client() {
        let mut note = Note::default();
        let result = note.save().await;
        assert!(matches!(
            result,
            Err(ResourceError::Http(crate::HttpError::ClientDropped))
        ));
    }

    #[tokio::test]
    async fn test_delete_without_id_fails_path_resolution() {
        let note = Note::default();
        assert!(matches!(
            note.delete().await,
            Err(ResourceError::PathResolutionFailed {
                resource: "Note",
                operation: "delete"
            })
        ));
    }
}
