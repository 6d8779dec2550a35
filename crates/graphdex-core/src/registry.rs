//! # Index Registry
//!
//! Creates, lists, fetches and deletes indexes under one collection endpoint
//! (the node index collection or the relationship index collection).
//!
//! ## Wire Contract
//!
//! | Operation | Request                         | Success |
//! |-----------|---------------------------------|---------|
//! | create    | `POST collection {name, config?}` | 201   |
//! | list      | `GET collection`                | 200     |
//! | get       | `GET collection/name`           | 200, 404 ⇒ not found |
//! | delete    | `DELETE indexSelf`              | 204     |

use crate::path;
use crate::response::{self, CREATED, Expectation, NO_CONTENT, OK};
use crate::transport::{Request, Transport};
use crate::types::{EntityKind, Index, IndexError, IndexSettings, NewIndex, Result};
use crate::wire::{CreateIndexRequest, IndexListResponse, IndexResponse};
use url::Url;

const CREATE: Expectation = Expectation::new("create index", &[CREATED]);
const LIST: Expectation = Expectation::new("list indexes", &[OK]);
const GET: Expectation = Expectation::new("get index", &[OK]).not_found_on_404();
const DELETE: Expectation = Expectation::new("delete index", &[NO_CONTENT]);

/// Index operations bound to one collection endpoint.
pub struct IndexRegistry<'db, T> {
    transport: &'db T,
    kind: EntityKind,
    collection: &'db Url,
}

impl<'db, T: Transport> IndexRegistry<'db, T> {
    /// Bind a registry to a collection endpoint.
    pub const fn new(transport: &'db T, kind: EntityKind, collection: &'db Url) -> Self {
        Self {
            transport,
            kind,
            collection,
        }
    }

    /// The entity kind of every index in this collection.
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The collection endpoint.
    pub const fn collection(&self) -> &Url {
        self.collection
    }

    /// Create an index.
    ///
    /// The creation response carries no self-link, so the returned
    /// descriptor's self URI follows the `collection/name` convention.
    pub async fn create(&self, new: &NewIndex) -> Result<Index> {
        validate_name(&new.name)?;
        let self_uri = path::extend(self.collection, &[new.name.as_str()])?;
        let payload = serde_json::to_value(CreateIndexRequest::from(new))
            .map_err(|e| IndexError::InvalidArgument(format!("unencodable index request: {e}")))?;

        tracing::debug!(kind = %self.kind, name = %new.name, "creating index");
        let response = self
            .transport
            .execute(Request::post(self.collection.clone(), payload))
            .await?;
        let body: IndexResponse = response::decode(&CREATE, &response)?;

        Ok(self.resolve(&new.name, self_uri, body))
    }

    /// List every index in the collection, ordered by name.
    ///
    /// Names come from the keys of the server's mapping.
    pub async fn list(&self) -> Result<Vec<Index>> {
        tracing::debug!(kind = %self.kind, "listing indexes");
        let response = self
            .transport
            .execute(Request::get(self.collection.clone()))
            .await?;
        let body: IndexListResponse = response::decode(&LIST, &response)?;

        body.into_iter()
            .map(|(name, res)| -> Result<Index> {
                let self_uri = path::extend(self.collection, &[name.as_str()])?;
                Ok(self.resolve(&name, self_uri, res))
            })
            .collect()
    }

    /// Fetch one index by name.
    ///
    /// Returns `IndexError::NotFound` if the server answers `404`.
    pub async fn get(&self, name: &str) -> Result<Index> {
        validate_name(name)?;
        let self_uri = path::extend(self.collection, &[name])?;

        tracing::debug!(kind = %self.kind, name, "fetching index");
        let response = self
            .transport
            .execute(Request::get(self_uri.clone()))
            .await?;
        let body: IndexResponse = response::decode(&GET, &response)?;

        Ok(self.resolve(name, self_uri, body))
    }

    /// Delete an index from the server.
    pub async fn delete(&self, index: &Index) -> Result<()> {
        tracing::debug!(kind = %index.kind(), name = index.name(), "deleting index");
        let response = self
            .transport
            .execute(Request::delete(index.self_uri().clone()))
            .await?;
        response::classify(&DELETE, &response)
    }

    fn resolve(&self, name: &str, self_uri: Url, res: IndexResponse) -> Index {
        Index::resolve(
            self.kind,
            name,
            self.collection.clone(),
            self_uri,
            IndexSettings::from(res),
        )
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(IndexError::InvalidArgument(
            "index name must not be empty".to_string(),
        ));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
