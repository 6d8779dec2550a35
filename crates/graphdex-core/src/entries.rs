//! # Entry Manager
//!
//! Associates entities with key/value pairs inside an index, and removes
//! those associations.
//!
//! Removal addresses entries by path, narrowing with whichever of `key` and
//! `value` are given:
//!
//! | key | value | path                      | removes                       |
//! |-----|-------|---------------------------|-------------------------------|
//! | set | set   | `indexSelf/key/value/id`  | entries matching all three    |
//! | set | empty | `indexSelf/key/id`        | every entry for that key      |
//! | empty | empty | `indexSelf/id`          | every entry for the entity    |
//!
//! A value without a key is rejected before any request is made.

use crate::path;
use crate::response::{self, CREATED, Expectation, NO_CONTENT};
use crate::transport::{Request, Transport};
use crate::types::{EntityRef, Index, IndexError, Result};
use crate::wire::AddEntryRequest;
use url::Url;

const ADD: Expectation = Expectation::new("add index entry", &[CREATED]);
const REMOVE: Expectation = Expectation::new("remove index entry", &[NO_CONTENT]);

/// Entry operations against resolved indexes.
pub struct EntryManager<'db, T> {
    transport: &'db T,
}

impl<'db, T: Transport> EntryManager<'db, T> {
    pub const fn new(transport: &'db T) -> Self {
        Self { transport }
    }

    /// Associate `entity` with `key`/`value` in `index`.
    pub async fn add(
        &self,
        index: &Index,
        entity: &EntityRef,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let payload = serde_json::to_value(AddEntryRequest {
            uri: &entity.self_uri,
            key,
            value,
        })
        .map_err(|e| IndexError::InvalidArgument(format!("unencodable entry: {e}")))?;

        tracing::debug!(index = index.name(), entity = %entity.id, key, "adding index entry");
        let response = self
            .transport
            .execute(Request::post(index.self_uri().clone(), payload))
            .await?;
        response::classify(&ADD, &response)
    }

    /// Remove entries associating `entity` with `index`.
    ///
    /// Empty `key`/`value` widen the removal; see the module docs.
    pub async fn remove(
        &self,
        index: &Index,
        entity: &EntityRef,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let url = removal_path(index.self_uri(), entity, key, value)?;

        tracing::debug!(
            index = index.name(),
            entity = %entity.id,
            key,
            value,
            "removing index entries"
        );
        let response = self.transport.execute(Request::delete(url)).await?;
        response::classify(&REMOVE, &response)
    }
}

/// Check a removal narrowing without composing a path: a value needs a key.
pub fn check_narrowing(key: &str, value: &str) -> Result<()> {
    if key.is_empty() && !value.is_empty() {
        return Err(IndexError::InvalidArgument(
            "a value cannot be given without a key".to_string(),
        ));
    }
    Ok(())
}

/// Compose the removal URI for an entity, narrowed by key and value.
pub fn removal_path(index_self: &Url, entity: &EntityRef, key: &str, value: &str) -> Result<Url> {
    check_narrowing(key, value)?;
    let id = entity.id.to_string();
    path::extend(index_self, &[key, value, id.as_str()])
}

// =============================================================================
// TESTS
// =============================================================================
