//! # Wire Payloads
//!
//! JSON request and response bodies of the index endpoints.
//!
//! The server omits `provider`, `type` and `to_lower_case` in some responses,
//! and reports `to_lower_case` either as a boolean or as a string. Every
//! response field therefore has a default.

use crate::types::{Entity, EntityId, EntityKind, IndexSettings, NewIndex};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// INDEX CREATION
// =============================================================================

/// `POST indexCollection` body.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIndexRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<IndexConfig>,
}

/// Optional creation settings; never sent empty.
#[derive(Debug, Clone, Serialize)]
pub struct IndexConfig {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub index_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provider: String,
}

impl From<&NewIndex> for CreateIndexRequest {
    fn from(new: &NewIndex) -> Self {
        let config = new.has_config().then(|| IndexConfig {
            index_type: new.index_type.clone(),
            provider: new.provider.clone(),
        });
        Self {
            name: new.name.clone(),
            config,
        }
    }
}

// =============================================================================
// INDEX DESCRIPTION
// =============================================================================

/// Index description returned by create, get and (per entry) list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexResponse {
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub provider: String,
    #[serde(rename = "type", default)]
    pub index_type: String,
    #[serde(default, deserialize_with = "lower_case_flag")]
    pub to_lower_case: bool,
}

impl From<IndexResponse> for IndexSettings {
    fn from(res: IndexResponse) -> Self {
        Self {
            template: res.template,
            provider: res.provider,
            index_type: res.index_type,
            lower_case: res.to_lower_case,
        }
    }
}

/// `GET indexCollection` body: index name → description.
pub type IndexListResponse = BTreeMap<String, IndexResponse>;

/// Accept `true`, `"true"` (any case) as set; everything else as unset.
fn lower_case_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Bool(flag) => flag,
        serde_json::Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

// =============================================================================
// ENTRIES
// =============================================================================

/// `POST indexSelf` body associating an entity with a key/value pair.
#[derive(Debug, Clone, Serialize)]
pub struct AddEntryRequest<'a> {
    pub uri: &'a str,
    pub key: &'a str,
    pub value: &'a str,
}

// =============================================================================
// ENTITY REPRESENTATION
// =============================================================================

/// A node or relationship as listed by a lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityResponse {
    #[serde(rename = "self")]
    pub self_uri: String,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(rename = "type", default)]
    pub rel_type: Option<String>,
}

impl EntityResponse {
    /// Hydrate into an `Entity`. `None` if `self` carries no identifier.
    pub fn into_entity(self, kind: EntityKind) -> Option<Entity> {
        let id = EntityId::from_self_uri(&self.self_uri)?;
        Some(Entity {
            id,
            kind,
            self_uri: self.self_uri,
            properties: self.data,
            start: self.start,
            end: self.end,
            rel_type: self.rel_type,
        })
    }
}

// =============================================================================
// SERVICE ROOT
// =============================================================================

/// `GET /db/data/` body; only the fields this crate uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceRootResponse {
    #[serde(default)]
    pub node_index: Option<String>,
    #[serde(default)]
    pub relationship_index: Option<String>,
    #[serde(default)]
    pub neo4j_version: Option<String>,
}

// =============================================================================
// TESTS
// =============================================================================
