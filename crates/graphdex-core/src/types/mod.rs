//! # Core Type Definitions
//!
//! This module contains the data model shared by every index operation:
//! - Entity identifiers and handles (`EntityId`, `EntityRef`, `Entity`)
//! - Index descriptors (`NewIndex` before creation, `Index` once resolved)
//! - Lookup results (`ResultSet`)
//! - Error types (`IndexError`, `TransportError`)
//!
//! ## Resolution
//!
//! An `Index` can only be obtained from the server (create, get or list), so
//! every `Index` value carries a server-confirmed self URI. The unresolved
//! form is `NewIndex`, which is only accepted by create.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use url::Url;

// =============================================================================
// ENTITY IDENTIFIERS
// =============================================================================

/// Server-assigned identifier of a node or relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Parse the identifier from the final path segment of a self-link.
    ///
    /// `http://host/db/data/node/42` yields `EntityId(42)`.
    #[must_use]
    pub fn from_self_uri(uri: &str) -> Option<Self> {
        uri.trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|tail| tail.parse().ok())
            .map(Self)
    }

    /// Get the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which kind of graph entity an index addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Node,
    Relationship,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Relationship => "relationship",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ENTITY HANDLES
// =============================================================================

/// The minimal handle needed to associate an entity with an index entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// The entity identifier.
    pub id: EntityId,
    /// The canonical self-link of the entity.
    pub self_uri: String,
}

impl EntityRef {
    #[must_use]
    pub fn new(id: EntityId, self_uri: impl Into<String>) -> Self {
        Self {
            id,
            self_uri: self_uri.into(),
        }
    }

    /// Build a handle from a self-link alone.
    ///
    /// Returns `IndexError::InvalidArgument` if the link does not end in an
    /// integer identifier.
    pub fn from_self_uri(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        let id = EntityId::from_self_uri(&uri).ok_or_else(|| {
            IndexError::InvalidArgument(format!("'{uri}' does not end in an entity identifier"))
        })?;
        Ok(Self { id, self_uri: uri })
    }
}

/// A hydrated entity as returned by a lookup.
///
/// Relationships additionally carry their endpoints and type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub self_uri: String,
    pub properties: serde_json::Map<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel_type: Option<String>,
}

impl Entity {
    /// The handle used to add or remove this entity from an index.
    #[must_use]
    pub fn to_ref(&self) -> EntityRef {
        EntityRef::new(self.id, self.self_uri.clone())
    }
}

/// Entities returned by a lookup, keyed by identifier.
///
/// Duplicate identifiers in a server response collapse to one entry.
pub type ResultSet = BTreeMap<EntityId, Entity>;

// =============================================================================
// INDEX DESCRIPTORS
// =============================================================================

/// An index that has not been created yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIndex {
    pub name: String,
    pub index_type: String,
    pub provider: String,
}

impl NewIndex {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_type(mut self, index_type: impl Into<String>) -> Self {
        self.index_type = index_type.into();
        self
    }

    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Whether a `config` object has to be sent on creation.
    #[must_use]
    pub fn has_config(&self) -> bool {
        !self.index_type.is_empty() || !self.provider.is_empty()
    }
}

/// Index settings as reported by the server.
///
/// Absent fields are empty strings; `lower_case` absent means `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSettings {
    pub template: String,
    pub provider: String,
    pub index_type: String,
    pub lower_case: bool,
}

/// A server-side index resolved by create, get or list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Index {
    name: String,
    kind: EntityKind,
    base_uri: Url,
    self_uri: Url,
    uri_template: String,
    provider: String,
    index_type: String,
    case_sensitive: bool,
}

impl Index {
    pub(crate) fn resolve(
        kind: EntityKind,
        name: impl Into<String>,
        base_uri: Url,
        self_uri: Url,
        settings: IndexSettings,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            base_uri,
            self_uri,
            uri_template: settings.template,
            provider: settings.provider,
            index_type: settings.index_type,
            case_sensitive: !settings.lower_case,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The collection endpoint this index belongs to.
    #[must_use]
    pub const fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    /// The server-confirmed location of this index.
    #[must_use]
    pub const fn self_uri(&self) -> &Url {
        &self.self_uri
    }

    /// Pattern for per-entry URIs; empty when the server sent none.
    #[must_use]
    pub fn uri_template(&self) -> &str {
        &self.uri_template
    }

    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    #[must_use]
    pub fn index_type(&self) -> &str {
        &self.index_type
    }

    /// `false` when the server lower-cases keys and values.
    #[must_use]
    pub const fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// The underlying HTTP call could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Transport error: {0}")]
pub struct TransportError(pub String);

/// Errors returned by index operations.
///
/// Diagnostic detail (error bodies) goes to the log; the variants carry only
/// what callers branch on.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The named index does not exist on the server.
    #[error("Index not found")]
    NotFound,

    /// The server answered with a status outside the declared success set,
    /// or with a body that could not be decoded.
    #[error("Bad response from server (status {status})")]
    BadResponse { status: u16 },

    /// A request URI could not be composed.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The caller supplied an invalid combination of arguments.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The call never completed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result alias for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;

// =============================================================================
// TESTS
// =============================================================================
