//! # Database Handle
//!
//! Owns one transport and the index collection endpoints of one server.
//! Components borrow the transport from here; nothing is global, so several
//! independently configured handles can coexist.

use crate::entries::EntryManager;
use crate::lookup::LookupEngine;
use crate::path;
use crate::registry::IndexRegistry;
use crate::response::{self, Expectation, OK};
use crate::transport::{Request, Transport};
use crate::types::{EntityKind, IndexError, Result};
use crate::wire::ServiceRootResponse;
use url::Url;

const DISCOVER: Expectation = Expectation::new("discover service root", &[OK]);

/// Index collection endpoints advertised by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRoot {
    pub node_index: Url,
    pub relationship_index: Url,
    /// Server version, when advertised.
    pub version: Option<String>,
}

impl ServiceRoot {
    /// Build a service root from known collection URLs.
    pub fn from_endpoints(node_index: &str, relationship_index: &str) -> Result<Self> {
        Ok(Self {
            node_index: path::compose(node_index, &[])?,
            relationship_index: path::compose(relationship_index, &[])?,
            version: None,
        })
    }

    /// The collection endpoint for `kind`.
    #[must_use]
    pub const fn collection(&self, kind: EntityKind) -> &Url {
        match kind {
            EntityKind::Node => &self.node_index,
            EntityKind::Relationship => &self.relationship_index,
        }
    }
}

/// A connection to one graph database server.
pub struct Database<T> {
    transport: T,
    root: ServiceRoot,
}

impl<T: Transport> Database<T> {
    /// Discover the index collections from the service root at `root_url`.
    pub async fn connect(transport: T, root_url: &str) -> Result<Self> {
        let url = path::compose(root_url, &[])?;

        tracing::debug!(url = %url, "discovering service root");
        let response = transport.execute(Request::get(url)).await?;
        let body: ServiceRootResponse = response::decode(&DISCOVER, &response)?;

        let (Some(node_index), Some(relationship_index)) =
            (body.node_index, body.relationship_index)
        else {
            tracing::warn!(
                operation = DISCOVER.operation(),
                body = %response.body,
                "service root lacks index collections"
            );
            return Err(IndexError::BadResponse {
                status: response.status,
            });
        };

        let mut root = ServiceRoot::from_endpoints(&node_index, &relationship_index)?;
        root.version = body.neo4j_version;
        tracing::info!(
            version = root.version.as_deref().unwrap_or("unknown"),
            "connected to graph database"
        );
        Ok(Self { transport, root })
    }

    /// Use known endpoints without a discovery round trip.
    pub const fn with_root(transport: T, root: ServiceRoot) -> Self {
        Self { transport, root }
    }

    /// Use explicit node and relationship collection URLs.
    pub fn with_endpoints(
        transport: T,
        node_index: &str,
        relationship_index: &str,
    ) -> Result<Self> {
        let root = ServiceRoot::from_endpoints(node_index, relationship_index)?;
        Ok(Self::with_root(transport, root))
    }

    pub const fn root(&self) -> &ServiceRoot {
        &self.root
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Index registry for the collection of `kind`.
    pub const fn indexes(&self, kind: EntityKind) -> IndexRegistry<'_, T> {
        IndexRegistry::new(&self.transport, kind, self.root.collection(kind))
    }

    pub const fn node_indexes(&self) -> IndexRegistry<'_, T> {
        self.indexes(EntityKind::Node)
    }

    pub const fn relationship_indexes(&self) -> IndexRegistry<'_, T> {
        self.indexes(EntityKind::Relationship)
    }

    pub const fn entries(&self) -> EntryManager<'_, T> {
        EntryManager::new(&self.transport)
    }

    pub const fn lookup(&self) -> LookupEngine<'_, T> {
        LookupEngine::new(&self.transport)
    }
}

// =============================================================================
// TESTS
// =============================================================================
