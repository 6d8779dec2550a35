//! # graphdex-core
//!
//! Client-side binding for the index feature of a REST graph database.
//!
//! ## Components
//!
//! - `path` - Path Composer: request URIs from a base and optional segments
//! - `response` - Response Decoder: status codes to typed errors
//! - `registry` - Index Registry: create, list, get, delete indexes
//! - `entries` - Entry Manager: add and remove key/value entries
//! - `lookup` - Lookup Engine: exact-match and query lookups
//! - `database` - service root discovery and the shared handle
//!
//! ## Architectural Constraints
//!
//! - One request/response cycle per operation, no retries, no caching
//! - The HTTP executor is injected through [`Transport`]; this crate has
//!   no network or runtime dependencies
//! - An [`Index`] only exists once the server has confirmed it
//!
//! ## Example
//!
//! ```no_run
//! # async fn run<T: graphdex_core::Transport>(transport: T) -> graphdex_core::Result<()> {
//! use graphdex_core::{Database, EntityRef, NewIndex};
//!
//! let db = Database::connect(transport, "http://localhost:7474/db/data/").await?;
//! let people = db
//!     .node_indexes()
//!     .create(&NewIndex::new("people").with_type("exact"))
//!     .await?;
//!
//! let alice = EntityRef::from_self_uri("http://localhost:7474/db/data/node/1")?;
//! db.entries().add(&people, &alice, "name", "Alice").await?;
//!
//! let found = db.lookup().find_exact(&people, "name", "Alice").await?;
//! assert!(found.contains_key(&alice.id));
//! # Ok(())
//! # }
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod database;
pub mod entries;
pub mod lookup;
pub mod path;
pub mod registry;
pub mod response;
pub mod transport;
pub mod types;
pub mod wire;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{
    Entity, EntityId, EntityKind, EntityRef, Index, IndexError, IndexSettings, NewIndex, Result,
    ResultSet, TransportError,
};

// =============================================================================
// RE-EXPORTS: Components
// =============================================================================

pub use database::{Database, ServiceRoot};
pub use entries::EntryManager;
pub use lookup::LookupEngine;
pub use registry::IndexRegistry;
pub use transport::{Method, Request, Response, Transport};
