//! # Lookup Engine
//!
//! Retrieves entities from a resolved index, either by exact key/value
//! match (`indexSelf/key/value`) or by a free-form query string in the
//! provider's syntax (`indexSelf?query=...`). Both return a [`ResultSet`]
//! keyed by entity identifier.

use crate::path;
use crate::response::{self, Expectation, OK};
use crate::transport::{Request, Transport};
use crate::types::{EntityKind, Index, IndexError, Result, ResultSet};
use crate::wire::EntityResponse;
use url::Url;

const FIND: Expectation = Expectation::new("find in index", &[OK]);
const QUERY: Expectation = Expectation::new("query index", &[OK]);

/// Lookups against resolved indexes.
pub struct LookupEngine<'db, T> {
    transport: &'db T,
}

impl<'db, T: Transport> LookupEngine<'db, T> {
    pub const fn new(transport: &'db T) -> Self {
        Self { transport }
    }

    /// Entities indexed under exactly `key`/`value`.
    ///
    /// Both `key` and `value` must be non-empty.
    pub async fn find_exact(&self, index: &Index, key: &str, value: &str) -> Result<ResultSet> {
        check_exact(key, value)?;
        let url = path::extend(index.self_uri(), &[key, value])?;

        tracing::debug!(index = index.name(), key, value, "exact index lookup");
        self.fetch(&FIND, index.kind(), url).await
    }

    /// Entities matching `query`, passed to the server verbatim.
    pub async fn query(&self, index: &Index, query: &str) -> Result<ResultSet> {
        let url = path::with_query(index.self_uri(), query);

        tracing::debug!(index = index.name(), query, "index query");
        self.fetch(&QUERY, index.kind(), url).await
    }

    async fn fetch(&self, expect: &Expectation, kind: EntityKind, url: Url) -> Result<ResultSet> {
        let response = self.transport.execute(Request::get(url)).await?;
        let body: Vec<EntityResponse> = response::decode(expect, &response)?;
        hydrate(expect, kind, response.status, body)
    }
}

/// Check exact-lookup arguments without composing a path.
pub fn check_exact(key: &str, value: &str) -> Result<()> {
    if key.is_empty() || value.is_empty() {
        return Err(IndexError::InvalidArgument(
            "exact lookup needs both a key and a value".to_string(),
        ));
    }
    Ok(())
}

/// Collect representations into a result set; later duplicates replace
/// earlier ones.
fn hydrate(
    expect: &Expectation,
    kind: EntityKind,
    status: u16,
    body: Vec<EntityResponse>,
) -> Result<ResultSet> {
    let mut results = ResultSet::new();
    for representation in body {
        let self_uri = representation.self_uri.clone();
        let Some(entity) = representation.into_entity(kind) else {
            tracing::warn!(
                operation = expect.operation(),
                self_uri = %self_uri,
                "entity representation without identifier"
            );
            return Err(IndexError::BadResponse { status });
        };
        results.insert(entity.id, entity);
    }
    Ok(results)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Response;
    use crate::transport::scripted::ScriptedTransport;
    use crate::types::{EntityId, IndexSettings};

    fn index(kind: EntityKind) -> Index {
        let base = Url::parse("http://localhost:7474/db/data/index/node").expect("base url");
        let self_uri = path::extend(&base, &["people"]).expect("self url");
        Index::resolve(kind, "people", base, self_uri, IndexSettings::default())
    }

    #[tokio::test]
    async fn find_exact_collapses_duplicates() {
        let transport = ScriptedTransport::replying(vec![Ok(Response::new(
            200,
            r#"[
                {"self":"http://localhost:7474/db/data/node/1","data":{"name":"Alice"}},
                {"self":"http://localhost:7474/db/data/node/2","data":{"name":"Bob"}},
                {"self":"http://localhost:7474/db/data/node/1","data":{"name":"Alice"}}
            ]"#,
        ))]);
        let lookup = LookupEngine::new(&transport);

        let results = lookup
            .find_exact(&index(EntityKind::Node), "color", "red")
            .await
            .expect("find");

        assert_eq!(results.len(), 2);
        assert_eq!(
            results[&EntityId(1)].properties.get("name"),
            Some(&serde_json::json!("Alice"))
        );
        assert_eq!(results[&EntityId(2)].kind, EntityKind::Node);
        assert_eq!(
            transport.requests()[0].url.as_str(),
            "http://localhost:7474/db/data/index/node/people/color/red"
        );
    }

    #[tokio::test]
    async fn find_exact_needs_key_and_value() {
        let transport = ScriptedTransport::default();
        let lookup = LookupEngine::new(&transport);
        let people = index(EntityKind::Node);

        for (key, value) in [("", "red"), ("color", ""), ("", "")] {
            let result = lookup.find_exact(&people, key, value).await;
            assert!(matches!(result, Err(IndexError::InvalidArgument(_))));
            assert!(check_exact(key, value).is_err());
        }
        assert!(check_exact("color", "red").is_ok());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn find_exact_rejects_dot_segments() {
        let transport = ScriptedTransport::default();
        let lookup = LookupEngine::new(&transport);
        let people = index(EntityKind::Node);

        for (key, value) in [("..", "red"), ("color", ".")] {
            let result = lookup.find_exact(&people, key, value).await;
            assert!(matches!(result, Err(IndexError::InvalidPath(_))));
        }
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn query_sends_query_parameter() {
        let transport = ScriptedTransport::replying(vec![Ok(Response::new(
            200,
            r#"[{"self":"http://localhost:7474/db/data/relationship/5",
                 "start":"http://localhost:7474/db/data/node/1",
                 "end":"http://localhost:7474/db/data/node/2",
                 "type":"KNOWS","data":{}}]"#,
        ))]);
        let lookup = LookupEngine::new(&transport);

        let results = lookup
            .query(&index(EntityKind::Relationship), "since:[2000 TO 2010]")
            .await
            .expect("query");

        let rel = &results[&EntityId(5)];
        assert_eq!(rel.kind, EntityKind::Relationship);
        assert_eq!(rel.rel_type.as_deref(), Some("KNOWS"));

        let url = &transport.requests()[0].url;
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![("query".to_string(), "since:[2000 TO 2010]".to_string())]
        );
        assert_eq!(url.path(), "/db/data/index/node/people");
    }

    #[tokio::test]
    async fn lookup_failures_are_classified() {
        let transport = ScriptedTransport::replying(vec![
            Ok(Response::new(400, r#"{"message":"parse error"}"#)),
            Ok(Response::new(200, r#"{"not":"an array"}"#)),
            Ok(Response::new(200, r#"[{"self":"http://localhost/db/data/node/x"}]"#)),
        ]);
        let lookup = LookupEngine::new(&transport);
        let people = index(EntityKind::Node);

        assert!(matches!(
            lookup.query(&people, "name:(").await,
            Err(IndexError::BadResponse { status: 400 })
        ));
        assert!(matches!(
            lookup.query(&people, "name:Bob").await,
            Err(IndexError::BadResponse { status: 200 })
        ));
        assert!(matches!(
            lookup.find_exact(&people, "name", "Bob").await,
            Err(IndexError::BadResponse { status: 200 })
        ));
    }

    #[tokio::test]
    async fn empty_result_is_empty_set() {
        let transport = ScriptedTransport::replying(vec![Ok(Response::new(200, "[]"))]);
        let lookup = LookupEngine::new(&transport);

        let results = lookup
            .find_exact(&index(EntityKind::Node), "color", "blue")
            .await
            .expect("find");
        assert!(results.is_empty());
    }
}
