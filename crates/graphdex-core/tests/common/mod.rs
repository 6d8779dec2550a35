//! In-memory stand-in for the graph database index endpoints.
//!
//! Implements just enough of the REST contract to drive every operation:
//! service root, index collections, entries, exact lookups and
//! `key:value` queries.

#![allow(dead_code)]

use graphdex_core::{EntityId, EntityKind, Method, Request, Response, Transport, TransportError};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;

pub const ROOT: &str = "http://fake.local:7474/db/data/";

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    value: String,
    uri: String,
}

#[derive(Debug, Clone, Default)]
struct FakeIndex {
    index_type: Option<String>,
    provider: Option<String>,
    entries: Vec<Entry>,
}

#[derive(Default)]
struct State {
    indexes: BTreeMap<(EntityKind, String), FakeIndex>,
    requests: Vec<Request>,
}

/// Fake server. Every request is recorded.
#[derive(Default)]
pub struct FakeServer {
    state: Mutex<State>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn handle(&self, request: Request) -> Response {
        let mut state = self.lock();
        state.requests.push(request.clone());

        let segments: Vec<String> = request
            .url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).map(str::to_string).collect())
            .unwrap_or_default();
        let rest: Vec<&str> = match segments.as_slice() {
            [db, data, rest @ ..] if db == "db" && data == "data" => {
                rest.iter().map(String::as_str).collect()
            }
            _ => return Response::empty(404),
        };
        let query = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "query")
            .map(|(_, v)| v.into_owned());

        match (request.method, rest.as_slice()) {
            (Method::Get, []) => service_root(),
            (method, ["index", kind, tail @ ..]) => {
                let Some(kind) = parse_kind(kind) else {
                    return Response::empty(404);
                };
                match (method, tail) {
                    (Method::Get, []) => list(&state, kind),
                    (Method::Post, []) => create(&mut state, kind, request.body.as_ref()),
                    (Method::Get, [name]) => match query {
                        Some(q) => query_index(&state, kind, name, &q),
                        None => get(&state, kind, name),
                    },
                    (Method::Delete, [name]) => delete(&mut state, kind, name),
                    (Method::Post, [name]) => add(&mut state, kind, name, request.body.as_ref()),
                    (Method::Get, [name, key, value]) => find(&state, kind, name, key, value),
                    (Method::Delete, [name, narrowing @ ..]) => {
                        remove(&mut state, kind, name, narrowing)
                    }
                    _ => Response::empty(405),
                }
            }
            _ => Response::empty(404),
        }
    }
}

impl Transport for FakeServer {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        std::future::ready(Ok(self.handle(request)))
    }
}

/// Transport whose calls never complete.
pub struct Unreachable;

impl Transport for Unreachable {
    fn execute(
        &self,
        _request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        std::future::ready(Err(TransportError("connection refused".to_string())))
    }
}

/// Self-link of a node on the fake server.
pub fn node_uri(id: u64) -> String {
    format!("{ROOT}node/{id}")
}

// =============================================================================
// HANDLERS
// =============================================================================

fn parse_kind(raw: &str) -> Option<EntityKind> {
    match raw {
        "node" => Some(EntityKind::Node),
        "relationship" => Some(EntityKind::Relationship),
        _ => None,
    }
}

fn json_response(status: u16, body: &Value) -> Response {
    Response::new(status, body.to_string())
}

fn service_root() -> Response {
    json_response(
        200,
        &json!({
            "node": format!("{ROOT}node"),
            "node_index": format!("{ROOT}index/node"),
            "relationship_index": format!("{ROOT}index/relationship"),
            "neo4j_version": "1.8.2"
        }),
    )
}

fn describe(kind: EntityKind, name: &str, index: &FakeIndex) -> Value {
    let mut body = json!({
        "template": format!("{ROOT}index/{kind}/{name}/{{key}}/{{value}}"),
    });
    if let Some(index_type) = &index.index_type {
        body["type"] = json!(index_type);
        body["to_lower_case"] = json!(if index_type == "fulltext" { "true" } else { "false" });
    }
    if let Some(provider) = &index.provider {
        body["provider"] = json!(provider);
    }
    body
}

fn list(state: &State, kind: EntityKind) -> Response {
    let body: serde_json::Map<String, Value> = state
        .indexes
        .iter()
        .filter(|((k, _), _)| *k == kind)
        .map(|((_, name), index)| (name.clone(), describe(kind, name, index)))
        .collect();
    json_response(200, &Value::Object(body))
}

fn create(state: &mut State, kind: EntityKind, body: Option<&Value>) -> Response {
    let Some(name) = body.and_then(|b| b["name"].as_str()) else {
        return Response::new(400, r#"{"message":"name missing"}"#);
    };
    let config = body.map(|b| &b["config"]);
    let field = |key: &str| {
        config
            .and_then(|c| c[key].as_str())
            .map(str::to_string)
    };
    let index = FakeIndex {
        index_type: field("type"),
        provider: field("provider"),
        entries: Vec::new(),
    };
    let described = describe(kind, name, &index);
    state.indexes.insert((kind, name.to_string()), index);
    json_response(201, &described)
}

fn get(state: &State, kind: EntityKind, name: &str) -> Response {
    match state.indexes.get(&(kind, name.to_string())) {
        Some(index) => json_response(200, &describe(kind, name, index)),
        None => Response::new(404, r#"{"message":"index not found"}"#),
    }
}

fn delete(state: &mut State, kind: EntityKind, name: &str) -> Response {
    match state.indexes.remove(&(kind, name.to_string())) {
        Some(_) => Response::empty(204),
        None => Response::empty(404),
    }
}

fn add(state: &mut State, kind: EntityKind, name: &str, body: Option<&Value>) -> Response {
    let Some(index) = state.indexes.get_mut(&(kind, name.to_string())) else {
        return Response::empty(404);
    };
    let field = |key: &str| body.and_then(|b| b[key].as_str()).map(str::to_string);
    let (Some(uri), Some(key), Some(value)) = (field("uri"), field("key"), field("value")) else {
        return Response::new(400, r#"{"message":"uri, key and value required"}"#);
    };
    index.entries.push(Entry {
        key: key.clone(),
        value: value.clone(),
        uri: uri.clone(),
    });
    json_response(
        201,
        &json!({
            "self": format!("{ROOT}index/{kind}/{name}/{key}/{value}"),
            "indexed": uri
        }),
    )
}

fn representations<'a>(entries: impl Iterator<Item = &'a Entry>) -> Value {
    Value::Array(
        entries
            .map(|e| json!({"self": e.uri, "data": {"indexed_by": e.key}}))
            .collect(),
    )
}

fn find(state: &State, kind: EntityKind, name: &str, key: &str, value: &str) -> Response {
    let Some(index) = state.indexes.get(&(kind, name.to_string())) else {
        return Response::empty(404);
    };
    let matches = index
        .entries
        .iter()
        .filter(|e| e.key == key && e.value == value);
    json_response(200, &representations(matches))
}

fn query_index(state: &State, kind: EntityKind, name: &str, query: &str) -> Response {
    let Some(index) = state.indexes.get(&(kind, name.to_string())) else {
        return Response::empty(404);
    };
    let Some((key, value)) = query.split_once(':') else {
        return Response::new(400, r#"{"message":"unparseable query"}"#);
    };
    let matches = index
        .entries
        .iter()
        .filter(|e| e.key == key && (value == "*" || e.value == value));
    json_response(200, &representations(matches))
}

fn remove(state: &mut State, kind: EntityKind, name: &str, narrowing: &[&str]) -> Response {
    let Some(index) = state.indexes.get_mut(&(kind, name.to_string())) else {
        return Response::empty(404);
    };
    let Some((id, filters)) = narrowing.split_last() else {
        return Response::empty(405);
    };
    let Ok(id) = id.parse::<u64>() else {
        return Response::empty(400);
    };
    let (key, value) = match filters {
        [] => (None, None),
        [key] => (Some(*key), None),
        [key, value] => (Some(*key), Some(*value)),
        _ => return Response::empty(404),
    };
    index.entries.retain(|e| {
        let matches = EntityId::from_self_uri(&e.uri) == Some(EntityId(id))
            && key.is_none_or(|k| e.key == k)
            && value.is_none_or(|v| e.value == v);
        !matches
    });
    Response::empty(204)
}
