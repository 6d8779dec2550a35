//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Text output goes to stdout; diagnostics go through `tracing` to stderr.

use crate::client::HttpTransport;
use crate::config::Config;
use crate::error::AppError;
use graphdex_core::entries::check_narrowing;
use graphdex_core::lookup::check_exact;
use graphdex_core::{
    Database, EntityKind, EntityRef, Index, IndexError, NewIndex, ResultSet, Transport,
};
use std::io::Write;

// =============================================================================
// CONNECTION
// =============================================================================

/// Build the HTTP transport and discover the service root.
pub async fn connect(config: &Config) -> Result<Database<HttpTransport>, AppError> {
    let transport = HttpTransport::new(config)?;
    Ok(Database::connect(transport, &config.url).await?)
}

/// Parse an entity self-link given on the command line.
pub fn parse_entity(uri: &str) -> Result<EntityRef, AppError> {
    Ok(EntityRef::from_self_uri(uri)?)
}

async fn resolve<T: Transport>(
    db: &Database<T>,
    kind: EntityKind,
    name: &str,
) -> Result<Index, AppError> {
    let index = db.indexes(kind).get(name).await.inspect_err(|e| {
        if matches!(e, IndexError::NotFound) {
            tracing::error!(%kind, name, "no such index");
        }
    })?;
    Ok(index)
}

// =============================================================================
// RENDERING
// =============================================================================

/// One line per index: name, type, provider, case sensitivity, location.
pub fn render_index(index: &Index) -> String {
    format!(
        "{}\ttype={}\tprovider={}\tcase_sensitive={}\t{}",
        index.name(),
        or_dash(index.index_type()),
        or_dash(index.provider()),
        index.case_sensitive(),
        index.self_uri()
    )
}

/// One line per entity, ordered by id.
pub fn render_results(results: &ResultSet) -> String {
    let mut out = String::new();
    for entity in results.values() {
        let props = serde_json::Value::Object(entity.properties.clone());
        out.push_str(&format!("{}\t{}\t{}\n", entity.id, entity.self_uri, props));
    }
    out
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

fn emit(text: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn emit_json(value: &impl serde::Serialize) -> Result<(), AppError> {
    emit(&serde_json::to_string_pretty(value)?)
}

// =============================================================================
// INDEX COMMANDS
// =============================================================================

/// Create an index.
pub async fn cmd_create<T: Transport>(
    db: &Database<T>,
    kind: EntityKind,
    json_mode: bool,
    name: &str,
    index_type: &str,
    provider: &str,
) -> Result<(), AppError> {
    let new = NewIndex::new(name)
        .with_type(index_type)
        .with_provider(provider);
    let index = db.indexes(kind).create(&new).await?;
    tracing::info!(name = index.name(), %kind, "index created");

    if json_mode {
        return emit_json(&index);
    }
    emit(&render_index(&index))
}

/// List indexes of one kind.
pub async fn cmd_list<T: Transport>(
    db: &Database<T>,
    kind: EntityKind,
    json_mode: bool,
) -> Result<(), AppError> {
    let indexes = db.indexes(kind).list().await?;

    if json_mode {
        return emit_json(&indexes);
    }
    if indexes.is_empty() {
        tracing::info!(%kind, "no indexes");
        return Ok(());
    }
    let lines: Vec<String> = indexes.iter().map(render_index).collect();
    emit(&lines.join("\n"))
}

/// Show one index.
pub async fn cmd_get<T: Transport>(
    db: &Database<T>,
    kind: EntityKind,
    json_mode: bool,
    name: &str,
) -> Result<(), AppError> {
    let index = resolve(db, kind, name).await?;

    if json_mode {
        return emit_json(&index);
    }
    emit(&render_index(&index))
}

/// Delete an index.
pub async fn cmd_delete<T: Transport>(
    db: &Database<T>,
    kind: EntityKind,
    name: &str,
) -> Result<(), AppError> {
    let index = resolve(db, kind, name).await?;
    db.indexes(kind).delete(&index).await?;
    tracing::info!(name, %kind, "index deleted");
    Ok(())
}

// =============================================================================
// ENTRY COMMANDS
// =============================================================================

/// Add an entity to an index.
pub async fn cmd_add<T: Transport>(
    db: &Database<T>,
    kind: EntityKind,
    index: &str,
    entity: &str,
    key: &str,
    value: &str,
) -> Result<(), AppError> {
    let entity = parse_entity(entity)?;
    let index = resolve(db, kind, index).await?;
    db.entries().add(&index, &entity, key, value).await?;
    tracing::info!(index = index.name(), entity = %entity.id, key, "entry added");
    Ok(())
}

/// Remove entries for an entity, optionally narrowed by key and value.
pub async fn cmd_remove<T: Transport>(
    db: &Database<T>,
    kind: EntityKind,
    index: &str,
    entity: &str,
    key: &str,
    value: &str,
) -> Result<(), AppError> {
    check_narrowing(key, value)?;
    let entity = parse_entity(entity)?;
    let index = resolve(db, kind, index).await?;
    db.entries().remove(&index, &entity, key, value).await?;
    tracing::info!(index = index.name(), entity = %entity.id, "entries removed");
    Ok(())
}

// =============================================================================
// LOOKUP COMMANDS
// =============================================================================

/// Exact key/value lookup.
pub async fn cmd_find<T: Transport>(
    db: &Database<T>,
    kind: EntityKind,
    json_mode: bool,
    index: &str,
    key: &str,
    value: &str,
) -> Result<(), AppError> {
    check_exact(key, value)?;
    let index = resolve(db, kind, index).await?;
    let results = db.lookup().find_exact(&index, key, value).await?;
    print_results(&results, json_mode)
}

/// Provider-syntax query.
pub async fn cmd_query<T: Transport>(
    db: &Database<T>,
    kind: EntityKind,
    json_mode: bool,
    index: &str,
    query: &str,
) -> Result<(), AppError> {
    let index = resolve(db, kind, index).await?;
    let results = db.lookup().query(&index, query).await?;
    print_results(&results, json_mode)
}

fn print_results(results: &ResultSet, json_mode: bool) -> Result<(), AppError> {
    tracing::debug!(count = results.len(), "lookup complete");
    if json_mode {
        let entities: Vec<_> = results.values().collect();
        return emit_json(&entities);
    }
    emit(&render_results(results))
}

// =============================================================================
// TESTS
// =============================================================================
