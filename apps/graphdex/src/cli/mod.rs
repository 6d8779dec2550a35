//! # Graphdex CLI Module
//!
//! This module implements the CLI interface for Graphdex.
//!
//! ## Available Commands
//!
//! - `create` - Create an index
//! - `list` - List indexes
//! - `get` - Show one index
//! - `delete` - Delete an index
//! - `add` - Add an entity to an index under a key/value pair
//! - `remove` - Remove index entries for an entity
//! - `find` - Exact key/value lookup
//! - `query` - Free-form query in the index provider's syntax

mod commands;

use crate::config::Config;
use crate::error::AppError;
use clap::{Parser, Subcommand, ValueEnum};
use graphdex_core::EntityKind;
use graphdex_core::entries::check_narrowing;
use graphdex_core::lookup::check_exact;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Graphdex - graph database index client
///
/// Creates, lists and deletes indexes, manages index entries and runs
/// lookups against a graph database's REST index endpoints.
#[derive(Parser, Debug)]
#[command(name = "graphdex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (default: ./graphdex.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Service root URL (overrides config and GRAPHDEX_URL)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Which index collection to operate on
    #[arg(short, long, global = true, value_enum, default_value_t = KindArg::Node)]
    pub kind: KindArg,

    /// Output in JSON format (for programmatic access)
    #[arg(long = "json", global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Index collection selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Node,
    Relationship,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Node => Self::Node,
            KindArg::Relationship => Self::Relationship,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an index
    Create {
        /// Index name
        name: String,

        /// Index type (e.g. exact, fulltext)
        #[arg(short = 't', long = "type", default_value = "")]
        index_type: String,

        /// Index provider (e.g. lucene)
        #[arg(short, long, default_value = "")]
        provider: String,
    },

    /// List indexes
    List,

    /// Show one index
    Get {
        /// Index name
        name: String,
    },

    /// Delete an index
    Delete {
        /// Index name
        name: String,
    },

    /// Add an entity to an index under a key/value pair
    Add {
        /// Index name
        index: String,

        /// Entity self-link (e.g. http://localhost:7474/db/data/node/42)
        entity: String,

        key: String,

        value: String,
    },

    /// Remove index entries for an entity
    Remove {
        /// Index name
        index: String,

        /// Entity self-link
        entity: String,

        /// Only entries under this key
        #[arg(long, default_value = "")]
        key: String,

        /// Only entries with this value (requires --key)
        #[arg(long, default_value = "")]
        value: String,
    },

    /// Exact key/value lookup
    Find {
        /// Index name
        index: String,

        key: String,

        value: String,
    },

    /// Query an index in its provider's syntax
    Query {
        /// Index name
        index: String,

        /// Query text, passed through verbatim
        query: String,
    },
}

impl Commands {
    /// Reject argument combinations that need no server round trip to refuse.
    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            Self::Add { entity, .. } => {
                parse_entity(entity)?;
            }
            Self::Remove {
                entity, key, value, ..
            } => {
                check_narrowing(key, value)?;
                parse_entity(entity)?;
            }
            Self::Find { key, value, .. } => check_exact(key, value)?,
            _ => {}
        }
        Ok(())
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Resolve configuration from file, environment and flags.
pub fn resolve_config(cli: &Cli) -> Result<Config, AppError> {
    let mut config = Config::discover(cli.config.as_deref())?;
    config.apply_env()?;
    if let Some(url) = &cli.url {
        config.url.clone_from(url);
    }
    config.validate()?;
    Ok(config)
}

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AppError> {
    cli.command.validate()?;
    let config = resolve_config(&cli)?;
    let db = connect(&config).await?;
    let kind = EntityKind::from(cli.kind);
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Create {
            name,
            index_type,
            provider,
        } => cmd_create(&db, kind, json_mode, &name, &index_type, &provider).await,
        Commands::List => cmd_list(&db, kind, json_mode).await,
        Commands::Get { name } => cmd_get(&db, kind, json_mode, &name).await,
        Commands::Delete { name } => cmd_delete(&db, kind, &name).await,
        Commands::Add {
            index,
            entity,
            key,
            value,
        } => cmd_add(&db, kind, &index, &entity, &key, &value).await,
        Commands::Remove {
            index,
            entity,
            key,
            value,
        } => cmd_remove(&db, kind, &index, &entity, &key, &value).await,
        Commands::Find { index, key, value } => {
            cmd_find(&db, kind, json_mode, &index, &key, &value).await
        }
        Commands::Query { index, query } => cmd_query(&db, kind, json_mode, &index, &query).await,
    }
}
