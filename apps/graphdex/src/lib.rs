//! # Graphdex
//!
//! Command-line client for graph database indexes, built on `graphdex-core`.
//!
//! - [`client`] - reqwest-backed [`graphdex_core::Transport`]
//! - [`config`] - TOML file, environment and flag resolution
//! - [`cli`] - clap commands
//! - [`error`] - application error type

pub mod cli;
pub mod client;
pub mod config;
pub mod error;

pub use client::HttpTransport;
pub use config::Config;
pub use error::AppError;
