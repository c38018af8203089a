//! # CQL Template
//!
//! Thin execution layer that turns typed options from `cql-options` into
//! ScyllaDB driver statements.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  table, criteria, *Options
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 CqlOperations / CqlTemplate                  │
//! │   cql::{select, insert, update, delete}  → Statement         │
//! │   statement::configure_*                 → scylla Query      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ScyllaDB / Cassandra cluster                 │
//! │        (consistency, LWT, TTL enforced server-side)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cql_options::prelude::*;
//! use cql_template::{connect, CqlOperations, Config};
//!
//! let template = connect(&Config::from_env()?).await?;
//! let drones = CqlIdentifier::from_cql("drones")?;
//!
//! let result = template
//!     .delete(
//!         &drones,
//!         &Filter::from(Criteria::column("drone_id")?.is(drone_id)),
//!         &DeleteOptions::builder().with_if_exists().build(),
//!     )
//!     .await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod cql;
pub mod error;
pub mod profile;
pub mod statement;
pub mod template;
pub mod values;

use std::sync::Arc;

pub use client::ScyllaClient;
pub use config::{Config, ProfileConfig, ScyllaConfig};
pub use cql::Statement;
pub use error::{Result, TemplateError};
pub use profile::ExecutionProfileRegistry;
pub use template::{Conditional, CqlOperations, CqlTemplate, WriteResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Connect with `config` and build a template carrying its default options
/// and execution profiles.
///
/// # Errors
///
/// Returns an error if a profile is invalid or the ScyllaDB connection fails.
pub async fn connect(config: &Config) -> Result<CqlTemplate> {
    let profiles = config.execution_profiles()?;
    let client = ScyllaClient::new(config.scylla.clone()).await?;
    tracing::info!(profiles = config.profiles.len(), "Template ready");

    Ok(CqlTemplate::new(Arc::new(client))
        .with_profiles(profiles)
        .with_defaults(config.default_query_options()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
