//! # CQL Options
//!
//! Immutable, driver-independent options for CQL statements against
//! Cassandra / ScyllaDB clusters.
//!
//! ## Hierarchy
//!
//! ```text
//! QueryOptions            consistency, serial consistency, timeout, paging,
//!      │                  tracing, idempotency, keyspace, routing, profile
//!      ▼
//! WriteOptions            + TTL, write timestamp
//!      │
//!      ├──► InsertOptions + IF NOT EXISTS, insert nulls
//!      ├──► UpdateOptions + IF EXISTS | IF <condition>
//!      └──► DeleteOptions + IF EXISTS | IF <condition>
//! ```
//!
//! Every level embeds the one above it. Reads go through the
//! [`QueryOptionsAccess`] / [`WriteOptionsAccess`] traits, builders share
//! setters through [`QueryOptionsSetters`] / [`WriteOptionsSetters`] /
//! [`ConditionalSetters`], so each setter returns the concrete builder.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cql_options::prelude::*;
//!
//! let options = DeleteOptions::builder()
//!     .consistency_level(ConsistencyLevel::LocalQuorum)
//!     .timeout(Duration::from_secs(2))
//!     .with_if_exists()
//!     .build();
//!
//! assert!(options.is_if_exists());
//! assert_eq!(options.mutate().build(), options);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod condition;
pub mod consistency;
pub mod delete_options;
pub mod error;
pub mod identifier;
pub mod insert_options;
pub mod query;
pub mod query_options;
pub mod update_options;
pub mod write_options;

pub use condition::{ConditionalSetters, WriteCondition};
pub use consistency::ConsistencyLevel;
pub use delete_options::{DeleteOptions, DeleteOptionsBuilder};
pub use error::{OptionsError, Result};
pub use identifier::CqlIdentifier;
pub use insert_options::{InsertOptions, InsertOptionsBuilder};
pub use query::{Criteria, CriteriaBuilder, CriteriaDefinition, Filter, Operator, Predicate, Value};
pub use query_options::{
    ExecutionProfileResolver, QueryOptions, QueryOptionsAccess, QueryOptionsBuilder,
    QueryOptionsSetters,
};
pub use update_options::{UpdateOptions, UpdateOptionsBuilder};
pub use write_options::{
    WriteOptions, WriteOptionsAccess, WriteOptionsBuilder, WriteOptionsSetters, MAX_TTL_SECS,
};

/// Types and traits needed to build and read options.
pub mod prelude {
    pub use std::time::Duration;

    pub use crate::{
        ConditionalSetters, ConsistencyLevel, CqlIdentifier, Criteria, DeleteOptions, Filter,
        InsertOptions, QueryOptions, QueryOptionsAccess, QueryOptionsSetters, UpdateOptions,
        Value, WriteOptions, WriteOptionsAccess, WriteOptionsSetters,
    };
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
