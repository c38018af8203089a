//! # Delete Options
//!
//! Write options for `DELETE` statements, adding lightweight-transaction
//! conditions.
//!
//! ```rust,ignore
//! use cql_options::prelude::*;
//!
//! let options = DeleteOptions::builder()
//!     .consistency_level(ConsistencyLevel::LocalQuorum)
//!     .if_condition(Criteria::column("status")?.is("RTB"))?
//!     .build();
//! ```

use once_cell::sync::Lazy;

use crate::condition::{ConditionalSetters, WriteCondition};
use crate::query::Filter;
use crate::query_options::{QueryOptions, QueryOptionsAccess, QueryOptionsSetters};
use crate::write_options::{WriteOptions, WriteOptionsAccess, WriteOptionsSetters};

static EMPTY: Lazy<DeleteOptions> = Lazy::new(|| DeleteOptions::builder().build());

/// Immutable options for `DELETE` statements
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DeleteOptions {
    write: WriteOptions,
    condition: WriteCondition,
}

impl DeleteOptions {
    #[must_use]
    pub fn builder() -> DeleteOptionsBuilder {
        DeleteOptionsBuilder::default()
    }

    /// Shared default instance.
    #[must_use]
    pub fn empty() -> &'static Self {
        &EMPTY
    }

    /// Builder initialized with these options, condition included.
    #[must_use]
    pub fn mutate(&self) -> DeleteOptionsBuilder {
        DeleteOptionsBuilder {
            options: self.clone(),
        }
    }

    /// `true` to apply `IF EXISTS`.
    #[must_use]
    pub const fn is_if_exists(&self) -> bool {
        self.condition.is_if_exists()
    }

    /// The `IF` condition for conditional deletes.
    #[must_use]
    pub const fn if_condition(&self) -> Option<&Filter> {
        self.condition.filter()
    }

    #[must_use]
    pub const fn condition(&self) -> &WriteCondition {
        &self.condition
    }
}

impl QueryOptionsAccess for DeleteOptions {
    fn query_options(&self) -> &QueryOptions {
        &self.write.query
    }
}

impl WriteOptionsAccess for DeleteOptions {
    fn write_options(&self) -> &WriteOptions {
        &self.write
    }
}

/// Builder for [`DeleteOptions`].
#[derive(Debug, Clone, Default)]
pub struct DeleteOptionsBuilder {
    options: DeleteOptions,
}

impl QueryOptionsSetters for DeleteOptionsBuilder {
    fn query_options_mut(&mut self) -> &mut QueryOptions {
        &mut self.options.write.query
    }
}

impl WriteOptionsSetters for DeleteOptionsBuilder {
    fn write_options_mut(&mut self) -> &mut WriteOptions {
        &mut self.options.write
    }
}

impl ConditionalSetters for DeleteOptionsBuilder {
    fn condition_mut(&mut self) -> &mut WriteCondition {
        &mut self.options.condition
    }
}

impl DeleteOptionsBuilder {
    #[must_use]
    pub fn build(self) -> DeleteOptions {
        self.options
    }
}
