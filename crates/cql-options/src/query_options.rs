//! # Query Options
//!
//! Per-statement driver settings shared by every statement kind. This is the
//! base level of the options hierarchy; write, insert, update and delete
//! options embed a [`QueryOptions`].

use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::consistency::ConsistencyLevel;
use crate::error::{OptionsError, Result};
use crate::identifier::CqlIdentifier;

static EMPTY: Lazy<QueryOptions> = Lazy::new(|| QueryOptions::builder().build());

// =============================================================================
// EXECUTION PROFILE
// =============================================================================

/// Selects the driver execution profile a statement runs with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionProfileResolver {
    /// Keep whatever profile the session uses by default
    #[default]
    Default,
    /// Use the profile registered under this name
    Named(String),
}

impl ExecutionProfileResolver {
    /// Resolver for a named profile. The name must contain text.
    pub fn named(profile_name: &str) -> Result<Self> {
        if profile_name.trim().is_empty() {
            return Err(OptionsError::invalid_argument(
                "execution_profile",
                "profile name must not be empty",
            ));
        }
        Ok(Self::Named(profile_name.to_string()))
    }

    #[must_use]
    pub fn profile_name(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Named(name) => Some(name),
        }
    }
}

// =============================================================================
// QUERY OPTIONS
// =============================================================================

/// Immutable driver settings for a single statement.
///
/// Unset fields (`None`) leave the driver default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryOptions {
    pub(crate) consistency_level: Option<ConsistencyLevel>,
    pub(crate) execution_profile: ExecutionProfileResolver,
    pub(crate) idempotent: Option<bool>,
    pub(crate) keyspace: Option<CqlIdentifier>,
    pub(crate) page_size: Option<i32>,
    pub(crate) routing_keyspace: Option<CqlIdentifier>,
    pub(crate) routing_key: Option<Vec<u8>>,
    pub(crate) serial_consistency_level: Option<ConsistencyLevel>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) tracing: Option<bool>,
}

impl QueryOptions {
    #[must_use]
    pub fn builder() -> QueryOptionsBuilder {
        QueryOptionsBuilder::default()
    }

    /// Shared default instance.
    #[must_use]
    pub fn empty() -> &'static Self {
        &EMPTY
    }

    /// Builder initialized with a copy of these options.
    #[must_use]
    pub fn mutate(&self) -> QueryOptionsBuilder {
        QueryOptionsBuilder {
            options: self.clone(),
        }
    }
}

// =============================================================================
// ACCESSORS
// =============================================================================

/// Read access to the query-level settings of any options type.
pub trait QueryOptionsAccess {
    fn query_options(&self) -> &QueryOptions;

    fn consistency_level(&self) -> Option<ConsistencyLevel> {
        self.query_options().consistency_level
    }

    fn execution_profile(&self) -> &ExecutionProfileResolver {
        &self.query_options().execution_profile
    }

    fn idempotent(&self) -> Option<bool> {
        self.query_options().idempotent
    }

    /// Keyspace the statement's table lives in.
    fn keyspace(&self) -> Option<&CqlIdentifier> {
        self.query_options().keyspace.as_ref()
    }

    fn page_size(&self) -> Option<i32> {
        self.query_options().page_size
    }

    fn routing_keyspace(&self) -> Option<&CqlIdentifier> {
        self.query_options().routing_keyspace.as_ref()
    }

    fn routing_key(&self) -> Option<&[u8]> {
        self.query_options().routing_key.as_deref()
    }

    fn serial_consistency_level(&self) -> Option<ConsistencyLevel> {
        self.query_options().serial_consistency_level
    }

    fn timeout(&self) -> Option<Duration> {
        self.query_options().timeout
    }

    fn tracing(&self) -> Option<bool> {
        self.query_options().tracing
    }
}

impl QueryOptionsAccess for QueryOptions {
    fn query_options(&self) -> &QueryOptions {
        self
    }
}

// =============================================================================
// SETTERS
// =============================================================================

/// Fluent query-level setters shared by every options builder.
///
/// Each setter returns the concrete builder, so chains keep access to the
/// setters of the more specific level.
pub trait QueryOptionsSetters: Sized {
    #[doc(hidden)]
    fn query_options_mut(&mut self) -> &mut QueryOptions;

    #[must_use]
    fn consistency_level(mut self, consistency_level: ConsistencyLevel) -> Self {
        self.query_options_mut().consistency_level = Some(consistency_level);
        self
    }

    /// Run with the execution profile registered as `profile_name`.
    ///
    /// # Errors
    ///
    /// Fails when the name is empty or only whitespace.
    fn execution_profile(mut self, profile_name: &str) -> Result<Self> {
        self.query_options_mut().execution_profile = ExecutionProfileResolver::named(profile_name)?;
        Ok(self)
    }

    #[must_use]
    fn execution_profile_resolver(mut self, resolver: ExecutionProfileResolver) -> Self {
        self.query_options_mut().execution_profile = resolver;
        self
    }

    #[must_use]
    fn idempotent(mut self, idempotent: bool) -> Self {
        self.query_options_mut().idempotent = Some(idempotent);
        self
    }

    #[must_use]
    fn keyspace(mut self, keyspace: CqlIdentifier) -> Self {
        self.query_options_mut().keyspace = Some(keyspace);
        self
    }

    /// Rows per page. Zero resets to the driver default.
    ///
    /// # Errors
    ///
    /// Fails for negative sizes.
    fn page_size(mut self, page_size: i32) -> Result<Self> {
        if page_size < 0 {
            return Err(OptionsError::invalid_argument(
                "page_size",
                format!("must be greater than or equal to zero, got {page_size}"),
            ));
        }
        self.query_options_mut().page_size = (page_size > 0).then_some(page_size);
        Ok(self)
    }

    #[must_use]
    fn routing_keyspace(mut self, routing_keyspace: CqlIdentifier) -> Self {
        self.query_options_mut().routing_keyspace = Some(routing_keyspace);
        self
    }

    #[must_use]
    fn routing_key(mut self, routing_key: impl Into<Vec<u8>>) -> Self {
        self.query_options_mut().routing_key = Some(routing_key.into());
        self
    }

    /// Consistency of the Paxos phase for lightweight transactions.
    ///
    /// # Errors
    ///
    /// Fails unless the level is `SERIAL` or `LOCAL_SERIAL`.
    fn serial_consistency_level(mut self, consistency_level: ConsistencyLevel) -> Result<Self> {
        if !consistency_level.is_serial() {
            return Err(OptionsError::NotSerialConsistency(consistency_level.to_string()));
        }
        self.query_options_mut().serial_consistency_level = Some(consistency_level);
        Ok(self)
    }

    #[must_use]
    fn timeout(mut self, timeout: Duration) -> Self {
        self.query_options_mut().timeout = Some(timeout);
        self
    }

    #[must_use]
    fn tracing(mut self, tracing: bool) -> Self {
        self.query_options_mut().tracing = Some(tracing);
        self
    }

    #[must_use]
    fn with_tracing(self) -> Self {
        self.tracing(true)
    }
}

/// Builder for [`QueryOptions`].
#[derive(Debug, Clone, Default)]
pub struct QueryOptionsBuilder {
    options: QueryOptions,
}

impl QueryOptionsSetters for QueryOptionsBuilder {
    fn query_options_mut(&mut self) -> &mut QueryOptions {
        &mut self.options
    }
}

impl QueryOptionsBuilder {
    #[must_use]
    pub fn build(self) -> QueryOptions {
        self.options
    }
}
