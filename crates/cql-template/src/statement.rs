//! Applies options to driver statements.

use cql_options::{ConsistencyLevel, QueryOptionsAccess, WriteOptionsAccess};
use scylla::query::Query;
use scylla::statement::{Consistency, SerialConsistency};

use crate::error::Result;
use crate::profile::ExecutionProfileRegistry;

/// Driver consistency for `level`.
#[must_use]
pub const fn to_consistency(level: ConsistencyLevel) -> Consistency {
    match level {
        ConsistencyLevel::Any => Consistency::Any,
        ConsistencyLevel::One => Consistency::One,
        ConsistencyLevel::Two => Consistency::Two,
        ConsistencyLevel::Three => Consistency::Three,
        ConsistencyLevel::Quorum => Consistency::Quorum,
        ConsistencyLevel::All => Consistency::All,
        ConsistencyLevel::LocalQuorum => Consistency::LocalQuorum,
        ConsistencyLevel::EachQuorum => Consistency::EachQuorum,
        ConsistencyLevel::Serial => Consistency::Serial,
        ConsistencyLevel::LocalSerial => Consistency::LocalSerial,
        ConsistencyLevel::LocalOne => Consistency::LocalOne,
    }
}

/// Driver serial consistency for `level`.
///
/// # Errors
///
/// Fails for non-serial levels.
pub fn to_serial_consistency(level: ConsistencyLevel) -> Result<SerialConsistency> {
    match level {
        ConsistencyLevel::Serial => Ok(SerialConsistency::Serial),
        ConsistencyLevel::LocalSerial => Ok(SerialConsistency::LocalSerial),
        other => Err(cql_options::OptionsError::NotSerialConsistency(other.to_string()).into()),
    }
}

/// Apply query-level options to `query`. Unset options keep driver defaults.
///
/// # Errors
///
/// Fails when the options name an execution profile missing from `profiles`.
pub fn configure_query(
    mut query: Query,
    options: &impl QueryOptionsAccess,
    profiles: &ExecutionProfileRegistry,
) -> Result<Query> {
    if let Some(handle) = profiles.resolve(options.execution_profile())? {
        query.set_execution_profile_handle(Some(handle));
    }
    if let Some(level) = options.consistency_level() {
        query.set_consistency(to_consistency(level));
    }
    if let Some(level) = options.serial_consistency_level() {
        query.set_serial_consistency(Some(to_serial_consistency(level)?));
    }
    if let Some(timeout) = options.timeout() {
        query.set_request_timeout(Some(timeout));
    }
    if let Some(page_size) = options.page_size() {
        query.set_page_size(page_size);
    }
    if let Some(tracing) = options.tracing() {
        query.set_tracing(tracing);
    }
    if let Some(idempotent) = options.idempotent() {
        query.set_is_idempotent(idempotent);
    }
    if options.routing_keyspace().is_some() || options.routing_key().is_some() {
        // unprepared statements have no per-statement routing setter
        tracing::debug!(
            routing_keyspace = ?options.routing_keyspace(),
            routing_key_len = options.routing_key().map(<[u8]>::len),
            "Routing hints left to token-aware load balancing"
        );
    }

    Ok(query)
}

/// Apply write-level options to `query`, including the write timestamp.
///
/// # Errors
///
/// See [`configure_query`].
pub fn configure_write(
    query: Query,
    options: &impl WriteOptionsAccess,
    profiles: &ExecutionProfileRegistry,
) -> Result<Query> {
    let mut query = configure_query(query, options, profiles)?;
    if let Some(timestamp) = options.timestamp() {
        query.set_timestamp(Some(timestamp));
    }
    Ok(query)
}
