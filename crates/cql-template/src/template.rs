//! # CQL Template
//!
//! Render → configure → execute pipeline over a shared ScyllaDB session.

use std::sync::Arc;

use async_trait::async_trait;
use cql_options::{
    CqlIdentifier, DeleteOptions, Filter, InsertOptions, QueryOptions, UpdateOptions, Value,
    WriteOptionsAccess,
};
use futures_util::TryStreamExt;
use scylla::frame::response::result::Row;
use scylla::query::Query;

use crate::client::ScyllaClient;
use crate::cql::{self, Statement};
use crate::error::{Result, TemplateError};
use crate::profile::ExecutionProfileRegistry;
use crate::statement::{configure_query, configure_write};
use crate::values::to_bind_values;

/// Outcome of a write statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteResult {
    /// `false` only when a lightweight transaction's condition did not hold
    pub applied: bool,
}

/// Statement-level operations with typed options
#[async_trait]
pub trait CqlOperations: Send + Sync {
    /// Select all columns of the rows matching `filter`
    async fn select(
        &self,
        table: &CqlIdentifier,
        filter: &Filter,
        options: &QueryOptions,
    ) -> Result<Vec<Row>>;

    /// Insert one row
    async fn insert(
        &self,
        table: &CqlIdentifier,
        columns: &[(CqlIdentifier, Value)],
        options: &InsertOptions,
    ) -> Result<WriteResult>;

    /// Update the rows matching `filter`
    async fn update(
        &self,
        table: &CqlIdentifier,
        assignments: &[(CqlIdentifier, Value)],
        filter: &Filter,
        options: &UpdateOptions,
    ) -> Result<WriteResult>;

    /// Delete the rows matching `filter`
    async fn delete(
        &self,
        table: &CqlIdentifier,
        filter: &Filter,
        options: &DeleteOptions,
    ) -> Result<WriteResult>;
}

/// [`CqlOperations`] backed by a ScyllaDB session.
pub struct CqlTemplate {
    client: Arc<ScyllaClient>,
    profiles: ExecutionProfileRegistry,
    defaults: QueryOptions,
}

impl CqlTemplate {
    /// Create a template with no registered profiles and no defaults.
    pub fn new(client: Arc<ScyllaClient>) -> Self {
        Self {
            client,
            profiles: ExecutionProfileRegistry::new(),
            defaults: QueryOptions::default(),
        }
    }

    /// Use `profiles` to resolve named execution profiles.
    #[must_use]
    pub fn with_profiles(mut self, profiles: ExecutionProfileRegistry) -> Self {
        self.profiles = profiles;
        self
    }

    /// Options applied beneath every statement's own options.
    #[must_use]
    pub fn with_defaults(mut self, defaults: QueryOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub const fn defaults(&self) -> &QueryOptions {
        &self.defaults
    }

    pub const fn profiles(&self) -> &ExecutionProfileRegistry {
        &self.profiles
    }

    async fn execute_write(
        &self,
        statement: Statement,
        options: &(impl WriteOptionsAccess + Conditional + Sync),
    ) -> Result<WriteResult> {
        let query = prepare_write(&statement, options, &self.defaults, &self.profiles)?;
        let conditional = options.is_conditional();

        tracing::debug!(cql = %statement.cql, values = statement.values.len(), conditional, "Executing write");

        let result = self
            .client
            .session()
            .query_unpaged(query, to_bind_values(&statement.values))
            .await?;

        if !conditional {
            return Ok(WriteResult { applied: true });
        }

        let row = result
            .into_rows_result()
            .map_err(|e| TemplateError::Scylla(e.to_string()))?
            .maybe_first_row::<Row>()
            .map_err(|e| TemplateError::Scylla(e.to_string()))?;
        let applied = applied(row);

        if !applied {
            tracing::warn!(cql = %statement.cql, "Lightweight transaction not applied");
        }

        Ok(WriteResult { applied })
    }
}

#[async_trait]
impl CqlOperations for CqlTemplate {
    async fn select(
        &self,
        table: &CqlIdentifier,
        filter: &Filter,
        options: &QueryOptions,
    ) -> Result<Vec<Row>> {
        let statement = cql::select(table, filter, options)?;
        let query = prepare_read(&statement, options, &self.defaults, &self.profiles)?;

        tracing::debug!(cql = %statement.cql, values = statement.values.len(), "Executing select");

        self.client
            .session()
            .query_iter(query, to_bind_values(&statement.values))
            .await?
            .rows_stream::<Row>()
            .map_err(|e| TemplateError::Scylla(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| TemplateError::Scylla(e.to_string()))
    }

    async fn insert(
        &self,
        table: &CqlIdentifier,
        columns: &[(CqlIdentifier, Value)],
        options: &InsertOptions,
    ) -> Result<WriteResult> {
        let statement = cql::insert(table, columns, options)?;
        self.execute_write(statement, options).await
    }

    async fn update(
        &self,
        table: &CqlIdentifier,
        assignments: &[(CqlIdentifier, Value)],
        filter: &Filter,
        options: &UpdateOptions,
    ) -> Result<WriteResult> {
        let statement = cql::update(table, assignments, filter, options)?;
        self.execute_write(statement, options).await
    }

    async fn delete(
        &self,
        table: &CqlIdentifier,
        filter: &Filter,
        options: &DeleteOptions,
    ) -> Result<WriteResult> {
        let statement = cql::delete(table, filter, options)?;
        self.execute_write(statement, options).await
    }
}

// =============================================================================
// STATEMENT PREPARATION
// =============================================================================

/// Options that can turn a write into a lightweight transaction
pub trait Conditional {
    /// Whether the rendered statement carries an `IF` clause
    fn is_conditional(&self) -> bool;
}

impl Conditional for InsertOptions {
    fn is_conditional(&self) -> bool {
        self.is_if_not_exists()
    }
}

impl Conditional for UpdateOptions {
    fn is_conditional(&self) -> bool {
        self.condition().is_conditional()
    }
}

impl Conditional for DeleteOptions {
    fn is_conditional(&self) -> bool {
        self.condition().is_conditional()
    }
}

/// Build the driver statement for a write: `defaults` first, then `options`.
///
/// # Errors
///
/// Fails when either layer names an execution profile missing from `profiles`.
pub fn prepare_write(
    statement: &Statement,
    options: &impl WriteOptionsAccess,
    defaults: &QueryOptions,
    profiles: &ExecutionProfileRegistry,
) -> Result<Query> {
    let query = configure_query(Query::new(statement.cql.clone()), defaults, profiles)?;
    configure_write(query, options, profiles)
}

/// Build the driver statement for a read: `defaults` first, then `options`.
///
/// # Errors
///
/// Fails when either layer names an execution profile missing from `profiles`.
pub fn prepare_read(
    statement: &Statement,
    options: &QueryOptions,
    defaults: &QueryOptions,
    profiles: &ExecutionProfileRegistry,
) -> Result<Query> {
    let query = configure_query(Query::new(statement.cql.clone()), defaults, profiles)?;
    configure_query(query, options, profiles)
}

/// Read the `[applied]` flag, the first column of a lightweight transaction
/// response. A missing row or a non-boolean column counts as not applied.
#[must_use]
pub fn applied(row: Option<Row>) -> bool {
    row.and_then(|row| row.columns.into_iter().next().flatten())
        .and_then(|value| value.as_boolean())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cql_options::{
        ConditionalSetters, ConsistencyLevel, Criteria, QueryOptionsSetters, WriteOptionsSetters,
    };
    use fake::{Fake, Faker};
    use scylla::frame::response::result::CqlValue;
    use scylla::statement::Consistency;
    use scylla::transport::execution_profile::ExecutionProfile;
    use std::sync::Mutex;
    use std::time::Duration;
    use uuid::Uuid;

    /// Records rendered statements instead of executing them.
    #[derive(Default)]
    struct RecordingOperations {
        statements: Mutex<Vec<Statement>>,
    }

    impl RecordingOperations {
        fn record(&self, statement: Statement, applied: bool) -> WriteResult {
            self.statements.lock().unwrap().push(statement);
            WriteResult { applied }
        }
    }

    #[async_trait]
    impl CqlOperations for RecordingOperations {
        async fn select(&self, table: &CqlIdentifier, filter: &Filter, options: &QueryOptions) -> Result<Vec<Row>> {
            self.record(cql::select(table, filter, options)?, true);
            Ok(Vec::new())
        }

        async fn insert(
            &self,
            table: &CqlIdentifier,
            columns: &[(CqlIdentifier, Value)],
            options: &InsertOptions,
        ) -> Result<WriteResult> {
            Ok(self.record(cql::insert(table, columns, options)?, true))
        }

        async fn update(
            &self,
            table: &CqlIdentifier,
            assignments: &[(CqlIdentifier, Value)],
            filter: &Filter,
            options: &UpdateOptions,
        ) -> Result<WriteResult> {
            Ok(self.record(cql::update(table, assignments, filter, options)?, true))
        }

        async fn delete(&self, table: &CqlIdentifier, filter: &Filter, options: &DeleteOptions) -> Result<WriteResult> {
            Ok(self.record(cql::delete(table, filter, options)?, !options.is_if_exists()))
        }
    }

    #[tokio::test]
    async fn test_operations_through_trait_object() {
        let recorder = RecordingOperations::default();
        let ops: &dyn CqlOperations = &recorder;
        let table = CqlIdentifier::from_cql("drones").unwrap();
        let drone_id: Uuid = Faker.fake();
        let filter = Filter::from(Criteria::column("drone_id").unwrap().is(drone_id));

        let options = DeleteOptions::builder().with_if_exists().build();
        let result = tokio_test::assert_ok!(ops.delete(&table, &filter, &options).await);
        assert!(!result.applied);

        tokio_test::assert_ok!(ops.select(&table, &filter, QueryOptions::empty()).await);

        let empty = ops.delete(&table, &Filter::default(), DeleteOptions::empty()).await;
        assert!(matches!(empty, Err(TemplateError::InvalidQuery(_))));

        let statements = recorder.statements.lock().unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].cql, "DELETE FROM drones WHERE drone_id = ? IF EXISTS");
        assert_eq!(statements[0].values, vec![Value::Uuid(drone_id)]);
        assert_eq!(statements[1].cql, "SELECT * FROM drones WHERE drone_id = ?");
    }

    fn by_id(id: Uuid) -> Filter {
        Filter::from(Criteria::column("drone_id").unwrap().is(id))
    }

    #[test]
    fn test_applied_reads_first_column() {
        let row = |columns| Some(Row { columns });

        assert!(applied(row(vec![Some(CqlValue::Boolean(true)), Some(CqlValue::Int(1))])));
        assert!(!applied(row(vec![Some(CqlValue::Boolean(false)), Some(CqlValue::Int(1))])));
        assert!(!applied(row(vec![Some(CqlValue::Int(1))])));
        assert!(!applied(row(vec![None])));
        assert!(!applied(row(Vec::new())));
        assert!(!applied(None));
    }

    #[test]
    fn test_conditional_flag_per_statement_kind() {
        assert!(!InsertOptions::empty().is_conditional());
        assert!(InsertOptions::builder().with_if_not_exists().build().is_conditional());

        assert!(!UpdateOptions::empty().is_conditional());
        assert!(UpdateOptions::builder().with_if_exists().build().is_conditional());

        let condition = Criteria::column("status").unwrap().is("RTB");
        assert!(!DeleteOptions::empty().is_conditional());
        assert!(DeleteOptions::builder().if_condition(condition).unwrap().build().is_conditional());
    }

    #[test]
    fn test_prepare_write_layers_defaults_under_options() {
        let defaults = QueryOptions::builder()
            .consistency_level(ConsistencyLevel::Quorum)
            .timeout(Duration::from_secs(2))
            .build();
        let options = DeleteOptions::builder()
            .consistency_level(ConsistencyLevel::LocalOne)
            .timestamp_micros(42)
            .build();
        let table = CqlIdentifier::from_cql("drones").unwrap();
        let statement = cql::delete(&table, &by_id(Uuid::nil()), &options).unwrap();

        let query =
            prepare_write(&statement, &options, &defaults, &ExecutionProfileRegistry::new()).unwrap();

        assert_eq!(query.contents, statement.cql);
        assert_eq!(query.get_consistency(), Some(Consistency::LocalOne));
        assert_eq!(query.get_request_timeout(), Some(Duration::from_secs(2)));
        assert_eq!(query.get_timestamp(), Some(42));
    }

    #[test]
    fn test_prepare_read_resolves_profiles_from_both_layers() {
        let table = CqlIdentifier::from_cql("drones").unwrap();
        let statement = cql::select(&table, &Filter::default(), QueryOptions::empty()).unwrap();
        let defaults = QueryOptions::builder().execution_profile("oltp").unwrap().build();
        let per_call = QueryOptions::empty();

        let missing = prepare_read(&statement, per_call, &defaults, &ExecutionProfileRegistry::new());
        assert!(matches!(missing, Err(TemplateError::UnknownExecutionProfile(name)) if name == "oltp"));

        let mut profiles = ExecutionProfileRegistry::new();
        profiles.register("oltp", ExecutionProfile::builder().build());
        let query = tokio_test::assert_ok!(prepare_read(&statement, per_call, &defaults, &profiles));
        assert!(query.get_execution_profile_handle().is_some());
        assert_eq!(query.get_consistency(), None);
    }
}
