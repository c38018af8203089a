//! # CQL Rendering
//!
//! Builds statement text with positional `?` markers from a table name,
//! criteria and options. Write options contribute `USING TTL` /
//! `USING TIMESTAMP`, conditional options contribute `IF ...` clauses.
//!
//! ```text
//! INSERT INTO ks.t (a, b) VALUES (?, ?) IF NOT EXISTS USING TTL 60 AND TIMESTAMP 1
//! UPDATE ks.t USING TTL 60 SET a = ? WHERE id = ? IF EXISTS
//! DELETE FROM ks.t USING TIMESTAMP 1 WHERE id = ? IF status = ?
//! ```

use cql_options::{
    CqlIdentifier, DeleteOptions, Filter, InsertOptions, QueryOptions, QueryOptionsAccess,
    UpdateOptions, Value, WriteCondition, WriteOptionsAccess,
};

use crate::error::{Result, TemplateError};

/// Rendered statement text plus its bind values in marker order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub cql: String,
    pub values: Vec<Value>,
}

/// `SELECT * FROM table [WHERE ...]`
///
/// # Errors
///
/// Fails when a predicate's value does not match its operator.
pub fn select(table: &CqlIdentifier, filter: &Filter, options: &QueryOptions) -> Result<Statement> {
    let mut values = Vec::new();
    let mut cql = format!("SELECT * FROM {}", qualified(table, options));

    if !filter.is_empty() {
        cql.push_str(" WHERE ");
        cql.push_str(&render_filter(filter, &mut values)?);
    }

    Ok(Statement { cql, values })
}

/// `INSERT INTO table (...) VALUES (...) [IF NOT EXISTS] [USING ...]`
///
/// # Errors
///
/// Fails when no column is left to insert.
pub fn insert(
    table: &CqlIdentifier,
    columns: &[(CqlIdentifier, Value)],
    options: &InsertOptions,
) -> Result<Statement> {
    let columns: Vec<_> = columns
        .iter()
        .filter(|(_, value)| options.is_insert_nulls() || !value.is_null())
        .collect();

    if columns.is_empty() {
        return Err(TemplateError::InvalidQuery(format!(
            "INSERT into {table} has no columns to write"
        )));
    }

    let names = columns
        .iter()
        .map(|(name, _)| name.as_cql())
        .collect::<Vec<_>>()
        .join(", ");
    let markers = vec!["?"; columns.len()].join(", ");
    let values = columns.iter().map(|(_, value)| value.clone()).collect();

    let mut cql = format!("INSERT INTO {} ({names}) VALUES ({markers})", qualified(table, options));

    if options.is_if_not_exists() {
        cql.push_str(" IF NOT EXISTS");
    }
    if let Some(using) = using_clause(options.ttl_secs(), options.timestamp()) {
        cql.push(' ');
        cql.push_str(&using);
    }

    Ok(Statement { cql, values })
}

/// `UPDATE table [USING ...] SET ... WHERE ... [IF ...]`
///
/// # Errors
///
/// Fails without assignments, without a `WHERE` filter, or when a
/// predicate's value does not match its operator.
pub fn update(
    table: &CqlIdentifier,
    assignments: &[(CqlIdentifier, Value)],
    filter: &Filter,
    options: &UpdateOptions,
) -> Result<Statement> {
    if assignments.is_empty() {
        return Err(TemplateError::InvalidQuery(format!(
            "UPDATE of {table} has no assignments"
        )));
    }
    require_where("UPDATE", table, filter)?;

    let mut values = Vec::new();
    let mut cql = format!("UPDATE {}", qualified(table, options));

    if let Some(using) = using_clause(options.ttl_secs(), options.timestamp()) {
        cql.push(' ');
        cql.push_str(&using);
    }

    let set = assignments
        .iter()
        .map(|(name, value)| {
            values.push(value.clone());
            format!("{} = ?", name.as_cql())
        })
        .collect::<Vec<_>>()
        .join(", ");
    cql.push_str(&format!(" SET {set} WHERE {}", render_filter(filter, &mut values)?));

    push_condition(&mut cql, options.condition(), &mut values)?;

    Ok(Statement { cql, values })
}

/// `DELETE FROM table [USING TIMESTAMP t] WHERE ... [IF ...]`
///
/// TTL does not apply to deletes and is not rendered.
///
/// # Errors
///
/// Fails without a `WHERE` filter, or when a predicate's value does not
/// match its operator.
pub fn delete(table: &CqlIdentifier, filter: &Filter, options: &DeleteOptions) -> Result<Statement> {
    require_where("DELETE", table, filter)?;

    let mut values = Vec::new();
    let mut cql = format!("DELETE FROM {}", qualified(table, options));

    if let Some(using) = using_clause(None, options.timestamp()) {
        cql.push(' ');
        cql.push_str(&using);
    }
    cql.push_str(" WHERE ");
    cql.push_str(&render_filter(filter, &mut values)?);

    push_condition(&mut cql, options.condition(), &mut values)?;

    Ok(Statement { cql, values })
}

// =============================================================================
// HELPERS
// =============================================================================

fn qualified(table: &CqlIdentifier, options: &impl QueryOptionsAccess) -> String {
    match options.keyspace() {
        Some(keyspace) => format!("{}.{}", keyspace.as_cql(), table.as_cql()),
        None => table.as_cql(),
    }
}

fn require_where(kind: &str, table: &CqlIdentifier, filter: &Filter) -> Result<()> {
    if filter.is_empty() {
        return Err(TemplateError::InvalidQuery(format!(
            "{kind} on {table} requires a WHERE filter"
        )));
    }
    Ok(())
}

fn render_filter(filter: &Filter, values: &mut Vec<Value>) -> Result<String> {
    let rendered = filter
        .iter()
        .map(|criteria| {
            let column = criteria.column.as_cql();
            let operator = criteria.predicate.operator;
            match (&criteria.predicate.value, operator.takes_value()) {
                (Some(value), true) => {
                    values.push(value.clone());
                    Ok(format!("{column} {} ?", operator.as_cql()))
                }
                (None, false) => Ok(format!("{column} {}", operator.as_cql())),
                (None, true) => Err(TemplateError::InvalidQuery(format!(
                    "{column} {} requires a value",
                    operator.as_cql()
                ))),
                (Some(_), false) => Err(TemplateError::InvalidQuery(format!(
                    "{column} {} takes no value",
                    operator.as_cql()
                ))),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(rendered.join(" AND "))
}

fn push_condition(cql: &mut String, condition: &WriteCondition, values: &mut Vec<Value>) -> Result<()> {
    match condition {
        WriteCondition::None => {}
        WriteCondition::IfExists => cql.push_str(" IF EXISTS"),
        WriteCondition::If(filter) => {
            cql.push_str(" IF ");
            cql.push_str(&render_filter(filter, values)?);
        }
    }
    Ok(())
}

fn using_clause(ttl_secs: Option<u64>, timestamp: Option<i64>) -> Option<String> {
    let mut parts = Vec::with_capacity(2);
    if let Some(ttl) = ttl_secs {
        parts.push(format!("TTL {ttl}"));
    }
    if let Some(ts) = timestamp {
        parts.push(format!("TIMESTAMP {ts}"));
    }
    (!parts.is_empty()).then(|| format!("USING {}", parts.join(" AND ")))
}
