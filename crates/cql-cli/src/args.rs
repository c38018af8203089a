//! Command-line arguments and their translation into options.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use cql_options::{
    ConditionalSetters, ConsistencyLevel, CqlIdentifier, Criteria, CriteriaDefinition,
    DeleteOptions, Filter, InsertOptions, QueryOptions, QueryOptionsSetters, UpdateOptions,
    Value, WriteOptionsSetters,
};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "cql-render")]
#[command(about = "Render CQL statements from typed options, optionally executing them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print the statement and options as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Execute against the cluster configured through SCYLLA_* variables
    #[arg(long, global = true)]
    pub execute: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// SELECT * FROM table WHERE ...
    Select {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// INSERT INTO table (...) VALUES (...)
    Insert {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        write: WriteArgs,
        /// Column to write, as column=value (repeatable)
        #[arg(long = "set", value_name = "COLUMN=VALUE", required = true)]
        columns: Vec<String>,
        /// Apply IF NOT EXISTS
        #[arg(long)]
        if_not_exists: bool,
        /// Write null columns instead of omitting them
        #[arg(long)]
        insert_nulls: bool,
    },
    /// UPDATE table SET ... WHERE ...
    Update {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        write: WriteArgs,
        #[command(flatten)]
        condition: ConditionArgs,
        /// Assignment, as column=value (repeatable)
        #[arg(long = "set", value_name = "COLUMN=VALUE", required = true)]
        assignments: Vec<String>,
    },
    /// DELETE FROM table WHERE ...
    Delete {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        write: WriteArgs,
        #[command(flatten)]
        condition: ConditionArgs,
    },
}

/// Arguments shared by every statement kind
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Target table
    #[arg(short, long)]
    pub table: String,

    /// Keyspace used to qualify the table
    #[arg(short, long)]
    pub keyspace: Option<String>,

    /// WHERE predicate, as column=value (repeatable)
    #[arg(short = 'w', long = "where", value_name = "COLUMN=VALUE")]
    pub filter: Vec<String>,

    /// Consistency level, e.g. LOCAL_QUORUM
    #[arg(short, long)]
    pub consistency: Option<ConsistencyLevel>,

    /// Serial consistency level (SERIAL or LOCAL_SERIAL)
    #[arg(long)]
    pub serial_consistency: Option<ConsistencyLevel>,

    /// Request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<i32>,

    /// Named execution profile, declared through CQL_PROFILES
    #[arg(long)]
    pub profile: Option<String>,

    /// Request server-side tracing
    #[arg(long)]
    pub tracing: bool,

    /// Mark the statement idempotent
    #[arg(long)]
    pub idempotent: bool,
}

#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Time-to-live in seconds
    #[arg(long)]
    pub ttl_secs: Option<u32>,

    /// Write timestamp in microseconds since the epoch
    #[arg(long, conflicts_with = "timestamp")]
    pub timestamp_micros: Option<i64>,

    /// Write timestamp as RFC 3339
    #[arg(long)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub struct ConditionArgs {
    /// Apply IF EXISTS
    #[arg(long, conflicts_with = "condition")]
    pub if_exists: bool,

    /// IF condition, as column=value (repeatable)
    #[arg(long = "if", value_name = "COLUMN=VALUE")]
    pub condition: Vec<String>,
}

impl CommonArgs {
    pub fn table(&self) -> Result<CqlIdentifier> {
        Ok(CqlIdentifier::from_cql(&self.table)?)
    }

    pub fn filter(&self) -> Result<Filter> {
        parse_filter(&self.filter)
    }

    /// Apply the shared settings to any options builder.
    pub fn apply<B: QueryOptionsSetters>(&self, mut builder: B) -> Result<B> {
        if let Some(keyspace) = &self.keyspace {
            builder = builder.keyspace(CqlIdentifier::from_cql(keyspace)?);
        }
        if let Some(level) = self.consistency {
            builder = builder.consistency_level(level);
        }
        if let Some(level) = self.serial_consistency {
            builder = builder.serial_consistency_level(level)?;
        }
        if let Some(ms) = self.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(page_size) = self.page_size {
            builder = builder.page_size(page_size)?;
        }
        if let Some(profile) = &self.profile {
            builder = builder.execution_profile(profile)?;
        }
        if self.tracing {
            builder = builder.with_tracing();
        }
        if self.idempotent {
            builder = builder.idempotent(true);
        }
        Ok(builder)
    }

    pub fn query_options(&self) -> Result<QueryOptions> {
        Ok(self.apply(QueryOptions::builder())?.build())
    }
}

impl WriteArgs {
    pub fn apply<B: WriteOptionsSetters>(&self, mut builder: B) -> Result<B> {
        if let Some(ttl) = self.ttl_secs {
            builder = builder.ttl_secs(ttl)?;
        }
        if let Some(micros) = self.timestamp_micros {
            builder = builder.timestamp_micros(micros);
        }
        if let Some(ts) = self.timestamp {
            builder = builder.timestamp(ts);
        }
        Ok(builder)
    }
}

impl ConditionArgs {
    pub fn apply<B: ConditionalSetters>(&self, builder: B) -> Result<B> {
        if self.if_exists {
            return Ok(builder.with_if_exists());
        }
        if self.condition.is_empty() {
            return Ok(builder);
        }
        Ok(builder.if_condition(parse_filter(&self.condition)?)?)
    }
}

pub fn insert_options(
    common: &CommonArgs,
    write: &WriteArgs,
    if_not_exists: bool,
    insert_nulls: bool,
) -> Result<InsertOptions> {
    let builder = write.apply(common.apply(InsertOptions::builder())?)?;
    Ok(builder.if_not_exists(if_not_exists).insert_nulls(insert_nulls).build())
}

pub fn update_options(common: &CommonArgs, write: &WriteArgs, condition: &ConditionArgs) -> Result<UpdateOptions> {
    let builder = write.apply(common.apply(UpdateOptions::builder())?)?;
    Ok(condition.apply(builder)?.build())
}

pub fn delete_options(common: &CommonArgs, write: &WriteArgs, condition: &ConditionArgs) -> Result<DeleteOptions> {
    let builder = write.apply(common.apply(DeleteOptions::builder())?)?;
    Ok(condition.apply(builder)?.build())
}

// =============================================================================
// PARSING
// =============================================================================

/// Split `column=value` into an identifier and a typed value.
pub fn parse_pair(pair: &str) -> Result<(CqlIdentifier, Value)> {
    let Some((column, value)) = pair.split_once('=') else {
        bail!("expected COLUMN=VALUE, got '{pair}'");
    };
    let column = CqlIdentifier::from_cql(column).with_context(|| format!("in '{pair}'"))?;
    Ok((column, parse_value(value)))
}

pub fn parse_pairs(pairs: &[String]) -> Result<Vec<(CqlIdentifier, Value)>> {
    pairs.iter().map(|p| parse_pair(p)).collect()
}

fn parse_filter(pairs: &[String]) -> Result<Filter> {
    let criteria = parse_pairs(pairs)?
        .into_iter()
        .map(|(column, value)| -> CriteriaDefinition { Criteria::on(column).is(value) });
    Ok(Filter::from_criteria(criteria))
}

/// Infer a value's type from its text.
///
/// Single quotes force text: `'42'` is the string `42`.
pub fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();

    if let Some(text) = raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
        return Value::Text(text.to_string());
    }
    if raw.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if let Ok(b) = raw.parse::<bool>() {
        return Value::Boolean(b);
    }
    if let Ok(i) = raw.parse::<i32>() {
        return Value::Int(i);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::BigInt(i);
    }
    if let Ok(id) = Uuid::parse_str(raw) {
        return Value::Uuid(id);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Value::Timestamp(ts.with_timezone(&Utc));
    }

    Value::Text(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cql_options::{QueryOptionsAccess, WriteOptionsAccess};

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("42"), Value::Int(42));
        assert_eq!(parse_value("8589934592"), Value::BigInt(8_589_934_592));
        assert_eq!(parse_value("true"), Value::Boolean(true));
        assert_eq!(parse_value("NULL"), Value::Null);
        assert_eq!(parse_value("'42'"), Value::Text("42".into()));
        assert_eq!(parse_value("REAPER"), Value::Text("REAPER".into()));
        assert_eq!(parse_value(&Uuid::nil().to_string()), Value::Uuid(Uuid::nil()));
        assert!(matches!(parse_value("2024-01-01T00:00:00Z"), Value::Timestamp(_)));
    }

    #[test]
    fn test_parse_pair() {
        let (column, value) = parse_pair("Status=RTB").unwrap();
        assert_eq!(column.as_internal(), "status");
        assert_eq!(value, Value::Text("RTB".into()));
        assert!(parse_pair("status").is_err());
        assert!(parse_pair("1bad=x").is_err());
    }

    #[test]
    fn test_delete_command_builds_options() {
        let cli = Cli::try_parse_from([
            "cql-render",
            "delete",
            "--table",
            "drones",
            "--where",
            "drone_id=7",
            "--consistency",
            "LOCAL_QUORUM",
            "--timestamp-micros",
            "99",
            "--if",
            "status=RTB",
        ])
        .unwrap();

        let Command::Delete { common, write, condition } = cli.command else {
            panic!("expected delete");
        };
        let options = delete_options(&common, &write, &condition).unwrap();

        assert_eq!(options.consistency_level(), Some(ConsistencyLevel::LocalQuorum));
        assert_eq!(options.timestamp(), Some(99));
        assert!(!options.is_if_exists());
        assert_eq!(options.if_condition().map(Filter::len), Some(1));
        assert_eq!(common.filter().unwrap().len(), 1);
    }

    #[test]
    fn test_if_exists_conflicts_with_condition() {
        let parsed = Cli::try_parse_from([
            "cql-render",
            "delete",
            "--table",
            "drones",
            "--if-exists",
            "--if",
            "status=RTB",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serial_consistency_is_validated() {
        let cli = Cli::try_parse_from([
            "cql-render",
            "select",
            "--table",
            "drones",
            "--serial-consistency",
            "QUORUM",
        ])
        .unwrap();

        let Command::Select { common } = cli.command else {
            panic!("expected select");
        };
        assert!(common.query_options().is_err());
    }
}
