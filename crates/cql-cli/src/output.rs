//! Printing rendered statements and their effective options.

use cql_options::{
    DeleteOptions, InsertOptions, QueryOptions, QueryOptionsAccess, UpdateOptions, Value,
    WriteCondition, WriteOptionsAccess,
};
use cql_template::Statement;
use serde_json::{json, Map, Value as Json};

/// Effective options as JSON fields, unset ones as `null`
pub trait OptionsFields {
    fn fields(&self) -> Map<String, Json>;
}

impl OptionsFields for QueryOptions {
    fn fields(&self) -> Map<String, Json> {
        query_fields(self)
    }
}

impl OptionsFields for InsertOptions {
    fn fields(&self) -> Map<String, Json> {
        let mut fields = write_fields(self);
        fields.insert("if_not_exists".into(), json!(self.is_if_not_exists()));
        fields.insert("insert_nulls".into(), json!(self.is_insert_nulls()));
        fields
    }
}

impl OptionsFields for UpdateOptions {
    fn fields(&self) -> Map<String, Json> {
        let mut fields = write_fields(self);
        fields.insert("condition".into(), condition_json(self.condition()));
        fields
    }
}

impl OptionsFields for DeleteOptions {
    fn fields(&self) -> Map<String, Json> {
        let mut fields = write_fields(self);
        fields.insert("condition".into(), condition_json(self.condition()));
        fields
    }
}

fn query_fields(options: &impl QueryOptionsAccess) -> Map<String, Json> {
    let mut fields = Map::new();
    fields.insert("keyspace".into(), json!(options.keyspace().map(|k| k.as_cql())));
    fields.insert("consistency".into(), json!(options.consistency_level()));
    fields.insert("serial_consistency".into(), json!(options.serial_consistency_level()));
    fields.insert(
        "timeout_ms".into(),
        json!(options.timeout().and_then(|t| u64::try_from(t.as_millis()).ok())),
    );
    fields.insert("page_size".into(), json!(options.page_size()));
    fields.insert("execution_profile".into(), json!(options.execution_profile().profile_name()));
    fields.insert("tracing".into(), json!(options.tracing()));
    fields.insert("idempotent".into(), json!(options.idempotent()));
    fields
}

fn write_fields(options: &impl WriteOptionsAccess) -> Map<String, Json> {
    let mut fields = query_fields(options);
    fields.insert("ttl_secs".into(), json!(options.ttl_secs()));
    fields.insert("timestamp_micros".into(), json!(options.timestamp()));
    fields
}

fn condition_json(condition: &WriteCondition) -> Json {
    match condition {
        WriteCondition::None => Json::Null,
        WriteCondition::IfExists => json!("IF EXISTS"),
        WriteCondition::If(filter) => json!({ "if": filter }),
    }
}

/// Print `statement` and the options that travel with it.
pub fn print_statement(statement: &Statement, options: &impl OptionsFields, as_json: bool) {
    let fields = options.fields();

    if as_json {
        let output = json!({
            "cql": statement.cql,
            "values": statement.values,
            "options": fields,
        });
        println!("{output:#}");
        return;
    }

    println!("{}", statement.cql);
    for (i, value) in statement.values.iter().enumerate() {
        println!("  ?{} = {}", i + 1, display_value(value));
    }
    for (name, value) in fields.iter().filter(|(_, v)| !v.is_null()) {
        match value {
            Json::String(text) => println!("  {name}: {text}"),
            other => println!("  {name}: {other}"),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Boolean(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::BigInt(v) => v.to_string(),
        Value::Text(v) => format!("'{v}'"),
        Value::Uuid(v) => v.to_string(),
        Value::Timestamp(v) => v.to_rfc3339(),
        Value::Blob(v) => format!("0x{}", v.iter().map(|b| format!("{b:02x}")).collect::<String>()),
        Value::List(items) => format!(
            "[{}]",
            items.iter().map(display_value).collect::<Vec<_>>().join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cql_options::{
        ConditionalSetters, ConsistencyLevel, CqlIdentifier, Criteria, QueryOptionsSetters,
        WriteOptionsSetters,
    };

    #[test]
    fn test_delete_fields_include_write_settings_and_condition() {
        let options = DeleteOptions::builder()
            .keyspace(CqlIdentifier::from_cql("drone_ops").unwrap())
            .consistency_level(ConsistencyLevel::LocalQuorum)
            .ttl_secs(60)
            .unwrap()
            .timestamp_micros(1_000)
            .if_condition(Criteria::column("status").unwrap().is("RTB"))
            .unwrap()
            .build();

        let fields = options.fields();
        assert_eq!(fields["keyspace"], json!("drone_ops"));
        assert_eq!(fields["consistency"], json!("LOCAL_QUORUM"));
        assert_eq!(fields["ttl_secs"], json!(60));
        assert_eq!(fields["timestamp_micros"], json!(1_000));
        assert_eq!(fields["condition"]["if"]["criteria"][0]["column"], json!("status"));
    }

    #[test]
    fn test_update_if_exists_and_insert_flags() {
        let update = UpdateOptions::builder().with_if_exists().build();
        assert_eq!(update.fields()["condition"], json!("IF EXISTS"));
        assert!(UpdateOptions::empty().fields()["condition"].is_null());

        let insert = InsertOptions::builder().with_if_not_exists().build();
        let fields = insert.fields();
        assert_eq!(fields["if_not_exists"], json!(true));
        assert_eq!(fields["insert_nulls"], json!(false));
        assert!(fields["ttl_secs"].is_null());
    }

    #[test]
    fn test_select_fields_have_no_write_settings() {
        let fields = QueryOptions::builder().page_size(100).unwrap().build().fields();
        assert_eq!(fields["page_size"], json!(100));
        assert!(!fields.contains_key("ttl_secs"));
        assert!(!fields.contains_key("condition"));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&Value::Blob(vec![0xca_u8, 0xfe])), "0xcafe");
        assert_eq!(
            display_value(&Value::List(vec![Value::Int(1), Value::from("a")])),
            "[1, 'a']"
        );
    }
}
