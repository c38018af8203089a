//! Conversion of bind values into driver values.

use cql_options::Value;
use scylla::frame::response::result::CqlValue;
use scylla::frame::value::CqlTimestamp;

/// Driver value for `value`; `None` binds `null`.
#[must_use]
pub fn to_cql_value(value: &Value) -> Option<CqlValue> {
    let cql = match value {
        Value::Null => return None,
        Value::Boolean(v) => CqlValue::Boolean(*v),
        Value::Int(v) => CqlValue::Int(*v),
        Value::BigInt(v) => CqlValue::BigInt(*v),
        Value::Text(v) => CqlValue::Text(v.clone()),
        Value::Uuid(v) => CqlValue::Uuid(*v),
        Value::Timestamp(v) => CqlValue::Timestamp(CqlTimestamp(v.timestamp_millis())),
        Value::Blob(v) => CqlValue::Blob(v.clone()),
        // null list elements are not representable; they are dropped
        Value::List(items) => CqlValue::List(items.iter().filter_map(to_cql_value).collect()),
    };
    Some(cql)
}

/// Bind values for a rendered statement, in marker order.
#[must_use]
pub fn to_bind_values(values: &[Value]) -> Vec<Option<CqlValue>> {
    values.iter().map(to_cql_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_scalar_conversion() {
        let id = Uuid::new_v4();
        assert_eq!(to_cql_value(&Value::Uuid(id)), Some(CqlValue::Uuid(id)));
        assert_eq!(to_cql_value(&Value::Int(7)), Some(CqlValue::Int(7)));
        assert_eq!(to_cql_value(&Value::Null), None);
    }

    #[test]
    fn test_timestamp_uses_millis() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(
            to_cql_value(&Value::Timestamp(ts)),
            Some(CqlValue::Timestamp(CqlTimestamp(1_704_067_201_000)))
        );
    }

    #[test]
    fn test_list_drops_nulls() {
        let list = Value::List(vec![Value::Int(1), Value::Null, Value::Int(3)]);
        assert_eq!(
            to_bind_values(&[list, Value::Null]),
            vec![Some(CqlValue::List(vec![CqlValue::Int(1), CqlValue::Int(3)])), None]
        );
    }
}
