//! # Query Criteria
//!
//! Column predicates used for `WHERE` clauses and lightweight-transaction
//! `IF` conditions.
//!
//! ```rust,ignore
//! use cql_options::query::{Criteria, Filter};
//!
//! let filter = Filter::from(Criteria::column("convoy_id")?.is(convoy_id))
//!     .and(Criteria::column("status")?.ne("ABORT"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::identifier::CqlIdentifier;

// =============================================================================
// VALUES
// =============================================================================

/// A bind value for a predicate or column assignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i32),
    BigInt(i64),
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Blob(Vec<u8>),
    List(Vec<Value>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::BigInt(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// =============================================================================
// PREDICATES
// =============================================================================

/// Comparison operators supported in `WHERE` and `IF` clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Contains,
    ContainsKey,
    Like,
    IsNotNull,
}

impl Operator {
    pub fn as_cql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::In => "IN",
            Self::Contains => "CONTAINS",
            Self::ContainsKey => "CONTAINS KEY",
            Self::Like => "LIKE",
            Self::IsNotNull => "IS NOT NULL",
        }
    }

    /// Whether the operator is followed by a bind value.
    #[must_use]
    pub const fn takes_value(&self) -> bool {
        !matches!(self, Self::IsNotNull)
    }
}

/// Operator plus its operand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    pub operator: Operator,
    pub value: Option<Value>,
}

impl Predicate {
    pub fn new(operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            operator,
            value: Some(value.into()),
        }
    }
}

/// A single column predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CriteriaDefinition {
    pub column: CqlIdentifier,
    pub predicate: Predicate,
}

/// Entry point for building [`CriteriaDefinition`]s.
pub struct Criteria;

impl Criteria {
    /// Start a predicate on `column` (parsed as CQL, so `"userId"` keeps case).
    pub fn column(column: &str) -> Result<CriteriaBuilder> {
        Ok(CriteriaBuilder {
            column: CqlIdentifier::from_cql(column)?,
        })
    }

    #[must_use]
    pub const fn on(column: CqlIdentifier) -> CriteriaBuilder {
        CriteriaBuilder { column }
    }
}

/// Completes a [`CriteriaDefinition`] for one column.
#[derive(Debug, Clone)]
pub struct CriteriaBuilder {
    column: CqlIdentifier,
}

impl CriteriaBuilder {
    fn with(self, operator: Operator, value: impl Into<Value>) -> CriteriaDefinition {
        CriteriaDefinition {
            column: self.column,
            predicate: Predicate::new(operator, value),
        }
    }

    pub fn is(self, value: impl Into<Value>) -> CriteriaDefinition {
        self.with(Operator::Eq, value)
    }

    pub fn ne(self, value: impl Into<Value>) -> CriteriaDefinition {
        self.with(Operator::Ne, value)
    }

    pub fn lt(self, value: impl Into<Value>) -> CriteriaDefinition {
        self.with(Operator::Lt, value)
    }

    pub fn lte(self, value: impl Into<Value>) -> CriteriaDefinition {
        self.with(Operator::Lte, value)
    }

    pub fn gt(self, value: impl Into<Value>) -> CriteriaDefinition {
        self.with(Operator::Gt, value)
    }

    pub fn gte(self, value: impl Into<Value>) -> CriteriaDefinition {
        self.with(Operator::Gte, value)
    }

    pub fn in_values<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> CriteriaDefinition {
        let list = values.into_iter().map(Into::into).collect();
        self.with(Operator::In, Value::List(list))
    }

    pub fn contains(self, value: impl Into<Value>) -> CriteriaDefinition {
        self.with(Operator::Contains, value)
    }

    pub fn contains_key(self, key: impl Into<Value>) -> CriteriaDefinition {
        self.with(Operator::ContainsKey, key)
    }

    pub fn like(self, pattern: impl Into<Value>) -> CriteriaDefinition {
        self.with(Operator::Like, pattern)
    }

    #[must_use]
    pub fn is_not_null(self) -> CriteriaDefinition {
        CriteriaDefinition {
            column: self.column,
            predicate: Predicate {
                operator: Operator::IsNotNull,
                value: None,
            },
        }
    }
}

// =============================================================================
// FILTER
// =============================================================================

/// Ordered conjunction of criteria
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    criteria: Vec<CriteriaDefinition>,
}

impl Filter {
    pub fn from_criteria(criteria: impl IntoIterator<Item = CriteriaDefinition>) -> Self {
        Self {
            criteria: criteria.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn and(mut self, criteria: CriteriaDefinition) -> Self {
        self.criteria.push(criteria);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CriteriaDefinition> {
        self.criteria.iter()
    }
}

impl From<CriteriaDefinition> for Filter {
    fn from(criteria: CriteriaDefinition) -> Self {
        Self {
            criteria: vec![criteria],
        }
    }
}

impl FromIterator<CriteriaDefinition> for Filter {
    fn from_iter<I: IntoIterator<Item = CriteriaDefinition>>(iter: I) -> Self {
        Self::from_criteria(iter)
    }
}

impl<'a> IntoIterator for &'a Filter {
    type Item = &'a CriteriaDefinition;
    type IntoIter = std::slice::Iter<'a, CriteriaDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_builder() {
        let id = Uuid::new_v4();
        let criteria = Criteria::column("convoy_id").unwrap().is(id);

        assert_eq!(criteria.column.as_internal(), "convoy_id");
        assert_eq!(criteria.predicate.operator, Operator::Eq);
        assert_eq!(criteria.predicate.value, Some(Value::Uuid(id)));
    }

    #[test]
    fn test_in_values_builds_list() {
        let criteria = Criteria::column("rank").unwrap().in_values([1, 2, 3]);
        assert_eq!(
            criteria.predicate.value,
            Some(Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
        );
    }

    #[test]
    fn test_is_not_null_has_no_value() {
        let criteria = Criteria::column("callsign").unwrap().is_not_null();
        assert!(criteria.predicate.value.is_none());
        assert!(!criteria.predicate.operator.takes_value());
    }

    #[test]
    fn test_filter_order_and_equality() {
        let a = Criteria::column("a").unwrap().is(1);
        let b = Criteria::column("b").unwrap().gt(2);

        let left = Filter::from(a.clone()).and(b.clone());
        let right: Filter = vec![a.clone(), b.clone()].into_iter().collect();
        let reversed = Filter::from_criteria([b, a]);

        assert_eq!(left, right);
        assert_ne!(left, reversed);
        assert_eq!(left.len(), 2);
    }

    #[test]
    fn test_option_value_maps_none_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn test_value_json_shape() {
        let json = serde_json::to_string(&Value::BigInt(7)).unwrap();
        assert_eq!(json, r#"{"type":"big_int","value":7}"#);
    }
}
