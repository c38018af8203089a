//! CQL identifiers for keyspaces, tables and columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, Result};

/// A keyspace, table or column name.
///
/// Stored in its internal (case-sensitive, unquoted) form. Unquoted CQL input
/// is case-folded to lower case the same way the server does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CqlIdentifier(String);

impl CqlIdentifier {
    /// Parse an identifier as it would appear in a CQL statement.
    ///
    /// `Users` becomes `users`, `"Users"` stays `Users`.
    pub fn from_cql(cql: &str) -> Result<Self> {
        let cql = cql.trim();
        if cql.is_empty() {
            return Err(invalid(cql, "identifier must not be empty"));
        }

        if let Some(inner) = cql.strip_prefix('"') {
            let Some(inner) = inner.strip_suffix('"') else {
                return Err(invalid(cql, "unterminated quoted identifier"));
            };
            if inner.is_empty() {
                return Err(invalid(cql, "identifier must not be empty"));
            }
            // a lone quote inside must be doubled
            if inner.replace("\"\"", "").contains('"') {
                return Err(invalid(cql, "unescaped double quote"));
            }
            return Ok(Self(inner.replace("\"\"", "\"")));
        }

        let mut chars = cql.chars();
        let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid(
                cql,
                "unquoted identifiers must match [A-Za-z][A-Za-z0-9_]*",
            ));
        }

        Ok(Self(cql.to_ascii_lowercase()))
    }

    /// Use `name` verbatim (no case folding, no quote handling).
    pub fn from_internal(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(invalid(name, "identifier must not be empty"));
        }
        Ok(Self(name.to_string()))
    }

    #[must_use]
    pub fn as_internal(&self) -> &str {
        &self.0
    }

    /// Render for inclusion in a statement, quoting when required.
    ///
    /// Names that are not plain lower-case identifiers, and reserved
    /// keywords such as `order`, are double-quoted.
    #[must_use]
    pub fn as_cql(&self) -> String {
        if self.is_plain() {
            self.0.clone()
        } else {
            format!("\"{}\"", self.0.replace('"', "\"\""))
        }
    }

    fn is_plain(&self) -> bool {
        let mut chars = self.0.chars();
        chars.next().is_some_and(|c| c.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            && !is_reserved_keyword(&self.0)
    }
}

/// Reserved CQL keywords, lower case and sorted.
const RESERVED_KEYWORDS: &[&str] = &[
    "add", "allow", "alter", "and", "apply", "asc", "authorize", "batch", "begin", "by",
    "columnfamily", "create", "default", "delete", "desc", "describe", "drop", "entries",
    "execute", "from", "full", "grant", "if", "in", "index", "infinity", "insert", "into",
    "is", "keyspace", "limit", "materialized", "mbean", "mbeans", "modify", "nan",
    "norecursive", "not", "null", "of", "on", "or", "order", "primary", "rename", "replace",
    "revoke", "schema", "select", "set", "table", "to", "token", "truncate", "unlogged",
    "unset", "update", "use", "using", "view", "where", "with",
];

fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.binary_search(&name).is_ok()
}

fn invalid(name: &str, reason: &str) -> OptionsError {
    OptionsError::InvalidIdentifier {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for CqlIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_cql())
    }
}

impl FromStr for CqlIdentifier {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_cql(s)
    }
}

impl TryFrom<String> for CqlIdentifier {
    type Error = OptionsError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_internal(&value)
    }
}

impl From<CqlIdentifier> for String {
    fn from(id: CqlIdentifier) -> Self {
        id.0
    }
}
