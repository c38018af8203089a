//! Write options for `INSERT` statements.

use once_cell::sync::Lazy;

use crate::query_options::{QueryOptions, QueryOptionsAccess, QueryOptionsSetters};
use crate::write_options::{WriteOptions, WriteOptionsAccess, WriteOptionsSetters};

static EMPTY: Lazy<InsertOptions> = Lazy::new(|| InsertOptions::builder().build());

/// Immutable options for `INSERT` statements
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InsertOptions {
    write: WriteOptions,
    if_not_exists: bool,
    insert_nulls: bool,
}

impl InsertOptions {
    #[must_use]
    pub fn builder() -> InsertOptionsBuilder {
        InsertOptionsBuilder::default()
    }

    #[must_use]
    pub fn empty() -> &'static Self {
        &EMPTY
    }

    #[must_use]
    pub fn mutate(&self) -> InsertOptionsBuilder {
        InsertOptionsBuilder {
            options: self.clone(),
        }
    }

    /// `true` to apply `IF NOT EXISTS`.
    #[must_use]
    pub const fn is_if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    /// `true` to write `null` columns, creating tombstones. Otherwise they
    /// are left out of the statement.
    #[must_use]
    pub const fn is_insert_nulls(&self) -> bool {
        self.insert_nulls
    }
}

impl QueryOptionsAccess for InsertOptions {
    fn query_options(&self) -> &QueryOptions {
        &self.write.query
    }
}

impl WriteOptionsAccess for InsertOptions {
    fn write_options(&self) -> &WriteOptions {
        &self.write
    }
}

/// Builder for [`InsertOptions`].
#[derive(Debug, Clone, Default)]
pub struct InsertOptionsBuilder {
    options: InsertOptions,
}

impl QueryOptionsSetters for InsertOptionsBuilder {
    fn query_options_mut(&mut self) -> &mut QueryOptions {
        &mut self.options.write.query
    }
}

impl WriteOptionsSetters for InsertOptionsBuilder {
    fn write_options_mut(&mut self) -> &mut WriteOptions {
        &mut self.options.write
    }
}

impl InsertOptionsBuilder {
    #[must_use]
    pub fn if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.options.if_not_exists = if_not_exists;
        self
    }

    #[must_use]
    pub fn with_if_not_exists(self) -> Self {
        self.if_not_exists(true)
    }

    #[must_use]
    pub fn insert_nulls(mut self, insert_nulls: bool) -> Self {
        self.options.insert_nulls = insert_nulls;
        self
    }

    #[must_use]
    pub fn with_insert_nulls(self) -> Self {
        self.insert_nulls(true)
    }

    #[must_use]
    pub fn build(self) -> InsertOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consistency::ConsistencyLevel;

    #[test]
    fn test_defaults() {
        let options = InsertOptions::empty();
        assert!(!options.is_if_not_exists());
        assert!(!options.is_insert_nulls());
        assert_eq!(options.ttl(), None);
    }

    #[test]
    fn test_builder_and_mutate() {
        let options = InsertOptions::builder()
            .consistency_level(ConsistencyLevel::LocalOne)
            .with_if_not_exists()
            .with_insert_nulls()
            .ttl_secs(3_600)
            .unwrap()
            .build();

        assert!(options.is_if_not_exists());
        assert!(options.is_insert_nulls());
        assert_eq!(options.ttl_secs(), Some(3_600));
        assert_eq!(options.mutate().build(), options);
        assert_ne!(options.mutate().if_not_exists(false).build(), options);
    }
}
