//! Write options for `UPDATE` statements.

use once_cell::sync::Lazy;

use crate::condition::{ConditionalSetters, WriteCondition};
use crate::query::Filter;
use crate::query_options::{QueryOptions, QueryOptionsAccess, QueryOptionsSetters};
use crate::write_options::{WriteOptions, WriteOptionsAccess, WriteOptionsSetters};

static EMPTY: Lazy<UpdateOptions> = Lazy::new(|| UpdateOptions::builder().build());

/// Immutable options for `UPDATE` statements
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UpdateOptions {
    write: WriteOptions,
    condition: WriteCondition,
}

impl UpdateOptions {
    #[must_use]
    pub fn builder() -> UpdateOptionsBuilder {
        UpdateOptionsBuilder::default()
    }

    #[must_use]
    pub fn empty() -> &'static Self {
        &EMPTY
    }

    #[must_use]
    pub fn mutate(&self) -> UpdateOptionsBuilder {
        UpdateOptionsBuilder {
            options: self.clone(),
        }
    }

    #[must_use]
    pub const fn is_if_exists(&self) -> bool {
        self.condition.is_if_exists()
    }

    #[must_use]
    pub const fn if_condition(&self) -> Option<&Filter> {
        self.condition.filter()
    }

    #[must_use]
    pub const fn condition(&self) -> &WriteCondition {
        &self.condition
    }
}

impl QueryOptionsAccess for UpdateOptions {
    fn query_options(&self) -> &QueryOptions {
        &self.write.query
    }
}

impl WriteOptionsAccess for UpdateOptions {
    fn write_options(&self) -> &WriteOptions {
        &self.write
    }
}

/// Builder for [`UpdateOptions`].
#[derive(Debug, Clone, Default)]
pub struct UpdateOptionsBuilder {
    options: UpdateOptions,
}

impl QueryOptionsSetters for UpdateOptionsBuilder {
    fn query_options_mut(&mut self) -> &mut QueryOptions {
        &mut self.options.write.query
    }
}

impl WriteOptionsSetters for UpdateOptionsBuilder {
    fn write_options_mut(&mut self) -> &mut WriteOptions {
        &mut self.options.write
    }
}

impl ConditionalSetters for UpdateOptionsBuilder {
    fn condition_mut(&mut self) -> &mut WriteCondition {
        &mut self.options.condition
    }
}

impl UpdateOptionsBuilder {
    #[must_use]
    pub fn build(self) -> UpdateOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Criteria;

    #[test]
    fn test_condition_round_trip() {
        let condition = Filter::from(Criteria::column("fuel_pct").unwrap().gt(10))
            .and(Criteria::column("status").unwrap().is("AIRBORNE"));

        let options = UpdateOptions::builder()
            .ttl_secs(60)
            .unwrap()
            .if_condition(condition.clone())
            .unwrap()
            .build();

        assert_eq!(options.if_condition(), Some(&condition));
        assert!(!options.is_if_exists());
        assert_eq!(options.mutate().build(), options);
    }

    #[test]
    fn test_with_if_exists() {
        let options = UpdateOptions::builder().with_if_exists().build();
        assert!(options.is_if_exists());
        assert!(std::ptr::eq(UpdateOptions::empty(), UpdateOptions::empty()));
    }
}
