//! Lightweight-transaction conditions for `UPDATE` and `DELETE`.

use crate::error::{OptionsError, Result};
use crate::query::Filter;

/// Conditional-write mode.
///
/// `IF EXISTS` and `IF <condition>` cannot be combined; setting one replaces
/// the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum WriteCondition {
    #[default]
    None,
    /// `IF EXISTS`
    IfExists,
    /// `IF <filter>`
    If(Filter),
}

impl WriteCondition {
    #[must_use]
    pub const fn is_if_exists(&self) -> bool {
        matches!(self, Self::IfExists)
    }

    #[must_use]
    pub const fn filter(&self) -> Option<&Filter> {
        match self {
            Self::If(filter) => Some(filter),
            _ => None,
        }
    }

    /// Whether the statement is a lightweight transaction.
    #[must_use]
    pub const fn is_conditional(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Setters for builders whose statement accepts `IF EXISTS` / `IF ...`.
pub trait ConditionalSetters: Sized {
    #[doc(hidden)]
    fn condition_mut(&mut self) -> &mut WriteCondition;

    /// Apply `IF EXISTS`. Replaces a previous [`if_condition`](Self::if_condition).
    #[must_use]
    fn with_if_exists(self) -> Self {
        self.if_exists(true)
    }

    /// Toggle `IF EXISTS`. Either way any previous condition is cleared.
    #[must_use]
    fn if_exists(mut self, if_exists: bool) -> Self {
        *self.condition_mut() = if if_exists {
            WriteCondition::IfExists
        } else {
            WriteCondition::None
        };
        self
    }

    /// Apply `IF <condition>`. Accepts a [`Filter`] or a single
    /// [`CriteriaDefinition`](crate::query::CriteriaDefinition) and replaces a
    /// previous condition or `IF EXISTS`.
    ///
    /// # Errors
    ///
    /// Fails when the condition holds no criteria.
    fn if_condition(mut self, condition: impl Into<Filter>) -> Result<Self> {
        let filter = condition.into();
        if filter.is_empty() {
            return Err(OptionsError::EmptyCondition("Filter condition"));
        }
        *self.condition_mut() = WriteCondition::If(filter);
        Ok(self)
    }
}
