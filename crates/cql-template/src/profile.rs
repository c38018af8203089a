//! Named execution profiles resolved per statement.

use std::collections::HashMap;

use cql_options::ExecutionProfileResolver;
use scylla::transport::execution_profile::{ExecutionProfile, ExecutionProfileHandle};

use crate::error::{Result, TemplateError};

/// Execution profiles available to statements by name
#[derive(Debug, Clone, Default)]
pub struct ExecutionProfileRegistry {
    profiles: HashMap<String, ExecutionProfileHandle>,
}

impl ExecutionProfileRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `profile` under `name`, replacing an existing entry.
    pub fn register(&mut self, name: impl Into<String>, profile: ExecutionProfile) -> &mut Self {
        self.profiles.insert(name.into(), profile.into_handle());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ExecutionProfileHandle> {
        self.profiles.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Handle to attach to a statement. `None` keeps the session default.
    ///
    /// # Errors
    ///
    /// Fails when a named profile is not registered.
    pub fn resolve(&self, resolver: &ExecutionProfileResolver) -> Result<Option<ExecutionProfileHandle>> {
        match resolver {
            ExecutionProfileResolver::Default => Ok(None),
            ExecutionProfileResolver::Named(name) => self
                .profiles
                .get(name)
                .cloned()
                .map(Some)
                .ok_or_else(|| TemplateError::UnknownExecutionProfile(name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let mut registry = ExecutionProfileRegistry::new();
        registry.register("analytics", ExecutionProfile::builder().build());

        assert!(registry.contains("analytics"));
        assert!(registry.resolve(&ExecutionProfileResolver::Default).unwrap().is_none());
        assert!(registry
            .resolve(&ExecutionProfileResolver::Named("analytics".into()))
            .unwrap()
            .is_some());
        assert!(matches!(
            registry.resolve(&ExecutionProfileResolver::Named("oltp".into())),
            Err(TemplateError::UnknownExecutionProfile(name)) if name == "oltp"
        ));
    }
}
