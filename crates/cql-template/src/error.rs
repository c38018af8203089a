//! Template error types

use cql_options::OptionsError;
use thiserror::Error;

/// Errors raised while rendering, configuring or executing a statement
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("ScyllaDB error: {0}")]
    Scylla(String),

    #[error("Invalid options: {0}")]
    Options(#[from] OptionsError),

    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),

    #[error("Execution profile '{0}' is not registered")]
    UnknownExecutionProfile(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<scylla::transport::errors::NewSessionError> for TemplateError {
    fn from(err: scylla::transport::errors::NewSessionError) -> Self {
        Self::Scylla(err.to_string())
    }
}

impl From<scylla::transport::errors::QueryError> for TemplateError {
    fn from(err: scylla::transport::errors::QueryError) -> Self {
        Self::Scylla(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
