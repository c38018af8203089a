//! Options validation errors

use thiserror::Error;

/// Errors raised while configuring options.
///
/// All of them are configuration-time failures: a builder setter rejects its
/// argument and nothing is sent to the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("Invalid CQL identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: String },

    #[error("Invalid argument for {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("Unknown consistency level: {0}")]
    UnknownConsistencyLevel(String),

    #[error("{0} is not a serial consistency level")]
    NotSerialConsistency(String),

    #[error("{0} must not be empty")]
    EmptyCondition(&'static str),
}

impl OptionsError {
    pub(crate) fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OptionsError>;
