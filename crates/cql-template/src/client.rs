//! ScyllaDB session wrapper.

use scylla::{Session, SessionBuilder};

use crate::config::ScyllaConfig;
use crate::error::Result;

/// ScyllaDB client wrapper.
pub struct ScyllaClient {
    session: Session,
    pub config: ScyllaConfig,
}

impl ScyllaClient {
    /// Connect to the cluster and select the configured keyspace, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be opened or `USE` fails.
    pub async fn new(config: ScyllaConfig) -> Result<Self> {
        let mut builder = SessionBuilder::new().known_nodes(&config.hosts);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.user(user, pass);
        }

        let session = builder.build().await?;

        if let Some(keyspace) = &config.keyspace {
            session.use_keyspace(keyspace, false).await?;
        }

        tracing::info!(hosts = ?config.hosts, keyspace = ?config.keyspace, "Connected to ScyllaDB");

        Ok(Self { session, config })
    }

    /// Get session reference.
    pub const fn session(&self) -> &Session {
        &self.session
    }
}
