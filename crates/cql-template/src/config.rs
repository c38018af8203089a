//! # Template Configuration
//!
//! Environment-based configuration for the cluster connection, the
//! session-wide default options and named execution profiles.
//!
//! Profiles are listed in `CQL_PROFILES` and configured per name:
//!
//! ```text
//! CQL_PROFILES=analytics,oltp
//! CQL_PROFILE_ANALYTICS_CONSISTENCY=ONE
//! CQL_PROFILE_ANALYTICS_TIMEOUT_MS=30000
//! CQL_PROFILE_OLTP_CONSISTENCY=LOCAL_QUORUM
//! CQL_PROFILE_OLTP_SERIAL_CONSISTENCY=LOCAL_SERIAL
//! ```

use std::env;
use std::time::Duration;

use cql_options::{ConsistencyLevel, ExecutionProfileResolver, QueryOptions, QueryOptionsSetters};
use scylla::transport::execution_profile::ExecutionProfile;

use crate::error::{Result, TemplateError};
use crate::profile::ExecutionProfileRegistry;
use crate::statement::{to_consistency, to_serial_consistency};

/// ScyllaDB connection configuration
#[derive(Debug, Clone)]
pub struct ScyllaConfig {
    pub hosts: Vec<String>,
    /// Keyspace selected with `USE` after connecting
    pub keyspace: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for ScyllaConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["127.0.0.1:9042".to_string()],
            keyspace: None,
            username: None,
            password: None,
        }
    }
}

/// A named execution profile declared through the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    pub name: String,
    pub consistency: Option<ConsistencyLevel>,
    /// Always a serial level
    pub serial_consistency: Option<ConsistencyLevel>,
    pub timeout: Option<Duration>,
}

impl ProfileConfig {
    /// Driver profile with these settings; unset ones keep driver defaults.
    ///
    /// # Errors
    ///
    /// Fails when the serial consistency is not a serial level.
    pub fn to_execution_profile(&self) -> Result<ExecutionProfile> {
        let mut builder = ExecutionProfile::builder();
        if let Some(level) = self.consistency {
            builder = builder.consistency(to_consistency(level));
        }
        if let Some(level) = self.serial_consistency {
            builder = builder.serial_consistency(Some(to_serial_consistency(level)?));
        }
        if let Some(timeout) = self.timeout {
            builder = builder.request_timeout(Some(timeout));
        }
        Ok(builder.build())
    }
}

/// Full template configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub scylla: ScyllaConfig,

    /// Named execution profiles statements may select
    pub profiles: Vec<ProfileConfig>,

    /// Consistency applied when a statement does not set one
    pub default_consistency: Option<ConsistencyLevel>,

    /// Request timeout applied when a statement does not set one
    pub default_timeout: Option<Duration>,

    /// Logging level
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let hosts = lookup("SCYLLA_HOSTS")
            .unwrap_or_else(|| "127.0.0.1:9042".to_string())
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();

        if hosts.is_empty() {
            return Err(TemplateError::Config("SCYLLA_HOSTS lists no hosts".to_string()));
        }

        let default_consistency = lookup("CQL_DEFAULT_CONSISTENCY")
            .map(|v| v.parse::<ConsistencyLevel>())
            .transpose()?;

        let default_timeout = parse_timeout(&lookup, "CQL_DEFAULT_TIMEOUT_MS")?;

        let profiles = lookup("CQL_PROFILES")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| parse_profile(&lookup, name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            scylla: ScyllaConfig {
                hosts,
                keyspace: lookup("SCYLLA_KEYSPACE").filter(|k| !k.trim().is_empty()),
                username: lookup("SCYLLA_USERNAME"),
                password: lookup("SCYLLA_PASSWORD"),
            },
            profiles,
            default_consistency,
            default_timeout,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Options every statement falls back to.
    #[must_use]
    pub fn default_query_options(&self) -> QueryOptions {
        let mut builder = QueryOptions::builder();
        if let Some(level) = self.default_consistency {
            builder = builder.consistency_level(level);
        }
        if let Some(timeout) = self.default_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Registry holding every configured profile.
    ///
    /// # Errors
    ///
    /// Fails when a profile cannot be turned into a driver profile.
    pub fn execution_profiles(&self) -> Result<ExecutionProfileRegistry> {
        let mut registry = ExecutionProfileRegistry::new();
        for profile in &self.profiles {
            registry.register(profile.name.clone(), profile.to_execution_profile()?);
        }
        Ok(registry)
    }
}

fn parse_timeout(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    lookup(key)
        .map(|v| {
            v.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| TemplateError::Config(format!("{key}: {e}")))
        })
        .transpose()
}

fn parse_profile(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<ProfileConfig> {
    // validates the name the same way statements reference it
    ExecutionProfileResolver::named(name)?;

    let prefix = format!("CQL_PROFILE_{}", name.to_ascii_uppercase().replace('-', "_"));

    let consistency = lookup(&format!("{prefix}_CONSISTENCY"))
        .map(|v| v.parse::<ConsistencyLevel>())
        .transpose()?;

    let serial_consistency = lookup(&format!("{prefix}_SERIAL_CONSISTENCY"))
        .map(|v| v.parse::<ConsistencyLevel>())
        .transpose()?;
    if let Some(level) = serial_consistency.filter(|level| !level.is_serial()) {
        return Err(TemplateError::Config(format!(
            "{prefix}_SERIAL_CONSISTENCY: {level} is not a serial consistency level"
        )));
    }

    Ok(ProfileConfig {
        name: name.to_string(),
        consistency,
        serial_consistency,
        timeout: parse_timeout(lookup, &format!("{prefix}_TIMEOUT_MS"))?,
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scylla: ScyllaConfig::default(),
            profiles: Vec::new(),
            default_consistency: None,
            default_timeout: None,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cql_options::QueryOptionsAccess;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.scylla.hosts, vec!["127.0.0.1:9042".to_string()]);
        assert!(config.scylla.keyspace.is_none());
        assert_eq!(config.log_level, "info");
        assert_eq!(&config.default_query_options(), QueryOptions::empty());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_lookup(lookup_from(&[
            ("SCYLLA_HOSTS", "10.0.0.1:9042, 10.0.0.2:9042"),
            ("SCYLLA_KEYSPACE", "drone_ops"),
            ("SCYLLA_USERNAME", "cassandra"),
            ("SCYLLA_PASSWORD", "secret"),
            ("CQL_DEFAULT_CONSISTENCY", "local_quorum"),
            ("CQL_DEFAULT_TIMEOUT_MS", "1500"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.scylla.hosts.len(), 2);
        assert_eq!(config.scylla.keyspace.as_deref(), Some("drone_ops"));
        assert_eq!(config.scylla.username.as_deref(), Some("cassandra"));
        assert_eq!(config.log_level, "debug");

        let defaults = config.default_query_options();
        assert_eq!(defaults.consistency_level(), Some(ConsistencyLevel::LocalQuorum));
        assert_eq!(defaults.timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("CQL_DEFAULT_CONSISTENCY", "MOST")])),
            Err(TemplateError::Options(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("CQL_DEFAULT_TIMEOUT_MS", "soon")])),
            Err(TemplateError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("SCYLLA_HOSTS", " , ")])),
            Err(TemplateError::Config(_))
        ));
    }

    #[test]
    fn test_reads_execution_profiles() {
        let config = Config::from_lookup(lookup_from(&[
            ("CQL_PROFILES", "analytics, oltp-writes"),
            ("CQL_PROFILE_ANALYTICS_CONSISTENCY", "ONE"),
            ("CQL_PROFILE_ANALYTICS_TIMEOUT_MS", "30000"),
            ("CQL_PROFILE_OLTP_WRITES_CONSISTENCY", "LOCAL_QUORUM"),
            ("CQL_PROFILE_OLTP_WRITES_SERIAL_CONSISTENCY", "LOCAL_SERIAL"),
        ]))
        .unwrap();

        assert_eq!(
            config.profiles,
            vec![
                ProfileConfig {
                    name: "analytics".to_string(),
                    consistency: Some(ConsistencyLevel::One),
                    serial_consistency: None,
                    timeout: Some(Duration::from_secs(30)),
                },
                ProfileConfig {
                    name: "oltp-writes".to_string(),
                    consistency: Some(ConsistencyLevel::LocalQuorum),
                    serial_consistency: Some(ConsistencyLevel::LocalSerial),
                    timeout: None,
                },
            ]
        );

        let registry = config.execution_profiles().unwrap();
        assert!(registry.contains("analytics"));
        assert!(registry.contains("oltp-writes"));
        assert!(!registry.contains("reporting"));

        let resolved = registry.resolve(&ExecutionProfileResolver::named("oltp-writes").unwrap());
        assert!(resolved.unwrap().is_some());
    }

    #[test]
    fn test_no_profiles_by_default() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.profiles.is_empty());
        assert!(!config.execution_profiles().unwrap().contains("analytics"));
    }

    #[test]
    fn test_rejects_bad_profiles() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[
                ("CQL_PROFILES", "oltp"),
                ("CQL_PROFILE_OLTP_SERIAL_CONSISTENCY", "QUORUM"),
            ])),
            Err(TemplateError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[
                ("CQL_PROFILES", "oltp"),
                ("CQL_PROFILE_OLTP_TIMEOUT_MS", "-1"),
            ])),
            Err(TemplateError::Config(_))
        ));
    }
}
