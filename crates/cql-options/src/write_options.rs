//! # Write Options
//!
//! Query options plus the mutation-only settings: time-to-live and write
//! timestamp.

use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use crate::error::{OptionsError, Result};
use crate::query_options::{QueryOptions, QueryOptionsAccess, QueryOptionsSetters};

/// Largest TTL the server accepts (20 years), in seconds.
pub const MAX_TTL_SECS: u32 = 630_720_000;

static EMPTY: Lazy<WriteOptions> = Lazy::new(|| WriteOptions::builder().build());

/// Immutable options for `INSERT`, `UPDATE` and `DELETE` statements
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WriteOptions {
    pub(crate) query: QueryOptions,
    pub(crate) ttl: Option<Duration>,
    pub(crate) timestamp: Option<i64>,
}

impl WriteOptions {
    #[must_use]
    pub fn builder() -> WriteOptionsBuilder {
        WriteOptionsBuilder::default()
    }

    /// Shared default instance.
    #[must_use]
    pub fn empty() -> &'static Self {
        &EMPTY
    }

    #[must_use]
    pub fn mutate(&self) -> WriteOptionsBuilder {
        WriteOptionsBuilder {
            options: self.clone(),
        }
    }
}

impl QueryOptionsAccess for WriteOptions {
    fn query_options(&self) -> &QueryOptions {
        &self.query
    }
}

// =============================================================================
// ACCESSORS
// =============================================================================

/// Read access to the write-level settings of any write options type.
pub trait WriteOptionsAccess: QueryOptionsAccess {
    fn write_options(&self) -> &WriteOptions;

    fn ttl(&self) -> Option<Duration> {
        self.write_options().ttl
    }

    /// TTL rounded down to whole seconds, as rendered in `USING TTL`.
    fn ttl_secs(&self) -> Option<u64> {
        self.write_options().ttl.map(|ttl| ttl.as_secs())
    }

    /// Write timestamp in microseconds since the epoch.
    fn timestamp(&self) -> Option<i64> {
        self.write_options().timestamp
    }
}

impl WriteOptionsAccess for WriteOptions {
    fn write_options(&self) -> &WriteOptions {
        self
    }
}

// =============================================================================
// SETTERS
// =============================================================================

/// Fluent write-level setters.
pub trait WriteOptionsSetters: QueryOptionsSetters {
    #[doc(hidden)]
    fn write_options_mut(&mut self) -> &mut WriteOptions;

    /// Expire written cells after `ttl`. Zero means "never expire".
    ///
    /// # Errors
    ///
    /// Fails when `ttl` exceeds [`MAX_TTL_SECS`].
    fn ttl(mut self, ttl: Duration) -> Result<Self> {
        if ttl.as_secs() > u64::from(MAX_TTL_SECS) {
            return Err(OptionsError::invalid_argument(
                "ttl",
                format!("must not exceed {MAX_TTL_SECS} seconds, got {}", ttl.as_secs()),
            ));
        }
        self.write_options_mut().ttl = Some(ttl);
        Ok(self)
    }

    /// # Errors
    ///
    /// Fails when `ttl_secs` exceeds [`MAX_TTL_SECS`].
    fn ttl_secs(self, ttl_secs: u32) -> Result<Self> {
        self.ttl(Duration::from_secs(u64::from(ttl_secs)))
    }

    #[must_use]
    fn timestamp_micros(mut self, timestamp: i64) -> Self {
        self.write_options_mut().timestamp = Some(timestamp);
        self
    }

    #[must_use]
    fn timestamp(self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp_micros(timestamp.timestamp_micros())
    }
}

/// Builder for [`WriteOptions`].
#[derive(Debug, Clone, Default)]
pub struct WriteOptionsBuilder {
    options: WriteOptions,
}

impl QueryOptionsSetters for WriteOptionsBuilder {
    fn query_options_mut(&mut self) -> &mut QueryOptions {
        &mut self.options.query
    }
}

impl WriteOptionsSetters for WriteOptionsBuilder {
    fn write_options_mut(&mut self) -> &mut WriteOptions {
        &mut self.options
    }
}

impl WriteOptionsBuilder {
    #[must_use]
    pub fn build(self) -> WriteOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consistency::ConsistencyLevel;
    use chrono::TimeZone;

    #[test]
    fn test_ttl_and_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let options = WriteOptions::builder()
            .consistency_level(ConsistencyLevel::Quorum)
            .ttl_secs(86_400)
            .unwrap()
            .timestamp(ts)
            .build();

        assert_eq!(options.consistency_level(), Some(ConsistencyLevel::Quorum));
        assert_eq!(options.ttl(), Some(Duration::from_secs(86_400)));
        assert_eq!(options.ttl_secs(), Some(86_400));
        assert_eq!(options.timestamp(), Some(1_704_067_200_000_000));
    }

    #[test]
    fn test_sub_second_ttl_rounds_down() {
        let options = WriteOptions::builder()
            .ttl(Duration::from_millis(2_500))
            .unwrap()
            .build();
        assert_eq!(options.ttl_secs(), Some(2));
    }

    #[test]
    fn test_zero_ttl_is_kept() {
        let options = WriteOptions::builder().ttl_secs(0).unwrap().build();
        assert_eq!(options.ttl(), Some(Duration::ZERO));
    }

    #[test]
    fn test_rejects_ttl_over_max() {
        assert!(matches!(
            WriteOptions::builder().ttl_secs(MAX_TTL_SECS + 1),
            Err(OptionsError::InvalidArgument { field: "ttl", .. })
        ));
    }

    #[test]
    fn test_equality_covers_query_fields() {
        let a = WriteOptions::builder().ttl_secs(10).unwrap().build();
        let b = a.mutate().with_tracing().build();

        assert_ne!(a, b);
        assert_eq!(a, a.mutate().build());
        assert!(std::ptr::eq(WriteOptions::empty(), WriteOptions::empty()));
    }
}
