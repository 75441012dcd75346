//! Cache keys for the client store
//!
//! A client is cached per unique pair of configuration and bucket name.
//! The key owns its own copy of the configuration, so later mutation by the
//! caller cannot change an entry already in the cache.

use crate::config::S3Config;

/// Normalized `(configuration, bucket)` pair keying a cached client.
///
/// The bucket name is trimmed at construction; a blank name collapses to the
/// empty string. Two keys are equal when both the effective configuration
/// entries and the normalized bucket names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey {
    config: S3Config,
    bucket: String,
}

impl ClientKey {
    /// Build a key from a configuration and a raw bucket name.
    pub fn new(config: S3Config, bucket: &str) -> Self {
        Self {
            config,
            bucket: bucket.trim().to_string(),
        }
    }

    /// The configuration component.
    pub fn config(&self) -> &S3Config {
        &self.config
    }

    /// The normalized bucket name; empty when the raw name was blank.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}
