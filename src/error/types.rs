//! Configuration and client store error types

use thiserror::Error;

/// Errors raised while resolving configuration values.
///
/// These derive `Clone` and `PartialEq` so they can be returned through the
/// client cache's shared construction futures and asserted on directly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown configuration property: {0}")]
    UnknownProperty(String),

    #[error("Malformed value {value:?} for property {property}")]
    MalformedValue {
        property: &'static str,
        value: String,
    },
}

/// Errors raised while building or caching S3 clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Bucket name must not be blank")]
    InvalidBucketName,

    #[error("Cannot configure access key ({access_key:?}) without secret key ({secret_key:?}), or vice versa")]
    IncompleteCredentials {
        access_key: String,
        secret_key: String,
    },

    #[error("Client construction failed: {0}")]
    ClientBuild(String),
}
