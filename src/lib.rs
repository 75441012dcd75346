//! S3 client configuration and caching library
//!
//! Resolves S3 client settings from explicit values, environment variables,
//! and process properties with a fixed precedence, and memoizes expensive
//! client handles per `(configuration, bucket)` pair with an
//! at-most-one-construction guarantee under concurrent access.

// Public modules
pub mod config;
pub mod error;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigProperty, S3Config};
pub use error::{ConfigError, StoreError};
pub use store::ClientStore;
